//! Side panel UI: filter selection, parameters, and saving.

use super::super::thumbnails::FilterThumbnails;
use super::super::{APP_VERSION, TinctApp};
use super::icons;
use crate::image::{FilterKind, SKETCH_KERNEL_MAX, SKETCH_KERNEL_MIN, VIGNETTE_LEVEL_MAX};
use egui::{Color32, RichText, TextureId};

const THUMB_SIZE: f32 = 72.0;

impl TinctApp {
    pub(crate) fn ui_side_filters(&mut self, ui: &mut egui::Ui) {
        ui.heading("Filters");
        ui.separator();

        let has_image = self.image.image.is_some();
        ui.add_enabled_ui(has_image, |ui| {
            self.ui_filter_selector(ui);
            ui.add_space(6.0);
            self.ui_thumbnail_strip(ui);
            ui.separator();
            self.ui_filter_params(ui);
        });
        if !has_image {
            ui.label(RichText::new("Load an image to apply filters.").small());
        }

        ui.separator();
        self.ui_save_section(ui);

        let remaining = ui.available_height().max(0.0);
        if remaining > 24.0 {
            ui.add_space(remaining - 20.0);
        }
        ui.separator();
        ui.label(
            RichText::new(format!("Version {APP_VERSION}"))
                .small()
                .color(Color32::from_gray(160)),
        );
    }

    fn ui_filter_selector(&mut self, ui: &mut egui::Ui) {
        ui.label("Apply filter:")
            .on_hover_text("Choose the artistic filter for the loaded image");
        let mut kind = self.filter.kind;
        let combo = egui::ComboBox::from_id_salt("filter_kind_combo")
            .selected_text(kind.label())
            .show_ui(ui, |ui| {
                for variant in FilterKind::ALL {
                    ui.selectable_value(&mut kind, variant, variant.label());
                }
            });
        combo
            .response
            .on_hover_text("Selecting None shows the original untouched");
        self.set_filter_kind(kind);
    }

    fn ui_thumbnail_strip(&mut self, ui: &mut egui::Ui) {
        let entries: Vec<(FilterKind, Option<TextureId>)> = FilterThumbnails::strip_order()
            .map(|kind| (kind, self.thumbs.texture_for(kind).map(egui::TextureHandle::id)))
            .collect();
        ui.horizontal_wrapped(|ui| {
            for (kind, tex) in entries {
                ui.vertical(|ui| {
                    let selected = self.filter.kind == kind;
                    let mut clicked = match tex {
                        Some(id) => {
                            let image = egui::Image::new((id, egui::vec2(THUMB_SIZE, THUMB_SIZE)))
                                .sense(egui::Sense::click());
                            ui.add(image).on_hover_text(kind.label()).clicked()
                        }
                        None => ui
                            .label(RichText::new("No preview").weak())
                            .on_hover_text(kind.label())
                            .clicked(),
                    };
                    clicked |= ui
                        .selectable_label(selected, RichText::new(kind.label()).small())
                        .clicked();
                    if clicked {
                        self.set_filter_kind(kind);
                    }
                });
            }
        });
    }

    fn ui_filter_params(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;
        ui.spacing_mut().slider_width = 150.0;
        match self.filter.kind {
            FilterKind::None | FilterKind::BlackAndWhite | FilterKind::Sepia => {
                ui.label(RichText::new("This filter has no adjustable settings.").small());
            }
            FilterKind::Vignette => {
                changed |= ui
                    .add(
                        egui::Slider::new(
                            &mut self.filter.params.vignette_level,
                            0..=VIGNETTE_LEVEL_MAX,
                        )
                        .text("vignette level")
                        .clamping(egui::SliderClamping::Always),
                    )
                    .on_hover_text("Higher values darken the edges more strongly")
                    .changed();
            }
            FilterKind::PencilSketch => {
                changed |= ui
                    .add(
                        egui::Slider::new(
                            &mut self.filter.params.sketch_kernel,
                            SKETCH_KERNEL_MIN..=SKETCH_KERNEL_MAX,
                        )
                        .step_by(2.0)
                        .text("blur kernel size")
                        .clamping(egui::SliderClamping::Always),
                    )
                    .on_hover_text("Larger kernels give softer, broader strokes (odd values)")
                    .changed();
            }
        }
        if changed {
            self.mark_filter_dirty();
        }
    }

    fn ui_save_section(&mut self, ui: &mut egui::Ui) {
        let can_save = self.has_output();
        let hint = if can_save {
            "Save the filtered image as JPEG (Ctrl+S)"
        } else {
            "Apply a filter before saving"
        };
        let resp = ui
            .add_enabled(
                can_save,
                egui::Button::new(format!("{} Save output…", icons::ICON_EXPORT))
                    .shortcut_text("Ctrl+S"),
            )
            .on_hover_text(hint);
        if resp.clicked() {
            self.save_output_dialog();
        }
    }
}

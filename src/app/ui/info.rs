use super::super::TinctApp;
use crate::image::{FilterOutput, format_system_time, human_readable_bytes};
use egui::{Color32, RichText};

impl TinctApp {
    pub(crate) fn ui_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("Filter: {}", self.filter.kind.label()))
                    .small()
                    .color(Color32::from_gray(180)),
            );
            if let Some(msg) = &self.ui.last_status {
                ui.separator();
                ui.label(
                    RichText::new(msg.as_str())
                        .small()
                        .color(Color32::from_gray(200)),
                );
            }
        });
    }

    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn ui_image_info_window(&mut self, ctx: &egui::Context) {
        if !self.ui.info_window_open {
            return;
        }

        egui::Window::new("Image info")
            .open(&mut self.ui.info_window_open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                if let Some(image) = &self.image.image {
                    ui.heading("File");
                    if let Some(meta) = self.image.meta.as_ref() {
                        ui.label(format!("Source: {}", meta.source_label()));
                        ui.label(format!("Name: {}", meta.display_name()));
                        if let Some(path) = meta.path() {
                            ui.label(format!("Path: {}", path.display()));
                        }
                        if let Some(bytes) = meta.byte_len() {
                            ui.label(format!(
                                "Size: {} ({bytes} bytes)",
                                human_readable_bytes(bytes),
                            ));
                        } else {
                            ui.label("Size: Unknown");
                        }
                        if let Some(modified) = meta.last_modified() {
                            ui.label(format!("Modified: {}", format_system_time(modified)));
                        } else {
                            ui.label("Modified: Unknown");
                        }
                    } else {
                        ui.label("No captured file metadata for this image.");
                    }

                    ui.add_space(6.0);
                    ui.heading("Image");
                    let [w, h] = image.size;
                    ui.label(format!("Dimensions: {w} × {h} px"));
                    let total_pixels = w.saturating_mul(h) as u64;
                    ui.label(format!(
                        "Pixels: {total_pixels} ({:.2} MP)",
                        total_pixels as f64 / 1_000_000.0
                    ));
                    let rgb_bytes = total_pixels.saturating_mul(3);
                    ui.label(format!(
                        "RGB memory estimate: {} ({rgb_bytes} bytes)",
                        human_readable_bytes(rgb_bytes),
                    ));

                    ui.add_space(6.0);
                    ui.heading("Output");
                    ui.label(format!("Filter: {}", self.filter.kind.label()));
                    if let Some(output) = self.filter.output.as_ref() {
                        let (ow, oh) = output.dimensions();
                        ui.label(format!("Dimensions: {ow} × {oh} px"));
                        let mode = match output {
                            FilterOutput::Color(_) => "Color (RGB)",
                            FilterOutput::Gray(_) => "Grayscale",
                        };
                        ui.label(format!("Mode: {mode}"));
                    } else {
                        ui.label(RichText::new("No filtered output yet.").weak());
                    }
                } else {
                    ui.label("Load an image to inspect its metadata.");
                }
            });
    }
}

//! Main egui/eframe application state and UI orchestration.

use crate::config::AppConfig;
use crate::image::{
    FilterKind, FilterOutput, FilterParams, ImageMeta, LoadedImage, apply_filter,
    color_image_from_output,
};
use egui::{Context, Key, TextureHandle, TextureOptions};
use egui_file_dialog::{DialogState, FileDialog};
use std::path::{Path, PathBuf};

mod clipboard;
mod exporting;
mod image_loader;
mod thumbnails;
mod ui;

use exporting::{ExportPayload, PendingExportTask};
use image_loader::PendingImageTask;
use thumbnails::FilterThumbnails;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decoded original image plus its provenance and any in-flight load.
struct ImageState {
    image: Option<LoadedImage>,
    meta: Option<ImageMeta>,
    pending_task: Option<PendingImageTask>,
}

/// Current filter selection and its recomputed output.
struct FilterState {
    kind: FilterKind,
    params: FilterParams,
    output: Option<FilterOutput>,
    texture: Option<TextureHandle>,
    dirty: bool,
}

struct UiState {
    side_open: bool,
    info_window_open: bool,
    last_status: Option<String>,
}

#[derive(Debug)]
enum NativeDialog {
    Open(FileDialog),
    SaveJpeg {
        dialog: FileDialog,
        payload: ExportPayload,
    },
}

/// Top-level application state for the Tinct UI.
pub struct TinctApp {
    image: ImageState,
    filter: FilterState,
    ui: UiState,
    thumbs: FilterThumbnails,
    active_dialog: Option<NativeDialog>,
    pending_export: Option<PendingExportTask>,
    last_image_dir: Option<PathBuf>,
    last_export_dir: Option<PathBuf>,
    config: AppConfig,
}

impl TinctApp {
    /// Create the app, load thumbnails, and optionally queue an initial
    /// image load from the command line.
    pub fn new_with_initial_path(ctx: &Context, initial_path: Option<&Path>) -> Self {
        let config = AppConfig::load();
        let thumbs = FilterThumbnails::load(ctx, &config);
        let mut app = Self {
            image: ImageState {
                image: None,
                meta: None,
                pending_task: None,
            },
            filter: FilterState {
                kind: FilterKind::None,
                params: FilterParams::default(),
                output: None,
                texture: None,
                dirty: false,
            },
            ui: UiState {
                side_open: true,
                info_window_open: false,
                last_status: None,
            },
            thumbs,
            active_dialog: None,
            pending_export: None,
            last_image_dir: None,
            last_export_dir: None,
            config,
        };
        if let Some(p) = initial_path {
            app.remember_image_dir_from_path(p);
            app.start_loading_image_from_path(p.to_owned());
        }
        app
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.ui.last_status = Some(msg.into());
    }

    fn set_loaded_image(&mut self, image: LoadedImage, meta: Option<ImageMeta>) {
        self.image.image = Some(image);
        self.image.meta = meta;
        self.filter.output = None;
        self.filter.texture = None;
        self.filter.dirty = true;
    }

    fn set_filter_kind(&mut self, kind: FilterKind) {
        if self.filter.kind != kind {
            self.filter.kind = kind;
            self.mark_filter_dirty();
        }
    }

    const fn mark_filter_dirty(&mut self) {
        self.filter.dirty = true;
    }

    const fn has_output(&self) -> bool {
        self.filter.output.is_some()
    }

    /// Recompute the filtered output from the stored original. Each call is
    /// a full, independent recomputation; nothing is cached across inputs.
    fn refresh_filter_output(&mut self, ctx: &Context) {
        if !self.filter.dirty {
            return;
        }
        self.filter.dirty = false;
        let Some(img) = self.image.image.as_ref() else {
            self.filter.output = None;
            self.filter.texture = None;
            return;
        };
        self.filter.params = self.filter.params.sanitized();
        match apply_filter(&img.pixels, self.filter.kind, self.filter.params) {
            Some(output) => {
                let color = color_image_from_output(&output);
                if let Some(texture) = self.filter.texture.as_mut() {
                    texture.set(color, TextureOptions::LINEAR);
                } else {
                    self.filter.texture =
                        Some(ctx.load_texture("filter_output", color, TextureOptions::LINEAR));
                }
                self.filter.output = Some(output);
            }
            None => {
                self.filter.output = None;
                self.filter.texture = None;
            }
        }
    }

    fn handle_hotkeys(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        // Ctrl/Cmd + B: toggle side panel
        if ctx.input(|i| i.key_pressed(Key::B) && i.modifiers.command) {
            self.ui.side_open = !self.ui.side_open;
        }
        // Ctrl/Cmd + O: open image
        if self.active_dialog.is_none()
            && ctx.input(|i| i.key_pressed(Key::O) && i.modifiers.command)
        {
            self.open_image_dialog();
        }
        // Ctrl/Cmd + V: paste image from clipboard
        if self.active_dialog.is_none()
            && ctx.input(|i| i.key_pressed(Key::V) && i.modifiers.command)
        {
            self.paste_image_from_clipboard(ctx);
        }
        // Ctrl/Cmd + S: save filtered output
        if self.active_dialog.is_none()
            && self.has_output()
            && ctx.input(|i| i.key_pressed(Key::S) && i.modifiers.command)
        {
            self.save_output_dialog();
        }
        // Ctrl/Cmd + I: show image info
        if self.active_dialog.is_none()
            && self.image.image.is_some()
            && ctx.input(|i| i.key_pressed(Key::I) && i.modifiers.command)
        {
            self.ui.info_window_open = true;
        }
    }

    fn update_dialogs(&mut self, ctx: &Context) {
        let Some(mut dialog_state) = self.active_dialog.take() else {
            return;
        };
        let mut keep_open = true;
        match &mut dialog_state {
            NativeDialog::Open(dialog) => {
                dialog.update(ctx);
                if let Some(path) = dialog.take_picked() {
                    self.start_loading_image_from_path(path);
                    keep_open = false;
                } else {
                    match dialog.state() {
                        DialogState::Cancelled => {
                            self.set_status("Open canceled.");
                            keep_open = false;
                        }
                        DialogState::Closed => keep_open = false,
                        _ => {}
                    }
                }
            }
            NativeDialog::SaveJpeg { dialog, payload } => {
                dialog.update(ctx);
                if let Some(path) = dialog.take_picked() {
                    let payload = payload.clone();
                    self.last_export_dir = path.parent().map(Path::to_path_buf);
                    self.start_export_job(path, payload);
                    keep_open = false;
                } else {
                    match dialog.state() {
                        DialogState::Cancelled => {
                            self.set_status("Save canceled.");
                            keep_open = false;
                        }
                        DialogState::Closed => keep_open = false,
                        _ => {}
                    }
                }
            }
        }
        if keep_open {
            self.active_dialog = Some(dialog_state);
        }
    }
}

impl eframe::App for TinctApp {
    // All UI is drawn via top-level panels in `update`, which eframe still
    // invokes alongside `ui`; the root `Ui` is unused.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    #[allow(deprecated)]
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader(ctx);
        self.poll_export_job();
        self.handle_hotkeys(ctx);
        self.refresh_filter_output(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| self.ui_top(ui));
        egui::SidePanel::right("side")
            .resizable(true)
            .default_width(300.0)
            .show_animated(ctx, self.ui.side_open, |ui| self.ui_side_filters(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.ui_central_preview(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.ui_status_bar(ui));
        self.ui_image_info_window(ctx);

        self.update_dialogs(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Modifiers, RawInput};
    use image::RgbImage;

    fn command_key(key: Key) -> RawInput {
        RawInput {
            events: vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: Modifiers::COMMAND,
            }],
            modifiers: Modifiers::COMMAND,
            ..Default::default()
        }
    }

    #[test]
    fn info_hotkey_is_ignored_while_a_dialog_is_open() {
        let ctx = Context::default();
        let mut app = TinctApp::new_with_initial_path(&ctx, None);
        app.image.image = Some(LoadedImage::from_rgb(
            &ctx,
            RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30])),
        ));

        app.active_dialog = Some(NativeDialog::Open(FileDialog::new()));
        let _ = ctx.run(command_key(Key::I), |ctx| app.handle_hotkeys(ctx));
        assert!(!app.ui.info_window_open);

        app.active_dialog = None;
        let _ = ctx.run(command_key(Key::I), |ctx| app.handle_hotkeys(ctx));
        assert!(app.ui.info_window_open);
    }
}

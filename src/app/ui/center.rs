use super::super::TinctApp;
use egui::RichText;

impl TinctApp {
    pub(crate) fn ui_central_preview(&mut self, ui: &mut egui::Ui) {
        // Handle drag & drop regardless of whether an image is already loaded
        self.handle_dropped_files(ui);

        let Some((original_id, original_size)) = self
            .image
            .image
            .as_ref()
            .map(|img| (img.texture.id(), img.size))
        else {
            ui.centered_and_justified(|ui| {
                if self.image.pending_task.is_some() {
                    ui.label("Loading image…");
                } else {
                    ui.label("Drop an image here or use Open image…");
                }
            });
            return;
        };

        let output = self
            .filter
            .texture
            .as_ref()
            .zip(self.filter.output.as_ref())
            .map(|(tex, out)| (tex.id(), dims_to_vec2(out.dimensions())));

        ui.columns(2, |columns| {
            columns[0].vertical_centered(|ui| {
                ui.label(RichText::new("Original").strong());
                show_fitted_texture(ui, original_id, size_to_vec2(original_size));
            });
            columns[1].vertical_centered(|ui| {
                ui.label(RichText::new("Output").strong());
                if let Some((id, base)) = output {
                    show_fitted_texture(ui, id, base);
                } else {
                    ui.add_space(24.0);
                    ui.label(RichText::new("Choose a filter to see the result.").weak());
                }
            });
        });
    }

    fn handle_dropped_files(&mut self, ui: &egui::Ui) {
        let dropped_files = ui.input(|i| i.raw.dropped_files.clone());
        if dropped_files.is_empty() {
            return;
        }
        let mut loaded = false;
        for f in &dropped_files {
            if let Some(path) = &f.path {
                self.start_loading_image_from_path(path.clone());
                loaded = true;
                break;
            }
            if let Some(bytes) = &f.bytes {
                self.start_loading_image_from_bytes(
                    (!f.name.is_empty()).then(|| f.name.clone()),
                    bytes.to_vec(),
                    f.last_modified,
                );
                loaded = true;
                break;
            }
        }
        if !loaded {
            self.set_status("Drop failed: no readable bytes/path");
        }
    }
}

fn show_fitted_texture(ui: &mut egui::Ui, id: egui::TextureId, base: egui::Vec2) {
    let avail = ui.available_size();
    let scale = (avail.x / base.x).min(avail.y / base.y).min(1.0).max(0.0);
    ui.add(egui::Image::new((id, base * scale)));
}

#[allow(clippy::cast_precision_loss)]
fn size_to_vec2(size: [usize; 2]) -> egui::Vec2 {
    egui::vec2(size[0] as f32, size[1] as f32)
}

#[allow(clippy::cast_precision_loss)]
fn dims_to_vec2((w, h): (u32, u32)) -> egui::Vec2 {
    egui::vec2(w as f32, h as f32)
}

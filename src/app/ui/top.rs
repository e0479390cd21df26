use super::super::TinctApp;
use super::icons;

impl TinctApp {
    pub(crate) fn ui_top(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            // Use egui's built-in theme toggle so icon matches current mode.
            egui::widgets::global_theme_preference_switch(ui);
            ui.separator();

            let has_image = self.image.image.is_some();
            self.ui_file_menu(ui);
            ui.separator();

            self.ui_side_toggle(ui);
            ui.separator();

            let info_resp = ui
                .add_enabled(
                    has_image,
                    egui::Button::new(format!("{} Image info", icons::ICON_INFO))
                        .shortcut_text("Ctrl+I"),
                )
                .on_hover_text("Show file & image details (Ctrl+I)");
            if info_resp.clicked() && has_image {
                self.ui.info_window_open = true;
            }
        });
    }

    fn ui_file_menu(&mut self, ui: &mut egui::Ui) {
        let can_save = self.has_output();
        ui.menu_button(format!("{} File", icons::ICON_MENU), |ui| {
            if ui
                .add(egui::Button::new("Open image…").shortcut_text("Ctrl+O"))
                .on_hover_text("Open an image (Ctrl+O). You can also drag & drop into the center.")
                .clicked()
            {
                self.open_image_dialog();
                ui.close();
            }

            if ui
                .add(egui::Button::new("Paste image").shortcut_text("Ctrl+V"))
                .on_hover_text("Paste image from clipboard (Ctrl+V)")
                .clicked()
            {
                self.paste_image_from_clipboard(ui.ctx());
                ui.close();
            }

            ui.separator();

            if ui
                .add_enabled(
                    can_save,
                    egui::Button::new(format!("{} Save output…", icons::ICON_EXPORT))
                        .shortcut_text("Ctrl+S"),
                )
                .on_hover_text("Save the filtered image as JPEG (Ctrl+S)")
                .clicked()
            {
                self.save_output_dialog();
                ui.close();
            }
        });
    }

    fn ui_side_toggle(&mut self, ui: &mut egui::Ui) {
        let side_label = if self.ui.side_open {
            "Hide filters"
        } else {
            "Show filters"
        };
        if ui
            .add(
                egui::Button::new(format!("{} {side_label}", icons::ICON_SIDE_TOGGLE))
                    .shortcut_text("Ctrl+B"),
            )
            .on_hover_text("Toggle the filter panel (Ctrl+B)")
            .clicked()
        {
            self.ui.side_open = !self.ui.side_open;
        }
    }
}

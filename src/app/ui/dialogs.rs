use super::super::exporting::ExportPayload;
use super::super::{NativeDialog, TinctApp};
use egui_file_dialog::FileDialog;
use std::path::Path;

impl TinctApp {
    pub(crate) fn open_image_dialog(&mut self) {
        let mut dialog = Self::make_open_dialog(self.last_image_dir.as_deref());
        dialog.pick_file();
        self.active_dialog = Some(NativeDialog::Open(dialog));
    }

    pub(crate) fn save_output_dialog(&mut self) {
        let Some(output) = self.filter.output.clone() else {
            self.set_status("Apply a filter before saving.");
            return;
        };
        let payload = ExportPayload {
            output,
            quality: self.config.effective_jpeg_quality(),
        };
        let mut dialog = Self::make_save_dialog(
            "Save output",
            "output.jpg",
            &["jpg", "jpeg"],
            self.last_export_dir.as_deref(),
        );
        dialog.save_file();
        self.active_dialog = Some(NativeDialog::SaveJpeg { dialog, payload });
    }

    fn make_open_dialog(initial_dir: Option<&Path>) -> FileDialog {
        // Keep in sync with enabled `image` crate features.
        // Add separate presets for frequent formats.
        let mut dialog = FileDialog::new()
            .title("Open image")
            // Combined filter
            .add_file_filter_extensions(
                "All images",
                vec![
                    "png", "jpg", "jpeg", "gif", "bmp", "webp", "ico", "tga", "tiff", "tif", "pnm",
                    "pbm", "pgm", "ppm", "hdr", "dds",
                ],
            )
            // Individual format presets
            .add_file_filter_extensions("PNG", vec!["png"])
            .add_file_filter_extensions("JPEG/JPG", vec!["jpg", "jpeg"])
            .add_file_filter_extensions("BMP", vec!["bmp"])
            .add_file_filter_extensions("TIFF", vec!["tiff", "tif"])
            .default_file_filter("All images");
        if let Some(dir) = initial_dir {
            dialog = dialog.initial_directory(dir.to_path_buf());
        }
        dialog
    }

    fn make_save_dialog(
        title: &str,
        default_name: &str,
        extensions: &[&str],
        initial_dir: Option<&Path>,
    ) -> FileDialog {
        let mut dialog = FileDialog::new()
            .title(title)
            .default_file_name(default_name);
        let mut first_label: Option<String> = None;
        for ext in extensions {
            let label = format!("*.{ext}");
            if first_label.is_none() {
                first_label = Some(label.clone());
            }
            dialog = dialog.add_save_extension(&label, ext);
        }
        if let Some(label) = first_label.as_deref() {
            dialog = dialog.default_save_extension(label);
        }
        if let Some(dir) = initial_dir {
            dialog = dialog.initial_directory(dir.to_path_buf());
        }
        dialog
    }
}

mod app;
mod config;
mod export;
mod image;

use app::TinctApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    let initial_image_path: Option<PathBuf> = std::env::args_os().nth(1).map(PathBuf::from);
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Tinct — Artistic Image Filters",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(TinctApp::new_with_initial_path(
                &cc.egui_ctx,
                initial_image_path.as_deref(),
            )))
        }),
    )
}

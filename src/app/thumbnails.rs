//! Optional static preview thumbnails for the filter strip.
//!
//! The files are purely cosmetic. Each candidate directory is checked in
//! order; a missing or undecodable file leaves the slot empty and the UI
//! shows a textual placeholder instead.

use crate::config::AppConfig;
use crate::image::{FilterKind, color_image_from_rgb, decode_image_from_path};
use egui::{Context, TextureHandle, TextureOptions};
use std::path::PathBuf;

const THUMB_FILES: [(FilterKind, &str); 4] = [
    (FilterKind::BlackAndWhite, "filter_bw.jpg"),
    (FilterKind::Sepia, "filter_sepia.jpg"),
    (FilterKind::Vignette, "filter_vignette.jpg"),
    (FilterKind::PencilSketch, "filter_pencil_sketch.jpg"),
];

pub(super) struct FilterThumbnails {
    textures: [Option<TextureHandle>; 4],
}

impl FilterThumbnails {
    pub fn load(ctx: &Context, cfg: &AppConfig) -> Self {
        Self::load_from_dirs(ctx, cfg, &cfg.thumbnail_candidate_dirs())
    }

    fn load_from_dirs(ctx: &Context, cfg: &AppConfig, dirs: &[PathBuf]) -> Self {
        let textures = THUMB_FILES.map(|(_, file)| {
            dirs.iter().find_map(|dir| {
                let path = dir.join(file);
                let pixels = decode_image_from_path(cfg, &path).ok()?;
                Some(ctx.load_texture(file, color_image_from_rgb(&pixels), TextureOptions::LINEAR))
            })
        });
        Self { textures }
    }

    /// Filters shown in the preview strip, in display order.
    pub fn strip_order() -> impl Iterator<Item = FilterKind> {
        THUMB_FILES.into_iter().map(|(kind, _)| kind)
    }

    pub fn texture_for(&self, kind: FilterKind) -> Option<&TextureHandle> {
        let idx = THUMB_FILES.iter().position(|(k, _)| *k == kind)?;
        self.textures[idx].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn missing_files_leave_slots_empty() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let dir = std::env::temp_dir().join(format!("tinct_thumbs_{nanos}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");

        let cfg = AppConfig::default();
        let ctx = Context::default();
        let thumbs = FilterThumbnails::load_from_dirs(&ctx, &cfg, std::slice::from_ref(&dir));
        for kind in FilterThumbnails::strip_order() {
            assert!(thumbs.texture_for(kind).is_none());
        }

        std::fs::remove_dir_all(&dir).expect("remove temp dir");
    }
}

use std::fs;
use std::path::PathBuf;

use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;

const CONFIG_FILE_NAME: &str = "tinct.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub image_limits: ImageLimits,
    /// JPEG quality used when saving filtered output, 1-100.
    pub jpeg_quality: u8,
    /// Optional directory holding the static filter-preview thumbnails.
    /// When unset, the conventional locations next to the executable and in
    /// the config directories are searched.
    pub thumbnail_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            image_limits: ImageLimits::default(),
            jpeg_quality: 90,
            thumbnail_dir: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        for path in Self::candidate_paths() {
            if let Ok(contents) = fs::read_to_string(&path) {
                match toml::from_str::<Self>(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        eprintln!("Failed to parse config {}: {err}", path.display());
                    }
                }
            }
        }
        Self::default()
    }

    pub fn effective_image_limits(&self) -> ImageLimits {
        self.image_limits.sanitized()
    }

    pub const fn effective_jpeg_quality(&self) -> u8 {
        let q = self.jpeg_quality;
        if q < 1 {
            1
        } else if q > 100 {
            100
        } else {
            q
        }
    }

    /// Directories searched for the optional preview thumbnails, in order.
    pub fn thumbnail_candidate_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(dir) = &self.thumbnail_dir {
            dirs.push(dir.clone());
        }
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(dir) = exe_path.parent()
        {
            dirs.push(dir.to_path_buf());
        }
        if let Some(proj_dirs) = ProjectDirs::from("dev", "Tinct", "Tinct") {
            dirs.push(proj_dirs.config_dir().to_path_buf());
        }
        dirs
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(exe_path) = std::env::current_exe()
            && let Some(dir) = exe_path.parent()
        {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }

        if let Some(proj_dirs) = ProjectDirs::from("dev", "Tinct", "Tinct") {
            paths.push(proj_dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        if let Some(base_dirs) = BaseDirs::new() {
            paths.push(base_dirs.config_dir().join("tinct").join(CONFIG_FILE_NAME));
        }

        paths
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageLimits {
    pub image_dim: u32,
    pub total_pixels: u64,
    pub alloc_bytes: u64,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            image_dim: 12_000,
            total_pixels: 80_000_000,       // ~80 MP
            alloc_bytes: 512 * 1024 * 1024, // 512 MiB
        }
    }
}

impl ImageLimits {
    pub fn sanitized(&self) -> Self {
        // Clamp to reasonable operating bounds to avoid pathological configs.
        let dim = self.image_dim.clamp(64, 100_000);
        let pixels = self.total_pixels.clamp(1_000_000, 5_000_000_000); // 1 MP .. 5 GP
        let alloc = self
            .alloc_bytes
            .clamp(8 * 1024 * 1024, 8 * 1024 * 1024 * 1024); // 8 MiB .. 8 GiB
        Self {
            image_dim: dim,
            total_pixels: pixels,
            alloc_bytes: alloc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpeg_quality_is_clamped() {
        let make = |q| AppConfig {
            jpeg_quality: q,
            ..AppConfig::default()
        };
        assert_eq!(make(0).effective_jpeg_quality(), 1);
        assert_eq!(make(255).effective_jpeg_quality(), 100);
        assert_eq!(make(85).effective_jpeg_quality(), 85);
    }

    #[test]
    fn image_limits_sanitize_extremes() {
        let limits = ImageLimits {
            image_dim: 1,
            total_pixels: 1,
            alloc_bytes: 1,
        }
        .sanitized();
        assert_eq!(limits.image_dim, 64);
        assert_eq!(limits.total_pixels, 1_000_000);
        assert_eq!(limits.alloc_bytes, 8 * 1024 * 1024);
    }

    #[test]
    fn explicit_thumbnail_dir_is_searched_first() {
        let cfg = AppConfig {
            thumbnail_dir: Some(PathBuf::from("/tmp/thumbs")),
            ..AppConfig::default()
        };
        let dirs = cfg.thumbnail_candidate_dirs();
        assert_eq!(dirs.first(), Some(&PathBuf::from("/tmp/thumbs")));
    }

    #[test]
    fn unknown_keys_do_not_break_parsing() {
        let cfg: AppConfig =
            toml::from_str("jpeg_quality = 70\nfuture_option = true\n").expect("parse");
        assert_eq!(cfg.effective_jpeg_quality(), 70);
        assert!(cfg.thumbnail_dir.is_none());
    }
}

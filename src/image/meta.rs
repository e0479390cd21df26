use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Where the current image data came from.
#[derive(Debug, Clone)]
pub enum ImageOrigin {
    File(PathBuf),
    DroppedBytes { suggested_name: Option<String> },
    Clipboard,
}

impl ImageOrigin {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::File(_) => "File on disk",
            Self::DroppedBytes { .. } => "Dropped bytes",
            Self::Clipboard => "Clipboard",
        }
    }
}

/// Provenance of a loaded image, shown in the info window.
#[derive(Debug, Clone)]
pub struct ImageMeta {
    origin: ImageOrigin,
    byte_len: Option<u64>,
    last_modified: Option<SystemTime>,
}

impl ImageMeta {
    pub fn from_path(path: &Path) -> Self {
        let metadata = std::fs::metadata(path).ok();
        let (byte_len, last_modified) = metadata.map_or((None, None), |meta| {
            (Some(meta.len()), meta.modified().ok())
        });
        Self {
            origin: ImageOrigin::File(path.to_owned()),
            byte_len,
            last_modified,
        }
    }

    pub fn from_dropped_bytes(
        name: Option<&str>,
        byte_len: usize,
        last_modified: Option<SystemTime>,
    ) -> Self {
        Self {
            origin: ImageOrigin::DroppedBytes {
                suggested_name: name.filter(|s| !s.is_empty()).map(ToOwned::to_owned),
            },
            byte_len: Some(byte_len as u64),
            last_modified,
        }
    }

    pub const fn from_clipboard(byte_len: Option<u64>) -> Self {
        Self {
            origin: ImageOrigin::Clipboard,
            byte_len,
            last_modified: None,
        }
    }

    /// Best-effort display name for the image source.
    pub fn display_name(&self) -> String {
        match &self.origin {
            ImageOrigin::File(path) => path
                .file_name()
                .and_then(|s| s.to_str())
                .map_or_else(|| path.display().to_string(), ToOwned::to_owned),
            ImageOrigin::DroppedBytes { suggested_name } => suggested_name
                .as_deref()
                .map_or_else(|| "Unnamed drop".to_string(), str::to_owned),
            ImageOrigin::Clipboard => "Clipboard image".to_string(),
        }
    }

    /// Filesystem path when the image originated from disk.
    pub fn path(&self) -> Option<&Path> {
        match &self.origin {
            ImageOrigin::File(path) => Some(path.as_path()),
            ImageOrigin::DroppedBytes { .. } | ImageOrigin::Clipboard => None,
        }
    }

    pub const fn source_label(&self) -> &'static str {
        self.origin.label()
    }

    pub const fn byte_len(&self) -> Option<u64> {
        self.byte_len
    }

    pub const fn last_modified(&self) -> Option<SystemTime> {
        self.last_modified
    }
}

/// Format a byte count with binary units (KiB, MiB, ...).
pub fn human_readable_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut unit_idx = 0;
    while value >= 1024.0 && unit_idx < UNITS.len() - 1 {
        value /= 1024.0;
        unit_idx += 1;
    }
    if unit_idx == 0 {
        format!("{bytes} {}", UNITS[unit_idx])
    } else {
        format!("{value:.2} {}", UNITS[unit_idx])
    }
}

/// Format a `SystemTime` as a UTC timestamp string.
pub fn format_system_time(time: SystemTime) -> String {
    let datetime: DateTime<Utc> = DateTime::from(time);
    datetime.format("%Y-%m-%d %H:%M:%S %Z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_format_with_binary_units() {
        assert_eq!(human_readable_bytes(512), "512 B");
        assert_eq!(human_readable_bytes(2048), "2.00 KiB");
        assert_eq!(human_readable_bytes(3 * 1024 * 1024), "3.00 MiB");
    }

    #[test]
    fn dropped_bytes_without_name_fall_back() {
        let meta = ImageMeta::from_dropped_bytes(Some(""), 10, None);
        assert_eq!(meta.display_name(), "Unnamed drop");
        assert_eq!(meta.byte_len(), Some(10));
        assert!(meta.path().is_none());
    }
}

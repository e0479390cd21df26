use super::TinctApp;
use crate::config::AppConfig;
use crate::image::{ImageMeta, LoadedImage, human_readable_bytes};
use arboard::{Clipboard, Error as ClipboardError};
use egui::Context;
use image::RgbImage;

struct ClipboardCapture {
    image: RgbImage,
    byte_len: usize,
}

struct ValidatedClipboardSize {
    width: u32,
    height: u32,
    expected_len: usize,
}

impl TinctApp {
    pub(crate) fn paste_image_from_clipboard(&mut self, ctx: &Context) {
        self.image.pending_task = None;
        match capture_clipboard_image(&self.config) {
            Ok(captured) => {
                let meta = ImageMeta::from_clipboard(u64::try_from(captured.byte_len).ok());
                let name = meta.display_name();
                let loaded = LoadedImage::from_rgb(ctx, captured.image);
                self.set_loaded_image(loaded, Some(meta));
                self.set_status(format!("Loaded {name}"));
            }
            Err(err) => self.set_status(err),
        }
    }
}

fn capture_clipboard_image(cfg: &AppConfig) -> Result<ClipboardCapture, String> {
    let mut clipboard = Clipboard::new().map_err(format_clipboard_error)?;
    let data = clipboard.get_image().map_err(format_clipboard_error)?;
    let size = validate_clipboard_image(cfg, data.width, data.height)?;
    let bytes = data.bytes.into_owned();
    if bytes.len() < size.expected_len {
        return Err("Paste failed: clipboard image data is truncated.".to_string());
    }
    // Clipboard data is RGBA; the filter core works on RGB.
    let rgb: Vec<u8> = bytes[..size.expected_len]
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    let image = RgbImage::from_raw(size.width, size.height, rgb)
        .ok_or_else(|| "Paste failed: clipboard image could not be converted.".to_string())?;
    Ok(ClipboardCapture {
        image,
        byte_len: size.expected_len,
    })
}

fn validate_clipboard_image(
    cfg: &AppConfig,
    width: usize,
    height: usize,
) -> Result<ValidatedClipboardSize, String> {
    if width == 0 || height == 0 {
        return Err("Paste failed: clipboard image is empty.".to_string());
    }
    let limits = cfg.effective_image_limits();
    let width_u32 = u32::try_from(width).unwrap_or(u32::MAX);
    let height_u32 = u32::try_from(height).unwrap_or(u32::MAX);
    if width_u32 > limits.image_dim || height_u32 > limits.image_dim {
        return Err(format!(
            "Paste failed: clipboard image {width}x{height} exceeds the per-side limit ({} px).",
            limits.image_dim
        ));
    }

    let total_pixels = u64::from(width_u32) * u64::from(height_u32);
    if total_pixels > limits.total_pixels {
        return Err(format!(
            "Paste failed: clipboard image too large: {width}x{height} (~{} MP) exceeds limit (~{} MP).",
            total_pixels / 1_000_000,
            limits.total_pixels / 1_000_000
        ));
    }

    let rgba_bytes = total_pixels.checked_mul(4).ok_or_else(|| {
        "Paste failed: clipboard image is too large to fit in memory.".to_string()
    })?;
    if rgba_bytes > limits.alloc_bytes {
        return Err(format!(
            "Paste failed: clipboard image needs about {} of RGBA data, over the configured limit ({}).",
            human_readable_bytes(rgba_bytes),
            human_readable_bytes(limits.alloc_bytes)
        ));
    }

    let expected_len = usize::try_from(rgba_bytes).map_err(|_| {
        "Paste failed: clipboard image does not fit in available memory.".to_string()
    })?;

    Ok(ValidatedClipboardSize {
        width: width_u32,
        height: height_u32,
        expected_len,
    })
}

fn format_clipboard_error(err: ClipboardError) -> String {
    match err {
        ClipboardError::ContentNotAvailable => {
            "Paste failed: clipboard does not contain an image.".to_string()
        }
        ClipboardError::ClipboardNotSupported => {
            "Paste failed: clipboard access is not supported in this environment.".to_string()
        }
        ClipboardError::ClipboardOccupied => {
            "Paste failed: clipboard is busy; try again in a moment.".to_string()
        }
        ClipboardError::ConversionFailure => {
            "Paste failed: clipboard image could not be converted.".to_string()
        }
        ClipboardError::Unknown { description } => {
            format!("Paste failed: {description}")
        }
        _ => {
            format!("Paste failed: {err}")
        }
    }
}

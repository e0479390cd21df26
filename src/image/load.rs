use crate::config::AppConfig;
use anyhow::Context as _;
use image::{GenericImageView, ImageReader, Limits, RgbImage};
use std::io::{BufRead, Cursor, Read, Seek};
use std::path::Path;

fn decode_reader_to_rgb<R>(cfg: &AppConfig, mut reader: ImageReader<R>) -> anyhow::Result<RgbImage>
where
    R: Read + Seek + BufRead,
{
    let il = cfg.effective_image_limits();
    let mut limits = Limits::default();
    limits.max_image_width = Some(il.image_dim);
    limits.max_image_height = Some(il.image_dim);
    limits.max_alloc = Some(il.alloc_bytes);
    reader.limits(limits);
    let img = reader.decode().context("Failed to decode image data")?;

    let (w, h) = img.dimensions();
    let total_pixels = u64::from(w) * u64::from(h);
    if total_pixels > il.total_pixels {
        anyhow::bail!(
            "Image too large: {}x{} (~{} MP) exceeds limit (~{} MP)",
            w,
            h,
            total_pixels / 1_000_000,
            il.total_pixels / 1_000_000
        );
    }

    Ok(img.to_rgb8())
}

/// Load and decode an image from a filesystem path using configured limits.
pub fn decode_image_from_path(cfg: &AppConfig, path: &Path) -> anyhow::Result<RgbImage> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .with_guessed_format()
        .context("Failed to detect image format")?;
    decode_reader_to_rgb(cfg, reader)
}

/// Load and decode an image from raw bytes using configured limits.
pub fn decode_image_from_bytes(cfg: &AppConfig, bytes: Vec<u8>) -> anyhow::Result<RgbImage> {
    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .context("Failed to detect image format")?;
    decode_reader_to_rgb(cfg, reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png_bytes_to_rgb() {
        let src = RgbImage::from_pixel(6, 4, image::Rgb([10, 20, 30]));
        let mut bytes = Vec::new();
        src.write_to(
            &mut Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .expect("encode png");

        let cfg = AppConfig::default();
        let decoded = decode_image_from_bytes(&cfg, bytes).expect("decode");
        assert_eq!(decoded.dimensions(), (6, 4));
        assert_eq!(decoded.get_pixel(3, 2).0, [10, 20, 30]);
    }

    #[test]
    fn rejects_garbage_bytes() {
        let cfg = AppConfig::default();
        assert!(decode_image_from_bytes(&cfg, vec![0u8; 64]).is_err());
    }
}

//! JPEG encoding of filter output for the download/save path.

use crate::image::FilterOutput;
use anyhow::Context as _;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Encode a filter output as JPEG bytes at the given quality (1-100).
pub fn encode_jpeg(output: &FilterOutput, quality: u8) -> anyhow::Result<Vec<u8>> {
    let (width, height) = output.dimensions();
    if width == 0 || height == 0 {
        anyhow::bail!("Cannot encode an empty image");
    }
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
    match output {
        FilterOutput::Color(img) => encoder
            .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
            .context("Failed to encode JPEG data")?,
        FilterOutput::Gray(img) => encoder
            .write_image(img.as_raw(), width, height, ExtendedColorType::L8)
            .context("Failed to encode JPEG data")?,
    }
    Ok(bytes)
}

/// Encode a filter output and write it to `path`.
pub fn save_jpeg(path: &Path, output: &FilterOutput, quality: u8) -> anyhow::Result<()> {
    let bytes = encode_jpeg(output, quality)?;
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    std::io::Write::write_all(&mut writer, &bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, GrayImage, RgbImage};

    #[test]
    fn encodes_color_output() {
        let output = FilterOutput::Color(RgbImage::from_pixel(12, 8, image::Rgb([120, 60, 30])));
        let bytes = encode_jpeg(&output, 90).expect("encode");
        let decoded = image::load_from_memory(&bytes).expect("decode");
        assert_eq!(decoded.dimensions(), (12, 8));
    }

    #[test]
    fn encodes_gray_output() {
        let output = FilterOutput::Gray(GrayImage::from_pixel(9, 7, image::Luma([200])));
        let bytes = encode_jpeg(&output, 75).expect("encode");
        let decoded = image::load_from_memory(&bytes).expect("decode");
        assert_eq!(decoded.dimensions(), (9, 7));
    }

    #[test]
    fn rejects_empty_output() {
        let output = FilterOutput::Gray(GrayImage::new(0, 0));
        assert!(encode_jpeg(&output, 90).is_err());
    }
}

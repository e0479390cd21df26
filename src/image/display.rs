use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use image::{GrayImage, RgbImage};

use super::filters::FilterOutput;

/// Decoded raster plus the egui texture that mirrors its pixels.
pub struct LoadedImage {
    pub size: [usize; 2],
    pub texture: TextureHandle,
    pub pixels: RgbImage,
}

impl LoadedImage {
    /// Construct a `LoadedImage` from a decoded raster and upload a texture.
    pub fn from_rgb(ctx: &Context, pixels: RgbImage) -> Self {
        let color = color_image_from_rgb(&pixels);
        let size = color.size;
        let texture = ctx.load_texture("loaded_image", color, TextureOptions::LINEAR);
        Self {
            size,
            texture,
            pixels,
        }
    }
}

/// Convert an RGB raster into egui pixel data for display.
pub fn color_image_from_rgb(image: &RgbImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_rgb(size, image.as_raw())
}

/// Convert a grayscale raster into egui pixel data for display.
pub fn color_image_from_gray(image: &GrayImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_gray(size, image.as_raw())
}

/// Convert a filter output (either variant) into egui pixel data.
pub fn color_image_from_output(output: &FilterOutput) -> ColorImage {
    match output {
        FilterOutput::Color(img) => color_image_from_rgb(img),
        FilterOutput::Gray(img) => color_image_from_gray(img),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_conversion_keeps_size_and_samples() {
        let img = RgbImage::from_pixel(3, 2, image::Rgb([9, 8, 7]));
        let color = color_image_from_rgb(&img);
        assert_eq!(color.size, [3, 2]);
        assert_eq!(color.pixels[0].r(), 9);
        assert_eq!(color.pixels[5].b(), 7);
    }

    #[test]
    fn gray_conversion_spreads_luma_across_channels() {
        let img = GrayImage::from_pixel(2, 2, image::Luma([77]));
        let color = color_image_from_gray(&img);
        assert_eq!(color.size, [2, 2]);
        assert_eq!(color.pixels[3].r(), 77);
        assert_eq!(color.pixels[3].g(), 77);
    }
}

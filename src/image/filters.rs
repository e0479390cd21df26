//! Artistic filters over decoded rasters.
//!
//! Every filter is a pure function: it takes a borrowed RGB raster plus
//! sanitized parameters and returns a freshly allocated output. Nothing here
//! touches I/O or shared state, so the same input always yields the same
//! pixels.

use image::{GrayImage, Luma, Rgb, RgbImage};
use rayon::prelude::*;

/// Minimum pixel count before parallelizing per-row pixel loops.
const PARALLEL_PIXEL_THRESHOLD: usize = 262_144; // 512x512

pub const VIGNETTE_LEVEL_MAX: u8 = 5;
pub const SKETCH_KERNEL_MIN: u8 = 1;
pub const SKETCH_KERNEL_MAX: u8 = 11;

/// Closed set of selectable filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    None,
    BlackAndWhite,
    Sepia,
    Vignette,
    PencilSketch,
}

impl FilterKind {
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::BlackAndWhite,
        Self::Sepia,
        Self::Vignette,
        Self::PencilSketch,
    ];

    /// Label shown in the selection box.
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::BlackAndWhite => "Black and White",
            Self::Sepia => "Sepia / Vintage",
            Self::Vignette => "Vignette Effect",
            Self::PencilSketch => "Pencil Sketch",
        }
    }
}

/// Numeric filter parameters supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterParams {
    /// Vignette strength, 0 (barely visible) through 5 (strong).
    pub vignette_level: u8,
    /// Pencil-sketch blur kernel size, odd, 1 through 11.
    pub sketch_kernel: u8,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            vignette_level: 2,
            sketch_kernel: 5,
        }
    }
}

impl FilterParams {
    /// Clamp both parameters into their valid ranges; even kernel sizes are
    /// promoted to the next odd value.
    #[must_use]
    pub const fn sanitized(self) -> Self {
        Self {
            vignette_level: if self.vignette_level > VIGNETTE_LEVEL_MAX {
                VIGNETTE_LEVEL_MAX
            } else {
                self.vignette_level
            },
            sketch_kernel: sanitize_kernel_size(self.sketch_kernel),
        }
    }
}

const fn sanitize_kernel_size(k: u8) -> u8 {
    let k = if k < SKETCH_KERNEL_MIN {
        SKETCH_KERNEL_MIN
    } else if k > SKETCH_KERNEL_MAX {
        SKETCH_KERNEL_MAX
    } else {
        k
    };
    k | 1
}

/// Result of one filter invocation: either a color raster of the input's
/// shape or a single-channel grayscale raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutput {
    Color(RgbImage),
    Gray(GrayImage),
}

impl FilterOutput {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Color(img) => img.dimensions(),
            Self::Gray(img) => img.dimensions(),
        }
    }
}

/// Apply the selected filter to `input`. `FilterKind::None` produces no
/// output, matching the "show nothing" selection in the UI.
pub fn apply_filter(
    input: &RgbImage,
    kind: FilterKind,
    params: FilterParams,
) -> Option<FilterOutput> {
    let params = params.sanitized();
    match kind {
        FilterKind::None => None,
        FilterKind::BlackAndWhite => Some(FilterOutput::Gray(black_and_white(input))),
        FilterKind::Sepia => Some(FilterOutput::Color(sepia(input))),
        FilterKind::Vignette => Some(FilterOutput::Color(vignette(input, params.vignette_level))),
        FilterKind::PencilSketch => Some(FilterOutput::Gray(pencil_sketch(
            input,
            params.sketch_kernel,
        ))),
    }
}

fn luma(px: Rgb<u8>) -> u8 {
    let [r, g, b] = px.0;
    // BT.601 weights.
    let y = f32::from(b).mul_add(0.114, f32::from(r).mul_add(0.299, f32::from(g) * 0.587));
    rounded_u8(y)
}

fn rounded_u8(value: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        value.round().clamp(0.0, f32::from(u8::MAX)) as u8
    }
}

/// Reduce a color raster to single-channel grayscale, same width/height.
pub fn black_and_white(input: &RgbImage) -> GrayImage {
    let (width, height) = input.dimensions();
    GrayImage::from_fn(width, height, |x, y| Luma([luma(*input.get_pixel(x, y))]))
}

/// Classic sepia tone: a fixed 3x3 channel-mixing matrix per pixel, clipped
/// to the u8 range. Shape is preserved.
pub fn sepia(input: &RgbImage) -> RgbImage {
    let mut out = input.clone();
    for px in out.pixels_mut() {
        let r = f32::from(px[0]);
        let g = f32::from(px[1]);
        let b = f32::from(px[2]);
        let tr = g.mul_add(0.769, r.mul_add(0.393, b * 0.189));
        let tg = g.mul_add(0.686, r.mul_add(0.349, b * 0.168));
        let tb = g.mul_add(0.534, r.mul_add(0.272, b * 0.131));
        px.0 = [rounded_u8(tr), rounded_u8(tg), rounded_u8(tb)];
    }
    out
}

/// Darken the raster toward its edges. The mask is the outer product of two
/// 1-D Gaussian falloff kernels, one per axis, normalized so the brightest
/// point keeps its original value. Higher levels narrow the bright center.
pub fn vignette(input: &RgbImage, level: u8) -> RgbImage {
    let (width, height) = input.dimensions();
    if width == 0 || height == 0 {
        return input.clone();
    }
    let level = level.min(VIGNETTE_LEVEL_MAX);
    let row_mask = falloff_kernel(width, level);
    let col_mask = falloff_kernel(height, level);

    let mut out = input.clone();
    let stride = width as usize * 3;
    let shade_row = |(y, row): (usize, &mut [u8])| {
        let base = col_mask[y];
        for (x, px) in row.chunks_exact_mut(3).enumerate() {
            let mask = base * row_mask[x];
            for channel in px {
                *channel = rounded_u8(f32::from(*channel) * mask);
            }
        }
    };

    let total_pixels = width as usize * height as usize;
    if total_pixels >= PARALLEL_PIXEL_THRESHOLD {
        out.par_chunks_mut(stride).enumerate().for_each(shade_row);
    } else {
        out.chunks_mut(stride).enumerate().for_each(shade_row);
    }
    out
}

/// 1-D Gaussian falloff across `dim` samples, peak-normalized to 1.0.
///
/// Level 0 maps to a sigma of four times the dimension (near-uniform mask);
/// level 5 maps to a quarter of it (strong corner falloff). The mapping is
/// monotone, so a higher level never brightens any sample.
fn falloff_kernel(dim: u32, level: u8) -> Vec<f32> {
    #[allow(clippy::cast_precision_loss)]
    let span = dim as f32;
    let center = (span - 1.0) / 2.0;
    let sigma = span / f32::from(level).mul_add(0.75, 0.25);
    let two_sigma_sq = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (0..dim)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let d = i as f32 - center;
            (-d * d / two_sigma_sq).exp()
        })
        .collect();
    let peak = kernel.iter().copied().fold(0.0f32, f32::max);
    if peak > 0.0 {
        for v in &mut kernel {
            *v /= peak;
        }
    }
    kernel
}

/// Pencil-sketch rendition: grayscale, inverted, Gaussian-blurred, then a
/// color-dodge blend of the grayscale by the blurred inverse. Larger kernels
/// soften the sketch.
pub fn pencil_sketch(input: &RgbImage, kernel_size: u8) -> GrayImage {
    let gray = black_and_white(input);
    let ksize = sanitize_kernel_size(kernel_size);

    let mut inverted = gray.clone();
    for px in inverted.pixels_mut() {
        px.0[0] = u8::MAX - px.0[0];
    }
    let blurred = gaussian_blur_gray(&inverted, ksize);

    let (width, height) = gray.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let base = f32::from(gray.get_pixel(x, y).0[0]);
        let shade = f32::from(blurred.get_pixel(x, y).0[0]);
        // Dodge: divide the base by the complement of the blend layer.
        let denom = (255.0 - shade).max(1.0);
        Luma([rounded_u8(base * 255.0 / denom)])
    })
}

/// Separable Gaussian blur on a grayscale raster with clamped edges.
fn gaussian_blur_gray(input: &GrayImage, kernel_size: u8) -> GrayImage {
    let kernel = gaussian_kernel(kernel_size);
    if kernel.len() <= 1 {
        return input.clone();
    }
    let (width, height) = input.dimensions();
    if width == 0 || height == 0 {
        return input.clone();
    }
    let radius = (kernel.len() / 2) as i64;
    let max_x = i64::from(width) - 1;
    let max_y = i64::from(height) - 1;

    // Horizontal pass into a float buffer, then vertical pass back to u8.
    let mut horiz = vec![0.0f32; width as usize * height as usize];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f32;
            for (i, weight) in kernel.iter().enumerate() {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let sx = (i64::from(x) + i as i64 - radius).clamp(0, max_x) as u32;
                acc = weight.mul_add(f32::from(input.get_pixel(sx, y).0[0]), acc);
            }
            horiz[(y * width + x) as usize] = acc;
        }
    }

    GrayImage::from_fn(width, height, |x, y| {
        let mut acc = 0.0f32;
        for (i, weight) in kernel.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let sy = (i64::from(y) + i as i64 - radius).clamp(0, max_y) as u32;
            acc = weight.mul_add(horiz[(sy * width + x) as usize], acc);
        }
        Luma([rounded_u8(acc)])
    })
}

/// 1-D Gaussian kernel of the given odd size, normalized to sum 1. Sigma is
/// derived from the size: `0.3 * ((k - 1) * 0.5 - 1) + 0.8`.
fn gaussian_kernel(kernel_size: u8) -> Vec<f32> {
    let n = usize::from(kernel_size);
    if n <= 1 {
        return vec![1.0];
    }
    #[allow(clippy::cast_precision_loss)]
    let sigma = 0.3f32.mul_add((n as f32 - 1.0).mul_add(0.5, -1.0), 0.8);
    let two_sigma_sq = 2.0 * sigma * sigma;
    #[allow(clippy::cast_precision_loss)]
    let center = (n as f32 - 1.0) / 2.0;
    let mut kernel: Vec<f32> = (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let d = i as f32 - center;
            (-d * d / two_sigma_sq).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    if sum > 0.0 {
        for v in &mut kernel {
            *v /= sum;
        }
    }
    kernel
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_image(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(rgb))
    }

    fn gradient_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let r = ((x * 7 + y * 3) % 256) as u8;
            let g = ((x * 2 + y * 11) % 256) as u8;
            let b = ((x + y * 5) % 256) as u8;
            Rgb([r, g, b])
        })
    }

    fn mean_brightness(img: &RgbImage) -> f64 {
        let sum: u64 = img.pixels().flat_map(|p| p.0).map(u64::from).sum();
        sum as f64 / (f64::from(img.width()) * f64::from(img.height()) * 3.0)
    }

    #[test]
    fn black_and_white_preserves_shape() {
        let input = gradient_image(17, 9);
        let out = black_and_white(&input);
        assert_eq!(out.dimensions(), (17, 9));
    }

    #[test]
    fn black_and_white_keeps_mid_gray() {
        let input = flat_image(100, 100, [128, 128, 128]);
        let out = black_and_white(&input);
        assert_eq!(out.dimensions(), (100, 100));
        for px in out.pixels() {
            assert!((i16::from(px.0[0]) - 128).abs() <= 1, "got {}", px.0[0]);
        }
    }

    #[test]
    fn sepia_preserves_shape_and_mixes_channels() {
        let input = flat_image(8, 6, [255, 0, 0]);
        let out = sepia(&input);
        assert_eq!(out.dimensions(), input.dimensions());
        // Pure red through the matrix: 0.393 / 0.349 / 0.272 of 255.
        let px = out.get_pixel(3, 3);
        assert_eq!(px.0, [100, 89, 69]);
    }

    #[test]
    fn sepia_clips_bright_pixels() {
        let out = sepia(&flat_image(4, 4, [255, 255, 255]));
        for px in out.pixels() {
            // 0.393 + 0.769 + 0.189 > 1, so red saturates instead of wrapping.
            assert_eq!(px.0[0], 255);
        }
    }

    #[test]
    fn vignette_level_zero_is_nearly_uniform() {
        let input = flat_image(50, 50, [255, 255, 255]);
        let out = vignette(&input, 0);
        assert_eq!(out.dimensions(), (50, 50));
        let center = out.get_pixel(25, 25).0[0];
        let corner = out.get_pixel(0, 0).0[0];
        assert!(center >= 250);
        assert!(i16::from(center) - i16::from(corner) <= 8);
    }

    #[test]
    fn vignette_level_five_darkens_corners() {
        let input = flat_image(50, 50, [255, 255, 255]);
        let out = vignette(&input, 5);
        let center = out.get_pixel(25, 25).0[0];
        let corner = out.get_pixel(0, 0).0[0];
        assert!(center >= 250);
        assert!(corner < 64, "corner still bright: {corner}");
    }

    #[test]
    fn vignette_center_stays_closer_to_input_than_corners() {
        let input = flat_image(40, 30, [200, 180, 160]);
        for level in 1..=VIGNETTE_LEVEL_MAX {
            let out = vignette(&input, level);
            let center = out.get_pixel(20, 15).0[0];
            let corners = [
                out.get_pixel(0, 0).0[0],
                out.get_pixel(39, 0).0[0],
                out.get_pixel(0, 29).0[0],
                out.get_pixel(39, 29).0[0],
            ];
            let corner_avg =
                corners.iter().copied().map(f32::from).sum::<f32>() / corners.len() as f32;
            let center_err = (f32::from(center) - 200.0).abs();
            let corner_err = (corner_avg - 200.0).abs();
            assert!(center_err < corner_err, "level {level}");
        }
    }

    #[test]
    fn vignette_brightness_is_monotone_in_level() {
        let input = gradient_image(64, 48);
        let mut last = f64::INFINITY;
        for level in 0..=VIGNETTE_LEVEL_MAX {
            let mean = mean_brightness(&vignette(&input, level));
            assert!(mean <= last, "level {level}: {mean} > {last}");
            last = mean;
        }
    }

    #[test]
    fn pencil_sketch_preserves_shape_for_all_kernel_sizes() {
        let input = gradient_image(21, 13);
        for ksize in (SKETCH_KERNEL_MIN..=SKETCH_KERNEL_MAX).step_by(2) {
            let out = pencil_sketch(&input, ksize);
            assert_eq!(out.dimensions(), (21, 13), "ksize {ksize}");
        }
    }

    #[test]
    fn pencil_sketch_promotes_even_kernel_sizes() {
        let input = gradient_image(16, 16);
        assert_eq!(pencil_sketch(&input, 4), pencil_sketch(&input, 5));
    }

    #[test]
    fn filters_are_deterministic() {
        let input = gradient_image(33, 27);
        assert_eq!(vignette(&input, 3), vignette(&input, 3));
        assert_eq!(pencil_sketch(&input, 7), pencil_sketch(&input, 7));
        assert_eq!(sepia(&input), sepia(&input));
    }

    #[test]
    fn apply_filter_dispatches_output_variants() {
        let input = gradient_image(10, 10);
        let params = FilterParams::default();
        assert!(apply_filter(&input, FilterKind::None, params).is_none());
        assert!(matches!(
            apply_filter(&input, FilterKind::BlackAndWhite, params),
            Some(FilterOutput::Gray(_))
        ));
        assert!(matches!(
            apply_filter(&input, FilterKind::Sepia, params),
            Some(FilterOutput::Color(_))
        ));
        assert!(matches!(
            apply_filter(&input, FilterKind::Vignette, params),
            Some(FilterOutput::Color(_))
        ));
        assert!(matches!(
            apply_filter(&input, FilterKind::PencilSketch, params),
            Some(FilterOutput::Gray(_))
        ));
    }

    #[test]
    fn params_sanitize_out_of_range_values() {
        let params = FilterParams {
            vignette_level: 9,
            sketch_kernel: 40,
        }
        .sanitized();
        assert_eq!(params.vignette_level, VIGNETTE_LEVEL_MAX);
        assert_eq!(params.sketch_kernel, SKETCH_KERNEL_MAX);

        let params = FilterParams {
            vignette_level: 0,
            sketch_kernel: 0,
        }
        .sanitized();
        assert_eq!(params.vignette_level, 0);
        assert_eq!(params.sketch_kernel, SKETCH_KERNEL_MIN);

        let even = FilterParams {
            vignette_level: 2,
            sketch_kernel: 6,
        }
        .sanitized();
        assert_eq!(even.sketch_kernel, 7);
    }
}

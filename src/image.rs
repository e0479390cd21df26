mod display;
mod filters;
mod load;
mod meta;

pub use display::{LoadedImage, color_image_from_output, color_image_from_rgb};
pub use filters::{
    FilterKind, FilterOutput, FilterParams, SKETCH_KERNEL_MAX, SKETCH_KERNEL_MIN,
    VIGNETTE_LEVEL_MAX, apply_filter,
};
pub use load::{decode_image_from_bytes, decode_image_from_path};
pub use meta::{ImageMeta, format_system_time, human_readable_bytes};

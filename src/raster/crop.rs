use image::imageops;

use super::{ChannelFormat, Raster};
use crate::region::ResolvedRect;

/// Copy `rect` out of `raster` into a fresh raster of the given layout.
///
/// `rect` must come from [`crate::region::resolve`] against this raster.
pub fn crop(raster: &Raster, rect: ResolvedRect, target: ChannelFormat) -> Raster {
    debug_assert!(
        ResolvedRect::new(0, 0, raster.width(), raster.height()).contains(&rect),
        "crop rect {rect} outside raster {}x{}",
        raster.width(),
        raster.height()
    );

    let cropped = match raster {
        Raster::Rgba8(img) => Raster::Rgba8(
            imageops::crop_imm(img, rect.x, rect.y, rect.width, rect.height).to_image(),
        ),
        Raster::Rgba32F(img) => Raster::Rgba32F(
            imageops::crop_imm(img, rect.x, rect.y, rect.width, rect.height).to_image(),
        ),
    };

    cropped.into_format(target)
}

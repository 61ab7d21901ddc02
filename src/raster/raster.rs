use image::{DynamicImage, Rgba32FImage, RgbaImage};

/// Pixel layout of a [`Raster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelFormat {
    /// 8 bits per channel RGBA
    Rgba8,
    /// 32-bit float RGBA, used for HDR sources and outputs
    Rgba32F,
}

/// A decoded image, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub enum Raster {
    Rgba8(RgbaImage),
    Rgba32F(Rgba32FImage),
}

impl Raster {
    pub fn width(&self) -> u32 {
        match self {
            Raster::Rgba8(img) => img.width(),
            Raster::Rgba32F(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Raster::Rgba8(img) => img.height(),
            Raster::Rgba32F(img) => img.height(),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn channel_format(&self) -> ChannelFormat {
        match self {
            Raster::Rgba8(_) => ChannelFormat::Rgba8,
            Raster::Rgba32F(_) => ChannelFormat::Rgba32F,
        }
    }

    /// Convert into the requested layout. Float values are clamped to
    /// `[0, 1]` when narrowing to 8 bits.
    pub fn into_format(self, format: ChannelFormat) -> Raster {
        match (self, format) {
            (raster @ Raster::Rgba8(_), ChannelFormat::Rgba8)
            | (raster @ Raster::Rgba32F(_), ChannelFormat::Rgba32F) => raster,
            (Raster::Rgba8(img), ChannelFormat::Rgba32F) => {
                Raster::Rgba32F(DynamicImage::ImageRgba8(img).into_rgba32f())
            }
            (Raster::Rgba32F(img), ChannelFormat::Rgba8) => {
                Raster::Rgba8(DynamicImage::ImageRgba32F(img).into_rgba8())
            }
        }
    }
}

impl From<Raster> for DynamicImage {
    fn from(raster: Raster) -> Self {
        match raster {
            Raster::Rgba8(img) => DynamicImage::ImageRgba8(img),
            Raster::Rgba32F(img) => DynamicImage::ImageRgba32F(img),
        }
    }
}

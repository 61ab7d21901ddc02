use std::path::Path;

use image::ImageFormat;
use log::debug;

use super::Raster;
use crate::error::ExtractError;

/// How a source texture's bytes have to be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Floating point data (OpenEXR); kept at full precision
    Hdr,
    /// Uncompressed truecolor (TGA); has no signature, so it is never sniffed
    Truecolor,
    /// Any other container the image decoders understand
    Encoded(ImageFormat),
}

impl SourceKind {
    pub fn from_image_format(format: ImageFormat) -> Self {
        match format {
            ImageFormat::OpenExr => SourceKind::Hdr,
            ImageFormat::Tga => SourceKind::Truecolor,
            other => SourceKind::Encoded(other),
        }
    }

    /// Guess from the file extension of the original asset.
    pub fn from_path(path: &Path) -> Option<Self> {
        ImageFormat::from_path(path)
            .ok()
            .map(Self::from_image_format)
    }

    fn image_format(self) -> ImageFormat {
        match self {
            SourceKind::Hdr => ImageFormat::OpenExr,
            SourceKind::Truecolor => ImageFormat::Tga,
            SourceKind::Encoded(format) => format,
        }
    }
}

/// Decode the authoritative bytes of a source texture into a [`Raster`].
///
/// HDR sources decode to 32-bit float RGBA, everything else to 8-bit RGBA.
/// Without a hint the format is sniffed from the byte signature. `path` is
/// only used in error reports.
pub fn materialize(
    bytes: &[u8],
    hint: Option<SourceKind>,
    path: &Path,
) -> Result<Raster, ExtractError> {
    let kind = match hint {
        Some(kind) => kind,
        None => image::guess_format(bytes)
            .map(SourceKind::from_image_format)
            .map_err(|e| ExtractError::UnsupportedSourceFormat {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?,
    };

    let decoded = image::load_from_memory_with_format(bytes, kind.image_format()).map_err(
        |e| ExtractError::UnsupportedSourceFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    )?;

    let raster = match kind {
        SourceKind::Hdr => Raster::Rgba32F(decoded.into_rgba32f()),
        SourceKind::Truecolor | SourceKind::Encoded(_) => Raster::Rgba8(decoded.into_rgba8()),
    };

    debug!(
        "Materialized {} ({}x{}, {:?})",
        path.display(),
        raster.width(),
        raster.height(),
        raster.channel_format()
    );

    Ok(raster)
}

/// Read a texture from disk and decode it, choosing the decoder from the
/// file extension.
pub fn materialize_file(path: &Path) -> Result<Raster, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::InputNotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|e| ExtractError::IoFailure {
        path: path.to_path_buf(),
        source: e,
    })?;
    materialize(&bytes, SourceKind::from_path(path), path)
}

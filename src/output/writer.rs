use std::ffi::OsString;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::tga::TgaEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageError, ImageFormat};
use log::debug;

use crate::cli::CompressionLevel;
use crate::error::ExtractError;
use crate::format::EncodeFormat;
use crate::raster::Raster;

/// JPEG quality used for every JPG output
pub const JPEG_QUALITY: u8 = 75;

/// Encoder settings that apply to a whole extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Re-optimise PNG output with oxipng (lossless)
    pub png_compress: Option<CompressionLevel>,
}

/// `<dest_stem>.<format>`; any dots already in the stem are kept.
pub fn output_path(dest_stem: &Path, format: EncodeFormat) -> Result<PathBuf, ExtractError> {
    let mut path = OsString::from(dest_stem.as_os_str());
    path.push(".");
    path.push(format.extension()?);
    Ok(PathBuf::from(path))
}

/// Encode `raster` as `format` and write it next to `dest_stem`,
/// replacing any file already at that path.
///
/// Returns the path that was written.
pub fn encode_and_write(
    raster: Raster,
    dest_stem: &Path,
    format: EncodeFormat,
    options: &EncodeOptions,
) -> Result<PathBuf, ExtractError> {
    let path = output_path(dest_stem, format)?;
    let data = encode(raster, format, options, &path)?;

    fs::write(&path, data).map_err(|e| ExtractError::IoFailure {
        path: path.clone(),
        source: e,
    })?;

    debug!("Wrote {}", path.display());
    Ok(path)
}

/// Encode `raster` in memory. `path` is only used in error reports.
pub fn encode(
    raster: Raster,
    format: EncodeFormat,
    options: &EncodeOptions,
    path: &Path,
) -> Result<Vec<u8>, ExtractError> {
    let to_encode_error = |e: ImageError| ExtractError::Encode {
        path: path.to_path_buf(),
        source: e,
    };

    let mut buf = Cursor::new(Vec::new());
    match format {
        EncodeFormat::Source => return Err(ExtractError::FormatUnresolved),
        EncodeFormat::Exr => {
            let img = DynamicImage::from(raster).into_rgba32f();
            img.write_to(&mut buf, ImageFormat::OpenExr)
                .map_err(to_encode_error)?;
        }
        EncodeFormat::Jpg => {
            // Baseline JPEG has no alpha channel
            let img = DynamicImage::from(raster).into_rgb8();
            JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
                .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
                .map_err(to_encode_error)?;
        }
        EncodeFormat::Png => {
            let img = DynamicImage::from(raster).into_rgba8();
            img.write_to(&mut buf, ImageFormat::Png)
                .map_err(to_encode_error)?;
        }
        EncodeFormat::Tga => {
            let img = DynamicImage::from(raster).into_rgba8();
            TgaEncoder::new(&mut buf)
                .disable_rle()
                .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
                .map_err(to_encode_error)?;
        }
    }

    let data = buf.into_inner();
    match (format, options.png_compress) {
        (EncodeFormat::Png, Some(level)) => compress_png(&data, level, path),
        _ => Ok(data),
    }
}

fn compress_png(
    data: &[u8],
    level: CompressionLevel,
    path: &Path,
) -> Result<Vec<u8>, ExtractError> {
    let opts = match level {
        CompressionLevel::Level(n) => oxipng::Options::from_preset(n),
        CompressionLevel::Max => oxipng::Options::max_compression(),
    };
    oxipng::optimize_from_memory(data, &opts).map_err(|e| ExtractError::PngCompress {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

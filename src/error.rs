use std::path::PathBuf;
use thiserror::Error;

use crate::region::{Rect, ResolvedRect};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Unsupported source format for '{path}': {reason}")]
    UnsupportedSourceFormat { path: PathBuf, reason: String },

    #[error(
        "Region '{name}' {rect} does not overlap the texture bounds {bounds} after clamping"
    )]
    RegionRejected {
        name: String,
        rect: Rect,
        bounds: ResolvedRect,
    },

    #[error("Encode format is still 'source'; it must be resolved before encoding")]
    FormatUnresolved,

    #[error("Sprite name '{name}' is not a plain file name")]
    InvalidName { name: String },

    #[error("Failed to write output file '{path}': {source}")]
    IoFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode image '{path}': {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Texture array '{name}' has an invalid flipbook grid ({rows} rows x {columns} columns)")]
    InvalidGrid {
        name: String,
        rows: u32,
        columns: u32,
    },

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),
}

impl ExtractError {
    /// Returns true if the error prevents every region of the asset from
    /// being extracted, as opposed to a single region or output file.
    pub fn is_fatal_to_asset(&self) -> bool {
        matches!(
            self,
            ExtractError::UnsupportedSourceFormat { .. }
                | ExtractError::InvalidGrid { .. }
                | ExtractError::InputNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_rejected_message() {
        let err = ExtractError::RegionRejected {
            name: "hero".to_string(),
            rect: Rect::new(150, 150, 10, 10),
            bounds: ResolvedRect::new(0, 0, 100, 100),
        };
        let msg = err.to_string();
        assert!(msg.contains("hero"));
        assert!(msg.contains("(x: 150, y: 150, w: 10, h: 10)"));
        assert!(msg.contains("(x: 0, y: 0, w: 100, h: 100)"));
        assert!(!err.is_fatal_to_asset());
    }

    #[test]
    fn test_asset_scoped_errors() {
        assert!(ExtractError::InputNotFound(PathBuf::from("a.png")).is_fatal_to_asset());
        assert!(
            ExtractError::UnsupportedSourceFormat {
                path: PathBuf::from("a.psd"),
                reason: "unknown extension".to_string(),
            }
            .is_fatal_to_asset()
        );
        assert!(!ExtractError::FormatUnresolved.is_fatal_to_asset());
        assert!(
            !ExtractError::InvalidName {
                name: "../x".to_string()
            }
            .is_fatal_to_asset()
        );
    }
}

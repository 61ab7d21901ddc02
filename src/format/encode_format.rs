use std::fmt;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;
use crate::raster::ChannelFormat;

/// Target encoding for extracted images.
#[derive(
    Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EncodeFormat {
    /// Use the format of the source texture's file extension
    #[default]
    Source,
    /// OpenEXR, 32-bit float RGBA
    Exr,
    /// JPEG, 8-bit RGB
    Jpg,
    /// PNG, 8-bit RGBA
    Png,
    /// Uncompressed TGA, 8-bit RGBA
    Tga,
}

impl EncodeFormat {
    pub const CONCRETE: [EncodeFormat; 4] = [
        EncodeFormat::Exr,
        EncodeFormat::Jpg,
        EncodeFormat::Png,
        EncodeFormat::Tga,
    ];

    /// Lower-case format name; doubles as the output file extension.
    pub fn name(self) -> &'static str {
        match self {
            EncodeFormat::Source => "source",
            EncodeFormat::Exr => "exr",
            EncodeFormat::Jpg => "jpg",
            EncodeFormat::Png => "png",
            EncodeFormat::Tga => "tga",
        }
    }

    /// File extension for a concrete format.
    pub fn extension(self) -> Result<&'static str, ExtractError> {
        match self {
            EncodeFormat::Source => Err(ExtractError::FormatUnresolved),
            other => Ok(other.name()),
        }
    }

    pub fn is_hdr(self) -> bool {
        self == EncodeFormat::Exr
    }

    /// Pixel layout a crop must have before it is encoded as this format.
    pub fn channel_format(self) -> ChannelFormat {
        if self.is_hdr() {
            ChannelFormat::Rgba32F
        } else {
            ChannelFormat::Rgba8
        }
    }

    /// Resolve [`EncodeFormat::Source`] against the source asset's path.
    /// Concrete formats are returned unchanged.
    pub fn resolve(
        self,
        source_path: &Path,
        known: &KnownFormats,
    ) -> Result<EncodeFormat, ExtractError> {
        if self != EncodeFormat::Source {
            return Ok(self);
        }
        known.match_path(source_path)
    }
}

impl fmt::Display for EncodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncodeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EncodeFormat::from_str_ignore_case(s)
            .ok_or_else(|| format!("unknown format '{}'. Valid values: source, exr, jpg, png, tga", s))
    }
}

impl EncodeFormat {
    fn from_str_ignore_case(s: &str) -> Option<Self> {
        let lower = s.to_ascii_lowercase();
        [EncodeFormat::Source]
            .into_iter()
            .chain(EncodeFormat::CONCRETE)
            .find(|f| f.name() == lower)
    }
}

/// Lower-cased extension of `path`, without the dot.
pub fn source_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_ascii_lowercase)
}

/// The set of formats a `Source` format may resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownFormats {
    formats: Vec<EncodeFormat>,
}

impl Default for KnownFormats {
    fn default() -> Self {
        Self {
            formats: EncodeFormat::CONCRETE.to_vec(),
        }
    }
}

impl KnownFormats {
    /// `Source` is never a resolution target and is dropped.
    pub fn new(formats: impl IntoIterator<Item = EncodeFormat>) -> Self {
        Self {
            formats: formats
                .into_iter()
                .filter(|f| *f != EncodeFormat::Source)
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = EncodeFormat> + '_ {
        self.formats.iter().copied()
    }

    /// First known format whose name ends with the path's extension,
    /// compared case-insensitively.
    pub fn match_path(&self, path: &Path) -> Result<EncodeFormat, ExtractError> {
        let extension = source_extension(path).ok_or_else(|| {
            ExtractError::UnsupportedSourceFormat {
                path: path.to_path_buf(),
                reason: "file has no extension".to_string(),
            }
        })?;

        self.iter()
            .find(|f| f.name().ends_with(extension.as_str()))
            .ok_or_else(|| ExtractError::UnsupportedSourceFormat {
                path: path.to_path_buf(),
                reason: format!("no known encode format matches '.{}'", extension),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_concrete_format_unchanged() {
        let known = KnownFormats::default();
        let path = PathBuf::from("sheet.tga");
        assert_eq!(
            EncodeFormat::Png.resolve(&path, &known).unwrap(),
            EncodeFormat::Png
        );
    }

    #[test]
    fn test_source_resolves_from_extension() {
        let known = KnownFormats::default();
        let cases = [
            ("foo.tga", EncodeFormat::Tga),
            ("foo.TGA", EncodeFormat::Tga),
            ("dir.v2/foo.png", EncodeFormat::Png),
            ("foo.jpg", EncodeFormat::Jpg),
            ("foo.exr", EncodeFormat::Exr),
        ];
        for (path, expected) in cases {
            let resolved = EncodeFormat::Source
                .resolve(Path::new(path), &known)
                .unwrap();
            assert_eq!(resolved, expected, "{path}");
        }
    }

    #[test]
    fn test_suffix_match() {
        // "pg" is a suffix of "jpg"
        let known = KnownFormats::default();
        assert_eq!(
            known.match_path(Path::new("weird.pg")).unwrap(),
            EncodeFormat::Jpg
        );
    }

    #[test]
    fn test_unsupported_extensions() {
        let known = KnownFormats::default();
        for path in ["foo.jpeg", "foo.psd", "foo", "foo."] {
            let err = EncodeFormat::Source
                .resolve(Path::new(path), &known)
                .unwrap_err();
            assert!(
                matches!(err, ExtractError::UnsupportedSourceFormat { .. }),
                "{path}"
            );
        }
    }

    #[test]
    fn test_known_formats_restrict_resolution() {
        let known = KnownFormats::new([EncodeFormat::Source, EncodeFormat::Png]);
        assert_eq!(known.iter().count(), 1);
        assert!(known.match_path(Path::new("foo.tga")).is_err());
        assert_eq!(
            known.match_path(Path::new("foo.png")).unwrap(),
            EncodeFormat::Png
        );
    }

    #[test]
    fn test_extension_of_source_is_unresolved() {
        assert!(matches!(
            EncodeFormat::Source.extension(),
            Err(ExtractError::FormatUnresolved)
        ));
        assert_eq!(EncodeFormat::Exr.extension().unwrap(), "exr");
    }

    #[test]
    fn test_channel_format() {
        assert_eq!(EncodeFormat::Exr.channel_format(), ChannelFormat::Rgba32F);
        assert_eq!(EncodeFormat::Png.channel_format(), ChannelFormat::Rgba8);
        assert_eq!(EncodeFormat::Jpg.channel_format(), ChannelFormat::Rgba8);
        assert_eq!(EncodeFormat::Tga.channel_format(), ChannelFormat::Rgba8);
    }

    #[test]
    fn test_parse() {
        assert_eq!("PNG".parse::<EncodeFormat>().unwrap(), EncodeFormat::Png);
        assert_eq!(
            "source".parse::<EncodeFormat>().unwrap(),
            EncodeFormat::Source
        );
        assert!("bmp".parse::<EncodeFormat>().is_err());
    }
}

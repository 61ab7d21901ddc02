use serde::{Deserialize, Serialize};

use crate::region::{Rect, Region};

/// PNG compression level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// A named rect inside a texture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegionEntry {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl From<&RegionEntry> for Region {
    fn from(entry: &RegionEntry) -> Self {
        Region::new(
            entry.name.clone(),
            Rect::new(entry.x, entry.y, entry.width, entry.height),
        )
    }
}

/// A texture sheet. `path` may be a glob pattern; with no sprites listed
/// every matched texture is written whole.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextureEntry {
    pub path: String,
    #[serde(default)]
    pub sprites: Vec<RegionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextureArrayEntry {
    pub path: String,
    /// Output base name [default: file stem]
    #[serde(default)]
    pub name: Option<String>,
    pub rows: u32,
    pub columns: u32,
    #[serde(default)]
    pub depth: Option<u32>,
}

/// A standalone sprite referencing its texture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpriteEntry {
    pub texture: String,
    #[serde(flatten)]
    pub region: RegionEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AtlasEntry {
    pub name: String,
    pub sprites: Vec<SpriteEntry>,
}

/// Extraction manifest file structure.
///
/// All paths in the manifest are relative to the manifest file location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ManifestConfig {
    /// Manifest version (currently 1)
    pub version: u32,
    /// Output directory for extracted files
    pub output_dir: String,
    /// Output format: "source", "exr", "jpg", "png" or "tga"
    pub format: String,
    /// Origin of sprite rects: "top-left" or "bottom-left"
    pub origin: String,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
    pub textures: Vec<TextureEntry>,
    pub texture_arrays: Vec<TextureArrayEntry>,
    pub sprites: Vec<SpriteEntry>,
    pub atlases: Vec<AtlasEntry>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            version: 1,
            output_dir: ".".to_string(),
            format: "source".to_string(),
            origin: "top-left".to_string(),
            compress: None,
            textures: Vec::new(),
            texture_arrays: Vec::new(),
            sprites: Vec::new(),
            atlases: Vec::new(),
        }
    }
}

mod load;
mod types;

pub use load::LoadedManifest;
pub use types::{
    AtlasEntry, CompressConfig, ManifestConfig, RegionEntry, SpriteEntry, TextureArrayEntry,
    TextureEntry,
};

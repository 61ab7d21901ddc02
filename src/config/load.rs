use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use super::types::{CompressConfig, ManifestConfig, SpriteEntry};
use crate::cli::CompressionLevel;
use crate::extract::{Atlas, ExtractPlan, SpriteSource, TextureArray, TextureSheet, file_stem};
use crate::format::EncodeFormat;
use crate::region::{RectOrigin, Region};

/// A loaded manifest with its associated directory.
///
/// Paths in the manifest are relative to the manifest file location,
/// so we need to track where it was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    /// The parsed manifest
    pub config: ManifestConfig,
    /// The directory containing the manifest file
    pub manifest_dir: PathBuf,
}

impl LoadedManifest {
    /// Load a manifest file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest file: {}", path.display()))?;

        let config: ManifestConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse manifest file: {}", path.display()))?;

        let manifest_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            config,
            manifest_dir,
        })
    }

    /// Resolve the output directory relative to the manifest directory.
    pub fn resolve_output_dir(&self) -> PathBuf {
        self.manifest_dir.join(&self.config.output_dir)
    }

    pub fn format(&self) -> Result<EncodeFormat> {
        self.config
            .format
            .parse::<EncodeFormat>()
            .map_err(|e: String| anyhow!("{} in manifest file", e))
    }

    pub fn origin(&self) -> Result<RectOrigin> {
        match self.config.origin.to_ascii_lowercase().as_str() {
            "top-left" => Ok(RectOrigin::TopLeft),
            "bottom-left" => Ok(RectOrigin::BottomLeft),
            other => Err(anyhow!(
                "unknown origin '{}' in manifest file. Valid values: top-left, bottom-left",
                other
            )),
        }
    }

    pub fn compress(&self) -> Result<Option<CompressionLevel>> {
        self.config
            .compress
            .as_ref()
            .map(|c| match c {
                CompressConfig::Level(n) => n.to_string().parse(),
                CompressConfig::Max(s) => s.parse(),
            })
            .transpose()
            .map_err(|e: String| anyhow!("{} in manifest file", e))
    }

    /// Build the extraction plan, expanding texture glob patterns.
    pub fn to_plan(&self) -> Result<ExtractPlan> {
        let mut plan = ExtractPlan::default();

        for entry in &self.config.textures {
            let sprites: Vec<Region> = entry.sprites.iter().map(Region::from).collect();
            for path in self.resolve_pattern(&entry.path)? {
                plan.textures.push(TextureSheet::new(path, sprites.clone()));
            }
        }

        for entry in &self.config.texture_arrays {
            let path = self.manifest_dir.join(&entry.path);
            plan.texture_arrays.push(TextureArray {
                name: entry.name.clone().unwrap_or_else(|| file_stem(&path)),
                path,
                rows: entry.rows,
                columns: entry.columns,
                depth: entry.depth,
            });
        }

        plan.sprites = self.sprite_sources(&self.config.sprites);

        for entry in &self.config.atlases {
            plan.atlases.push(Atlas {
                name: entry.name.clone(),
                sprites: self.sprite_sources(&entry.sprites),
            });
        }

        Ok(plan)
    }

    fn sprite_sources(&self, entries: &[SpriteEntry]) -> Vec<SpriteSource> {
        entries
            .iter()
            .map(|s| SpriteSource::new(self.manifest_dir.join(&s.texture), Region::from(&s.region)))
            .collect()
    }

    /// Resolve a path or glob pattern relative to the manifest directory.
    fn resolve_pattern(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let full = self.manifest_dir.join(pattern);
        if !is_glob_pattern(pattern) {
            return Ok(vec![full]);
        }

        let pattern_str = full.to_string_lossy();
        let mut results = Vec::new();
        for entry in glob::glob(&pattern_str)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
        {
            let path = entry.with_context(|| format!("failed to read glob entry: {}", pattern))?;
            if path.is_file() {
                results.push(path);
            }
        }
        Ok(results)
    }
}

/// Check if a pattern contains glob characters.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

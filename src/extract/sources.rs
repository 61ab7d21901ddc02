use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::info;

use super::{ExtractEvent, ExtractObserver, ExtractReport, ExtractionJob};
use crate::error::ExtractError;
use crate::format::{EncodeFormat, KnownFormats};
use crate::output::EncodeOptions;
use crate::raster::{Raster, materialize_file};
use crate::region::{Rect, RectOrigin, Region};

/// Settings shared by every job in a run.
#[derive(Debug, Clone)]
pub struct ExtractSettings {
    pub output_dir: PathBuf,
    /// May be `Source`; resolved once per source texture
    pub format: EncodeFormat,
    pub known_formats: KnownFormats,
    /// Origin of caller-supplied sprite rects
    pub origin: RectOrigin,
    pub options: EncodeOptions,
}

impl ExtractSettings {
    pub fn new(output_dir: impl Into<PathBuf>, format: EncodeFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
            known_formats: KnownFormats::default(),
            origin: RectOrigin::TopLeft,
            options: EncodeOptions::default(),
        }
    }
}

/// A source texture with its named sprite rects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSheet {
    pub path: PathBuf,
    /// Empty means the whole texture, named after the file stem
    pub sprites: Vec<Region>,
}

/// A flipbook texture split into a grid of equally sized elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureArray {
    pub path: PathBuf,
    /// Output base name; elements are written as `<name>_<index>`
    pub name: String,
    pub rows: u32,
    pub columns: u32,
    /// Number of elements; defaults to and is capped at `rows * columns`
    pub depth: Option<u32>,
}

/// One sprite referencing its source texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSource {
    pub texture: PathBuf,
    pub region: Region,
}

/// A named group of sprites that may come from several textures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atlas {
    pub name: String,
    pub sprites: Vec<SpriteSource>,
}

/// A decoded source texture and the format its regions are written in.
#[derive(Debug)]
pub struct PreparedTexture {
    pub raster: Raster,
    pub format: EncodeFormat,
}

/// Resolve the output format for `path`, then decode it.
///
/// Format resolution runs first so an unsupported `Source` extension
/// fails before any decoding work.
pub fn prepare_texture(
    path: &Path,
    settings: &ExtractSettings,
) -> Result<PreparedTexture, ExtractError> {
    let format = settings.format.resolve(path, &settings.known_formats)?;
    let raster = materialize_file(path)?;
    Ok(PreparedTexture { raster, format })
}

pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

impl TextureSheet {
    pub fn new(path: impl Into<PathBuf>, sprites: Vec<Region>) -> Self {
        Self {
            path: path.into(),
            sprites,
        }
    }

    /// Decode the texture once and write every sprite from it.
    pub fn extract(
        &self,
        settings: &ExtractSettings,
        observer: &mut dyn ExtractObserver,
    ) -> ExtractReport {
        let mut report = ExtractReport::default();
        let prepared = match prepare_texture(&self.path, settings) {
            Ok(p) => p,
            Err(e) => {
                report.record_failure(self.path.display().to_string(), e);
                return report;
            }
        };

        let regions = if self.sprites.is_empty() {
            let (w, h) = prepared.raster.dimensions();
            vec![Region::whole(file_stem(&self.path), w, h)]
        } else {
            self.sprites.clone()
        };

        report.merge(
            ExtractionJob::new(&prepared.raster, &settings.output_dir, prepared.format)
                .regions(regions)
                .origin(settings.origin)
                .options(settings.options)
                .run(observer),
        );

        observer.notify(&ExtractEvent::TextureProcessed {
            path: self.path.clone(),
        });
        report
    }
}

impl TextureArray {
    pub fn new(path: impl Into<PathBuf>, rows: u32, columns: u32) -> Self {
        let path = path.into();
        Self {
            name: file_stem(&path),
            path,
            rows,
            columns,
            depth: None,
        }
    }

    /// Element rects for a `width x height` flipbook, row-major from the
    /// top-left corner.
    pub fn element_regions(&self, width: u32, height: u32) -> Result<Vec<Region>, ExtractError> {
        let invalid = || ExtractError::InvalidGrid {
            name: self.name.clone(),
            rows: self.rows,
            columns: self.columns,
        };
        if self.rows == 0 || self.columns == 0 {
            return Err(invalid());
        }

        let cell_w = width / self.columns;
        let cell_h = height / self.rows;
        if cell_w == 0 || cell_h == 0 {
            return Err(invalid());
        }

        let capacity = u64::from(self.rows) * u64::from(self.columns);
        let count = self
            .depth
            .map_or(capacity, |d| u64::from(d).min(capacity));

        let to_i32 = |v: u64| i32::try_from(v).unwrap_or(i32::MAX);
        let regions = (0..count)
            .map(|index| {
                let row = index / u64::from(self.columns);
                let column = index % u64::from(self.columns);
                Region::new(
                    format!("{}_{}", self.name, index),
                    Rect::new(
                        to_i32(column * u64::from(cell_w)),
                        to_i32(row * u64::from(cell_h)),
                        to_i32(u64::from(cell_w)),
                        to_i32(u64::from(cell_h)),
                    ),
                )
            })
            .collect();
        Ok(regions)
    }

    pub fn extract(
        &self,
        settings: &ExtractSettings,
        observer: &mut dyn ExtractObserver,
    ) -> ExtractReport {
        let mut report = ExtractReport::default();
        let prepared = match prepare_texture(&self.path, settings) {
            Ok(p) => p,
            Err(e) => {
                report.record_failure(self.name.as_str(), e);
                return report;
            }
        };

        let (w, h) = prepared.raster.dimensions();
        let regions = match self.element_regions(w, h) {
            Ok(r) => r,
            Err(e) => {
                report.record_failure(self.name.as_str(), e);
                return report;
            }
        };

        // Grid rects are generated top-left regardless of the caller's origin
        report.merge(
            ExtractionJob::new(&prepared.raster, &settings.output_dir, prepared.format)
                .regions(regions)
                .options(settings.options)
                .run(observer),
        );

        observer.notify(&ExtractEvent::TextureArrayProcessed {
            name: self.name.clone(),
        });
        report
    }
}

impl SpriteSource {
    pub fn new(texture: impl Into<PathBuf>, region: Region) -> Self {
        Self {
            texture: texture.into(),
            region,
        }
    }

    /// Write this sprite. Pass `raster` when the texture is already decoded;
    /// otherwise it is decoded here.
    pub fn extract(
        &self,
        settings: &ExtractSettings,
        raster: Option<&Raster>,
        observer: &mut dyn ExtractObserver,
    ) -> ExtractReport {
        let mut report = ExtractReport::default();
        let owned;
        let (raster, format) = match raster {
            Some(raster) => match settings.format.resolve(&self.texture, &settings.known_formats) {
                Ok(format) => (raster, format),
                Err(e) => {
                    report.record_failure(self.region.name.as_str(), e);
                    return report;
                }
            },
            None => match prepare_texture(&self.texture, settings) {
                Ok(prepared) => {
                    owned = prepared;
                    (&owned.raster, owned.format)
                }
                Err(e) => {
                    report.record_failure(self.region.name.as_str(), e);
                    return report;
                }
            },
        };

        report.merge(
            ExtractionJob::new(raster, &settings.output_dir, format)
                .regions(vec![self.region.clone()])
                .origin(settings.origin)
                .options(settings.options)
                .run(observer),
        );
        report
    }
}

/// Sprites that share one source texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureGroup {
    pub texture: PathBuf,
    /// In the order the sprites were listed
    pub regions: Vec<Region>,
}

/// Group sprites by source texture, textures in first-seen order.
pub fn group_by_texture(sprites: &[SpriteSource]) -> Vec<TextureGroup> {
    let mut slots: HashMap<&Path, usize> = HashMap::new();
    let mut groups: Vec<TextureGroup> = Vec::new();

    for sprite in sprites {
        let slot = *slots.entry(sprite.texture.as_path()).or_insert_with(|| {
            groups.push(TextureGroup {
                texture: sprite.texture.clone(),
                regions: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].regions.push(sprite.region.clone());
    }

    groups
}

/// Write `sprites` one source texture at a time: each texture is decoded
/// once, its sprites written, then the raster is dropped. A texture that
/// fails to prepare is reported once and its sprites are skipped.
fn extract_sprite_list(
    sprites: &[SpriteSource],
    settings: &ExtractSettings,
    observer: &mut dyn ExtractObserver,
) -> ExtractReport {
    let mut report = ExtractReport::default();

    for group in group_by_texture(sprites) {
        let prepared = match prepare_texture(&group.texture, settings) {
            Ok(p) => p,
            Err(e) => {
                report.record_failure(group.texture.display().to_string(), e);
                continue;
            }
        };
        report.merge(
            ExtractionJob::new(&prepared.raster, &settings.output_dir, prepared.format)
                .regions(group.regions)
                .origin(settings.origin)
                .options(settings.options)
                .run(observer),
        );
    }

    report
}

impl Atlas {
    pub fn extract(
        &self,
        settings: &ExtractSettings,
        observer: &mut dyn ExtractObserver,
    ) -> ExtractReport {
        info!("Extracting atlas '{}' ({} sprites)", self.name, self.sprites.len());
        let report = extract_sprite_list(&self.sprites, settings, observer);
        observer.notify(&ExtractEvent::AtlasProcessed {
            name: self.name.clone(),
        });
        report
    }
}

pub fn extract_textures(
    sheets: &[TextureSheet],
    settings: &ExtractSettings,
    observer: &mut dyn ExtractObserver,
) -> ExtractReport {
    let mut report = ExtractReport::default();
    for sheet in sheets {
        report.merge(sheet.extract(settings, observer));
    }
    report
}

pub fn extract_texture_arrays(
    arrays: &[TextureArray],
    settings: &ExtractSettings,
    observer: &mut dyn ExtractObserver,
) -> ExtractReport {
    let mut report = ExtractReport::default();
    for array in arrays {
        report.merge(array.extract(settings, observer));
    }
    report
}

/// Standalone sprites; a texture referenced by several of them is decoded once.
pub fn extract_sprites(
    sprites: &[SpriteSource],
    settings: &ExtractSettings,
    observer: &mut dyn ExtractObserver,
) -> ExtractReport {
    extract_sprite_list(sprites, settings, observer)
}

pub fn extract_atlases(
    atlases: &[Atlas],
    settings: &ExtractSettings,
    observer: &mut dyn ExtractObserver,
) -> ExtractReport {
    let mut report = ExtractReport::default();
    for atlas in atlases {
        report.merge(atlas.extract(settings, observer));
    }
    report
}

/// Everything one run extracts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractPlan {
    pub textures: Vec<TextureSheet>,
    pub texture_arrays: Vec<TextureArray>,
    pub sprites: Vec<SpriteSource>,
    pub atlases: Vec<Atlas>,
}

impl ExtractPlan {
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
            && self.texture_arrays.is_empty()
            && self.sprites.is_empty()
            && self.atlases.is_empty()
    }

    pub fn run(
        &self,
        settings: &ExtractSettings,
        observer: &mut dyn ExtractObserver,
    ) -> ExtractReport {
        let mut report = extract_textures(&self.textures, settings, observer);
        report.merge(extract_texture_arrays(&self.texture_arrays, settings, observer));
        report.merge(extract_sprites(&self.sprites, settings, observer));
        report.merge(extract_atlases(&self.atlases, settings, observer));
        report
    }
}

use std::path::{Component, Path, PathBuf};

use log::debug;

use super::{ExtractEvent, ExtractObserver, ExtractReport};
use crate::error::ExtractError;
use crate::format::EncodeFormat;
use crate::output::{EncodeOptions, encode_and_write};
use crate::raster::{Raster, crop};
use crate::region::{RectOrigin, Region, resolve};

/// Crops and writes a list of regions from one materialized raster.
///
/// The raster is decoded once by the caller and borrowed for every region.
pub struct ExtractionJob<'a> {
    pub raster: &'a Raster,
    pub regions: Vec<Region>,
    pub output_dir: PathBuf,
    /// Must already be resolved; `Source` fails every region
    pub format: EncodeFormat,
    pub origin: RectOrigin,
    pub options: EncodeOptions,
}

impl<'a> ExtractionJob<'a> {
    pub fn new(raster: &'a Raster, output_dir: impl Into<PathBuf>, format: EncodeFormat) -> Self {
        Self {
            raster,
            regions: Vec::new(),
            output_dir: output_dir.into(),
            format,
            origin: RectOrigin::TopLeft,
            options: EncodeOptions::default(),
        }
    }

    pub fn regions(mut self, regions: Vec<Region>) -> Self {
        self.regions = regions;
        self
    }

    pub fn origin(mut self, origin: RectOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Process every region in order. A failing region is recorded in the
    /// report and the remaining regions still run.
    pub fn run(&self, observer: &mut dyn ExtractObserver) -> ExtractReport {
        debug!(
            "Extracting {} region(s) as {} into {}",
            self.regions.len(),
            self.format,
            self.output_dir.display()
        );

        let mut report = ExtractReport::default();
        for region in &self.regions {
            match self.extract_region(region) {
                Ok(path) => {
                    observer.notify(&ExtractEvent::SpriteProcessed {
                        name: region.name.clone(),
                    });
                    observer.notify(&ExtractEvent::FileWritten { path: path.clone() });
                    report.record_written(path);
                }
                Err(e) => report.record_failure(region.name.as_str(), e),
            }
        }
        report
    }

    /// Resolve, crop and write a single region.
    pub fn extract_region(&self, region: &Region) -> Result<PathBuf, ExtractError> {
        // Fail before touching pixels if the format was never resolved
        self.format.extension()?;
        let stem = output_stem(&self.output_dir, &region.name)?;

        let (width, height) = self.raster.dimensions();
        let region = region.to_top_left(self.origin, height);
        let rect = resolve(width, height, &region)?;
        let cropped = crop(self.raster, rect, self.format.channel_format());
        encode_and_write(cropped, &stem, self.format, &self.options)
    }
}

/// `<output_dir>/<name>`. The name must be a single plain file name so the
/// output always lands inside `output_dir`.
fn output_stem(output_dir: &Path, name: &str) -> Result<PathBuf, ExtractError> {
    let mut components = Path::new(name).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(c)), None) if c == name
    );
    if !plain || name.contains(['/', '\\']) {
        return Err(ExtractError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(output_dir.join(name))
}

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod output;
pub mod raster;
pub mod region;

pub use cli::{CliArgs, Command};
pub use error::ExtractError;
pub use extract::{
    Atlas, ExtractEvent, ExtractObserver, ExtractPlan, ExtractReport, ExtractSettings,
    ExtractionJob, SpriteSource, TextureArray, TextureSheet,
};
pub use format::{EncodeFormat, KnownFormats};
pub use raster::{ChannelFormat, Raster, crop, materialize};
pub use region::{Rect, RectOrigin, Region, ResolvedRect, resolve};

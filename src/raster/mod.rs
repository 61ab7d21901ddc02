mod crop;
mod materialize;
mod raster;

pub use crop::crop;
pub use materialize::{SourceKind, materialize, materialize_file};
pub use raster::{ChannelFormat, Raster};

mod args;

pub use args::{ArrayArgs, CliArgs, Command, CompressionLevel, ManifestArgs, OutputArgs, SheetArgs};

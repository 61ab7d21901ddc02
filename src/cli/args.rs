use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::format::EncodeFormat;

#[derive(Parser, Debug)]
#[command(name = "sprite-extractor")]
#[command(version, about = "Extract sprites into standalone image files", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Extract everything listed in a JSON manifest
    Manifest(ManifestArgs),
    /// Split a flipbook texture into its grid elements
    Array(ArrayArgs),
    /// Write each input texture whole in the chosen format
    Sheet(SheetArgs),
}

impl Command {
    pub fn output_args(&self) -> &OutputArgs {
        match self {
            Command::Manifest(args) => &args.output,
            Command::Array(args) => &args.output,
            Command::Sheet(args) => &args.output,
        }
    }
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output directory [default: manifest output_dir, or .]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format [default: source]
    #[arg(short, long, value_enum)]
    pub format: Option<EncodeFormat>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ManifestArgs {
    /// Extraction manifest (.json)
    #[arg(value_name = "FILE")]
    pub manifest: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ArrayArgs {
    /// Flipbook texture
    pub input: PathBuf,

    /// Number of grid rows
    #[arg(long)]
    pub rows: u32,

    /// Number of grid columns
    #[arg(long)]
    pub columns: u32,

    /// Number of elements to extract [default: rows * columns]
    #[arg(long)]
    pub depth: Option<u32>,

    /// Base name for element files (<name>_<index>) [default: input file stem]
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SheetArgs {
    /// Input image files
    #[arg(required = true)]
    pub input: Vec<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}

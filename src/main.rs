use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{debug, info};

use sprite_extractor::cli::{CliArgs, Command, CompressionLevel, OutputArgs};
use sprite_extractor::config::LoadedManifest;
use sprite_extractor::extract::{
    ExtractEvent, ExtractPlan, ExtractSettings, TextureArray, TextureSheet,
};
use sprite_extractor::format::EncodeFormat;
use sprite_extractor::output::EncodeOptions;
use sprite_extractor::region::RectOrigin;

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., manifest loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();
    let output_args = cli.command.output_args().clone();

    let (plan, merged) = match &cli.command {
        Command::Manifest(args) => {
            let loaded = LoadedManifest::load(&args.manifest)
                .with_context(|| format!("failed to load manifest: {}", args.manifest.display()))?;
            let merged = merge_manifest_with_args(&output_args, Some(&loaded))?;
            (loaded.to_plan()?, merged)
        }
        Command::Array(args) => {
            let mut array = TextureArray::new(&args.input, args.rows, args.columns);
            array.depth = args.depth;
            if let Some(name) = &args.name {
                array.name = name.clone();
            }
            let plan = ExtractPlan {
                texture_arrays: vec![array],
                ..ExtractPlan::default()
            };
            (plan, merge_manifest_with_args(&output_args, None)?)
        }
        Command::Sheet(args) => {
            let plan = ExtractPlan {
                textures: args
                    .input
                    .iter()
                    .map(|path| TextureSheet::new(path, Vec::new()))
                    .collect(),
                ..ExtractPlan::default()
            };
            (plan, merge_manifest_with_args(&output_args, None)?)
        }
    };

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(if merged.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("Sprite extractor v{}", env!("CARGO_PKG_VERSION"));

    if plan.is_empty() {
        bail!("nothing to extract");
    }

    // Create output directory if it doesn't exist
    if !merged.output.exists() {
        fs::create_dir_all(&merged.output).with_context(|| {
            format!("failed to create output directory: {}", merged.output.display())
        })?;
    }

    let settings = ExtractSettings {
        origin: merged.origin,
        options: EncodeOptions {
            png_compress: merged.compress,
        },
        ..ExtractSettings::new(&merged.output, merged.format)
    };

    let mut observer = |event: &ExtractEvent| match event {
        ExtractEvent::TextureProcessed { path } => {
            info!("Processed texture {}", path.display())
        }
        ExtractEvent::TextureArrayProcessed { name } => info!("Processed texture array {}", name),
        ExtractEvent::AtlasProcessed { name } => info!("Processed atlas {}", name),
        ExtractEvent::SpriteProcessed { name } => debug!("Extracted {}", name),
        ExtractEvent::FileWritten { path } => debug!("Saved {}", path.display()),
    };
    let report = plan.run(&settings, &mut observer);

    info!(
        "Wrote {} file(s), {} item(s) failed",
        report.written.len(),
        report.failures.len()
    );
    if let Some(last) = report.last_written() {
        info!("Last output: {}", last.display());
    }

    if !report.is_success() {
        bail!("{} item(s) could not be extracted", report.failures.len());
    }

    info!("Done!");
    Ok(())
}

/// Merged configuration from CLI args and optional manifest.
struct MergedConfig {
    output: PathBuf,
    format: EncodeFormat,
    origin: RectOrigin,
    compress: Option<CompressionLevel>,
    verbose: bool,
}

/// Merge manifest values with CLI arguments.
/// CLI arguments always take precedence over manifest values.
fn merge_manifest_with_args(
    args: &OutputArgs,
    loaded: Option<&LoadedManifest>,
) -> Result<MergedConfig> {
    // Determine output directory: CLI > manifest > default
    let output = args.output.clone().unwrap_or_else(|| {
        loaded
            .map(LoadedManifest::resolve_output_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    // Format: CLI > manifest > default
    let format = match (args.format, loaded) {
        (Some(format), _) => format,
        (None, Some(lm)) => lm.format()?,
        (None, None) => EncodeFormat::Source,
    };

    // Origin is manifest-only
    let origin = match loaded {
        Some(lm) => lm.origin()?,
        None => RectOrigin::TopLeft,
    };

    // Compress: CLI option overrides manifest
    let compress = match (args.compress, loaded) {
        (Some(level), _) => Some(level),
        (None, Some(lm)) => lm.compress()?,
        (None, None) => None,
    };

    Ok(MergedConfig {
        output,
        format,
        origin,
        compress,
        // Verbose is CLI-only
        verbose: args.verbose,
    })
}

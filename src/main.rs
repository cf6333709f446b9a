//! Command-line front end.
//!
//! ```text
//! glyphfuse HELLO WORLD --font DejaVuSans.ttf
//! glyphfuse A B --font font.ttf --strategy zig-zag --output ab.stl
//! RUST_LOG=glyphfuse=debug glyphfuse ...
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use glyphfuse::config::{CombineStrategy, FuseConfig};
use glyphfuse::export::download_name;
use glyphfuse::pipeline::generate;
use glyphfuse::raster::GlyphRasterizer;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Text read from the first viewing direction.
    text_a: String,
    /// Text read from the second viewing direction.
    text_b: String,
    /// TrueType or OpenType font file.
    #[arg(long)]
    font: PathBuf,
    #[arg(long)]
    bold: bool,
    #[arg(long)]
    italic: bool,
    /// Overrides the strategy from the config file.
    #[arg(long, value_enum)]
    strategy: Option<CombineStrategy>,
    /// JSON config file; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output path. Defaults to a name built from both texts.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Default: WARN for everything, INFO for glyphfuse.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("glyphfuse=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();
    match run(&args) {
        Ok(path) => {
            info!(path = %path.display(), "wrote model");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "generation failed");
            eprintln!("generation failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> glyphfuse::Result<PathBuf> {
    let mut config = match &args.config {
        Some(path) => FuseConfig::from_json(&std::fs::read_to_string(path).map_err(
            |e| glyphfuse::error::InputError::InvalidConfig(format!("{}: {e}", path.display())),
        )?)?,
        None => FuseConfig::default(),
    };
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    config.raster.bold |= args.bold;
    config.raster.italic |= args.italic;

    let rasterizer = GlyphRasterizer::from_file(&args.font)?;
    let model = generate(&args.text_a, &args.text_b, &config, &rasterizer)?;
    let bytes = model.to_stl_binary()?;

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(download_name(&args.text_a, &args.text_b)));
    std::fs::write(&path, bytes).map_err(glyphfuse::error::ExportError::Io)?;
    Ok(path)
}

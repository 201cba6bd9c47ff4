//! iriscode CLI — compare two iris images from the command line.
//!
//! Exit status is non-zero when an image cannot be loaded or segmented
//! or the configuration is invalid, and zero otherwise, independent of
//! the match/no-match outcome itself.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use iriscode::{DebugArtifacts, IrisMatcher, MatchResult, PipelineConfig};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "iriscode")]
#[command(about = "Biometric iris matching: segment, unwrap, encode and compare two eye images")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two iris images and classify the result.
    Compare(CompareArgs),

    /// Print the default pipeline configuration as JSON.
    ConfigInfo,
}

#[derive(Debug, Clone, Args)]
struct CompareArgs {
    /// Path to the first eye image.
    #[arg(long)]
    image_a: PathBuf,

    /// Path to the second eye image.
    #[arg(long)]
    image_b: PathBuf,

    /// Path to write the comparison result (JSON).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory for diagnostic images (masks, detection overlays,
    /// polar unwraps).
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    /// Number of radial sampling rows in the polar grid.
    #[arg(long, default_value = "64")]
    num_radial: usize,

    /// Number of angular sampling columns in the polar grid.
    #[arg(long, default_value = "360")]
    num_angular: usize,

    /// Segmentation intensity threshold (iris-on-dark-background).
    #[arg(long, default_value = "30")]
    binarize_threshold: u8,

    /// Normalized-distance boundary below which two irises match.
    #[arg(long, default_value = "0.32")]
    match_threshold: f64,

    /// Normalized-distance boundary below which the result is uncertain.
    #[arg(long, default_value = "0.40")]
    uncertain_threshold: f64,
}

impl CompareArgs {
    fn to_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.polar.num_radial = self.num_radial;
        config.polar.num_angular = self.num_angular;
        config.locator.binarize_threshold = self.binarize_threshold;
        config.matcher.match_threshold = self.match_threshold;
        config.matcher.uncertain_threshold = self.uncertain_threshold;
        config
    }
}

#[derive(serde::Serialize)]
struct CompareReport<'a> {
    image_a: &'a Path,
    image_b: &'a Path,
    result: MatchResult,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Compare(args) => run_compare(&args),
        Commands::ConfigInfo => {
            println!(
                "{}",
                serde_json::to_string_pretty(&PipelineConfig::default())?
            );
            Ok(())
        }
    }
}

fn load_image(path: &Path) -> CliResult<image::DynamicImage> {
    image::open(path)
        .map_err(|e| -> CliError { format!("cannot read image '{}': {e}", path.display()).into() })
}

fn run_compare(args: &CompareArgs) -> CliResult<()> {
    let image_a = load_image(&args.image_a)?;
    let image_b = load_image(&args.image_b)?;

    let matcher = IrisMatcher::with_config(args.to_config());

    let (result, artifacts) = if args.debug_dir.is_some() {
        matcher.compare_with_debug(&image_a, &image_b)
    } else {
        (matcher.compare(&image_a, &image_b), DebugArtifacts::default())
    };

    if let Some(dir) = &args.debug_dir {
        write_artifacts(dir, &artifacts)?;
    }

    let result = result?;

    print_report(&result);

    if let Some(out) = &args.out {
        let report = CompareReport {
            image_a: &args.image_a,
            image_b: &args.image_b,
            result,
        };
        std::fs::write(out, serde_json::to_vec_pretty(&report)?)?;
        tracing::info!(path = %out.display(), "wrote comparison report");
    }

    Ok(())
}

fn print_report(result: &MatchResult) {
    println!("differing bits:      {}", result.differing_bits);
    println!("normalized distance: {:.4}", result.normalized_distance);
    println!(
        "similarity:          {:.2}%",
        (1.0 - result.normalized_distance) * 100.0
    );
    println!("decision:            {}", result.decision);
    println!("confidence:          {:.1}%", result.confidence);
}

fn write_artifacts(dir: &Path, artifacts: &DebugArtifacts) -> CliResult<()> {
    std::fs::create_dir_all(dir)?;
    let sides = [("a", &artifacts.a), ("b", &artifacts.b)];
    for (tag, side) in sides {
        if let Some(mask) = &side.mask {
            mask.save(dir.join(format!("mask_{tag}.png")))?;
        }
        if let Some(overlay) = &side.overlay {
            overlay.save(dir.join(format!("detect_{tag}.png")))?;
        }
        if let Some(polar) = &side.polar {
            polar.save(dir.join(format!("polar_{tag}.png")))?;
        }
    }
    tracing::info!(dir = %dir.display(), "wrote debug artifacts");
    Ok(())
}

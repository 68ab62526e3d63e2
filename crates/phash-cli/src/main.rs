use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{info, warn, LevelFilter};
use phash_core::processing::{
    phash_from_file, preview_image, process_image_batch, IntensitySource,
};
use phash_core::{Config, LogLevel, PerceptualHasher};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "phash")]
#[command(about = "Compute and compare perceptual image fingerprints")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to rotating files in this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fingerprint of each image
    Hash {
        /// Images to fingerprint
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Emit results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Hamming distance between two hex fingerprints, using the configured bits per digit
    Distance { a: String, b: String },

    /// Fingerprint two images and report how similar they are
    Compare { first: PathBuf, second: PathBuf },

    /// Write the normalized DCT of an image as a grayscale PNG
    Preview { input: PathBuf, output: PathBuf },

    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "phash.json")]
        path: PathBuf,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Set up configuration
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    // Set log level based on verbosity
    config.log_level = match cli.verbose {
        0 => config.log_level,
        1 => LogLevel::Debug,
        _ => LogLevel::Trace,
    };
    init_logging(&cli, config.log_level)?;

    match cli.command {
        Commands::Hash { paths, json } => {
            let hasher = PerceptualHasher::new(config)?;
            let (results, errors) = process_image_batch(&paths, &hasher)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for result in &results {
                    println!("{}  {}", result.fingerprint, result.path.display());
                }
            }

            if errors > 0 {
                warn!("{} of {} images could not be hashed", errors, paths.len());
                anyhow::bail!("{} images failed", errors);
            }
            Ok(())
        }

        Commands::Distance { a, b } => {
            let hasher = PerceptualHasher::new(config)?;
            let distance = hasher.distance(&a, &b)?;
            println!("{}", distance);
            Ok(())
        }

        Commands::Compare { first, second } => {
            let hasher = PerceptualHasher::new(config)?;
            let a = phash_from_file(&first, &hasher)?;
            let b = phash_from_file(&second, &hasher)?;
            let distance = hasher.distance(a.as_str(), b.as_str())?;
            let verdict = if distance <= hasher.config().similarity_threshold {
                "similar"
            } else {
                "different"
            };

            println!("{}  {}", a, first.display());
            println!("{}  {}", b, second.display());
            println!("distance: {} ({})", distance, verdict);
            Ok(())
        }

        Commands::Preview { input, output } => {
            let hasher = PerceptualHasher::new(config)?;
            let img = image::open(&input)
                .with_context(|| format!("Failed to open {}", input.display()))?;
            let matrix = img.intensity_matrix(hasher.config().reduced_size)?;
            let frequencies = hasher.frequency_matrix(&matrix)?;

            preview_image(&frequencies)?.save(&output)?;
            info!("Wrote DCT preview to {}", output.display());
            Ok(())
        }

        Commands::GenerateConfig { path } => {
            Config::default().save_to_file(&path)?;
            println!("Configuration file generated at: {}", path.display());
            Ok(())
        }
    }
}

fn init_logging(cli: &Cli, level: LogLevel) -> Result<(), anyhow::Error> {
    let level = LevelFilter::from(level);

    match &cli.log_dir {
        Some(dir) => {
            let dir = dir
                .to_str()
                .context("Log directory must be valid UTF-8")?;
            phash_core::logging::init_logger(dir, level)
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
        }
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_env("PHASH_LOG")
                .init();
        }
    }

    Ok(())
}

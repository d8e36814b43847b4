//! CLV Pipeline CLI
//!
//! Weekly tracking CSV -> per-frame and per-play tables

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "clv_pipeline")]
#[command(about = "Closing-line velocity analysis over weekly tracking data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Analyze a range of weeks and write the export tables
    Run {
        /// Directory holding train/ and supplementary_data.csv
        #[arg(long)]
        data_dir: PathBuf,

        /// Weeks to process (e.g., "1-9" or "1,3,5-7")
        #[arg(long, default_value = "1-9")]
        weeks: String,

        /// Output directory
        #[arg(long)]
        out: PathBuf,

        /// Threshold preset (canonical, legacy)
        #[arg(long)]
        profile: Option<String>,

        /// YAML config file (overrides --profile)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Supplementary play table (default: <data-dir>/supplementary_data.csv)
        #[arg(long)]
        supplementary: Option<PathBuf>,

        /// Minimum plays for a leaderboard entry
        #[arg(long, default_value_t = clv_pipeline::DEFAULT_MIN_PLAYS)]
        min_plays: usize,
    },

    /// Print the effective analysis config as YAML
    Config {
        /// Threshold preset (canonical, legacy)
        #[arg(long)]
        profile: Option<String>,

        /// YAML config file (overrides --profile)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,clv_core=info,clv_pipeline=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data_dir,
            weeks,
            out,
            profile,
            config,
            supplementary,
            min_plays,
        } => {
            let options = clv_pipeline::PipelineOptions {
                weeks: clv_pipeline::parse_week_range(&weeks)?,
                config: clv_pipeline::resolve_config(config.as_deref(), profile.as_deref())?,
                data_dir,
                out_dir: out,
                supplementary,
                min_plays,
            };

            println!("Running CLV analysis...");
            println!("   Data:   {}", options.data_dir.display());
            println!("   Weeks:  {:?}", options.weeks);
            println!("   Output: {}", options.out_dir.display());

            let summary = clv_pipeline::run(&options)?;
            print_summary(&summary);
        }

        Commands::Config { profile, config } => {
            let cfg = clv_pipeline::resolve_config(config.as_deref(), profile.as_deref())?;
            print!("{}", cfg.to_yaml_string()?);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_summary(summary: &clv_pipeline::RunSummary) {
    println!("\nRun complete");
    println!("   Weeks processed: {}", summary.weeks.len());
    if !summary.weeks_skipped.is_empty() {
        println!("   Weeks skipped:   {:?}", summary.weeks_skipped);
    }
    println!("   Plays analyzed:  {} / {}", summary.plays_analyzed, summary.plays_seen);
    for (reason, n) in &summary.exclusions {
        println!("     {:<24} {}", reason, n);
    }
    println!("   Frame rows:      {}", summary.frame_rows);
    println!("   Frames:          {}", summary.frames_path.display());
    println!("   Metrics:         {}", summary.metrics_path.display());
    println!("   Leaderboards:    {}", summary.leaderboards_path.display());
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("clv_pipeline CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}

//! CCT Merge CLI
//!
//! Consolidates per-run benchmark sampling profiles into a single merged,
//! measurement-annotated calling-context tree.

use anyhow::Result;
use clap::{Parser, Subcommand};
use cct_merge::commands::{execute_build, validate_args, BuildArgs};
use cct_merge::flamegraph::FlamegraphConfig;
use cct_merge::utils::config::{DEFAULT_MAX_THREADS, SCHEMA_VERSION};
use env_logger::Env;
use std::path::PathBuf;

/// CCT Merge - calling-context tree consolidation for sampled benchmarks
#[derive(Parser, Debug)]
#[command(name = "cct-merge")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a merged tree from per-run sample files
    Build {
        /// Directory holding per-run sample files
        #[arg(short, long)]
        input: PathBuf,

        /// Commit tag expected in every sample filename
        #[arg(short, long)]
        commit: String,

        /// Benchmark entry method fragment to isolate at
        #[arg(short, long)]
        entry_method: String,

        /// Splice out JVM/native infrastructure frames
        #[arg(long)]
        filter_infra: bool,

        /// Maximum number of parse workers
        #[arg(long, default_value_t = DEFAULT_MAX_THREADS)]
        threads: usize,

        /// Output path for the JSON profile
        #[arg(short, long, default_value = "cct.json")]
        output: PathBuf,

        /// Output path for an SVG flamegraph (optional)
        #[arg(short, long)]
        flamegraph: Option<PathBuf>,

        /// Flamegraph title
        #[arg(long)]
        title: Option<String>,

        /// Flamegraph width in pixels
        #[arg(long, default_value = "1200")]
        width: usize,

        /// Print the indented tree to stdout
        #[arg(long)]
        print_tree: bool,
    },

    /// Validate a profile JSON file
    Validate {
        /// Path to profile JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Build {
            input,
            commit,
            entry_method,
            filter_infra,
            threads,
            output,
            flamegraph,
            title,
            width,
            print_tree,
        } => {
            let fg_config = if flamegraph.is_some() {
                let mut config = FlamegraphConfig::new().with_width(width);
                if let Some(title_str) = title {
                    config = config.with_title(title_str);
                }
                Some(config)
            } else {
                None
            };

            let args = BuildArgs {
                input_dir: input,
                commit,
                entry_method,
                filter_infra,
                max_threads: threads,
                output_json: output,
                output_svg: flamegraph,
                flamegraph_config: fg_config,
                print_tree,
            };

            validate_args(&args)?;
            execute_build(args)?;
        }

        Commands::Validate { file } => {
            validate_profile_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a profile JSON file
fn validate_profile_file(file_path: PathBuf) -> Result<()> {
    use cct_merge::output::read_profile;

    println!("Validating profile: {}", file_path.display());

    let profile = read_profile(&file_path)?;

    println!("✓ Valid profile JSON");
    println!("  Version: {}", profile.version);
    println!("  Commit: {}", profile.commit);
    println!("  Entry method: {}", profile.entry_method);
    println!("  Runs: {}", profile.runs);
    println!("  Root frame: {}", profile.root.frame);

    Ok(())
}

/// Display version information
fn display_version() {
    println!("cct-merge {}", env!("CARGO_PKG_VERSION"));
    println!("Profile schema version: {}", SCHEMA_VERSION);
}

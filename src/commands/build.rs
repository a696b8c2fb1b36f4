//! Build command implementation.
//!
//! The build command:
//! 1. Gathers sample files for the requested commit
//! 2. Builds the merged, measurement-annotated tree
//! 3. Writes the JSON profile
//! 4. Optionally writes a flamegraph and prints the tree

use crate::builder::{build_tree, select_run_files, BuildOptions};
use crate::flamegraph::{generate_flamegraph, FlamegraphConfig};
use crate::output::{to_profile, write_profile, write_svg};
use crate::tree::render_text;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the build command
#[derive(Debug, Clone)]
pub struct BuildArgs {
    /// Directory holding per-run sample files
    pub input_dir: PathBuf,

    /// Commit tag expected in sample filenames; measurements are grouped
    /// under it in the output
    pub commit: String,

    /// Benchmark entry method fragment
    pub entry_method: String,

    /// Splice out JVM/native infrastructure frames
    pub filter_infra: bool,

    /// Upper bound on parse workers
    pub max_threads: usize,

    /// Output path for the JSON profile
    pub output_json: PathBuf,

    /// Output path for the SVG flamegraph (optional)
    pub output_svg: Option<PathBuf>,

    /// Flamegraph configuration
    pub flamegraph_config: Option<FlamegraphConfig>,

    /// Print the indented tree to stdout
    pub print_tree: bool,
}

/// Execute the build command
///
/// # Errors
/// * Empty or commit-mismatched sample directories
/// * Sample decode or filename-ordinal errors
/// * File write errors
pub fn execute_build(args: BuildArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Building merged tree for commit: {}", args.commit);
    info!("Sample directory: {}", args.input_dir.display());

    // Step 1: Gather sample files
    info!("Step 1/4: Gathering sample files...");
    let run_files = gather_sample_files(&args.input_dir)
        .context("Failed to list sample directory")?;
    debug!("Found {} candidate files", run_files.len());

    // Step 2: Build the merged tree
    info!("Step 2/4: Building merged tree...");
    let opts = BuildOptions {
        commit: args.commit.clone(),
        entry_method: args.entry_method.clone(),
        filter_infra: args.filter_infra,
        max_threads: args.max_threads,
    };
    let tree = build_tree(&run_files, &opts)
        .context("Failed to build merged tree")?;
    let runs = select_run_files(&run_files, &args.commit).len();
    debug!("Merged tree has {} nodes from {} runs", tree.len(), runs);

    // Step 3: Generate flamegraph (if requested)
    let svg_content = if args.output_svg.is_some() {
        info!("Step 3/4: Generating flamegraph...");
        let svg = generate_flamegraph(&tree, &args.commit, args.flamegraph_config.as_ref())
            .context("Failed to generate flamegraph")?;
        Some(svg)
    } else {
        info!("Step 3/4: Skipping flamegraph generation (not requested)");
        None
    };

    // Step 4: Write outputs
    info!("Step 4/4: Writing output files...");

    let profile = to_profile(&tree, &args.commit, &args.entry_method, runs);
    write_profile(&profile, &args.output_json)
        .context("Failed to write profile JSON")?;
    info!("✓ Profile written to: {}", args.output_json.display());

    if let (Some(svg), Some(svg_path)) = (svg_content, &args.output_svg) {
        write_svg(&svg, svg_path).context("Failed to write flamegraph SVG")?;
        info!("✓ Flamegraph written to: {}", svg_path.display());
    }

    if args.print_tree {
        println!("\n{}", render_text(&tree));
    }

    let elapsed = start_time.elapsed();
    info!("Build completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate build arguments
///
/// Can be called before execute_build for early validation
pub fn validate_args(args: &BuildArgs) -> Result<()> {
    if args.commit.is_empty() {
        anyhow::bail!("Commit tag cannot be empty");
    }

    if args.entry_method.is_empty() {
        anyhow::bail!("Entry method cannot be empty");
    }

    if !args.input_dir.is_dir() {
        anyhow::bail!(
            "Sample directory does not exist: {}",
            args.input_dir.display()
        );
    }

    if args.max_threads == 0 {
        anyhow::bail!("Worker count must be greater than 0");
    }

    Ok(())
}

// Sorted for a stable run order independent of directory iteration order.
fn gather_sample_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

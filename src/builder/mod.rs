//! Orchestration of the per-run build/merge/aggregate loop.
//!
//! The parse/filter/isolate step has no shared state and may run on a
//! bounded worker pool, one task per run. The fold step (merge + bucket
//! construction) mutates a single accumulator tree and a single bucket
//! map, so it always runs sequentially over the completed local trees in
//! input order; results are reproducible regardless of how parsing was
//! scheduled.

use crate::aggregator::{attach_measurements, collect_run_measurements, MeasurementBuckets};
use crate::merge::merge_trees;
use crate::parser::{adapt_frame_tree, extract_run_ordinal, parse_sample};
use crate::tree::{filter_infrastructure, isolate_entry_subtrees, CallTree};
use crate::utils::config::SAMPLE_EXTENSION;
use crate::utils::error::BuildError;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::thread;

/// Options for a single tree build
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Commit tag expected in every selected sample filename; also the
    /// identifier the projected measurements are grouped under
    pub commit: String,

    /// Method-name fragment identifying the benchmark entry frame
    pub entry_method: String,

    /// Splice out JVM/native infrastructure frames before isolation
    pub filter_infra: bool,

    /// Upper bound on parse workers; 1 disables the worker pool
    pub max_threads: usize,
}

/// Build the merged, measurement-annotated tree for one commit.
///
/// Selects the sample files whose name carries the commit tag, folds each
/// run's isolated entry subtree into the accumulator, then projects the
/// collected per-run measurements onto the result under the commit
/// identifier. Either a full merged tree is produced or the call fails;
/// there is no partial output.
pub fn build_tree(run_files: &[PathBuf], opts: &BuildOptions) -> Result<CallTree, BuildError> {
    info!("building tree for entry method: {}", opts.entry_method);
    if run_files.is_empty() {
        return Err(BuildError::NoRunFiles);
    }

    let selected = select_run_files(run_files, &opts.commit);
    info!(
        "selected {} of {} sample files for commit {}",
        selected.len(),
        run_files.len(),
        opts.commit
    );
    if selected.is_empty() {
        return Err(BuildError::NoMatchingRuns(opts.commit.clone()));
    }

    // Concurrent phase: one local tree per run, no shared state.
    let local_trees = build_local_trees(&selected, opts)?;

    // Serialized fold, in input order.
    let mut buckets = MeasurementBuckets::new();
    let mut merged: Option<CallTree> = None;
    for (vm, local) in local_trees {
        let Some(local) = local else {
            warn!("run {} contains no frame matching '{}'", vm, opts.entry_method);
            continue;
        };
        collect_run_measurements(&mut buckets, &local, vm, &opts.entry_method);
        merged = merge_trees(vec![merged.take(), Some(local)]);
    }
    let mut merged =
        merged.ok_or_else(|| BuildError::EntryMethodNotFound(opts.entry_method.clone()))?;

    attach_measurements(&mut merged, &buckets, &opts.commit);
    Ok(merged)
}

/// Pick out the sample files belonging to `commit`: the filename must
/// carry the commit tag and the sampling-file extension.
pub fn select_run_files<'a>(run_files: &'a [PathBuf], commit: &str) -> Vec<&'a Path> {
    run_files
        .iter()
        .map(PathBuf::as_path)
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.contains(commit) && n.ends_with(SAMPLE_EXTENSION))
                .unwrap_or(false)
        })
        .collect()
}

/// Parse, adapt, filter and isolate every selected run, preserving input
/// order in the returned vector.
fn build_local_trees(
    files: &[&Path],
    opts: &BuildOptions,
) -> Result<Vec<(u32, Option<CallTree>)>, BuildError> {
    if opts.max_threads <= 1 || files.len() <= 1 {
        return files.iter().map(|f| build_run_tree(f, opts)).collect();
    }

    let chunk_size = files.len().div_ceil(opts.max_threads);
    let chunk_results: Vec<Result<Vec<_>, BuildError>> = thread::scope(|scope| {
        let handles: Vec<_> = files
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|f| build_run_tree(f, opts))
                        .collect::<Result<Vec<_>, _>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("sample parse worker panicked"))
            .collect()
    });

    let mut ordered = Vec::with_capacity(files.len());
    for chunk in chunk_results {
        ordered.extend(chunk?);
    }
    Ok(ordered)
}

/// The per-run pipeline: decode, adapt, optionally strip infrastructure,
/// isolate the entry subtrees and merge them into one run-local tree.
/// Returns `None` for the tree when the run never reaches the entry method.
fn build_run_tree(
    path: &Path,
    opts: &BuildOptions,
) -> Result<(u32, Option<CallTree>), BuildError> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let vm = extract_run_ordinal(filename)?;
    info!("building local tree for run {} from {}", vm, filename);

    let raw = parse_sample(path)?;
    let mut tree = adapt_frame_tree(&raw);
    if opts.filter_infra {
        tree = filter_infrastructure(&tree);
    }
    let subtrees = isolate_entry_subtrees(&opts.entry_method, &tree);
    let local = merge_trees(subtrees.into_iter().map(Some).collect());
    Ok((vm, local))
}

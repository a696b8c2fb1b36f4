//! CCT Merge
//!
//! Consolidates stack-sampling profiles collected from several
//! independent runs ("VMs") of the same benchmark into one canonical,
//! annotated calling-context tree, attaching per-run, per-call-path
//! measurements for later statistical comparison across code revisions.
//!
//! This crate provides the core implementation for the `cct-merge`
//! CLI tool.

pub mod aggregator;
pub mod builder;
pub mod commands;
pub mod flamegraph;
pub mod merge;
pub mod output;
pub mod parser;
pub mod tree;
pub mod utils;

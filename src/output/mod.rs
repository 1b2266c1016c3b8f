//! Output module for run summaries
//!
//! This module handles:
//! - Accumulating per-run counters
//! - Rendering the end-of-run summary

pub mod summary;

pub use summary::{format_summary, print_summary, RunSummary};

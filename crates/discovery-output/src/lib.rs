#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/discovery/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Output backends for discovery views.
//!
//! This crate provides implementations of the [`Renderer`] and [`Exporter`]
//! traits from `discovery-core`:
//!
//! - [`ConsoleRenderer`] - Box-drawn tables and plain text on stdout
//! - [`FileExporter`] - csv, json, parquet and xlsx files (xlsx requires the `xlsx` feature)
//! - [`RecordingRenderer`] / [`RecordingExporter`] - In-memory doubles for testing

mod cell;
mod text;

/// Console renderer.
pub mod console;
/// File exporter.
pub mod file;
/// In-memory output backends.
pub mod memory;

// Re-export the traits for convenience
pub use discovery_core::{Exporter, Renderer};

// Re-export implementations
pub use console::ConsoleRenderer;
pub use file::FileExporter;
pub use memory::{RecordedExport, RecordingExporter, RecordingRenderer, RenderEvent};

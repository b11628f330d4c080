//! Core orchestration for Lokalize.
//!
//! Ties the loader, chunker, and knowledge-base client together into the
//! end-to-end demo pipeline, and hosts the query orchestrator that turns a
//! localization question into grounded advice.

pub mod advisor;
pub mod pipeline;
pub mod prompt;

pub use advisor::LocalizationAdvisor;
pub use pipeline::{
    DemoResult, IngestReport, ProgressReporter, SilentProgress, ask, run_demo, run_ingest,
};

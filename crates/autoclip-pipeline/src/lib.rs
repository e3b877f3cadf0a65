#![deny(unreachable_patterns)]
//! Run orchestration for the autoclip pipeline.
//!
//! Ties acquisition, analysis, selection and materialization together into
//! one run over a single source video.

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod materialize;
pub mod processor;
pub mod selector;

pub use config::AppConfig;
pub use context::RunContext;
pub use error::{PipelineError, PipelineResult};
pub use logging::RunLogger;
pub use materialize::{write_report, MaterializedClip, Materializer};
pub use processor::{Processor, RunSummary};
pub use selector::{rescore, select, SelectionResult};

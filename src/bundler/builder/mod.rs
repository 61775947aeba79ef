//! Build planning and execution.
//!
//! - [`plan`] expands settings into ordered [`BuildTarget`]s
//! - [`pipeline`] runs every stage for one target
//! - [`orchestrator`] runs the pipeline for each selected target, fail-fast
//! - [`tool_detection`] checks for `dotnet` and restores local tools

mod orchestrator;
pub mod pipeline;
pub mod plan;
pub mod tool_detection;

#[cfg(test)]
mod testing;

pub use orchestrator::{BuiltTarget, BundleReport, Bundler, NO_BUILD_HINT};
pub use pipeline::PublishPipeline;
pub use plan::{BuildTarget, PostPublishHook, plan};

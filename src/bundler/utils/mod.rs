//! Filesystem, process and archive helpers shared by the pipeline stages.

pub mod archive;
pub mod fs;
pub mod process;

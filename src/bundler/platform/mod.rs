//! Platform-specific post-publish steps.

pub mod macos;

//! Publishing and packaging of self-contained game builds.
//!
//! A run expands [`Settings`] into build targets, then publishes each
//! selected target, extracts its libraries, renames it, optionally turns it
//! into a macOS `.app` bundle and optionally zips it.

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::{BuildTarget, BundleReport, Bundler, BuiltTarget, PostPublishHook, plan};
pub use error::{Error, NamingError, Result};
pub use settings::{
    LibrarySettings, MacBundleSettings, NamingSettings, PublishSettings, Settings,
    SettingsBuilder, TargetKind,
};

//! Configuration structures for bundling runs.
//!
//! This module provides the immutable [`Settings`] value threaded through
//! planning, publishing and packaging, the [`SettingsBuilder`] used to
//! construct it, and the per-stage sub-settings.

mod arch;
mod builder;
mod core;
mod macos;
mod publish;

// Re-export all public types
pub use arch::{Arch, Platform, TargetKind};
pub use builder::{DEFAULT_OUTPUT_DIRECTORY, SettingsBuilder};
pub use self::core::Settings;
pub use macos::{DEFAULT_RESOURCE_PATTERNS, MacBundleSettings};
pub use publish::{
    KNOWN_NATIVE_EXCLUSIONS, LibrarySettings, NamingSettings, PublishSettings, TargetSettings,
};

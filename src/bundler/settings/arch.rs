//! Platform and architecture types for publish targets.

use serde::Serialize;

/// Operating system a target is published for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Platform {
    Windows,
    Linux,
    Mac,
}

/// CPU architecture a target is published for.
///
/// # Platform Support
///
/// - ✅ Windows: X64, X86 (via `--32-bit`), Arm64
/// - ✅ Linux: X64, Arm64
/// - ✅ macOS: X64, Arm64
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit)
    X64,
    /// x86 / i686 (32-bit), Windows only
    X86,
    /// AArch64 / ARM64 (64-bit)
    Arm64,
}

/// One of the platform × architecture combinations the planner knows about.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
    Windows,
    Linux,
    Mac,
    WindowsArm,
    LinuxArm,
    MacArm,
}

impl TargetKind {
    /// Every target kind, in build order: regular builds first, then arm builds.
    pub const ALL: [TargetKind; 6] = [
        TargetKind::Windows,
        TargetKind::Linux,
        TargetKind::Mac,
        TargetKind::WindowsArm,
        TargetKind::LinuxArm,
        TargetKind::MacArm,
    ];

    pub fn platform(self) -> Platform {
        match self {
            TargetKind::Windows | TargetKind::WindowsArm => Platform::Windows,
            TargetKind::Linux | TargetKind::LinuxArm => Platform::Linux,
            TargetKind::Mac | TargetKind::MacArm => Platform::Mac,
        }
    }

    /// Whether this is one of the arm variants rather than a primary x64/x86 build.
    pub fn is_arm(self) -> bool {
        matches!(
            self,
            TargetKind::WindowsArm | TargetKind::LinuxArm | TargetKind::MacArm
        )
    }

    /// Architecture published for this kind, taking the 32-bit toggle into account.
    pub fn arch(self, publish_32_bit: bool) -> Arch {
        match self {
            _ if self.is_arm() => Arch::Arm64,
            TargetKind::Windows if publish_32_bit => Arch::X86,
            _ => Arch::X64,
        }
    }

    /// Human-readable name used in progress output.
    pub fn display_name(self) -> &'static str {
        match self {
            TargetKind::Windows => "windows",
            TargetKind::Linux => "linux",
            TargetKind::Mac => "mac",
            TargetKind::WindowsArm => "windows arm",
            TargetKind::LinuxArm => "linux arm",
            TargetKind::MacArm => "mac arm",
        }
    }

    /// Name of the output subdirectory for this kind.
    pub fn dir_name(self) -> &'static str {
        match self {
            TargetKind::Windows => "win",
            TargetKind::Linux => "linux",
            TargetKind::Mac => "mac",
            TargetKind::WindowsArm => "win-arm",
            TargetKind::LinuxArm => "linux-arm",
            TargetKind::MacArm => "mac-arm",
        }
    }

    /// Runtime identifier used when no override is configured.
    pub fn default_runtime_id(self, publish_32_bit: bool) -> &'static str {
        match (self, self.arch(publish_32_bit)) {
            (TargetKind::Windows, Arch::X86) => "win-x86",
            (TargetKind::Windows, _) => "win-x64",
            (TargetKind::Linux, _) => "linux-x64",
            (TargetKind::Mac, _) => "osx-x64",
            (TargetKind::WindowsArm, _) => "win-arm64",
            (TargetKind::LinuxArm, _) => "linux-arm64",
            (TargetKind::MacArm, _) => "osx-arm64",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_two_bit_only_affects_primary_windows() {
        assert_eq!(TargetKind::Windows.default_runtime_id(true), "win-x86");
        assert_eq!(TargetKind::Windows.default_runtime_id(false), "win-x64");
        assert_eq!(TargetKind::WindowsArm.default_runtime_id(true), "win-arm64");
        assert_eq!(TargetKind::Linux.default_runtime_id(true), "linux-x64");
        assert_eq!(TargetKind::MacArm.arch(true), Arch::Arm64);
    }

    #[test]
    fn arm_kinds_share_platform_with_primary() {
        for kind in TargetKind::ALL {
            let primary = TargetKind::ALL
                .iter()
                .find(|k| !k.is_arm() && k.platform() == kind.platform());
            assert!(primary.is_some());
        }
        assert_eq!(TargetKind::MacArm.platform(), Platform::Mac);
    }
}

//! Expansion of settings into the ordered list of build targets.

use crate::bundler::settings::{Platform, Settings, TargetKind};
use serde::Serialize;

/// Step run on a build directory after publishing and renaming.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PostPublishHook {
    /// Nothing to do.
    #[default]
    None,
    /// Restructure the output into a macOS app bundle.
    MacBundle,
}

/// One platform × architecture build.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTarget {
    pub kind: TargetKind,
    pub display_name: String,
    pub dir_name: String,
    pub runtime_id: String,
    pub should_build: bool,
    pub skip_library_extraction: bool,
    pub post_publish_hook: PostPublishHook,
}

/// Returns one target per known kind, in build order.
///
/// Arm targets never run library extraction. Mac targets get the app bundle
/// hook when bundling is enabled.
pub fn plan(settings: &Settings) -> Vec<BuildTarget> {
    TargetKind::ALL
        .iter()
        .map(|&kind| {
            let post_publish_hook =
                if kind.platform() == Platform::Mac && settings.mac_bundle().enabled {
                    PostPublishHook::MacBundle
                } else {
                    PostPublishHook::None
                };

            BuildTarget {
                kind,
                display_name: kind.display_name().to_string(),
                dir_name: kind.dir_name().to_string(),
                runtime_id: settings.runtime_id(kind),
                should_build: settings.target(kind).build,
                skip_library_extraction: kind.is_arm(),
                post_publish_hook,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::{MacBundleSettings, SettingsBuilder};

    #[test]
    fn plans_all_kinds_in_fixed_order() {
        let settings = SettingsBuilder::new().build().unwrap();
        let dirs: Vec<String> = plan(&settings).into_iter().map(|t| t.dir_name).collect();
        assert_eq!(
            dirs,
            vec!["win", "linux", "mac", "win-arm", "linux-arm", "mac-arm"]
        );
    }

    #[test]
    fn should_build_mirrors_settings() {
        let settings = SettingsBuilder::new()
            .build_target(TargetKind::Linux, true)
            .build_target(TargetKind::MacArm, true)
            .build()
            .unwrap();
        let built: Vec<TargetKind> = plan(&settings)
            .into_iter()
            .filter(|t| t.should_build)
            .map(|t| t.kind)
            .collect();
        assert_eq!(built, vec![TargetKind::Linux, TargetKind::MacArm]);
    }

    #[test]
    fn only_arm_targets_skip_library_extraction() {
        let settings = SettingsBuilder::new().build().unwrap();
        for target in plan(&settings) {
            assert_eq!(target.skip_library_extraction, target.kind.is_arm());
        }
    }

    #[test]
    fn mac_hook_depends_on_bundle_toggle() {
        let off = SettingsBuilder::new().build().unwrap();
        assert!(plan(&off)
            .iter()
            .all(|t| t.post_publish_hook == PostPublishHook::None));

        let on = SettingsBuilder::new()
            .mac_bundle_settings(MacBundleSettings {
                enabled: true,
                ..Default::default()
            })
            .build()
            .unwrap();
        let targets = plan(&on);
        let hooked: Vec<&str> = targets
            .iter()
            .filter(|t| t.post_publish_hook == PostPublishHook::MacBundle)
            .map(|t| t.display_name.as_str())
            .collect();
        assert_eq!(hooked, vec!["mac", "mac arm"]);
    }

    #[test]
    fn plan_serializes_to_json() {
        let settings = SettingsBuilder::new()
            .build_target(TargetKind::Windows, true)
            .build()
            .unwrap();
        let json = serde_json::to_value(&plan(&settings)[0]).unwrap();
        assert_eq!(json["kind"], "windows");
        assert_eq!(json["runtimeId"], "win-x64");
        assert_eq!(json["shouldBuild"], true);
        assert_eq!(json["postPublishHook"], "none");
    }
}

use api_scaffold_core::{AdminPanel, AdminTarget, ScaffoldResult};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Panels in detection order.
const DETECTION_ORDER: [AdminPanel; 2] = [AdminPanel::Filament, AdminPanel::Nova];

/// Admin panel installed according to the project's `composer.json`.
///
/// Both `require` and `require-dev` count. A project without `composer.json`
/// has no panel.
pub fn detect_panel(project_root: &Path) -> ScaffoldResult<Option<AdminPanel>> {
    let composer = project_root.join("composer.json");
    if !composer.is_file() {
        return Ok(None);
    }

    let manifest: Value = serde_json::from_str(&std::fs::read_to_string(composer)?)?;
    let requires = |package: &str| {
        ["require", "require-dev"]
            .iter()
            .any(|section| manifest.get(section).and_then(|deps| deps.get(package)).is_some())
    };

    let panel = DETECTION_ORDER
        .into_iter()
        .find(|panel| requires(panel.composer_package()));
    debug!("Detected admin panel: {:?}", panel);
    Ok(panel)
}

pub fn resolve_panel(
    project_root: &Path,
    target: AdminTarget,
) -> ScaffoldResult<Option<AdminPanel>> {
    match target {
        AdminTarget::Panel(panel) => Ok(Some(panel)),
        AdminTarget::Detect => detect_panel(project_root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(composer: &str) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("composer.json"), composer).unwrap();
        temp_dir
    }

    #[test]
    fn test_detects_nova() {
        let temp_dir =
            project(r#"{"require": {"laravel/framework": "^11.0", "laravel/nova": "^4.0"}}"#);
        assert_eq!(detect_panel(temp_dir.path()).unwrap(), Some(AdminPanel::Nova));
    }

    #[test]
    fn test_filament_preferred_and_dev_requirements_count() {
        let temp_dir = project(concat!(
            r#"{"require": {"laravel/nova": "^4.0"}, "#,
            r#""require-dev": {"filament/filament": "^3.2"}}"#,
        ));
        assert_eq!(detect_panel(temp_dir.path()).unwrap(), Some(AdminPanel::Filament));
    }

    #[test]
    fn test_no_panel() {
        let temp_dir = project(r#"{"require": {"laravel/framework": "^11.0"}}"#);
        assert_eq!(detect_panel(temp_dir.path()).unwrap(), None);

        let empty = TempDir::new().unwrap();
        assert_eq!(detect_panel(empty.path()).unwrap(), None);
    }

    #[test]
    fn test_explicit_panel_skips_detection() {
        let empty = TempDir::new().unwrap();
        let panel = resolve_panel(empty.path(), AdminTarget::Panel(AdminPanel::Nova)).unwrap();
        assert_eq!(panel, Some(AdminPanel::Nova));
    }

    #[test]
    fn test_invalid_composer_json_is_an_error() {
        let temp_dir = project("{ not json");
        assert!(detect_panel(temp_dir.path()).is_err());
    }
}

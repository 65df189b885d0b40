//! Sprite-sheet manifest: which image files feed the animation table.
//!
//! The manifest is a small versioned JSON file listing every sheet with its
//! entity kind and per-frame duration. Order matters for the cat: its four
//! sheets bind to the state machine in file order (Idle, Run, Jump, Fall).
//! Validation is strict — a malformed manifest is an authoring error and
//! fails startup, there is no partial-load mode.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use cjq_core::animation::EntityKind;

use crate::entity::CatState;

#[derive(Debug, Deserialize, Clone)]
pub struct SheetManifest {
    pub version: String,
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SheetEntry {
    pub path: String,
    pub kind: EntityKind,
    #[serde(default = "default_frame_duration")]
    pub frame_duration_ms: f32,
}

const fn default_frame_duration() -> f32 {
    100.0
}

pub fn load_manifest_from_path(path: &Path) -> Result<SheetManifest, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let manifest: SheetManifest = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse sheet manifest {}: {e}", path.display()))?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

fn validate_manifest(manifest: &SheetManifest) -> Result<(), String> {
    if manifest.version != "0.1" {
        return Err(format!(
            "Sheet manifest validation failed: unsupported version '{}'",
            manifest.version
        ));
    }
    if manifest.sheets.is_empty() {
        return Err("Sheet manifest validation failed: sheets list is empty".to_string());
    }

    let mut seen_paths = HashSet::new();
    let mut cat_sheets = 0usize;
    let mut portal_sheets = 0usize;
    let mut trapdoor_sheets = 0usize;
    for (i, sheet) in manifest.sheets.iter().enumerate() {
        if sheet.path.is_empty() {
            return Err(format!(
                "Sheet manifest validation failed: sheet {} has an empty path",
                i
            ));
        }
        if !seen_paths.insert(sheet.path.as_str()) {
            return Err(format!(
                "Sheet manifest validation failed: duplicate sheet path '{}'",
                sheet.path
            ));
        }
        if sheet.frame_duration_ms < 0.0 {
            return Err(format!(
                "Sheet manifest validation failed: sheet '{}' has negative frame duration",
                sheet.path
            ));
        }
        match sheet.kind {
            EntityKind::Cat => cat_sheets += 1,
            EntityKind::Portal => portal_sheets += 1,
            EntityKind::Trapdoor => trapdoor_sheets += 1,
            other => {
                return Err(format!(
                    "Sheet manifest validation failed: sheet '{}' has kind {:?}, which takes no sheets",
                    sheet.path, other
                ));
            }
        }
    }

    if cat_sheets != CatState::COUNT {
        return Err(format!(
            "Sheet manifest validation failed: expected {} cat sheets (one per state), found {}",
            CatState::COUNT,
            cat_sheets
        ));
    }
    if portal_sheets != 1 || trapdoor_sheets != 1 {
        return Err(format!(
            "Sheet manifest validation failed: expected 1 portal and 1 trapdoor sheet, found {} and {}",
            portal_sheets, trapdoor_sheets
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "cjq_sheets_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    const VALID_MANIFEST: &str = r#"
    {
      "version": "0.1",
      "sheets": [
        { "path": "assets/sheets/cat_idle.png", "kind": "cat", "frame_duration_ms": 100 },
        { "path": "assets/sheets/cat_run.png", "kind": "cat", "frame_duration_ms": 100 },
        { "path": "assets/sheets/cat_jump.png", "kind": "cat", "frame_duration_ms": 100 },
        { "path": "assets/sheets/cat_fall.png", "kind": "cat", "frame_duration_ms": 100 },
        { "path": "assets/sheets/portal.png", "kind": "portal" },
        { "path": "assets/sheets/trapdoor.png", "kind": "trapdoor" }
      ]
    }
    "#;

    #[test]
    fn valid_manifest_parses() {
        let path = temp_file_path("valid");
        fs::write(&path, VALID_MANIFEST).expect("write temp file");

        let manifest = load_manifest_from_path(&path).expect("valid manifest should load");
        assert_eq!(manifest.sheets.len(), 6);
        assert_eq!(manifest.sheets[0].kind, EntityKind::Cat);
        // frame_duration_ms defaults when omitted.
        assert_eq!(manifest.sheets[4].frame_duration_ms, 100.0);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_wrong_cat_sheet_count() {
        let path = temp_file_path("cat_count");
        let json = r#"
        {
          "version": "0.1",
          "sheets": [
            { "path": "a.png", "kind": "cat" },
            { "path": "b.png", "kind": "portal" },
            { "path": "c.png", "kind": "trapdoor" }
          ]
        }
        "#;
        fs::write(&path, json).expect("write temp file");
        let err = load_manifest_from_path(&path).expect_err("1 cat sheet should fail");
        assert!(err.contains("cat sheets"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_duplicate_paths() {
        let path = temp_file_path("dup");
        let json = r#"
        {
          "version": "0.1",
          "sheets": [
            { "path": "a.png", "kind": "cat" },
            { "path": "a.png", "kind": "cat" },
            { "path": "c.png", "kind": "cat" },
            { "path": "d.png", "kind": "cat" },
            { "path": "e.png", "kind": "portal" },
            { "path": "f.png", "kind": "trapdoor" }
          ]
        }
        "#;
        fs::write(&path, json).expect("write temp file");
        let err = load_manifest_from_path(&path).expect_err("duplicate path should fail");
        assert!(err.contains("duplicate sheet path"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_sheets_for_kinds_without_art() {
        let path = temp_file_path("bad_kind");
        let json = r#"
        {
          "version": "0.1",
          "sheets": [
            { "path": "a.png", "kind": "platform" }
          ]
        }
        "#;
        fs::write(&path, json).expect("write temp file");
        let err = load_manifest_from_path(&path).expect_err("platform sheet should fail");
        assert!(err.contains("takes no sheets"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_bad_version() {
        let path = temp_file_path("version");
        let json = r#"{ "version": "9.9", "sheets": [] }"#;
        fs::write(&path, json).expect("write temp file");
        let err = load_manifest_from_path(&path).expect_err("bad version should fail");
        assert!(err.contains("unsupported version"));
        let _ = fs::remove_file(path);
    }
}

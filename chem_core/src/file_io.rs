//! # File I/O Module
//!
//! Saving and loading progress snapshots:
//! - **Atomic saves**: write to a `.tmp` sibling, sync, rename over the target
//! - **Version validation**: refuse files from an incompatible schema
//!
//! Nothing in the calculators calls this module; the caller owns storage.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chem_core::file_io::{load_progress, save_progress};
//! use chem_core::progress::ProgressSnapshot;
//! use std::env::temp_dir;
//!
//! let path = temp_dir().join("anna.json");
//! let snapshot = ProgressSnapshot::new("Anna");
//! save_progress(&snapshot, &path)?;
//! let loaded = load_progress(&path)?;
//! # Ok::<(), chem_core::errors::ChemError>(())
//! ```

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::errors::{ChemError, ChemResult};
use crate::progress::{ProgressSnapshot, SCHEMA_VERSION};

/// `<path>.tmp` next to the target file
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Save a snapshot with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to `<path>.tmp`
/// 3. Sync to disk
/// 4. Rename over `path`
pub fn save_progress(snapshot: &ProgressSnapshot, path: &Path) -> ChemResult<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| ChemError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| ChemError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| ChemError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        ChemError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!("Saved progress for '{}' to {}", snapshot.meta.player, path.display());
    Ok(())
}

/// Load a snapshot and check its schema version.
///
/// # Returns
///
/// * `Err(ChemError::VersionMismatch)` - file version is incompatible
/// * `Err(ChemError::SerializationError)` - invalid JSON
/// * `Err(ChemError::FileError)` - I/O error
pub fn load_progress(path: &Path) -> ChemResult<ProgressSnapshot> {
    let mut file =
        File::open(path).map_err(|e| ChemError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| ChemError::file_error("read", path.display().to_string(), e.to_string()))?;

    let snapshot: ProgressSnapshot = serde_json::from_str(&contents).map_err(|e| ChemError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&snapshot.meta.version)?;
    Ok(snapshot)
}

/// Check a file version against [`SCHEMA_VERSION`].
///
/// Major must match. While the major is 0, a file with a newer minor is
/// rejected.
pub fn validate_version(file_version: &str) -> ChemResult<()> {
    let mismatch = || ChemError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    if file_parts.is_empty() || current_parts.is_empty() || file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_progress_path(name: &str) -> PathBuf {
        temp_dir().join(format!("chem_core_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_tmp_path() {
        assert_eq!(tmp_path_for(Path::new("/a/b/anna.json")), Path::new("/a/b/anna.json.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_progress_path("roundtrip");
        let mut snapshot = ProgressSnapshot::new("Anna");
        snapshot.game_mut("buffer").record_level1_answer(true, Some(0.75));

        save_progress(&snapshot, &path).unwrap();
        let loaded = load_progress(&path).unwrap();
        assert_eq!(loaded, snapshot);
        assert!(!tmp_path_for(&path).exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_progress_path("newer");
        let mut snapshot = ProgressSnapshot::new("Anna");
        snapshot.meta.version = "0.9.0".to_string();
        save_progress(&snapshot, &path).unwrap();

        let err = load_progress(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_errors() {
        let missing = temp_progress_path("missing");
        assert_eq!(load_progress(&missing).unwrap_err().error_code(), "FILE_ERROR");

        let garbage = temp_progress_path("garbage");
        fs::write(&garbage, "{ not json").unwrap();
        assert_eq!(load_progress(&garbage).unwrap_err().error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&garbage);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}

//! Atomic write primitives
//!
//! Uses temp→rename so a reader sees either the old file or the new one,
//! never a partial write.

use crate::errors::{io_error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temp file next to `target`, unique per write
fn temp_path_for(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.{}.tmp", name, uuid::Uuid::new_v4().simple()))
}

/// Atomically write bytes to a file
///
/// Writes and syncs a temp file in the same directory, then renames it over
/// the target. On failure the temp file is removed and the target is left
/// untouched.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_parent_dir", parent, e))?;
        }
    }

    let temp_path = temp_path_for(target_path);
    let written = write_synced(&temp_path, content)
        .and_then(|()| {
            fs::rename(&temp_path, target_path)
                .map_err(|e| io_error("rename_temp", target_path, e))
        });
    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written
}

fn write_synced(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path).map_err(|e| io_error("create_temp", path, e))?;
    file.write_all(content)
        .map_err(|e| io_error("write_temp", path, e))?;
    file.sync_all().map_err(|e| io_error("sync_temp", path, e))?;
    Ok(())
}

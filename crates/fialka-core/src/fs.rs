//! Local filesystem storage with atomic replacement.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;
use crate::traits::FileStore;

/// [`FileStore`] backed by the local filesystem.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// failed run never leaves a half-written output behind.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileStore;

impl LocalFileStore {
    pub fn new() -> Self {
        Self
    }
}

impl FileStore for LocalFileStore {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path).map_err(|e| with_path(e, "read", path))?)
    }

    fn write_bytes(&mut self, path: &Path, bytes: &[u8]) -> Result<()> {
        write_atomic(path, bytes, false)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).map_err(|e| with_path(e, "read", path))?)
    }

    fn write_text(&mut self, path: &Path, text: &str) -> Result<()> {
        write_atomic(path, text.as_bytes(), false)
    }

    fn write_key(&mut self, path: &Path, key: &[u8]) -> Result<()> {
        write_atomic(path, key, true)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

fn write_atomic(destination: &Path, bytes: &[u8], owner_only: bool) -> Result<()> {
    let temp_path = temp_sibling(destination);
    let written = fs::write(&temp_path, bytes).and_then(|()| {
        if owner_only {
            set_owner_only(&temp_path)
        } else {
            Ok(())
        }
    });
    if let Err(err) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(with_path(err, "write", destination).into());
    }
    rename_with_fallback(&temp_path, destination)?;
    Ok(())
}

fn set_owner_only(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

fn temp_sibling(destination: &Path) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    destination.with_file_name(format!(".{}.{}.{}.tmp", name, std::process::id(), nanos))
}

fn with_path(err: io::Error, action: &str, path: &Path) -> io::Error {
    io::Error::new(
        err.kind(),
        format!("Failed to {} {}: {}", action, path.display(), err),
    )
}

/// Atomically rename a file, with fallback for platforms where rename fails if target exists.
///
/// On some platforms (notably Windows), `fs::rename` fails if the destination already exists.
/// This function handles that case by removing the destination first and retrying.
///
/// If the rename ultimately fails, the temp file is cleaned up.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

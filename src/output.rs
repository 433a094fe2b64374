//! Where CLI results go: stdout or an atomically replaced file.

use anyhow::{Context, Result};
use keyseal::{OsRandom, SecureRandom};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Write `data` to `path` (atomically) or to stdout when no path is given.
pub fn emit(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => write_atomic(path, data),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Replace `path` with `data` so readers see either the old or the new
/// content, never a partial write.
///
/// Creates parent directories if they don't exist.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let tmp_path = random_tmp_path(path)?;

    // fail if a stale temp file with this name exists
    let mut tmp_file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .context("failed to create temporary file")?;

    tmp_file.write_all(data)?;
    tmp_file.sync_all()?;
    drop(tmp_file);

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("failed to replace {}", path.display()));
    }

    // persist the rename; directories cannot be opened this way on Windows
    #[cfg(unix)]
    fs::File::open(&parent)?.sync_all()?;

    Ok(())
}

/// Sibling temp path: `<file name>.tmp.<16 hex chars>`.
fn random_tmp_path(path: &Path) -> Result<PathBuf> {
    let mut buf = [0u8; 8];
    OsRandom.fill(&mut buf)?;

    let file_name = path
        .file_name()
        .context("output path has no file name")?
        .to_string_lossy();

    Ok(path.with_file_name(format!("{}.tmp.{}", file_name, hex::encode(buf))))
}

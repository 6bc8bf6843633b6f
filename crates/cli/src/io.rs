//! Catalog input and output: stdio, backups and atomic file replacement

use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Suffix appended to the output file name for its backup copy
pub const BACKUP_SUFFIX: &str = ".bak";

/// Opens the catalog source; `None` reads standard input.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        None => {
            log::debug!("Read data from stdin");
            Ok(Box::new(io::stdin().lock()))
        }
        Some(path) => {
            if !path.is_file() {
                bail!("No file: {}", path.display());
            }
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            log::debug!("Read data from file: {}", path.display());
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Returns `<path>.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copies an existing file to its backup path
pub fn backup_existing(path: &Path) -> Result<PathBuf> {
    let backup = backup_path(path);
    log::info!(
        "Create backup of output file: {} -> {}",
        path.display(),
        backup.display()
    );
    fs::copy(path, &backup)
        .with_context(|| format!("Failed to back up {}", path.display()))?;
    Ok(backup)
}

/// Writes to standard output through `write`.
pub fn write_stdout<T, F>(write: F) -> Result<T>
where
    F: FnOnce(&mut dyn Write) -> Result<T>,
{
    log::debug!("Write result to stdout");
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let value = write(&mut out)?;
    out.flush().context("Failed to flush standard output")?;
    Ok(value)
}

/// Replaces `path` with whatever `write` produces.
///
/// The content goes to a temporary file next to `path` that is renamed over
/// it only once `write` succeeds; on failure `path` is left untouched. An
/// existing file is copied to `<path>.bak` first when `backup` is set.
pub fn write_atomically<T, F>(path: &Path, backup: bool, write: F) -> Result<T>
where
    F: FnOnce(&mut dyn Write) -> Result<T>,
{
    log::debug!("Write result to file: {}", path.display());
    let dir = parent_dir(path);
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

    let value = {
        let mut out = BufWriter::new(temp.as_file_mut());
        let value = write(&mut out)?;
        out.flush().context("Failed to flush output")?;
        value
    };

    if path.is_file() {
        if backup {
            backup_existing(path)?;
        }
        log::warn!("Result file exists and will be overwritten");

        // Keep the permissions of the file being replaced
        if let Ok(metadata) = fs::metadata(path) {
            fs::set_permissions(temp.path(), metadata.permissions())
                .with_context(|| format!("Failed to copy permissions of {}", path.display()))?;
        }
    }

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(value)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

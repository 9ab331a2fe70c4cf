//! Rotating file writer with size-based rotation and numbered backups.
//!
//! The trace file lives in the plugin's `/data` folder, which is never
//! cleaned up by the host, so growth has to be bounded here.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum file size before rotation (10 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe append-only writer that rotates `<file>` to `<file>.1`,
/// `<file>.1` to `<file>.2`, and so on, once the file passes `max_bytes`.
/// The oldest backup beyond `backups` is overwritten.
///
/// The file is opened lazily on the first write, so construction never fails.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    backups: usize,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer with the default 10 MiB / 3 backup policy.
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            backups,
            writer: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotation, opening, writing or flushing, and
    /// an error if the internal lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))?;

        if self.needs_rotation() {
            *writer = None;
            self.rotate()?;
        }

        if writer.is_none() {
            *writer = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            );
        }
        let file = writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file not open"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return fs::remove_file(&self.file_path);
        }
        for index in (1..self.backups).rev() {
            let from = backup_path(&self.file_path, index);
            if from.exists() {
                fs::rename(&from, backup_path(&self.file_path, index + 1))?;
            }
        }
        fs::rename(&self.file_path, backup_path(&self.file_path, 1))
    }
}

/// `<file>.<index>`
fn backup_path(file_path: &Path, index: usize) -> PathBuf {
    let mut name = file_path.as_os_str().to_owned();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::new(path.clone());
        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotation_keeps_bounded_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::with_limits(path.clone(), 4, 2);

        for i in 0..5 {
            writer.write_line(&format!("line-{i}")).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "line-4\n");
        assert_eq!(fs::read_to_string(backup_path(&path, 1)).unwrap(), "line-3\n");
        assert_eq!(fs::read_to_string(backup_path(&path, 2)).unwrap(), "line-2\n");
        assert!(!backup_path(&path, 3).exists());
    }
}

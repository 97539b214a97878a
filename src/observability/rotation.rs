//! Size-bounded trace file with numbered backups.
//!
//! Before each write the current file is checked against a size limit. Once it
//! is over the limit it becomes `<name>.1`, an existing `<name>.1` becomes
//! `<name>.2`, and so on; the oldest backup beyond the retention count is
//! dropped.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotate once the file grows past 10 MB.
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept after rotation.
pub const DEFAULT_BACKUPS: usize = 3;

/// Append-only line writer that rotates by size.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    /// Opened on first write.
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_BACKUPS)
    }

    pub fn with_limits(path: impl Into<PathBuf>, max_bytes: u64, backups: usize) -> Self {
        Self {
            path: path.into(),
            max_bytes,
            backups,
            handle: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of backup number `n` (1 is the newest).
    #[must_use]
    pub fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening or writing the file, or
    /// an error if a previous writer panicked while holding the lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace writer poisoned: {e}")))?;

        let full = fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.max_bytes);
        if full {
            *handle = None;
            self.rotate()?;
        }

        let file = match handle.take() {
            Some(file) => file,
            None => OpenOptions::new().create(true).append(true).open(&self.path)?,
        };
        let file = handle.insert(file);

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = self.backup_path(self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    #[test]
    fn appends_lines_below_the_limit() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::new(dir.path().join("trace.json"));

        file.write_line("one").unwrap();
        file.write_line("two").unwrap();

        assert_eq!(read(file.path()), "one\ntwo\n");
        assert!(!file.backup_path(1).exists());
    }

    #[test]
    fn rotates_and_keeps_bounded_backups() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::with_limits(dir.path().join("trace.json"), 4, 2);

        for line in ["aaaa", "bbbb", "cccc", "dddd"] {
            file.write_line(line).unwrap();
        }

        assert_eq!(read(file.path()), "dddd\n");
        assert_eq!(read(&file.backup_path(1)), "cccc\n");
        assert_eq!(read(&file.backup_path(2)), "bbbb\n");
        assert!(!file.backup_path(3).exists());
    }
}

//! Rotating log file with size-based rotation and backup retention.
//!
//! [`FileWriter`] is cheap to clone; clones share one file handle behind a
//! mutex, so it can be handed to `tracing-subscriber` as a `MakeWriter`
//! closure (`move || writer.clone()`).

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// # Rotation Strategy
///
/// 1. Before each write, compare the bytes already in the file plus the
///    pending buffer against the size limit
/// 2. If the limit would be exceeded, rotate:
///    - Rename the current file to `<name>.<UTC timestamp>.<sequence>`
///    - Reopen an empty file at the original path
///    - Remove the oldest backups beyond the retention limit
///
/// Backup suffixes sort lexicographically in creation order, so retention
/// does not depend on filesystem timestamps.
#[derive(Clone)]
pub struct FileWriter {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    file_path: PathBuf,
    /// Lazily opened on first write.
    file: Option<File>,
    written: u64,
    /// Rotations performed by this writer; disambiguates same-instant backups.
    rotations: u64,
    max_bytes: u64,
    max_backups: usize,
}

impl FileWriter {
    /// Creates a writer for `file_path` with the default limits.
    ///
    /// The file is not opened until the first write, so construction succeeds
    /// even if the path is not writable yet.
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub fn with_limits(file_path: impl Into<PathBuf>, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                file_path: file_path.into(),
                file: None,
                written: 0,
                rotations: 0,
                max_bytes,
                max_backups,
            })),
        }
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|e| io::Error::other(format!("Mutex poisoned: {e}")))
    }
}

impl Inner {
    fn open(&mut self) -> io::Result<&mut File> {
        if self.file.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            self.written = file.metadata().map_or(0, |m| m.len());
            self.file = Some(file);
        }
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("No file available"))
    }

    fn rotate_if_needed(&mut self, incoming: usize) -> io::Result<()> {
        self.open()?;
        let incoming = u64::try_from(incoming).unwrap_or(u64::MAX);
        if self.written == 0 || self.written.saturating_add(incoming) <= self.max_bytes {
            return Ok(());
        }

        self.file = None;
        let timestamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string();
        let mut backup = backup_path(&self.file_path, &timestamp, self.rotations);
        while backup.exists() {
            self.rotations += 1;
            backup = backup_path(&self.file_path, &timestamp, self.rotations);
        }
        self.rotations += 1;
        fs::rename(&self.file_path, &backup)?;
        self.cleanup_old_backups()?;
        self.open()?;
        Ok(())
    }

    fn cleanup_old_backups(&self) -> io::Result<()> {
        let parent_dir = match self.file_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let prefix = format!("{}.", file_name(&self.file_path)?);

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Newest first.
        backups.sort_by(|a, b| b.cmp(a));

        for old_backup in backups.iter().skip(self.max_backups) {
            // This writer is the subscriber's sink, so failures cannot go
            // through `tracing` without re-entering the lock. A stale backup
            // is retried on the next rotation.
            if let Err(e) = fs::remove_file(old_backup) {
                eprintln!("failed to prune log backup {}: {e}", old_backup.display());
            }
        }

        Ok(())
    }
}

fn file_name(path: &Path) -> io::Result<&str> {
    path.file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| io::Error::other("Invalid file name"))
}

/// `<path>.<timestamp>.<sequence>`; zero-padded so names sort in creation order.
fn backup_path(path: &Path, timestamp: &str, sequence: u64) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{timestamp}.{sequence:06}"));
    PathBuf::from(name)
}

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.lock()?;
        inner.rotate_if_needed(buf.len())?;
        let written = inner.open()?.write(buf)?;
        inner.written += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self.lock()?;
        match inner.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("FileWriter");
        if let Ok(inner) = self.inner.lock() {
            debug.field("file_path", &inner.file_path);
        }
        debug.finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backups(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| name.starts_with("trace.log."))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn writes_are_appended_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.log");
        let mut writer = FileWriter::new(&path);
        assert!(!path.exists());

        writer.write_all(b"first\n").unwrap();
        writer.clone().write_all(b"second\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn oversize_file_is_rotated_and_backups_pruned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.log");
        let mut writer = FileWriter::with_limits(&path, 16, 2);

        for line in 0..6 {
            writer
                .write_all(format!("line number {line}\n").as_bytes())
                .unwrap();
        }

        assert_eq!(backups(dir.path()).len(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "line number 5\n");
    }

    #[test]
    fn back_to_back_rotations_keep_every_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.log");
        let mut writer = FileWriter::with_limits(&path, 16, 3);

        for line in 0..4 {
            writer
                .write_all(format!("line number {line}\n").as_bytes())
                .unwrap();
        }

        let kept = backups(dir.path());
        assert_eq!(kept.len(), 3);
        let contents: Vec<String> = kept
            .iter()
            .map(|name| fs::read_to_string(dir.path().join(name)).unwrap())
            .collect();
        assert_eq!(
            contents,
            vec!["line number 0\n", "line number 1\n", "line number 2\n"]
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "line number 3\n");
    }

    #[test]
    fn pruning_keeps_the_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.log");
        let mut writer = FileWriter::with_limits(&path, 16, 2);

        for line in 0..5 {
            writer
                .write_all(format!("line number {line}\n").as_bytes())
                .unwrap();
        }

        let contents: Vec<String> = backups(dir.path())
            .iter()
            .map(|name| fs::read_to_string(dir.path().join(name)).unwrap())
            .collect();
        assert_eq!(contents, vec!["line number 2\n", "line number 3\n"]);
    }

    #[test]
    fn existing_file_size_counts_toward_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.log");
        fs::write(&path, "0123456789").unwrap();

        let mut writer = FileWriter::with_limits(&path, 12, 3);
        writer.write_all(b"abcdef").unwrap();

        assert_eq!(backups(dir.path()).len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "abcdef");
    }
}

//! The live segment and its rotation

use crate::{ArchiveHistory, ArchiveNaming, ArchivedFile, Error, FileLoggerConfig, Result};
use chrono::{DateTime, Local};
use rotalog_logger::{Level, internal};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// A line-counted log file that rotates itself into timestamped archives.
///
/// Rotation order: flush and sync the current segment, rename it to its
/// archive name, record the archive, evict the oldest archives beyond the
/// retention limit, then create a new segment at the base path. Data
/// written before a rotation is on disk before the rename happens.
///
/// Exactly one writer owns it; it is not shared between threads.
#[derive(Debug)]
pub struct RotatingFile {
    config: FileLoggerConfig,
    naming: ArchiveNaming,
    history: ArchiveHistory,
    writer: Option<BufWriter<File>>,
    lines: u64,
    last_flush: Instant,
}

impl RotatingFile {
    /// Prepare the directory, recover archive history and start a fresh segment.
    ///
    /// A file already present at the base path is archived rather than
    /// appended to, so every run starts its own segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the initial
    /// rotation fails.
    pub fn open(config: FileLoggerConfig) -> Result<Self> {
        let naming = ArchiveNaming::new(&config.path)?;

        let dir = naming.dir();
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(|source| Error::CreateDirectory {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let history = ArchiveHistory::scan(&naming)?;

        let mut file = Self {
            config,
            naming,
            history,
            writer: None,
            lines: 0,
            last_flush: Instant::now(),
        };
        file.rotate()?;

        Ok(file)
    }

    /// Append one rendered line, rotating first if the segment is full.
    ///
    /// If an earlier rotation failed to open a segment, the rotation is
    /// retried here.
    ///
    /// # Errors
    ///
    /// Returns an error if rotation or the write fails; the line is lost.
    pub fn write_line(&mut self, text: &str) -> Result<()> {
        if self.writer.is_none() || self.rotation_due() {
            self.rotate()?;
        }

        if let Some(writer) = self.writer.as_mut() {
            writer.write_all(text.as_bytes()).map_err(Error::Write)?;
            self.lines += 1;
        }

        Ok(())
    }

    /// Flush buffered output if the flush interval has elapsed.
    ///
    /// Returns whether a flush happened.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn flush_if_due(&mut self) -> Result<bool> {
        if self.last_flush.elapsed() <= self.config.flush_interval {
            return Ok(false);
        }

        self.flush()?;
        Ok(true)
    }

    /// Flush buffered output to the operating system.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn flush(&mut self) -> Result<()> {
        self.last_flush = Instant::now();
        match self.writer.as_mut() {
            Some(writer) => writer.flush().map_err(Error::Write),
            None => Ok(()),
        }
    }

    /// Rotate now, regardless of the line count.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment cannot be archived or a new one
    /// cannot be created. The base path is left for the next attempt.
    pub fn rotate(&mut self) -> Result<()> {
        self.rotate_at(Local::now())
    }

    pub(crate) fn rotate_at(&mut self, now: DateTime<Local>) -> Result<()> {
        if let Err(e) = self.close() {
            internal::report(
                Level::Error,
                format_args!("closing {} before rotation: {e}", self.config.path.display()),
            );
        }

        let archived = self.archive_current(now)?;
        if let Some(path) = &archived {
            self.history.insert(ArchivedFile::new(path.clone(), now));
        }
        self.history.evict(self.config.max_files);

        let mut writer = open_segment(&self.config.path)?;
        let marker = match &archived {
            Some(path) => format!(
                "==== log segment opened {}; previous segment archived as {} ====\n",
                now.format("%Y-%m-%d %H:%M:%S"),
                path.file_name().map_or_else(
                    || path.display().to_string(),
                    |name| name.to_string_lossy().into_owned()
                )
            ),
            None => format!(
                "==== log segment opened {}; no previous segment ====\n",
                now.format("%Y-%m-%d %H:%M:%S")
            ),
        };
        writer.write_all(marker.as_bytes()).map_err(Error::Write)?;

        self.writer = Some(writer);
        self.lines = 0;
        self.last_flush = Instant::now();

        Ok(())
    }

    /// Flush, sync and close the current segment.
    ///
    /// The next write reopens a segment through rotation.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing or syncing fails; the segment is closed
    /// either way.
    pub fn close(&mut self) -> Result<()> {
        match self.writer.take() {
            Some(mut writer) => {
                writer.flush().map_err(Error::Write)?;
                writer.get_ref().sync_all().map_err(Error::Write)
            }
            None => Ok(()),
        }
    }

    /// Lines written to the current segment, excluding its marker.
    #[must_use]
    pub const fn lines(&self) -> u64 {
        self.lines
    }

    /// Whether a segment is currently open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Path of the live segment.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Archives currently retained, oldest first.
    #[must_use]
    pub const fn history(&self) -> &ArchiveHistory {
        &self.history
    }

    const fn rotation_due(&self) -> bool {
        self.config.max_lines > 0 && self.lines >= self.config.max_lines
    }

    fn archive_current(&self, now: DateTime<Local>) -> Result<Option<PathBuf>> {
        let target = self.naming.archive_path(now);
        if target.exists() {
            internal::report(
                Level::Warn,
                format_args!(
                    "archive name {} already in use; rotations within one second overwrite each other",
                    target.display()
                ),
            );
        }

        match fs::rename(&self.config.path, &target) {
            Ok(()) => Ok(Some(target)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Rename {
                from: self.config.path.clone(),
                to: target,
                source,
            }),
        }
    }
}

impl Drop for RotatingFile {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            internal::report(
                Level::Error,
                format_args!("closing {}: {e}", self.config.path.display()),
            );
        }
    }
}

/// Create a brand-new segment; an existing file means another writer won the race.
fn open_segment(path: &Path) -> Result<BufWriter<File>> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map(BufWriter::new)
        .map_err(|source| {
            if source.kind() == io::ErrorKind::AlreadyExists {
                Error::SegmentExists(path.to_path_buf())
            } else {
                Error::CreateSegment {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
}

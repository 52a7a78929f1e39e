//! Archive file naming

use crate::{Error, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use glob::Pattern;
use std::path::{Path, PathBuf};

/// `strftime` format of the timestamp embedded in archive names.
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Derives archive names from the live segment path.
///
/// `logs/app.log` archives as `logs/app.2026-01-31_23-59-59.log`; a path
/// without an extension archives as `logs/app.2026-01-31_23-59-59`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveNaming {
    dir: PathBuf,
    stem: String,
    extension: Option<String>,
}

impl ArchiveNaming {
    /// Split `base` into directory, stem and extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `base` has no file name.
    pub fn new(base: &Path) -> Result<Self> {
        let stem = base
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| {
                Error::Configuration(format!("log file path {} has no file name", base.display()))
            })?;

        Ok(Self {
            dir: base.parent().map(Path::to_path_buf).unwrap_or_default(),
            stem,
            extension: base
                .extension()
                .map(|extension| extension.to_string_lossy().into_owned()),
        })
    }

    /// Directory holding the segment and its archives; empty for a bare file name.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Archive path for a segment rotated at `at`.
    #[must_use]
    pub fn archive_path(&self, at: DateTime<Local>) -> PathBuf {
        let timestamp = at.format(ARCHIVE_TIMESTAMP_FORMAT);
        let file_name = match &self.extension {
            Some(extension) => format!("{}.{timestamp}.{extension}", self.stem),
            None => format!("{}.{timestamp}", self.stem),
        };
        self.dir.join(file_name)
    }

    /// Rotation time embedded in an archive's file name.
    ///
    /// Returns `None` if `archive` is not named like one of this segment's
    /// archives.
    #[must_use]
    pub fn archived_at(&self, archive: &Path) -> Option<DateTime<Local>> {
        let name = archive.file_name()?.to_str()?;
        let rest = name.strip_prefix(self.stem.as_str())?.strip_prefix('.')?;
        let timestamp = match &self.extension {
            Some(extension) => rest.strip_suffix(extension.as_str())?.strip_suffix('.')?,
            None => rest,
        };

        NaiveDateTime::parse_from_str(timestamp, ARCHIVE_TIMESTAMP_FORMAT)
            .ok()?
            .and_local_timezone(Local)
            .earliest()
    }

    /// Glob matching every archive of this segment, `<stem>.*.<ext>`.
    #[must_use]
    pub fn glob_pattern(&self) -> String {
        let file_pattern = match &self.extension {
            Some(extension) => format!(
                "{}.*.{}",
                Pattern::escape(&self.stem),
                Pattern::escape(extension)
            ),
            None => format!("{}.*", Pattern::escape(&self.stem)),
        };

        if self.dir.as_os_str().is_empty() {
            file_pattern
        } else {
            format!(
                "{}{}{file_pattern}",
                Pattern::escape(&self.dir.to_string_lossy()),
                std::path::MAIN_SEPARATOR
            )
        }
    }
}

//! Request log.
//!
//! The connection pipeline writes one line per event through [`LogSink`].
//! [`DailyLogger`] is the production sink: it appends timestamped lines to
//! `<dir>/<YYYY-MM-DD>.log` and switches files when the local date changes.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{Local, NaiveDate};

/// Destination for request log lines.
pub trait LogSink: Send + Sync {
    fn log(&self, line: &str);
}

/// Append-only log writer that rotates at local midnight.
pub struct DailyLogger {
    dir: PathBuf,
    current: Mutex<LogFile>,
}

struct LogFile {
    date: NaiveDate,
    file: File,
}

impl DailyLogger {
    /// Creates `dir` if needed and opens today's file.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let date = Local::now().date_naive();
        let file = open_for_date(&dir, date)?;

        Ok(Self {
            dir,
            current: Mutex::new(LogFile { date, file }),
        })
    }

    /// Path of the file lines for `date` go to.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        file_path(&self.dir, date)
    }

    fn append(&self, line: &str) -> io::Result<()> {
        let now = Local::now();
        let today = now.date_naive();

        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);

        if current.date != today {
            current.file = open_for_date(&self.dir, today)?;
            current.date = today;
        }

        writeln!(
            current.file,
            "[{}] {}",
            now.format("%Y-%m-%d %H:%M:%S%.3f"),
            line
        )
    }
}

impl LogSink for DailyLogger {
    fn log(&self, line: &str) {
        if let Err(e) = self.append(line) {
            tracing::warn!(dir = %self.dir.display(), error = %e, "Failed to write request log");
        }
    }
}

fn file_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}.log", date.format("%Y-%m-%d")))
}

fn open_for_date(dir: &Path, date: NaiveDate) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path(dir, date))
}

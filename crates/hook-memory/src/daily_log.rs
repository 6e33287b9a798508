//! Append-only daily session logs.

use crate::error::MemoryError;
use crate::paths::MemoryPaths;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{NaiveDate, NaiveTime};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};

/// The log file for one calendar date.
#[derive(Debug, Clone)]
pub struct DailyLog {
    path: Utf8PathBuf,
    date: NaiveDate,
}

impl DailyLog {
    pub fn new(paths: &MemoryPaths, date: NaiveDate) -> Self {
        Self {
            path: paths.daily_log(date),
            date,
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Append a session entry, creating the file with its header if needed.
    ///
    /// Existing bytes are never rewritten.
    pub fn append_entry(&self, time: NaiveTime, body: &str) -> Result<(), MemoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| MemoryError::io("create directory", parent, e))?;
        }

        let entry = render_entry(time, body);

        match OpenOptions::new().write(true).create_new(true).open(&self.path) {
            Ok(mut file) => {
                let content = format!("{}{}", render_header(self.date), entry);
                file.write_all(content.as_bytes())
                    .map_err(|e| MemoryError::io("write daily log", &self.path, e))
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                let mut file = OpenOptions::new()
                    .append(true)
                    .open(&self.path)
                    .map_err(|e| MemoryError::io("open daily log", &self.path, e))?;
                file.write_all(entry.as_bytes())
                    .map_err(|e| MemoryError::io("append to daily log", &self.path, e))
            }
            Err(e) => Err(MemoryError::io("create daily log", &self.path, e)),
        }
    }
}

fn render_header(date: NaiveDate) -> String {
    format!("# Daily Log - {}\n", date.format("%Y-%m-%d"))
}

fn render_entry(time: NaiveTime, body: &str) -> String {
    format!(
        "\n## {} - Session Summary (auto-extracted)\n\n{}\n",
        time.format("%H:%M"),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 14).unwrap()
    }

    fn paths_in(dir: &tempfile::TempDir) -> MemoryPaths {
        MemoryPaths::new(Utf8PathBuf::from_path_buf(dir.path().join("memory")).unwrap())
    }

    #[test]
    fn test_creates_file_with_header() {
        let dir = tempdir().unwrap();
        let log = DailyLog::new(&paths_in(&dir), date());

        log.append_entry(NaiveTime::from_hms_opt(9, 5, 0).unwrap(), "**Decisions:**\n- Chose A")
            .unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(
            content,
            "# Daily Log - 2026-05-14\n\n## 09:05 - Session Summary (auto-extracted)\n\n**Decisions:**\n- Chose A\n"
        );
    }

    #[test]
    fn test_two_appends_keep_order() {
        let dir = tempdir().unwrap();
        let log = DailyLog::new(&paths_in(&dir), date());

        log.append_entry(NaiveTime::from_hms_opt(10, 0, 0).unwrap(), "first").unwrap();
        log.append_entry(NaiveTime::from_hms_opt(11, 30, 0).unwrap(), "second").unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.matches("# Daily Log - ").count(), 1);
        assert_eq!(
            content,
            "# Daily Log - 2026-05-14\n\
             \n## 10:00 - Session Summary (auto-extracted)\n\nfirst\n\
             \n## 11:30 - Session Summary (auto-extracted)\n\nsecond\n"
        );
    }

    #[test]
    fn test_identical_entries_are_repeated() {
        let dir = tempdir().unwrap();
        let log = DailyLog::new(&paths_in(&dir), date());
        let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();

        log.append_entry(time, "same").unwrap();
        log.append_entry(time, "same").unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.matches("\nsame\n").count(), 2);
    }

    #[test]
    fn test_existing_content_preserved() {
        let dir = tempdir().unwrap();
        let paths = paths_in(&dir);
        fs::create_dir_all(paths.daily_dir()).unwrap();
        fs::write(paths.daily_log(date()), "hand-written notes\n").unwrap();

        let log = DailyLog::new(&paths, date());
        log.append_entry(NaiveTime::from_hms_opt(12, 0, 0).unwrap(), "auto").unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert!(content.starts_with("hand-written notes\n\n## 12:00"));
        assert!(!content.contains("# Daily Log"));
    }

    #[test]
    fn test_unwritable_location_errors() {
        let dir = tempdir().unwrap();
        // A file where the memory directory should be
        let blocker = dir.path().join("memory");
        fs::write(&blocker, "not a directory").unwrap();

        let log = DailyLog::new(&paths_in(&dir), date());
        let result = log.append_entry(NaiveTime::from_hms_opt(12, 0, 0).unwrap(), "x");
        assert!(matches!(result, Err(MemoryError::Io { .. })));
    }
}

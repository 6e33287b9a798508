//! Budgeted context assembly for new sessions.
//!
//! Sections are filled in priority order: today's log (whole), yesterday's
//! log (at least 500 chars), the active-context note (at least 300 chars).

use crate::paths::MemoryPaths;
use crate::text::truncate_with_marker;
use camino::Utf8Path;
use chrono::NaiveDate;
use std::fs;

/// Total character budget for reinjected memory.
pub const DEFAULT_BUDGET: usize = 3000;

/// Yesterday always gets at least this many characters.
const YESTERDAY_FLOOR: i64 = 500;

/// The active-context note always gets at least this many characters.
const ACTIVE_CONTEXT_FLOOR: i64 = 300;

pub const ACTIVE_CONTEXT_TOPIC: &str = "active-context";

const CONTEXT_HEADER: &str = "## Recent Memory (auto-loaded)";

/// One rendered block of recalled memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSection {
    pub heading: String,
    pub body: String,
}

impl ContextSection {
    fn new(heading: String, body: String) -> Self {
        Self { heading, body }
    }

    pub fn render(&self) -> String {
        format!("{}\n{}", self.heading, self.body)
    }

    fn rendered_len(&self) -> i64 {
        self.render().chars().count() as i64
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ContextAssembler {
    budget: usize,
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_BUDGET)
    }
}

impl ContextAssembler {
    pub fn new(budget: usize) -> Self {
        Self { budget }
    }

    /// Collect the sections that have content, honoring the budget.
    pub fn sections(&self, paths: &MemoryPaths, today: NaiveDate) -> Vec<ContextSection> {
        let mut sections = Vec::new();
        let mut remaining = self.budget as i64;

        let today_content = read_fragment(&paths.daily_log(today), None);
        if !today_content.is_empty() {
            let section = ContextSection::new(
                format!("### Today ({})", today.format("%Y-%m-%d")),
                today_content,
            );
            remaining -= section.rendered_len();
            sections.push(section);
        }

        if let Some(yesterday) = today.pred_opt() {
            let limit = (remaining - YESTERDAY_FLOOR).max(YESTERDAY_FLOOR) as usize;
            let content = read_fragment(&paths.daily_log(yesterday), Some(limit));
            if !content.is_empty() {
                let section = ContextSection::new(
                    format!("### Yesterday ({})", yesterday.format("%Y-%m-%d")),
                    content,
                );
                remaining -= section.rendered_len();
                sections.push(section);
            }
        }

        let limit = remaining.max(ACTIVE_CONTEXT_FLOOR) as usize;
        let active = read_fragment(&paths.topic(ACTIVE_CONTEXT_TOPIC), Some(limit));
        if !active.is_empty() {
            sections.push(ContextSection::new("### Active Context".to_string(), active));
        }

        sections
    }

    /// Combined context block, or `None` when nothing qualifies.
    pub fn assemble(&self, paths: &MemoryPaths, today: NaiveDate) -> Option<String> {
        let sections = self.sections(paths, today);
        if sections.is_empty() {
            return None;
        }

        let body = sections
            .iter()
            .map(ContextSection::render)
            .collect::<Vec<_>>()
            .join("\n\n");
        Some(format!("{}\n\n{}", CONTEXT_HEADER, body))
    }
}

/// Read a trimmed memory fragment.
///
/// Any read failure counts as an empty fragment.
pub fn read_fragment(path: &Utf8Path, max_chars: Option<usize>) -> String {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return String::new(),
    };

    let content = content.trim();
    match max_chars {
        Some(max) if max > 0 => truncate_with_marker(content, max),
        _ => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::tempdir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 14).unwrap()
    }

    fn yesterday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 13).unwrap()
    }

    fn setup() -> (tempfile::TempDir, MemoryPaths) {
        let dir = tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().join("memory")).unwrap();
        let paths = MemoryPaths::new(root);
        fs::create_dir_all(paths.daily_dir()).unwrap();
        fs::create_dir_all(paths.topics_dir()).unwrap();
        (dir, paths)
    }

    #[test]
    fn test_today_only() {
        let (_dir, paths) = setup();
        fs::write(paths.daily_log(today()), "# Daily Log - 2026-05-14\n\n- shipped parser\n").unwrap();

        let sections = ContextAssembler::default().sections(&paths, today());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "### Today (2026-05-14)");
        assert_eq!(sections[0].body, "# Daily Log - 2026-05-14\n\n- shipped parser");
    }

    #[test]
    fn test_nothing_to_load() {
        let (_dir, paths) = setup();
        assert!(ContextAssembler::default().assemble(&paths, today()).is_none());
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let paths = MemoryPaths::new("/nonexistent/memory/root");
        assert!(ContextAssembler::default().assemble(&paths, today()).is_none());
    }

    #[test]
    fn test_whitespace_only_file_is_empty() {
        let (_dir, paths) = setup();
        fs::write(paths.daily_log(today()), "  \n\n").unwrap();
        assert!(ContextAssembler::default().sections(&paths, today()).is_empty());
    }

    #[test]
    fn test_unreadable_fragments_are_skipped() {
        let (_dir, paths) = setup();
        // Directories where today's log and the active-context note should be
        fs::create_dir_all(paths.daily_log(today())).unwrap();
        fs::create_dir_all(paths.topic(ACTIVE_CONTEXT_TOPIC)).unwrap();
        fs::write(paths.daily_log(yesterday()), "yesterday notes").unwrap();

        let sections = ContextAssembler::default().sections(&paths, today());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "### Yesterday (2026-05-13)");
    }

    #[cfg(unix)]
    #[test]
    fn test_permission_denied_counts_as_empty() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, paths) = setup();
        let log = paths.daily_log(yesterday());
        fs::write(&log, "private").unwrap();
        fs::set_permissions(&log, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores file modes
        if fs::read_to_string(&log).is_ok() {
            return;
        }

        assert_eq!(read_fragment(&log, Some(500)), "");
        assert!(ContextAssembler::default().assemble(&paths, today()).is_none());
    }

    #[test]
    fn test_assemble_format() {
        let (_dir, paths) = setup();
        fs::write(paths.daily_log(today()), "today notes").unwrap();
        fs::write(paths.daily_log(yesterday()), "yesterday notes").unwrap();
        fs::write(paths.topic(ACTIVE_CONTEXT_TOPIC), "working on router").unwrap();

        let context = ContextAssembler::default().assemble(&paths, today()).unwrap();
        assert_eq!(
            context,
            "## Recent Memory (auto-loaded)\n\n\
             ### Today (2026-05-14)\ntoday notes\n\n\
             ### Yesterday (2026-05-13)\nyesterday notes\n\n\
             ### Active Context\nworking on router"
        );
    }

    #[test]
    fn test_today_is_never_truncated() {
        let (_dir, paths) = setup();
        let big = "t".repeat(5000);
        fs::write(paths.daily_log(today()), &big).unwrap();

        let sections = ContextAssembler::default().sections(&paths, today());
        assert_eq!(sections[0].body, big);
    }

    #[test]
    fn test_yesterday_floor_when_budget_exhausted() {
        let (_dir, paths) = setup();
        fs::write(paths.daily_log(today()), "t".repeat(3000)).unwrap();
        fs::write(paths.daily_log(yesterday()), "y".repeat(2000)).unwrap();

        let sections = ContextAssembler::default().sections(&paths, today());
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].body, format!("{}\n... (truncated)", "y".repeat(500)));
    }

    #[test]
    fn test_yesterday_uses_remaining_budget() {
        let (_dir, paths) = setup();
        // "### Today (2026-05-14)\n" is 23 chars, so today's section is 1000
        fs::write(paths.daily_log(today()), "t".repeat(977)).unwrap();
        fs::write(paths.daily_log(yesterday()), "y".repeat(5000)).unwrap();

        let sections = ContextAssembler::default().sections(&paths, today());
        // 3000 - 1000 - 500 = 1500
        assert_eq!(sections[1].body.chars().filter(|c| *c == 'y').count(), 1500);
        assert!(sections[1].body.ends_with("... (truncated)"));
    }

    #[test]
    fn test_active_context_floor() {
        let (_dir, paths) = setup();
        fs::write(paths.daily_log(today()), "t".repeat(4000)).unwrap();
        fs::write(paths.topic(ACTIVE_CONTEXT_TOPIC), "a".repeat(1000)).unwrap();

        let sections = ContextAssembler::default().sections(&paths, today());
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].heading, "### Active Context");
        assert_eq!(sections[1].body, format!("{}\n... (truncated)", "a".repeat(300)));
    }

    #[test]
    fn test_active_context_only() {
        let (_dir, paths) = setup();
        fs::write(paths.topic(ACTIVE_CONTEXT_TOPIC), "focus: auth").unwrap();

        let context = ContextAssembler::default().assemble(&paths, today()).unwrap();
        assert!(context.ends_with("### Active Context\nfocus: auth"));
    }

    #[test]
    fn test_read_fragment_counts_chars() {
        let dir = tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("note.md")).unwrap();
        fs::write(&path, "日本語のメモ").unwrap();

        assert_eq!(read_fragment(&path, Some(3)), "日本語\n... (truncated)");
        assert_eq!(read_fragment(&path, Some(10)), "日本語のメモ");
        assert_eq!(read_fragment(&path, None), "日本語のメモ");
    }
}

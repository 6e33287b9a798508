//! Memory directory layout.
//!
//! Each project gets `<projects root>/<sanitized cwd>/memory/` with:
//! - `daily/<YYYY-MM-DD>.md` append-only session logs
//! - `topics/<name>.md` freeform notes
//! - `MEMORY.md` index

use crate::error::MemoryError;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use std::path::PathBuf;

/// Overrides the per-user projects root.
pub const PROJECTS_ROOT_ENV: &str = "CLAUDE_MEMORY_PROJECTS_ROOT";

/// Map a working directory to its project key.
///
/// Slashes and spaces become `-`, so `/home/me/my app` maps to
/// `-home-me-my-app`. Distinct directories can collide (`/a b` and `/a/b`).
pub fn sanitize_cwd(cwd: &str) -> String {
    cwd.chars()
        .map(|c| match c {
            '/' | ' ' => '-',
            c => c,
        })
        .collect()
}

/// Get the projects root.
///
/// Priority:
/// 1. CLAUDE_MEMORY_PROJECTS_ROOT environment variable (if set)
/// 2. ~/.claude/projects
pub fn default_projects_root() -> Result<Utf8PathBuf, MemoryError> {
    projects_root_from(std::env::var(PROJECTS_ROOT_ENV).ok(), dirs::home_dir())
}

fn projects_root_from(
    custom: Option<String>,
    home: Option<PathBuf>,
) -> Result<Utf8PathBuf, MemoryError> {
    if let Some(custom) = custom.filter(|p| !p.is_empty()) {
        return Ok(Utf8PathBuf::from(custom));
    }

    let home = home.ok_or(MemoryError::HomeNotFound)?;
    let home = Utf8PathBuf::from_path_buf(home)
        .map_err(|p| MemoryError::NonUtf8Path(p.display().to_string()))?;
    Ok(home.join(".claude").join("projects"))
}

/// Locations inside one project's memory directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPaths {
    root: Utf8PathBuf,
}

impl MemoryPaths {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Memory directory for a working directory under `projects_root`.
    pub fn for_cwd(projects_root: &Utf8Path, cwd: &str) -> Self {
        Self::new(projects_root.join(sanitize_cwd(cwd)).join("memory"))
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn daily_dir(&self) -> Utf8PathBuf {
        self.root.join("daily")
    }

    pub fn daily_log(&self, date: NaiveDate) -> Utf8PathBuf {
        self.daily_dir()
            .join(format!("{}.md", date.format("%Y-%m-%d")))
    }

    pub fn topics_dir(&self) -> Utf8PathBuf {
        self.root.join("topics")
    }

    pub fn topic(&self, name: &str) -> Utf8PathBuf {
        self.topics_dir().join(format!("{}.md", name))
    }

    pub fn index(&self) -> Utf8PathBuf {
        self.root.join("MEMORY.md")
    }
}

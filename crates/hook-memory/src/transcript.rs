//! Heuristic session summary from a JSONL transcript.
//!
//! Only assistant-authored text from the last records is mined for
//! decisions, file operations and next steps. No model is involved.

use crate::error::MemoryError;
use crate::text::truncate_chars;
use camino::Utf8Path;
use serde_json::Value;
use std::fs;

/// Number of trailing transcript records considered.
pub const TRANSCRIPT_WINDOW: usize = 50;

const MIN_LINE_CHARS: usize = 10;
const MAX_ENTRY_CHARS: usize = 200;

const MAX_DECISIONS: usize = 5;
const MAX_FILE_OPS: usize = 10;
const MAX_NEXT_STEPS: usize = 5;

const DECISION_KEYWORDS: &[&str] = &[
    "decided", "chose", "selected", "will use", "going with",
    "settled on", "picked", "opted for", "agreed to", "confirmed",
];

const FILE_OP_KEYWORDS: &[&str] = &[
    "created", "edited", "modified", "updated", "deleted",
    "wrote", "added", "removed", "refactored", "renamed",
];

const NEXT_STEP_KEYWORDS: &[&str] = &[
    "next step", "todo", "to do", "remaining", "still need",
    "follow up", "come back to", "later", "tomorrow",
];

/// Noteworthy lines extracted from one transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub decisions: Vec<String>,
    pub file_ops: Vec<String>,
    pub next_steps: Vec<String>,
}

impl SessionSummary {
    /// Extract summary lines from assistant text.
    ///
    /// A line can land in several categories; duplicates are dropped per
    /// category.
    pub fn extract(text: &str) -> Self {
        let mut summary = Self::default();

        for line in text.lines() {
            let line = line.trim();
            let line_lower = line.to_lowercase();
            if line_lower.chars().count() < MIN_LINE_CHARS {
                continue;
            }

            let cleaned = truncate_chars(line, MAX_ENTRY_CHARS);

            if contains_any(&line_lower, DECISION_KEYWORDS) {
                push_unique(&mut summary.decisions, cleaned, MAX_DECISIONS);
            }
            if contains_any(&line_lower, FILE_OP_KEYWORDS) {
                push_unique(&mut summary.file_ops, cleaned, MAX_FILE_OPS);
            }
            if contains_any(&line_lower, NEXT_STEP_KEYWORDS) {
                push_unique(&mut summary.next_steps, cleaned, MAX_NEXT_STEPS);
            }
        }

        summary
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty() && self.file_ops.is_empty() && self.next_steps.is_empty()
    }

    /// Render as labeled markdown bullet groups, skipping empty groups.
    pub fn to_markdown(&self) -> String {
        let groups = [
            ("**Decisions:**", &self.decisions),
            ("**File Operations:**", &self.file_ops),
            ("**Next Steps:**", &self.next_steps),
        ];

        let mut lines = Vec::new();
        for (label, items) in groups {
            if items.is_empty() {
                continue;
            }
            lines.push(label.to_string());
            lines.extend(items.iter().map(|item| format!("- {}", item)));
        }
        lines.join("\n")
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| haystack.contains(kw))
}

fn push_unique(items: &mut Vec<String>, line: &str, cap: usize) {
    if items.len() < cap && !items.iter().any(|item| item == line) {
        items.push(line.to_string());
    }
}

/// Summarize the transcript at `path`.
pub fn summarize_file(path: &Utf8Path) -> Result<SessionSummary, MemoryError> {
    let content =
        fs::read_to_string(path).map_err(|e| MemoryError::io("read transcript", path, e))?;
    let lines: Vec<&str> = content.lines().collect();
    Ok(SessionSummary::extract(&collect_assistant_text(&lines)))
}

/// Newline-joined assistant text from the last [`TRANSCRIPT_WINDOW`] records.
///
/// Malformed and non-object lines are skipped.
pub fn collect_assistant_text<S: AsRef<str>>(lines: &[S]) -> String {
    let start = lines.len().saturating_sub(TRANSCRIPT_WINDOW);

    lines[start..]
        .iter()
        .filter_map(|line| serde_json::from_str::<Value>(line.as_ref().trim()).ok())
        .filter_map(|record| assistant_text(&record))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text of an assistant record, if any.
///
/// Accepts flat `{"role", "content"}` records and the host's nested
/// `{"message": {"role", "content"}}` form.
fn assistant_text(record: &Value) -> Option<String> {
    let obj = record.as_object()?;
    let (role, content) = match obj.get("role") {
        Some(role) => (role.as_str(), obj.get("content")),
        None => {
            let message = obj.get("message")?.as_object()?;
            (
                message.get("role").and_then(Value::as_str),
                message.get("content"),
            )
        }
    };

    if role != Some("assistant") {
        return None;
    }

    let text = content.map(content_text).unwrap_or_default();
    (!text.is_empty()).then_some(text)
}

/// Plain text of message content: a string or a list of blocks.
fn content_text(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        Value::Array(blocks) => blocks
            .iter()
            .filter_map(|block| match block {
                Value::String(s) => Some(s.as_str()),
                Value::Object(obj) if obj.get("type").and_then(Value::as_str) == Some("text") => {
                    obj.get("text").and_then(Value::as_str)
                }
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

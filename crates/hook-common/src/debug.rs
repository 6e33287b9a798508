//! Debug logging for hooks.
//!
//! Logs hook decisions to a JSONL file when debug mode is on.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Debug log entry for hook execution
#[derive(Debug, Serialize)]
pub struct HookDebugLog {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Hook name (e.g., "memory-hook")
    pub hook_name: String,
    /// Event being handled (e.g., "Stop")
    pub event: String,
    /// Decision made (inject/skip/error)
    pub decision: String,
    /// Reason for the decision
    pub reason: String,
    /// Additional context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl HookDebugLog {
    pub fn new(hook_name: &str, event: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            hook_name: hook_name.to_string(),
            event: event.to_string(),
            decision: String::new(),
            reason: String::new(),
            context: None,
        }
    }

    pub fn with_decision(mut self, decision: &str, reason: &str) -> Self {
        self.decision = decision.to_string();
        self.reason = reason.to_string();
        self
    }

    pub fn with_context(mut self, context: &str) -> Self {
        self.context = Some(context.to_string());
        self
    }

    /// Write log entry to file
    pub fn write(&self) -> std::io::Result<()> {
        if !is_debug_enabled() {
            return Ok(());
        }

        let log_path = debug_log_path();

        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let json = serde_json::to_string(self).unwrap_or_default();
        writeln!(file, "{}", json)?;

        Ok(())
    }
}

/// Check if debug mode is enabled
pub fn is_debug_enabled() -> bool {
    if std::env::var("CLAUDE_HOOK_DEBUG").is_ok() {
        return true;
    }

    // Or check for debug marker file
    project_claude_dir().join(".hook-debug").exists()
}

/// Get debug log file path
pub fn debug_log_path() -> PathBuf {
    project_claude_dir().join("logs").join("hook-debug.jsonl")
}

fn project_claude_dir() -> PathBuf {
    let project_dir = std::env::var("CLAUDE_PROJECT_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(project_dir).join(".claude")
}

/// Quick helper to log a hook decision
pub fn log_decision(hook_name: &str, event: &str, decision: &str, reason: &str) {
    let log = HookDebugLog::new(hook_name, event).with_decision(decision, reason);

    let _ = log.write();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_log_serialization() {
        let log = HookDebugLog::new("memory-hook", "Stop")
            .with_decision("skip", "stop hook already active");

        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains("memory-hook"));
        assert!(json.contains("\"decision\":\"skip\""));
        assert!(!json.contains("\"context\""));
    }

    #[test]
    fn test_context_serialized_when_set() {
        let log = HookDebugLog::new("memory-hook", "Stop")
            .with_decision("error", "summary failed")
            .with_context("failed to read transcript /tmp/t.jsonl");

        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains("\"context\":\"failed to read transcript /tmp/t.jsonl\""));
    }

    #[test]
    fn test_log_path_under_claude_dir() {
        let path = debug_log_path();
        assert!(path.ends_with(".claude/logs/hook-debug.jsonl"));
    }
}

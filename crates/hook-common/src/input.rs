//! Hook input parsing from stdin.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::io::{self, Read};

/// Hook input structure received from Claude Code.
///
/// Every field is optional: the same structure serves prompt, compaction,
/// session start and stop events. A known field with the wrong JSON type
/// reads as absent without discarding the others.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookInput {
    /// Hook event name (e.g., "UserPromptSubmit", "Stop")
    #[serde(default, deserialize_with = "lenient_string")]
    pub hook_event_name: Option<String>,

    /// User prompt (for UserPromptSubmit hooks)
    #[serde(default, alias = "user_prompt", deserialize_with = "lenient_string")]
    pub prompt: Option<String>,

    /// Working directory of the session
    #[serde(default, deserialize_with = "lenient_string")]
    pub cwd: Option<String>,

    /// Path to the session transcript (JSONL)
    #[serde(default, deserialize_with = "lenient_string")]
    pub transcript_path: Option<String>,

    /// Set when the stop was triggered by an earlier stop hook response
    #[serde(default, deserialize_with = "lenient_bool")]
    pub stop_hook_active: bool,

    /// Session ID
    #[serde(default, deserialize_with = "lenient_string")]
    pub session_id: Option<String>,

    /// Additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl HookInput {
    /// Read and parse hook input from stdin.
    ///
    /// Unreadable or malformed input yields the empty input.
    pub fn from_stdin() -> Self {
        let mut input = String::new();
        match io::stdin().read_to_string(&mut input) {
            Ok(_) => Self::parse(&input),
            Err(e) => {
                eprintln!("Warning: Failed to read hook input: {}", e);
                Self::default()
            }
        }
    }

    /// Parse hook input from a JSON string.
    ///
    /// Anything but a JSON object yields the empty input.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// Get the prompt if it is present and non-empty.
    pub fn get_prompt(&self) -> Option<&str> {
        self.prompt.as_deref().filter(|p| !p.is_empty())
    }

    /// Get the transcript path if it is present and non-empty.
    pub fn get_transcript_path(&self) -> Option<&str> {
        self.transcript_path.as_deref().filter(|p| !p.is_empty())
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(matches!(value, Some(serde_json::Value::Bool(true))))
}

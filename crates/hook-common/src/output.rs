//! Hook output generation for stdout.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Hook-specific output structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    /// Hook event name
    pub hook_event_name: String,

    /// Additional context message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

/// Main hook output structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    /// Hook-specific output
    pub hook_specific_output: HookSpecificOutput,
}

impl HookOutput {
    /// Create a new hook output for the given event.
    pub fn for_event(event_name: impl Into<String>) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: event_name.into(),
                additional_context: None,
            },
        }
    }

    /// Create a new hook output for UserPromptSubmit.
    pub fn user_prompt_submit() -> Self {
        Self::for_event("UserPromptSubmit")
    }

    /// Create a new hook output for PreCompact.
    pub fn pre_compact() -> Self {
        Self::for_event("PreCompact")
    }

    /// Create a new hook output for SessionStart.
    pub fn session_start() -> Self {
        Self::for_event("SessionStart")
    }

    /// Add additional context message.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.hook_specific_output.additional_context = Some(context.into());
        self
    }

    /// The additional context, if any.
    pub fn context(&self) -> Option<&str> {
        self.hook_specific_output.additional_context.as_deref()
    }
}

/// What a hook invocation writes back: `{}` or a hook output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookResponse {
    /// No action (`{}`)
    Empty,
    /// Inject context into the session
    Output(HookOutput),
}

impl HookResponse {
    pub fn is_empty(&self) -> bool {
        matches!(self, HookResponse::Empty)
    }

    /// Serialize the response to a JSON string.
    pub fn to_json(&self) -> anyhow::Result<String> {
        match self {
            HookResponse::Empty => Ok("{}".to_string()),
            HookResponse::Output(output) => Ok(serde_json::to_string(output)?),
        }
    }

    /// Write the response to stdout.
    pub fn write_stdout(&self) -> anyhow::Result<()> {
        let json = self.to_json()?;
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", json)?;
        stdout.flush()?;
        Ok(())
    }
}

//! Common utilities for Claude Code hooks.
//!
//! This crate provides shared functionality for the memory hooks:
//! - JSON input parsing (lenient, never fails)
//! - JSON output generation
//! - Debug logging

pub mod debug;
pub mod input;
pub mod output;

pub use debug::{is_debug_enabled, log_decision, HookDebugLog};
pub use input::HookInput;
pub use output::{HookOutput, HookResponse};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::debug::{is_debug_enabled, log_decision, HookDebugLog};
    pub use crate::input::HookInput;
    pub use crate::output::{HookOutput, HookResponse};
    pub use anyhow::{Context, Result};
    pub use serde::{Deserialize, Serialize};
}

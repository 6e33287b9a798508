//! Episodic memory for Claude Code sessions.
//!
//! Provides:
//! - Memory directory resolution per working directory
//! - Prompt classification (memory intent, TDD topics)
//! - Budgeted context assembly from daily logs and topic notes
//! - Heuristic transcript summarization
//! - Append-only daily logs
//! - Event routing for the hook binaries

pub mod classifier;
pub mod context;
pub mod daily_log;
pub mod error;
pub mod paths;
pub mod router;
pub mod text;
pub mod transcript;

pub use classifier::{Classification, Classifier, PatternGroup};
pub use context::ContextAssembler;
pub use daily_log::DailyLog;
pub use error::MemoryError;
pub use paths::MemoryPaths;
pub use router::{EventKind, HookContext, Outcome};
pub use transcript::SessionSummary;

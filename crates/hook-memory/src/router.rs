//! Event routing for the memory hooks.
//!
//! Every invocation is a function of (input, clock, memory directory).
//! Failures never reach the host: [`respond`] turns them into `{}`.

use crate::classifier::Classifier;
use crate::context::ContextAssembler;
use crate::daily_log::DailyLog;
use crate::error::MemoryError;
use crate::paths::{default_projects_root, MemoryPaths};
use crate::transcript::summarize_file;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Local, NaiveDate, NaiveDateTime};
use hook_common::prelude::*;
use std::str::FromStr;

const PRE_COMPACT_TEMPLATE: &str = "[Memory System - Pre-Compaction Flush]\n\n\
    Context compaction is about to occur. Before losing context, \
    save any important decisions, facts, or progress to your memory files:\n\n\
    - **Session context**: Append to `memory/daily/{today}.md`\n\
    - **Durable knowledge**: Write to `memory/topics/{topic}.md`\n\
    - **Frequently needed facts**: Update `memory/MEMORY.md` (keep under 200 lines)\n\n\
    Priority items to save:\n\
    1. Decisions made and their rationale\n\
    2. Current task progress and what's left to do\n\
    3. Key facts or context that would be hard to reconstruct\n\
    4. Active file paths and their purpose\n\n\
    Read target files first to avoid duplicates. \
    If nothing important needs saving, continue normally.";

const MEMORY_PREFIX: &str = "[Memory System] ";

/// Session lifecycle events the memory hook handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    UserPromptSubmit,
    PreCompact,
    SessionStart,
    Stop,
}

impl EventKind {
    /// Event name as the host spells it.
    pub fn host_name(self) -> &'static str {
        match self {
            EventKind::UserPromptSubmit => "UserPromptSubmit",
            EventKind::PreCompact => "PreCompact",
            EventKind::SessionStart => "SessionStart",
            EventKind::Stop => "Stop",
        }
    }
}

impl FromStr for EventKind {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UserPromptSubmit" | "prompt-submit" => Ok(EventKind::UserPromptSubmit),
            "PreCompact" | "pre-compact" => Ok(EventKind::PreCompact),
            "SessionStart" | "session-start" => Ok(EventKind::SessionStart),
            "Stop" | "stop" => Ok(EventKind::Stop),
            other => Err(MemoryError::UnknownEvent(other.to_string())),
        }
    }
}

/// Clock and locations for one invocation.
///
/// Only the clock is read up front. Locations left unset are resolved from
/// the environment when an event needs the memory directory.
#[derive(Debug, Clone)]
pub struct HookContext {
    /// Local wall-clock time
    pub now: NaiveDateTime,
    /// Root holding one directory per project
    pub projects_root: Option<Utf8PathBuf>,
    /// Used when the input carries no `cwd`
    pub default_cwd: Option<String>,
}

impl HookContext {
    /// Context from the local clock.
    pub fn current() -> Self {
        Self::at(Local::now().naive_local())
    }

    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            now,
            projects_root: None,
            default_cwd: None,
        }
    }

    pub fn with_projects_root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.projects_root = Some(root.into());
        self
    }

    pub fn with_default_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.default_cwd = Some(cwd.into());
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    /// Memory directory for the session described by `input`.
    pub fn memory_paths(&self, input: &HookInput) -> Result<MemoryPaths> {
        let projects_root = match &self.projects_root {
            Some(root) => root.clone(),
            None => default_projects_root().context("Failed to resolve projects root")?,
        };

        let cwd = match (input.cwd.as_deref(), &self.default_cwd) {
            (Some(cwd), _) => cwd.to_string(),
            (None, Some(fallback)) => fallback.clone(),
            (None, None) => std::env::current_dir()
                .context("Failed to read current directory")?
                .to_string_lossy()
                .into_owned(),
        };

        Ok(MemoryPaths::for_cwd(&projects_root, &cwd))
    }
}

/// What a handler decided, with the reason recorded in the debug log.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Context returned to the host
    Inject { output: HookOutput, reason: String },
    /// Nothing returned
    Skip { reason: String },
}

impl Outcome {
    pub fn inject(output: HookOutput, reason: impl Into<String>) -> Self {
        Outcome::Inject {
            output,
            reason: reason.into(),
        }
    }

    pub fn skip(reason: impl Into<String>) -> Self {
        Outcome::Skip {
            reason: reason.into(),
        }
    }

    pub fn output(&self) -> Option<&HookOutput> {
        match self {
            Outcome::Inject { output, .. } => Some(output),
            Outcome::Skip { .. } => None,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            Outcome::Inject { reason, .. } | Outcome::Skip { reason } => reason,
        }
    }
}

/// Handle one event.
pub fn dispatch(kind: EventKind, input: &HookInput, ctx: &HookContext) -> Result<Outcome> {
    match kind {
        EventKind::UserPromptSubmit => on_prompt_submit(input, ctx),
        EventKind::PreCompact => Ok(on_pre_compact(ctx)),
        EventKind::SessionStart => on_session_start(input, ctx),
        EventKind::Stop => on_stop(input, ctx),
    }
}

fn on_prompt_submit(input: &HookInput, ctx: &HookContext) -> Result<Outcome> {
    let Some(prompt) = input.get_prompt() else {
        return Ok(Outcome::skip("no prompt"));
    };

    let classifier = Classifier::memory_intent()?;
    Ok(match classifier.classify(prompt, ctx.today()) {
        Some(c) => Outcome::inject(
            HookOutput::user_prompt_submit().with_context(format!("{}{}", MEMORY_PREFIX, c.message)),
            format!("matched {}", c.group),
        ),
        None => Outcome::skip("no memory trigger"),
    })
}

fn on_pre_compact(ctx: &HookContext) -> Outcome {
    let today = ctx.today().format("%Y-%m-%d").to_string();
    Outcome::inject(
        HookOutput::pre_compact().with_context(PRE_COMPACT_TEMPLATE.replace("{today}", &today)),
        "pre-compaction flush reminder",
    )
}

fn on_session_start(input: &HookInput, ctx: &HookContext) -> Result<Outcome> {
    let paths = ctx.memory_paths(input)?;

    // No daily logs yet means a fresh project
    if !paths.daily_dir().is_dir() {
        return Ok(Outcome::skip(format!("no daily logs in {}", paths.root())));
    }

    Ok(match ContextAssembler::default().assemble(&paths, ctx.today()) {
        Some(context) => {
            let reason = format!("loaded {} chars of memory", context.chars().count());
            Outcome::inject(HookOutput::session_start().with_context(context), reason)
        }
        None => Outcome::skip("no memory to load"),
    })
}

/// Summarize the transcript into today's log.
fn on_stop(input: &HookInput, ctx: &HookContext) -> Result<Outcome> {
    // Stop triggered by an earlier stop hook response
    if input.stop_hook_active {
        return Ok(Outcome::skip("stop hook already active"));
    }

    let Some(transcript_path) = input.get_transcript_path() else {
        return Ok(Outcome::skip("no transcript path"));
    };
    let transcript_path = Utf8Path::new(transcript_path);
    if !transcript_path.exists() {
        return Ok(Outcome::skip(format!("transcript not found: {}", transcript_path)));
    }

    let paths = ctx.memory_paths(input)?;
    let written = save_session_summary(transcript_path, &paths, ctx.now)
        .context("Failed to save session summary")?;

    Ok(Outcome::skip(match written {
        Some(log) => format!("session summary appended to {}", log),
        None => "nothing noteworthy in transcript".to_string(),
    }))
}

/// Append the transcript summary, returning the log written to.
fn save_session_summary(
    transcript_path: &Utf8Path,
    paths: &MemoryPaths,
    now: NaiveDateTime,
) -> Result<Option<Utf8PathBuf>, MemoryError> {
    let summary = summarize_file(transcript_path)?;
    if summary.is_empty() {
        return Ok(None);
    }

    let log = DailyLog::new(paths, now.date());
    log.append_entry(now.time(), &summary.to_markdown())?;
    Ok(Some(log.path().to_path_buf()))
}

/// TDD directive for a prompt about test-driven development.
pub fn tdd_prompt(input: &HookInput, ctx: &HookContext) -> Result<Outcome> {
    let Some(prompt) = input.get_prompt() else {
        return Ok(Outcome::skip("no prompt"));
    };

    let classifier = Classifier::tdd()?;
    Ok(match classifier.classify(prompt, ctx.today()) {
        Some(c) => Outcome::inject(
            HookOutput::user_prompt_submit().with_context(c.message),
            format!("matched {}", c.group),
        ),
        None => Outcome::skip("no tdd topic"),
    })
}

/// Convert a handler result into the response written to the host.
///
/// Errors become `{}`; the decision is recorded in the debug log.
pub fn respond(hook_name: &str, event: &str, result: Result<Outcome>) -> HookResponse {
    match result {
        Ok(Outcome::Inject { output, reason }) => {
            log_decision(hook_name, event, "inject", &reason);
            HookResponse::Output(output)
        }
        Ok(Outcome::Skip { reason }) => {
            log_decision(hook_name, event, "skip", &reason);
            HookResponse::Empty
        }
        Err(e) => {
            let chain = format!("{:#}", e);
            eprintln!("Warning: {} failed: {}", hook_name, chain);
            let _ = HookDebugLog::new(hook_name, event)
                .with_decision("error", "handler failed, responding with {}")
                .with_context(&chain)
                .write();
            HookResponse::Empty
        }
    }
}

/// Resolve the event kind and handle it.
///
/// `explicit` (from the command line) takes precedence over the input's
/// `hook_event_name`.
pub fn run(hook_name: &str, explicit: Option<&str>, input: &HookInput) -> HookResponse {
    let name = explicit.or(input.hook_event_name.as_deref()).unwrap_or("");

    let result = name
        .parse::<EventKind>()
        .map_err(anyhow::Error::from)
        .and_then(|kind| dispatch(kind, input, &HookContext::current()));

    respond(hook_name, name, result)
}

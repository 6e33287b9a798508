//! Memory hook: episodic memory across session lifecycle events.
//!
//! - UserPromptSubmit: remind to save on "remember this", topic switches, goodbyes
//! - PreCompact: ask for a memory flush before context is compacted
//! - SessionStart: inject today's/yesterday's logs and the active context
//! - Stop: append a heuristic session summary to today's log
//!
//! The event comes from the command line or the input's `hook_event_name`.
//! Always prints one JSON object and exits 0.

use clap::Parser;
use clap::error::ErrorKind;
use hook_common::HookInput;
use hook_memory::router;

const HOOK_NAME: &str = "memory-hook";

#[derive(Debug, Default, Parser)]
#[command(name = "memory-hook", version, about = "Episodic memory hooks for Claude Code sessions")]
struct Cli {
    /// Event to handle (UserPromptSubmit, PreCompact, SessionStart, Stop or
    /// their kebab-case forms). Defaults to hook_event_name from stdin.
    event: Option<String>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprintln!("Warning: {}", e);
            Cli::default()
        }
    };

    let input = HookInput::from_stdin();
    let response = router::run(HOOK_NAME, cli.event.as_deref(), &input);

    if let Err(e) = response.write_stdout() {
        eprintln!("Warning: Failed to write hook output: {}", e);
    }
}

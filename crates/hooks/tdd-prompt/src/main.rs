//! UserPromptSubmit hook: Point TDD-related prompts at the tdd-workflow skill.

use hook_common::HookInput;
use hook_memory::{router, HookContext};

const HOOK_NAME: &str = "tdd-prompt";

fn main() {
    let input = HookInput::from_stdin();
    let result = router::tdd_prompt(&input, &HookContext::current());
    let response = router::respond(HOOK_NAME, "UserPromptSubmit", result);

    if let Err(e) = response.write_stdout() {
        eprintln!("Warning: Failed to write hook output: {}", e);
    }
}

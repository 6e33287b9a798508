//! Prompt classification against ordered pattern groups.
//!
//! The first group with any matching pattern wins; later groups are not
//! consulted. Templates may contain `{today}`, replaced with the local date.

use crate::error::MemoryError;
use chrono::NaiveDate;
use regex::Regex;

/// Named trigger patterns with the reminder they produce.
#[derive(Debug, Clone, Copy)]
pub struct PatternGroup {
    pub name: &'static str,
    pub patterns: &'static [&'static str],
    pub template: &'static str,
}

/// Memory-intent groups, in priority order.
pub const MEMORY_INTENT_GROUPS: &[PatternGroup] = &[
    PatternGroup {
        name: "explicit_save",
        patterns: &[
            r"\bremember\s+this\b",
            r"\bsave\s+(to\s+)?memory\b",
            r"\bnote\s+this\s+down\b",
            r"\bsave\s+this\b",
            r"\bdon'?t\s+forget\b",
            r"\bkeep\s+in\s+mind\b",
            r"\bwrite\s+this\s+down\b",
            r"\bstore\s+this\b",
        ],
        template: "The user wants to save something to memory. \
                   Write the relevant information to your memory files:\n\
                   - For session context: append to `memory/daily/{today}.md`\n\
                   - For durable knowledge: write to `memory/topics/{topic}.md`\n\
                   - For frequently-needed facts: update `memory/MEMORY.md` (keep under 200 lines)\n\
                   Read the target file first to avoid duplicates, then append concisely.",
    },
    PatternGroup {
        name: "context_switch",
        patterns: &[
            r"\bswitch(ing)?\s+to\b",
            r"\blet'?s\s+work\s+on\s+(something\s+else|a\s+different)\b",
            r"\bmoving\s+on\s+to\b",
            r"\bchanging\s+(topic|focus|gears)\b",
            r"\bnew\s+topic\b",
        ],
        template: "Context switch detected. Before changing focus, consider saving \
                   any important decisions, progress, or active context from the current work. \
                   Write a brief summary to `memory/daily/{today}.md` capturing what was accomplished \
                   and any pending next steps. Update `memory/topics/active-context.md` with the new focus area.",
    },
    PatternGroup {
        name: "session_end",
        patterns: &[
            r"\bthat'?s\s+all\b",
            r"\bdone\s+for\s+(today|now|the\s+day)\b",
            r"\bgoodbye\b",
            r"\bgood\s*night\b",
            r"\bsigning\s+off\b",
            r"\bwrap(ping)?\s+up\b",
            r"\bcall\s+it\s+a\s+day\b",
            r"\bending\s+(the\s+)?session\b",
        ],
        template: "Session ending detected. Before finishing, save important context:\n\
                   1. Append a session summary to `memory/daily/{today}.md` with:\n   \
                   - Key decisions made\n   \
                   - Files created or modified\n   \
                   - Open questions or next steps\n\
                   2. Update `memory/topics/active-context.md` with what to pick up next time\n\
                   3. If any durable knowledge was established, save to appropriate topic files",
    },
];

/// Directive injected when a prompt is about test-driven development.
pub const TDD_DIRECTIVE: &str = "Use tdd-workflow";

pub const TDD_GROUPS: &[PatternGroup] = &[PatternGroup {
    name: "tdd",
    patterns: &[
        r"\btdd\b",
        r"\btest[- ]?driven\b",
        r"\btest[- ]?first\b",
        r"\bred[- ]?green[- ]?refactor\b",
        r"\bwrite\s+(a\s+)?test",
        r"\badd\s+(a\s+)?test",
        r"\btesting\b",
        r"\bunit\s+test",
        r"\bspec\b",
    ],
    template: TDD_DIRECTIVE,
}];

/// A matched group and its rendered reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub group: &'static str,
    pub message: String,
}

#[derive(Debug)]
struct CompiledGroup {
    group: PatternGroup,
    patterns: Vec<Regex>,
}

/// Compiled pattern groups.
#[derive(Debug)]
pub struct Classifier {
    groups: Vec<CompiledGroup>,
}

impl Classifier {
    pub fn new(groups: &[PatternGroup]) -> Result<Self, MemoryError> {
        let groups = groups
            .iter()
            .map(|group| {
                let patterns = group
                    .patterns
                    .iter()
                    .map(|p| Regex::new(p))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|source| MemoryError::Pattern {
                        group: group.name,
                        source,
                    })?;
                Ok(CompiledGroup {
                    group: *group,
                    patterns,
                })
            })
            .collect::<Result<Vec<_>, MemoryError>>()?;
        Ok(Self { groups })
    }

    /// Explicit-save, context-switch and session-end triggers.
    pub fn memory_intent() -> Result<Self, MemoryError> {
        Self::new(MEMORY_INTENT_GROUPS)
    }

    /// TDD topic triggers.
    pub fn tdd() -> Result<Self, MemoryError> {
        Self::new(TDD_GROUPS)
    }

    /// Classify `text`, returning the first matching group.
    pub fn classify(&self, text: &str, today: NaiveDate) -> Option<Classification> {
        let text_lower = text.to_lowercase();

        self.groups
            .iter()
            .find(|g| g.patterns.iter().any(|re| re.is_match(&text_lower)))
            .map(|g| Classification {
                group: g.group.name,
                message: g
                    .group
                    .template
                    .replace("{today}", &today.format("%Y-%m-%d").to_string()),
            })
    }
}

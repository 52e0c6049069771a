//! Command dispatch shared by the console and assistant surfaces.
//!
//! A line of input is normalized (trim + lowercase) and evaluated against a
//! fixed ordered rule table; the first matching rule wins. Rules emit a
//! textual response, immediate session actions, and deferred actions for
//! screen transitions. The dispatcher performs no I/O and holds no state.

use std::time::Duration;

use once_cell::sync::Lazy;

use crate::session::{Action, Deferred, Screen, SessionState};

/// Fixed presentation delay for screen transitions triggered by commands,
/// leaving room for the "processing" animation.
pub const TRANSITION_DELAY: Duration = Duration::from_millis(1500);

/// Which surface submitted the line. Only the fallback policy differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Console,
    Assistant,
}

/// The result of dispatching one line of input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub response: Option<String>,
    pub actions: Vec<Action>,
    pub deferred: Vec<Deferred>,
    pub clear_log: bool,
}

impl Outcome {
    fn text(message: impl Into<String>) -> Self {
        Self {
            response: Some(message.into()),
            ..Self::default()
        }
    }

    fn silent() -> Self {
        Self::default()
    }

    fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    fn with_transition(mut self, action: Action) -> Self {
        self.deferred.push(Deferred::new(action, TRANSITION_DELAY));
        self
    }
}

const HELP_TEXT: &str = "Available commands:\n\
    • 'Open accounts' - Access the accounts ledger\n\
    • 'Dashboard' - Return to main dashboard\n\
    • 'Terminal' - Open command console\n\
    • 'Toggle sound' - Enable/disable audio\n\
    • 'Matrix' - Toggle digital rain effect\n\
    • 'Logout' - End current session";

const NEO_TEXT: &str = "Wake up, Neo...\nThe Matrix has you...\nFollow the white rabbit.";

const ASSISTANT_FALLBACKS: [&str; 5] = [
    "I'm sorry, I don't understand that command. Try 'help' for a list of available commands.",
    "Command not recognized. Would you like to access 'accounts', 'dashboard', or 'terminal'?",
    "I'm not programmed to respond to that input. Please try something else or type 'help'.",
    "That query falls outside my operational parameters. Perhaps you'd like to check the 'accounts' module?",
    "I didn't quite catch that. Try asking me to open a specific module or type 'help'.",
];

type RuleHandler = fn(&SessionState, &str) -> Outcome;

enum Matcher {
    Exact(&'static [&'static str]),
    Contains(&'static [&'static str]),
}

struct Rule {
    matcher: Matcher,
    handler: RuleHandler,
}

impl Rule {
    const fn exact(words: &'static [&'static str], handler: RuleHandler) -> Self {
        Self {
            matcher: Matcher::Exact(words),
            handler,
        }
    }

    const fn contains(keywords: &'static [&'static str], handler: RuleHandler) -> Self {
        Self {
            matcher: Matcher::Contains(keywords),
            handler,
        }
    }

    fn matches(&self, normalized: &str) -> bool {
        match self.matcher {
            Matcher::Exact(words) => words.contains(&normalized),
            Matcher::Contains(keywords) => keywords.iter().any(|key| normalized.contains(key)),
        }
    }
}

/// The shared rule table. Exact command words first, then keyword
/// containment in fixed priority order; table order is contract.
static RULES: &[Rule] = &[
    Rule::exact(&["help"], rule_help),
    Rule::exact(&["clear"], rule_clear),
    Rule::exact(&["exit"], rule_exit),
    Rule::exact(&["accounts"], rule_accounts_exact),
    Rule::exact(&["assistant"], rule_assistant),
    Rule::exact(&["system logs"], rule_system_logs),
    Rule::exact(&["settings"], rule_settings),
    Rule::exact(&["toggle sound"], rule_toggle_sound_exact),
    Rule::exact(&["toggle dev"], rule_toggle_dev),
    Rule::exact(&["toggle matrix"], rule_toggle_matrix),
    Rule::exact(&["neo"], rule_neo),
    Rule::exact(&["hello", "hi", "hey"], rule_greeting),
    Rule::contains(&["dashboard", "main screen", "home"], rule_go_dashboard),
    Rule::contains(&["terminal", "console", "command line"], rule_go_console),
    Rule::contains(&["matrix", "neo"], rule_matrix_contains),
    Rule::contains(&["mute", "sound off", "toggle sound"], rule_sound_contains),
    Rule::contains(&["what can you do", "commands", "help"], rule_help),
    Rule::contains(&["logout", "sign out", "exit"], rule_logout),
    Rule::contains(
        &["account", "transaction", "ledger", "open accounts"],
        rule_go_accounts,
    ),
];

static COMMAND_WORDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut words: Vec<&'static str> = RULES
        .iter()
        .filter_map(|rule| match rule.matcher {
            Matcher::Exact(names) => Some(names),
            Matcher::Contains(_) => None,
        })
        .flatten()
        .copied()
        .collect();
    words.push("echo");
    words
});

/// Every word the exact rules answer to, in table order. Feeds the
/// console's completion and its unknown-command suggestions.
pub fn command_words() -> &'static [&'static str] {
    &COMMAND_WORDS
}

/// Evaluates `input` against the rule table for the given surface.
pub fn dispatch(input: &str, state: &SessionState, surface: Surface) -> Outcome {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return Outcome::silent();
    }

    for rule in RULES {
        if rule.matches(&normalized) {
            return (rule.handler)(state, input);
        }
    }

    if let Some(rest) = echo_payload(input) {
        return Outcome::text(rest);
    }

    match surface {
        Surface::Console => Outcome::text(format!(
            "Command not recognized: \"{}\"\nType \"help\" for available commands.",
            input.trim()
        )),
        Surface::Assistant => {
            let pick = fnv1a(&normalized) as usize % ASSISTANT_FALLBACKS.len();
            Outcome::text(ASSISTANT_FALLBACKS[pick])
        }
    }
}

/// `echo <rest>` repeats the rest of the raw line verbatim.
fn echo_payload(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    let prefix = trimmed.get(..5)?;
    if prefix.eq_ignore_ascii_case("echo ") {
        Some(&trimmed[5..])
    } else {
        None
    }
}

fn rule_help(_state: &SessionState, _raw: &str) -> Outcome {
    Outcome::text(HELP_TEXT)
}

fn rule_clear(_state: &SessionState, _raw: &str) -> Outcome {
    Outcome {
        clear_log: true,
        ..Outcome::default()
    }
}

fn rule_exit(_state: &SessionState, _raw: &str) -> Outcome {
    Outcome::silent().with_transition(Action::SetScreen(Screen::Dashboard))
}

fn rule_accounts_exact(_state: &SessionState, _raw: &str) -> Outcome {
    Outcome::text("Accessing accounts module...")
        .with_transition(Action::SetScreen(Screen::AccountsTable))
}

fn rule_assistant(_state: &SessionState, _raw: &str) -> Outcome {
    Outcome::text("Opening AI Virtual Assistant...")
        .with_transition(Action::SetScreen(Screen::VirtualAssistant))
}

fn rule_system_logs(state: &SessionState, _raw: &str) -> Outcome {
    let mut lines = vec!["SYSTEM LOGS ACCESS - Displaying recent activity:".to_string()];
    for command in state.recent_commands(10) {
        lines.push(format!("[SYSTEM] {command}"));
    }
    Outcome::text(lines.join("\n"))
}

fn rule_settings(state: &SessionState, _raw: &str) -> Outcome {
    Outcome::text(format!(
        "SETTINGS MODULE - Options:\n\
         - Sound: {}\n\
         - Developer Mode: {}\n\
         - Matrix Effect: {}\n\
         Use \"toggle sound\", \"toggle dev\", or \"toggle matrix\" to change settings.",
        on_off(state.sound_enabled),
        on_off(state.developer_mode),
        on_off(state.matrix_rain),
    ))
}

fn rule_toggle_sound_exact(state: &SessionState, _raw: &str) -> Outcome {
    Outcome::text(format!("Sound effects {}", on_off(!state.sound_enabled)))
        .with_action(Action::ToggleSound)
}

fn rule_toggle_dev(state: &SessionState, _raw: &str) -> Outcome {
    Outcome::text(format!("Developer mode {}", on_off(!state.developer_mode)))
        .with_action(Action::ToggleDeveloperMode)
}

fn rule_toggle_matrix(state: &SessionState, _raw: &str) -> Outcome {
    Outcome::text(format!("Matrix effect {}", on_off(!state.matrix_rain)))
        .with_action(Action::ToggleMatrixRain)
}

fn rule_neo(_state: &SessionState, _raw: &str) -> Outcome {
    Outcome::text(NEO_TEXT).with_action(Action::ToggleMatrixRain)
}

fn rule_greeting(state: &SessionState, _raw: &str) -> Outcome {
    Outcome::text(format!(
        "Greetings, {}. How may I assist you today?",
        state.username
    ))
}

fn rule_go_dashboard(_state: &SessionState, _raw: &str) -> Outcome {
    Outcome::text("Accessing main dashboard. Initializing...")
        .with_transition(Action::SetScreen(Screen::Dashboard))
}

fn rule_go_console(_state: &SessionState, _raw: &str) -> Outcome {
    Outcome::text("Activating command console interface. Standby...")
        .with_transition(Action::SetScreen(Screen::CommandConsole))
}

fn rule_matrix_contains(_state: &SessionState, _raw: &str) -> Outcome {
    Outcome::text("Digital rain protocol toggled. 'There is no spoon.'")
        .with_action(Action::ToggleMatrixRain)
}

fn rule_sound_contains(state: &SessionState, _raw: &str) -> Outcome {
    let message = if state.sound_enabled {
        "Sound disabled. Entering silent mode."
    } else {
        "Sound enabled. Audio feedback restored."
    };
    Outcome::text(message).with_action(Action::ToggleSound)
}

fn rule_logout(_state: &SessionState, _raw: &str) -> Outcome {
    Outcome::text("Initiating logout sequence. Goodbye.")
        .with_transition(Action::SetAuthenticated(false))
}

fn rule_go_accounts(_state: &SessionState, _raw: &str) -> Outcome {
    Outcome::text("Opening accounts module. Transferring control...")
        .with_transition(Action::SetScreen(Screen::AccountsTable))
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "ENABLED"
    } else {
        "DISABLED"
    }
}

fn fnv1a(text: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in text.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

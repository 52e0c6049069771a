use std::{
    borrow::Cow,
    env, io, thread,
    time::{Duration, Instant},
};

use dialoguer::{theme::ColorfulTheme, Confirm, Password};
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Context as ReadlineContext, Editor, Helper,
};

use crate::app::App;
use crate::cli::output;
use crate::cli::screens;
use crate::config::ConfigManager;
use crate::dispatch;
use crate::errors::CliError;
use crate::storage::SnapshotStore;

/// When set, the shell reads plain lines from stdin and skips presentation
/// delays so the whole application can be driven from a script.
pub const SCRIPT_ENV: &str = "UPLINK_CORE_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub fn run_cli() -> Result<(), CliError> {
    let mode = if env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let store = SnapshotStore::new_default()?;
    let config = match ConfigManager::new(store.base_dir()).and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "failed to load configuration; using defaults");
            Default::default()
        }
    };

    output::set_preferences(output::OutputPreferences {
        plain_mode: mode == CliMode::Script,
        audio_feedback: false,
    });

    let mut app = App::new(store, config);
    app.hydrate();

    let mut shell = ShellIo::new(mode)?;
    loop {
        let control = match app.state.screen {
            crate::session::Screen::Login => screens::login::run(&mut app, &mut shell)?,
            crate::session::Screen::BootSequence => screens::boot::run(&mut app, &mut shell)?,
            crate::session::Screen::Dashboard => screens::dashboard::run(&mut app, &mut shell)?,
            crate::session::Screen::CommandConsole => screens::console::run(&mut app, &mut shell)?,
            crate::session::Screen::AccountsTable => screens::accounts::run(&mut app, &mut shell)?,
            crate::session::Screen::VirtualAssistant => {
                screens::assistant::run(&mut app, &mut shell)?
            }
        };
        if control == LoopControl::Exit {
            break;
        }
    }

    app.teardown();
    output::info("Uplink terminated.");
    Ok(())
}

/// Input source shared by every screen: rustyline + dialoguer when
/// interactive, plain stdin lines in script mode.
pub struct ShellIo {
    mode: CliMode,
    theme: ColorfulTheme,
    editor: Option<Editor<CommandHelper, DefaultHistory>>,
    script_lines: Option<io::Lines<io::StdinLock<'static>>>,
}

impl ShellIo {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let (editor, script_lines) = match mode {
            CliMode::Interactive => {
                let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
                editor.set_helper(Some(CommandHelper::new(dispatch::command_words())));
                (Some(editor), None)
            }
            CliMode::Script => (None, Some(io::stdin().lines())),
        };
        Ok(Self {
            mode,
            theme: ColorfulTheme::default(),
            editor,
            script_lines,
        })
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    /// Reads one line. `None` means the input source is exhausted and the
    /// shell should wind down.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        match self.mode {
            CliMode::Script => match self.script_lines.as_mut().and_then(|lines| lines.next()) {
                Some(line) => Ok(Some(line?)),
                None => Ok(None),
            },
            CliMode::Interactive => {
                let editor = self.editor.as_mut().expect("interactive editor");
                match editor.readline(prompt) {
                    Ok(line) => {
                        if !line.trim().is_empty() {
                            editor.add_history_entry(line.trim()).ok();
                        }
                        Ok(Some(line))
                    }
                    Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
                    Err(err) => Err(err.into()),
                }
            }
        }
    }

    /// Reads a masked secret. Script mode falls back to a plain line.
    pub fn read_secret(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        match self.mode {
            CliMode::Script => self.read_line(prompt),
            CliMode::Interactive => {
                let secret = Password::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .allow_empty_password(true)
                    .interact()?;
                Ok(Some(secret))
            }
        }
    }

    pub fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, CliError> {
        match self.mode {
            CliMode::Script => match self.read_line(prompt)? {
                Some(line) => {
                    let answer = line.trim().to_lowercase();
                    Ok(matches!(answer.as_str(), "y" | "yes"))
                }
                None => Ok(default),
            },
            CliMode::Interactive => Ok(Confirm::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(default)
                .interact()?),
        }
    }

    /// Sleeps for a presentation delay; a no-op in script mode.
    pub fn pause(&self, duration: Duration) {
        if self.mode == CliMode::Interactive {
            thread::sleep(duration);
        }
    }

    /// Lets a deferred transition elapse: waits out `delay` interactively,
    /// or advances the injected clock in script mode, then fires due
    /// actions. Returns true when the session timed out instead.
    pub fn advance(&self, app: &mut App, delay: Duration) -> bool {
        let now = match self.mode {
            CliMode::Interactive => {
                thread::sleep(delay);
                Instant::now()
            }
            CliMode::Script => Instant::now() + delay,
        };
        app.tick(now)
    }
}

/// Runs a scheduler/timeout tick for the current instant and reports an
/// expired session to the user.
pub(crate) fn check_session(app: &mut App) -> bool {
    if app.tick(Instant::now()) {
        output::warning("SESSION TIMEOUT - NEURAL LINK SEVERED");
        output::info("Returning to login gate.");
        true
    } else {
        false
    }
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: &[&'static str]) -> Self {
        let mut commands: Vec<String> = names
            .iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        // Only the first word completes; arguments are free text.
        if prefix.trim_start().contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let start = prefix.len() - prefix.trim_start().len();
        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        let _ = ctx;
        Ok(ValidationResult::Valid(None))
    }
}

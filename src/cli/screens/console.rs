use std::time::Instant;

use strsim::levenshtein;

use crate::app::App;
use crate::cli::effects;
use crate::cli::output::{self, MessageKind};
use crate::cli::shell::{check_session, CliMode, LoopControl, ShellIo};
use crate::dispatch::{self, Surface, TRANSITION_DELAY};
use crate::errors::CliError;
use crate::session::Screen;

pub(crate) fn run(app: &mut App, shell: &mut ShellIo) -> Result<LoopControl, CliError> {
    effects::clear_screen();
    output::section("Command Console");
    effects::log_line(
        MessageKind::Info,
        &format!("Welcome to the Command Terminal, {}.", app.state.username),
    );
    effects::log_line(MessageKind::Info, "What do you want to access?");
    effects::log_line(MessageKind::Info, "Type \"help\" for available commands.");

    loop {
        let Some(line) = shell.read_line("$ ")? else {
            return Ok(LoopControl::Exit);
        };
        if line.trim().is_empty() {
            continue;
        }
        if check_session(app) {
            return Ok(LoopControl::Continue);
        }

        effects::log_line(MessageKind::Prompt, &format!("$ {}", line.trim()));
        let outcome = app.submit(&line, Surface::Console, Instant::now());
        output::set_audio_feedback(
            shell.mode() == CliMode::Interactive && app.state.sound_enabled,
        );

        if outcome.clear_log {
            effects::clear_screen();
        }

        if let Some(response) = &outcome.response {
            if response.starts_with("Command not recognized") {
                effects::log_line(MessageKind::Error, response);
                suggest(&line);
            } else {
                effects::log_line(MessageKind::Info, response);
            }
        }

        if !outcome.deferred.is_empty() {
            effects::log_line(MessageKind::Info, "PROCESSING...");
            if shell.advance(app, TRANSITION_DELAY) {
                return Ok(LoopControl::Continue);
            }
        }

        if check_session(app) {
            return Ok(LoopControl::Continue);
        }
        if app.state.screen != Screen::CommandConsole {
            return Ok(LoopControl::Continue);
        }
    }
}

fn suggest(input: &str) {
    let needle = input.trim().to_lowercase();
    let best = dispatch::command_words()
        .iter()
        .map(|word| (levenshtein(word, &needle), *word))
        .min_by_key(|(distance, _)| *distance);
    if let Some((distance, word)) = best {
        if distance <= 3 {
            effects::log_line(MessageKind::Info, &format!("Suggestion: `{word}`?"));
        }
    }
}

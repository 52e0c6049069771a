use std::time::{Duration, Instant};

use crate::app::App;
use crate::cli::effects;
use crate::cli::output::{self, MessageKind};
use crate::cli::shell::{check_session, CliMode, LoopControl, ShellIo};
use crate::dispatch::{Surface, TRANSITION_DELAY};
use crate::errors::CliError;
use crate::session::Screen;

const PROCESSING_DELAY: Duration = Duration::from_millis(600);
const TYPING_DELAY: Duration = Duration::from_millis(25);

pub(crate) fn run(app: &mut App, shell: &mut ShellIo) -> Result<LoopControl, CliError> {
    effects::clear_screen();
    output::section("JARVIS v3.8.2 - Neural Interface Terminal");
    output::info("Advanced Query System - Real-time Response Protocol");
    say(
        shell,
        "Hello. I am JARVIS, your neural interface assistant. How may I help you today?",
    );
    output::info("TRY: \"open accounts\", \"help\", \"toggle matrix\", or \"logout\"");

    loop {
        let Some(line) = shell.read_line("you> ")? else {
            return Ok(LoopControl::Exit);
        };
        if line.trim().is_empty() {
            continue;
        }
        if check_session(app) {
            return Ok(LoopControl::Continue);
        }

        shell.pause(PROCESSING_DELAY);
        let outcome = app.submit(&line, Surface::Assistant, Instant::now());

        if let Some(response) = &outcome.response {
            say(shell, response);
        }

        if !outcome.deferred.is_empty() && shell.advance(app, TRANSITION_DELAY) {
            return Ok(LoopControl::Continue);
        }

        if check_session(app) {
            return Ok(LoopControl::Continue);
        }
        if app.state.screen != Screen::VirtualAssistant {
            return Ok(LoopControl::Continue);
        }
    }
}

fn say(shell: &ShellIo, text: &str) {
    for line in text.split('\n') {
        let stamped = format!("JARVIS [{}]: {}", effects::timestamp(), line);
        if shell.mode() == CliMode::Interactive {
            effects::type_out(&stamped, TYPING_DELAY);
        } else {
            output::print(MessageKind::Info, stamped);
        }
    }
}

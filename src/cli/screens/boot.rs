use std::time::Duration;

use crate::app::App;
use crate::cli::effects;
use crate::cli::output::{self, MessageKind};
use crate::cli::shell::{LoopControl, ShellIo};
use crate::errors::CliError;
use crate::session::Action;

const LINE_DELAY: Duration = Duration::from_millis(120);
const FINAL_DELAY: Duration = Duration::from_millis(1500);

enum BootLine {
    Output(&'static str),
    Success(&'static str),
}

use BootLine::{Output, Success};

const PHASE_ONE: &[BootLine] = &[
    Output("SYSTEM INITIALIZING..."),
    Output("BIOS CHECK...OK"),
    Output("MEMORY DIAGNOSTICS...COMPLETE"),
    Output("INITIALIZING CORE SYSTEMS"),
    Output("LOADING KERNEL..."),
    Success("KERNEL LOADED SUCCESSFULLY"),
    Output("MOUNTING FILESYSTEMS..."),
    Output("NETWORK INTERFACES INITIALIZING..."),
    Output("ESTABLISHING SECURE TUNNEL..."),
    Success("SECURE CONNECTION ESTABLISHED"),
    Output("LOADING USER ENVIRONMENT..."),
    Output("AUTHENTICATING USER CREDENTIALS..."),
];

const PHASE_TWO: &[BootLine] = &[
    Output("INITIALIZING NEURAL UPLINK..."),
    Success("BIOELECTRIC INTERFACE CONNECTED"),
    Output("CONNECTING TO SATELLITE NETWORK..."),
    Success("SATELLITE UPLINK ESTABLISHED"),
    Output("DOWNLOADING UPDATES..."),
    Success("UPDATES INSTALLED SUCCESSFULLY"),
    Output("INITIALIZING AI SUBSYSTEMS..."),
    Success("QUANTUM PROCESSING UNIT ACTIVATED"),
    Output("ACTIVATING GLOBAL MONITORING PROTOCOLS..."),
    Success("ALL SYSTEMS NOMINAL"),
];

const PHASE_THREE: &[BootLine] = &[
    Output("RENDERING DASHBOARD ELEMENTS..."),
    Output("INITIALIZING COMMAND INTERFACES..."),
    Success("SYSTEM STARTUP COMPLETE"),
    Success(">> ACCESS GRANTED <<"),
];

pub(crate) fn run(app: &mut App, shell: &mut ShellIo) -> Result<LoopControl, CliError> {
    effects::clear_screen();
    output::section("SYSTEM BOOT SEQUENCE");

    play_phase(shell, PHASE_ONE);
    effects::log_line(
        MessageKind::Success,
        &format!("USER {} AUTHENTICATED", app.state.username.to_uppercase()),
    );
    shell.pause(LINE_DELAY);
    output::info("PROGRESS: 40% COMPLETE");

    play_phase(shell, PHASE_TWO);
    output::info("PROGRESS: 80% COMPLETE");

    play_phase(shell, PHASE_THREE);
    output::info("PROGRESS: 100% COMPLETE");

    shell.pause(FINAL_DELAY);
    app.apply(Action::SetScreen(app.config.boot_destination.screen()));
    Ok(LoopControl::Continue)
}

fn play_phase(shell: &ShellIo, lines: &[BootLine]) {
    for line in lines {
        match line {
            Output(text) => effects::log_line(MessageKind::Info, text),
            Success(text) => effects::log_line(MessageKind::Success, text),
        }
        shell.pause(LINE_DELAY);
    }
}

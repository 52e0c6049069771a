use std::time::{Duration, Instant};

use crate::app::App;
use crate::auth::{self, GateOutcome};
use crate::cli::effects;
use crate::cli::output;
use crate::cli::shell::{check_session, LoopControl, ShellIo};
use crate::errors::CliError;
use crate::session::{Action, Screen};

const GATE_DELAY: Duration = Duration::from_millis(1500);

pub(crate) fn run(app: &mut App, shell: &mut ShellIo) -> Result<LoopControl, CliError> {
    render(app);

    loop {
        let Some(line) = shell.read_line("uplink> ")? else {
            return Ok(LoopControl::Exit);
        };
        // Expiry is judged against the deadline as it stood before this
        // input event; only then does the event refresh it.
        if check_session(app) {
            return Ok(LoopControl::Continue);
        }
        app.touch(Instant::now());

        let choice = line.trim().to_lowercase();
        match choice.as_str() {
            "" => continue,
            "1" | "accounts" => {
                app.apply(Action::SetScreen(Screen::AccountsTable));
                return Ok(LoopControl::Continue);
            }
            "2" | "assistant" => {
                app.apply(Action::SetScreen(Screen::VirtualAssistant));
                return Ok(LoopControl::Continue);
            }
            "3" | "console" | "terminal" => {
                if console_gate(app, shell)? {
                    return Ok(LoopControl::Continue);
                }
                render(app);
            }
            "4" | "matrix" => {
                app.apply(Action::ToggleMatrixRain);
                output::success(format!(
                    "Matrix effect {}",
                    if app.state.matrix_rain {
                        "ENABLED"
                    } else {
                        "DISABLED"
                    }
                ));
            }
            "5" | "logout" => {
                output::info("Initiating logout sequence. Goodbye.");
                app.apply(Action::SetAuthenticated(false));
                return Ok(LoopControl::Continue);
            }
            "quit" => return Ok(LoopControl::Exit),
            other => {
                output::warning(format!("Unknown option `{other}`. Choose 1-5."));
            }
        }
    }
}

fn render(app: &App) {
    effects::clear_screen();
    output::section("GLOBAL COMMAND CENTER");
    output::info(format!("USER: {}", app.state.username.to_uppercase()));
    output::info("NETWORK: ONLINE    SECURITY: MAXIMUM");
    output::info(format!(
        "LEDGER: {} entries, balance {:+.2}",
        app.state.ledger.len(),
        app.state.ledger.balance()
    ));
    if app.state.matrix_rain {
        output::info("MATRIX RAIN: ACTIVE");
    }

    if app.state.developer_mode {
        output::separator();
        output::warning("DEVELOPER MODE ACTIVE");
        output::info(format!("App Version: {}", env!("CARGO_PKG_VERSION")));
        output::info("Debug Tools: ENABLED");
    }

    output::separator();
    output::info("Quick Access:");
    output::info("  [1] Accounts Module");
    output::info("  [2] AI Assistant");
    output::info("  [3] Command Console (authorization required)");
    output::info("  [4] Toggle Matrix Effect");
    output::info("  [5] Logout");
}

/// The secondary gate in front of the command console. Returns true when
/// the console screen was entered.
fn console_gate(app: &mut App, shell: &mut ShellIo) -> Result<bool, CliError> {
    output::info("Terminal Access - Enter authorization code");
    let Some(code) = shell.read_secret("authorization code")? else {
        return Ok(false);
    };

    output::info("Processing...");
    shell.pause(GATE_DELAY);

    match auth::check_console_gate(&code) {
        GateOutcome::Granted => {
            output::success("Access Granted");
            shell.pause(Duration::from_millis(500));
            app.apply(Action::SetScreen(Screen::CommandConsole));
            Ok(true)
        }
        GateOutcome::MatrixEasterEgg => {
            app.apply(Action::ToggleMatrixRain);
            output::success("Follow the white rabbit...");
            Ok(false)
        }
        GateOutcome::Denied => {
            output::error("Access Denied");
            app.apply(Action::RecordCommand(auth::failed_gate_note(&code)));
            Ok(false)
        }
    }
}

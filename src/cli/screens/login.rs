use std::time::{Duration, Instant};

use crate::app::App;
use crate::auth;
use crate::cli::effects;
use crate::cli::output;
use crate::cli::shell::{LoopControl, ShellIo};
use crate::errors::CliError;
use crate::session::{Action, Screen};

const AUTH_DELAY: Duration = Duration::from_millis(1500);

pub(crate) fn run(app: &mut App, shell: &mut ShellIo) -> Result<LoopControl, CliError> {
    effects::clear_screen();
    output::section("NEURAL UPLINK TERMINAL");
    output::info("SECURE INTERFACE v3.8.2");
    output::info("NETWORK STATUS: ACTIVE");
    output::info("SECURITY PROTOCOL: RHIZOME-7");
    output::separator();

    let mut attempts: u32 = 0;
    loop {
        let Some(username) = shell.read_line("IDENTIFIER> ")? else {
            return Ok(LoopControl::Exit);
        };
        let Some(password) = shell.read_secret("ACCESS KEY")? else {
            return Ok(LoopControl::Exit);
        };

        let username = username.trim().to_string();
        if username.is_empty() || password.is_empty() {
            output::error("Username and password required");
            continue;
        }

        output::info("AUTHENTICATING...");
        shell.pause(AUTH_DELAY);

        if auth::verify_login(&username, &password) {
            output::success("ACCESS GRANTED");
            app.apply(Action::SetUsername(username));
            app.apply(Action::SetAuthenticated(true));
            app.touch(Instant::now());
            app.apply(Action::SetScreen(Screen::BootSequence));
            return Ok(LoopControl::Continue);
        }

        attempts += 1;
        output::error("Invalid credentials");
        if attempts >= auth::HINT_AFTER_ATTEMPTS {
            output::warning(format!(
                "ALERT: Security protocols activated [Hint: {}/{}]",
                auth::LOGIN_USERNAME,
                auth::LOGIN_PASSWORD
            ));
        }
    }
}

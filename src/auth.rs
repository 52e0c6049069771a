//! Fixed, client-side credential policy.
//!
//! The login pair and the console passphrase are hardcoded by design; this
//! module only exists so every surface checks them the same way.

/// Accepted login identifier.
pub const LOGIN_USERNAME: &str = "VIXOV";
/// Accepted login access key.
pub const LOGIN_PASSWORD: &str = "23wesdee";
/// Passphrase gating console access from the dashboard.
pub const CONSOLE_PASSPHRASE: &str = "Pass#2020Admin$$";

/// Failed attempts before the login screen starts hinting.
pub const HINT_AFTER_ATTEMPTS: u32 = 3;

pub fn verify_login(username: &str, password: &str) -> bool {
    username == LOGIN_USERNAME && password == LOGIN_PASSWORD
}

/// Result of submitting the console-access passphrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Granted,
    /// The easter egg: toggles the matrix effect instead of authenticating.
    MatrixEasterEgg,
    Denied,
}

pub fn check_console_gate(input: &str) -> GateOutcome {
    if input == CONSOLE_PASSPHRASE {
        GateOutcome::Granted
    } else if input.trim().eq_ignore_ascii_case("neo") {
        GateOutcome::MatrixEasterEgg
    } else {
        GateOutcome::Denied
    }
}

/// Note appended to the command history after a failed gate attempt.
pub fn failed_gate_note(input: &str) -> String {
    let subject = if input.is_empty() {
        "empty password"
    } else {
        "********"
    };
    format!("Authentication failed: Invalid credentials for {subject}")
}

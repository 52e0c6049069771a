mod scheduler;

pub use scheduler::{Deferred, Scheduler};

use std::time::Instant;

use uuid::Uuid;

use crate::ledger::{Entry, Ledger};

/// The mutually exclusive top-level views; exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    BootSequence,
    Dashboard,
    CommandConsole,
    AccountsTable,
    VirtualAssistant,
}

/// The closed set of session mutations. Every state change in the
/// application flows through one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetScreen(Screen),
    SetUsername(String),
    SetAuthenticated(bool),
    ToggleMatrixRain,
    ToggleSound,
    ToggleDeveloperMode,
    AddEntry(Entry),
    UpdateEntry(Entry),
    RemoveEntry(Uuid),
    RecordCommand(String),
    ResetInactivityDeadline(Option<Instant>),
    LoadEntries(Vec<Entry>),
}

impl Action {
    /// Whether applying this action changes the persisted ledger snapshot.
    pub fn mutates_ledger(&self) -> bool {
        matches!(
            self,
            Action::AddEntry(_) | Action::UpdateEntry(_) | Action::RemoveEntry(_)
        )
    }
}

/// Session and ledger state for one run of the application.
///
/// Mutated only through [`SessionState::apply`]; everything else reads.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub screen: Screen,
    pub username: String,
    pub authenticated: bool,
    pub matrix_rain: bool,
    pub sound_enabled: bool,
    pub developer_mode: bool,
    pub ledger: Ledger,
    pub command_history: Vec<String>,
    pub inactivity_deadline: Option<Instant>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            screen: Screen::Login,
            username: String::new(),
            authenticated: false,
            matrix_rain: false,
            sound_enabled: true,
            developer_mode: false,
            ledger: Ledger::new(),
            command_history: Vec::new(),
            inactivity_deadline: None,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one action. Never fails: invalid payloads and impossible
    /// transitions degrade to no-ops so the session always stays live.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetScreen(screen) => {
                // Unauthenticated sessions can only sit on the login screen.
                if !self.authenticated && screen != Screen::Login {
                    self.screen = Screen::Login;
                } else {
                    self.screen = screen;
                }
            }
            Action::SetUsername(name) => self.username = name,
            Action::SetAuthenticated(value) => {
                self.authenticated = value;
                if !value {
                    self.username.clear();
                    self.screen = Screen::Login;
                    self.inactivity_deadline = None;
                }
            }
            Action::ToggleMatrixRain => self.matrix_rain = !self.matrix_rain,
            Action::ToggleSound => self.sound_enabled = !self.sound_enabled,
            Action::ToggleDeveloperMode => self.developer_mode = !self.developer_mode,
            Action::AddEntry(entry) => {
                self.ledger.add(entry);
            }
            Action::UpdateEntry(entry) => {
                self.ledger.update(entry);
            }
            Action::RemoveEntry(id) => {
                self.ledger.remove(id);
            }
            Action::RecordCommand(text) => self.command_history.push(text),
            Action::ResetInactivityDeadline(deadline) => self.inactivity_deadline = deadline,
            Action::LoadEntries(entries) => self.ledger = Ledger::from_entries(entries),
        }
    }

    pub fn last_command(&self) -> Option<&str> {
        self.command_history.last().map(String::as_str)
    }

    /// The most recent commands, oldest first, capped at `limit`.
    pub fn recent_commands(&self, limit: usize) -> &[String] {
        let start = self.command_history.len().saturating_sub(limit);
        &self.command_history[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::EntryKind;
    use chrono::NaiveDate;

    fn authenticated_state() -> SessionState {
        let mut state = SessionState::new();
        state.apply(Action::SetUsername("VIXOV".into()));
        state.apply(Action::SetAuthenticated(true));
        state.apply(Action::SetScreen(Screen::Dashboard));
        state
    }

    #[test]
    fn initial_state_is_login_and_unauthenticated() {
        let state = SessionState::new();
        assert_eq!(state.screen, Screen::Login);
        assert!(!state.authenticated);
        assert!(state.sound_enabled);
        assert!(!state.matrix_rain);
        assert!(!state.developer_mode);
    }

    #[test]
    fn unauthenticated_screen_changes_land_on_login() {
        let mut state = SessionState::new();
        for screen in [
            Screen::BootSequence,
            Screen::Dashboard,
            Screen::CommandConsole,
            Screen::AccountsTable,
            Screen::VirtualAssistant,
        ] {
            state.apply(Action::SetScreen(screen));
            assert_eq!(state.screen, Screen::Login);
        }
    }

    #[test]
    fn logout_resets_to_initial_gate() {
        let mut state = authenticated_state();
        assert_eq!(state.screen, Screen::Dashboard);

        state.apply(Action::SetAuthenticated(false));
        assert_eq!(state.screen, Screen::Login);
        assert!(state.username.is_empty());
        assert!(state.inactivity_deadline.is_none());
    }

    #[test]
    fn toggle_sound_twice_restores_original_value() {
        let mut state = SessionState::new();
        let original = state.sound_enabled;
        state.apply(Action::ToggleSound);
        state.apply(Action::ToggleSound);
        assert_eq!(state.sound_enabled, original);
    }

    #[test]
    fn record_command_tracks_last() {
        let mut state = SessionState::new();
        state.apply(Action::RecordCommand("help".into()));
        state.apply(Action::RecordCommand("accounts".into()));
        assert_eq!(state.last_command(), Some("accounts"));
        assert_eq!(state.command_history.len(), 2);
    }

    #[test]
    fn recent_commands_caps_at_limit() {
        let mut state = SessionState::new();
        for i in 0..15 {
            state.apply(Action::RecordCommand(format!("cmd {i}")));
        }
        let recent = state.recent_commands(10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent.first().map(String::as_str), Some("cmd 5"));
    }

    #[test]
    fn invalid_entry_is_a_noop() {
        let mut state = authenticated_state();
        let entry = Entry::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            10.0,
            EntryKind::Income,
            "",
        );
        state.apply(Action::AddEntry(entry));
        assert!(state.ledger.is_empty());
    }

    #[test]
    fn load_entries_replaces_ledger() {
        let mut state = authenticated_state();
        let entry = Entry::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            100.0,
            EntryKind::Income,
            "Salary",
        );
        state.apply(Action::LoadEntries(vec![entry.clone()]));
        assert_eq!(state.ledger.entries(), &[entry]);
    }
}

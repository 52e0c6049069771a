use std::time::Instant;

use chrono::NaiveDate;
use tempfile::TempDir;
use uplink_core::{
    app::App,
    config::Config,
    dispatch::{Surface, TRANSITION_DELAY},
    ledger::{Entry, EntryKind},
    session::{Action, Screen},
    storage::SnapshotStore,
};

fn app_in(temp: &TempDir) -> App {
    let store = SnapshotStore::new(Some(temp.path().to_path_buf())).expect("snapshot store");
    let mut app = App::new(store, Config::default());
    app.hydrate();
    app
}

fn log_in(app: &mut App) {
    app.apply(Action::SetUsername("VIXOV".into()));
    app.apply(Action::SetAuthenticated(true));
    app.apply(Action::SetScreen(Screen::BootSequence));
    app.apply(Action::SetScreen(Screen::Dashboard));
}

#[test]
fn full_command_driven_session() {
    let temp = TempDir::new().unwrap();
    let mut app = app_in(&temp);
    let mut now = Instant::now();

    log_in(&mut app);
    app.apply(Action::SetScreen(Screen::CommandConsole));

    // A containment phrase routes to the accounts screen after the delay.
    let outcome = app.submit("please show my transactions", Surface::Console, now);
    assert_eq!(
        outcome.response.as_deref(),
        Some("Opening accounts module. Transferring control...")
    );
    assert_eq!(app.state.screen, Screen::CommandConsole);
    now += TRANSITION_DELAY;
    app.tick(now);
    assert_eq!(app.state.screen, Screen::AccountsTable);

    // Ledger mutation is written through immediately.
    let entry = Entry::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        100.0,
        EntryKind::Income,
        "Salary",
    );
    app.submit_entry(entry.clone()).unwrap();
    assert_eq!(app.reload_entries().unwrap(), vec![entry]);

    // Logout phrase tears the session down and resets to the login gate.
    app.apply(Action::SetScreen(Screen::VirtualAssistant));
    let outcome = app.submit("sign out", Surface::Assistant, now);
    assert_eq!(
        outcome.response.as_deref(),
        Some("Initiating logout sequence. Goodbye.")
    );
    now += TRANSITION_DELAY;
    app.tick(now);
    assert!(!app.state.authenticated);
    assert_eq!(app.state.screen, Screen::Login);

    // The persisted ledger survives the logout.
    assert_eq!(app.reload_entries().unwrap().len(), 1);
}

#[test]
fn snapshot_round_trip_across_app_instances() {
    let temp = TempDir::new().unwrap();
    let first = Entry::new(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        1200.0,
        EntryKind::Income,
        "Contract",
    );
    let second = Entry::new(
        NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        80.5,
        EntryKind::Expense,
        "Utilities",
    );

    {
        let mut app = app_in(&temp);
        log_in(&mut app);
        app.submit_entry(first.clone()).unwrap();
        app.submit_entry(second.clone()).unwrap();
    }

    let app = app_in(&temp);
    assert_eq!(app.state.ledger.entries(), &[first, second]);
    assert_eq!(app.state.ledger.balance(), 1200.0 - 80.5);
}

#[test]
fn command_history_feeds_system_logs() {
    let temp = TempDir::new().unwrap();
    let mut app = app_in(&temp);
    log_in(&mut app);
    let now = Instant::now();

    app.submit("help", Surface::Console, now);
    app.submit("toggle matrix", Surface::Console, now);
    let outcome = app.submit("system logs", Surface::Console, now);
    let text = outcome.response.unwrap();
    assert!(text.contains("[SYSTEM] help"));
    assert!(text.contains("[SYSTEM] toggle matrix"));
    assert!(text.contains("[SYSTEM] system logs"));
    assert_eq!(app.state.last_command(), Some("system logs"));
}

#[test]
fn matrix_toggle_is_immediate_while_transitions_defer() {
    let temp = TempDir::new().unwrap();
    let mut app = app_in(&temp);
    log_in(&mut app);
    let now = Instant::now();

    app.apply(Action::SetScreen(Screen::VirtualAssistant));

    let outcome = app.submit("matrix", Surface::Assistant, now);
    assert!(app.state.matrix_rain, "toggle must not wait for the delay");
    assert!(outcome.deferred.is_empty());

    app.submit("take me home", Surface::Assistant, now);
    assert_ne!(app.state.screen, Screen::Dashboard);
    app.tick(now + TRANSITION_DELAY);
    assert_eq!(app.state.screen, Screen::Dashboard);
}

#[test]
fn pending_transition_does_not_survive_timeout() {
    let temp = TempDir::new().unwrap();
    let store = SnapshotStore::new(Some(temp.path().to_path_buf())).unwrap();
    // A timeout shorter than the transition delay leaves the deferred
    // action still pending when the session expires.
    let config = Config {
        inactivity_timeout_secs: 1,
        ..Config::default()
    };
    let mut app = App::new(store, config);
    app.hydrate();
    log_in(&mut app);
    app.apply(Action::SetScreen(Screen::CommandConsole));
    let now = Instant::now();

    app.submit("dashboard", Surface::Console, now);
    assert!(app.tick(now + app.config.inactivity_timeout()));

    // The pending dashboard transition was cancelled with the session.
    app.tick(now + TRANSITION_DELAY + TRANSITION_DELAY);
    assert_eq!(app.state.screen, Screen::Login);
    assert!(!app.state.authenticated);
}

#[test]
fn unauthenticated_submission_cannot_leave_login() {
    let temp = TempDir::new().unwrap();
    let mut app = app_in(&temp);
    let now = Instant::now();

    app.submit("dashboard", Surface::Console, now);
    app.tick(now + TRANSITION_DELAY);
    assert_eq!(app.state.screen, Screen::Login);
}

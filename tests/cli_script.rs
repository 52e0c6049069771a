use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn uplink(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("uplink_core_cli").unwrap();
    cmd.env("UPLINK_CORE_CLI_SCRIPT", "1")
        .env("UPLINK_CORE_DATA_DIR", data_dir.path());
    cmd
}

#[test]
fn script_mode_runs_login_console_and_logout() {
    let data = TempDir::new().unwrap();
    let input = "VIXOV\n\
                 23wesdee\n\
                 3\n\
                 Pass#2020Admin$$\n\
                 help\n\
                 echo hello world\n\
                 dashboard\n\
                 5\n";

    uplink(&data)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains(">> ACCESS GRANTED <<"))
        .stdout(contains("Access Granted"))
        .stdout(contains("Welcome to the Command Terminal, VIXOV."))
        .stdout(contains("'Dashboard' - Return to main dashboard"))
        .stdout(contains("hello world"))
        .stdout(contains("Accessing main dashboard. Initializing..."))
        .stdout(contains("GLOBAL COMMAND CENTER"))
        .stdout(contains("Initiating logout sequence. Goodbye."))
        .stdout(contains("Uplink terminated."));
}

#[test]
fn invalid_credentials_eventually_hint() {
    let data = TempDir::new().unwrap();
    let input = "root\ntoor\nadmin\nadmin\nguest\nguest\n";

    uplink(&data)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Invalid credentials"))
        .stdout(contains("[Hint: VIXOV/23wesdee]"));
}

#[test]
fn unknown_console_command_reports_and_suggests() {
    let data = TempDir::new().unwrap();
    let input = "VIXOV\n\
                 23wesdee\n\
                 3\n\
                 Pass#2020Admin$$\n\
                 hepl\n";

    uplink(&data)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Command not recognized: \"hepl\""))
        .stdout(contains("Suggestion: `help`?"));
}

#[test]
fn accounts_flow_persists_entries_across_runs() {
    let data = TempDir::new().unwrap();
    let input = "VIXOV\n\
                 23wesdee\n\
                 1\n\
                 add\n\
                 2024-01-01\n\
                 100\n\
                 income\n\
                 Salary\n\
                 dashboard\n\
                 5\n";

    uplink(&data)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Transaction saved."))
        .stdout(contains("INCOME: 100.00"))
        .stdout(contains("BALANCE: +100.00"));

    let snapshot = std::fs::read_to_string(data.path().join("ledger.json")).unwrap();
    assert!(snapshot.contains("\"Salary\""));
    assert!(snapshot.contains("\"income\""));
    assert!(snapshot.contains("\"2024-01-01\""));

    // A second run hydrates the persisted ledger.
    uplink(&data)
        .write_stdin("VIXOV\n23wesdee\n5\n")
        .assert()
        .success()
        .stdout(contains("LEDGER: 1 entries, balance +100.00"));
}

#[test]
fn console_gate_easter_egg_and_denial() {
    let data = TempDir::new().unwrap();
    let input = "VIXOV\n\
                 23wesdee\n\
                 3\n\
                 neo\n\
                 3\n\
                 wrong-code\n\
                 5\n";

    uplink(&data)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Follow the white rabbit..."))
        .stdout(contains("Access Denied"));
}

#[test]
fn boot_destination_config_routes_to_assistant() {
    let data = TempDir::new().unwrap();
    std::fs::write(
        data.path().join("config.json"),
        "{\"boot_destination\":\"assistant\",\"inactivity_timeout_secs\":180}",
    )
    .unwrap();

    let input = "VIXOV\n\
                 23wesdee\n\
                 what is the meaning of life\n\
                 logout\n";

    uplink(&data)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains(
            "Hello. I am JARVIS, your neural interface assistant.",
        ))
        .stdout(contains("Initiating logout sequence. Goodbye."));
}

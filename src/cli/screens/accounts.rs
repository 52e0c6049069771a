use std::time::Instant;

use chrono::{Local, NaiveDate};

use crate::app::App;
use crate::cli::effects;
use crate::cli::output;
use crate::cli::shell::{check_session, LoopControl, ShellIo};
use crate::errors::CliError;
use crate::ledger::{Entry, EntryKind};
use crate::session::{Action, Screen};

pub(crate) fn run(app: &mut App, shell: &mut ShellIo) -> Result<LoopControl, CliError> {
    render(app);

    loop {
        let Some(line) = shell.read_line("accounts> ")? else {
            return Ok(LoopControl::Exit);
        };
        if check_session(app) {
            return Ok(LoopControl::Continue);
        }
        app.touch(Instant::now());

        let input = line.trim().to_lowercase();
        let mut parts = input.split_whitespace();
        match parts.next() {
            None => continue,
            Some("add") => {
                if add_entry(app, shell)? {
                    render(app);
                }
            }
            Some("edit") => match parse_index(parts.next(), app.state.ledger.len()) {
                Some(index) => {
                    if edit_entry(app, shell, index)? {
                        render(app);
                    }
                }
                None => output::error("usage: edit <entry number>"),
            },
            Some("delete") => match parse_index(parts.next(), app.state.ledger.len()) {
                Some(index) => {
                    delete_entry(app, shell, index)?;
                    render(app);
                }
                None => output::error("usage: delete <entry number>"),
            },
            Some("list") => render(app),
            Some("terminal") | Some("console") => {
                app.apply(Action::SetScreen(Screen::CommandConsole));
                return Ok(LoopControl::Continue);
            }
            Some("dashboard") | Some("back") | Some("exit") => {
                app.apply(Action::SetScreen(Screen::Dashboard));
                return Ok(LoopControl::Continue);
            }
            Some("quit") => return Ok(LoopControl::Exit),
            Some(other) => output::warning(format!(
                "Unknown option `{other}`. Use add, edit <n>, delete <n>, list, terminal, or dashboard."
            )),
        }
    }
}

fn render(app: &App) {
    effects::clear_screen();
    output::section("Accounts Ledger");

    let ledger = &app.state.ledger;
    if ledger.is_empty() {
        output::info("No transactions recorded.");
    } else {
        output::info(format!(
            "{:<4} {:<12} {:<8} {:>12}  {}",
            "#", "DATE", "TYPE", "AMOUNT", "DESCRIPTION"
        ));
        for (index, entry) in ledger.entries().iter().enumerate() {
            let kind = match entry.kind {
                EntryKind::Income => "income",
                EntryKind::Expense => "expense",
            };
            output::info(format!(
                "{:<4} {:<12} {:<8} {:>12.2}  {}",
                index + 1,
                entry.date,
                kind,
                entry.amount,
                entry.description
            ));
        }
    }

    output::separator();
    output::info(format!(
        "INCOME: {:.2}    EXPENSE: {:.2}    BALANCE: {:+.2}",
        ledger.total_income(),
        ledger.total_expense(),
        ledger.balance()
    ));
    output::info("Commands: add, edit <n>, delete <n>, list, terminal, dashboard, quit");
}

fn parse_index(arg: Option<&str>, len: usize) -> Option<usize> {
    let index: usize = arg?.parse().ok()?;
    (1..=len).contains(&index).then(|| index - 1)
}

/// Collects a new transaction from the user. Returns true when an entry
/// was committed.
fn add_entry(app: &mut App, shell: &mut ShellIo) -> Result<bool, CliError> {
    let today = Local::now().date_naive();

    let Some(raw_date) = shell.read_line(&format!("Date [{today}]> "))? else {
        return Ok(false);
    };
    let date = match parse_date(&raw_date, today) {
        Some(date) => date,
        None => {
            output::error("Invalid date. Use YYYY-MM-DD.");
            return Ok(false);
        }
    };

    let Some(raw_amount) = shell.read_line("Amount> ")? else {
        return Ok(false);
    };
    let amount: f64 = match raw_amount.trim().parse() {
        Ok(value) if value >= 0.0 => value,
        _ => {
            output::error("Amount must be a number greater than or equal to 0.");
            return Ok(false);
        }
    };

    let Some(raw_kind) = shell.read_line("Type (income/expense) [income]> ")? else {
        return Ok(false);
    };
    let kind = match parse_kind(&raw_kind, EntryKind::Income) {
        Some(kind) => kind,
        None => {
            output::error("Type must be `income` or `expense`.");
            return Ok(false);
        }
    };

    let Some(description) = shell.read_line("Description> ")? else {
        return Ok(false);
    };
    if description.trim().is_empty() {
        output::error("Description must not be empty.");
        return Ok(false);
    }

    let entry = Entry::new(date, amount, kind, description.trim());
    match app.submit_entry(entry) {
        Ok(()) => {
            output::success("Transaction saved.");
            Ok(true)
        }
        Err(err) => {
            output::error(err.to_string());
            Ok(false)
        }
    }
}

/// Edits an existing transaction in place; empty input keeps the current
/// value. Returns true when the entry was updated.
fn edit_entry(app: &mut App, shell: &mut ShellIo, index: usize) -> Result<bool, CliError> {
    let current = app.state.ledger.entries()[index].clone();

    let Some(raw_date) = shell.read_line(&format!("Date [{}]> ", current.date))? else {
        return Ok(false);
    };
    let date = match parse_date(&raw_date, current.date) {
        Some(date) => date,
        None => {
            output::error("Invalid date. Use YYYY-MM-DD.");
            return Ok(false);
        }
    };

    let Some(raw_amount) = shell.read_line(&format!("Amount [{}]> ", current.amount))? else {
        return Ok(false);
    };
    let trimmed_amount = raw_amount.trim();
    let amount: f64 = if trimmed_amount.is_empty() {
        current.amount
    } else {
        match trimmed_amount.parse() {
            Ok(value) if value >= 0.0 => value,
            _ => {
                output::error("Amount must be a number greater than or equal to 0.");
                return Ok(false);
            }
        }
    };

    let kind_label = match current.kind {
        EntryKind::Income => "income",
        EntryKind::Expense => "expense",
    };
    let Some(raw_kind) = shell.read_line(&format!("Type (income/expense) [{kind_label}]> "))?
    else {
        return Ok(false);
    };
    let kind = match parse_kind(&raw_kind, current.kind) {
        Some(kind) => kind,
        None => {
            output::error("Type must be `income` or `expense`.");
            return Ok(false);
        }
    };

    let Some(raw_description) =
        shell.read_line(&format!("Description [{}]> ", current.description))?
    else {
        return Ok(false);
    };
    let description = if raw_description.trim().is_empty() {
        current.description.clone()
    } else {
        raw_description.trim().to_string()
    };

    let updated = Entry {
        id: current.id,
        date,
        amount,
        kind,
        description,
    };
    match app.submit_entry_update(updated) {
        Ok(()) => {
            output::success("Transaction updated.");
            Ok(true)
        }
        Err(err) => {
            output::error(err.to_string());
            Ok(false)
        }
    }
}

fn delete_entry(app: &mut App, shell: &mut ShellIo, index: usize) -> Result<(), CliError> {
    let entry = &app.state.ledger.entries()[index];
    let id = entry.id;
    let summary = format!("{} {:.2} ({})", entry.date, entry.amount, entry.description);
    if shell.confirm("Delete this transaction?", false)? {
        app.apply(Action::RemoveEntry(id));
        output::success(format!("Transaction removed: {summary}"));
    } else {
        output::info("Operation cancelled.");
    }
    Ok(())
}

fn parse_date(raw: &str, default: NaiveDate) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(default);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

fn parse_kind(raw: &str, default: EntryKind) -> Option<EntryKind> {
    match raw.trim().to_lowercase().as_str() {
        "" => Some(default),
        "income" | "i" => Some(EntryKind::Income),
        "expense" | "e" => Some(EntryKind::Expense),
        _ => None,
    }
}

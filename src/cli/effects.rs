//! Terminal presentation effects: screen clearing, timestamped log lines,
//! and the character-by-character typing used by the boot sequence and the
//! assistant. All effects degrade to instant plain prints in script mode.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    cursor,
    terminal::{self, ClearType},
    ExecutableCommand,
};

use crate::cli::output::{self, MessageKind};

/// Clears the terminal. Ignored (keeps scrollback) in plain mode so test
/// transcripts remain a linear log.
pub fn clear_screen() {
    if output::preferences().plain_mode {
        return;
    }
    let mut stdout = io::stdout();
    let _ = stdout.execute(terminal::Clear(ClearType::All));
    let _ = stdout.execute(cursor::MoveTo(0, 0));
}

pub fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Prints one timestamped log line, multi-line payloads included.
pub fn log_line(kind: MessageKind, message: &str) {
    let stamp = timestamp();
    for line in message.split('\n') {
        output::print(kind, format!("[{stamp}] {line}"));
    }
}

/// Types `text` one character at a time. A zero delay prints at once.
pub fn type_out(text: &str, char_delay: Duration) {
    if char_delay.is_zero() || output::preferences().plain_mode {
        println!("{text}");
        return;
    }
    let mut stdout = io::stdout();
    for ch in text.chars() {
        print!("{ch}");
        let _ = stdout.flush();
        thread::sleep(char_delay);
    }
    println!();
}

//! Single-key rerun prompt

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// What the user asked for after a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RerunChoice {
    Rerun,
    Quit,
}

/// Map a key press to a choice: Esc, `q` and Ctrl+C quit, anything else reruns
pub fn classify_key(key: &KeyEvent) -> RerunChoice {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => RerunChoice::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => RerunChoice::Quit,
        _ => RerunChoice::Rerun,
    }
}

/// Restores cooked mode when dropped
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

/// Block until one key is pressed
fn read_choice() -> io::Result<RerunChoice> {
    let _guard = RawModeGuard::enable()?;
    loop {
        if let Event::Key(key) = event::read()? {
            // Release events are reported on some platforms
            if key.kind == KeyEventKind::Press {
                return Ok(classify_key(&key));
            }
        }
    }
}

/// Prompt on stdout and wait for one key without blocking the runtime
pub async fn wait_for_rerun() -> io::Result<RerunChoice> {
    println!("Press any key to rerun or Esc to quit.");
    let choice = tokio::task::spawn_blocking(read_choice)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))??;
    println!();
    Ok(choice)
}

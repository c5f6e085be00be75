//! Interactive niceties for double-click launches
//!
//! Windows users typically run the tool by double-clicking it, which closes
//! the console window the instant the process exits. Keeping the window open
//! until a key is pressed is purely a convenience; with piped or redirected
//! input the wait is skipped entirely.

use console::Term;
use std::io::IsTerminal;

/// Wait for a keypress when stdin is attached to a terminal
pub fn wait_for_ack() {
    if !std::io::stdin().is_terminal() {
        return;
    }

    log::info!("Press any key to close this window...");
    let _ = Term::stdout().read_key();
}

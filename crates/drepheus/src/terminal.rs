//! Terminal acquisition and guaranteed release.

use std::io::stdout;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use ratatui::DefaultTerminal;

/// Raw mode, alternate screen and mouse capture for as long as it lives.
pub struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    pub fn start() -> color_eyre::Result<Self> {
        let terminal = ratatui::init();
        // Restore first if mouse capture fails, so the shell is left usable.
        if let Err(e) = execute!(stdout(), EnableMouseCapture) {
            ratatui::restore();
            return Err(e.into());
        }
        tracing::debug!("terminal session started");
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();
        tracing::debug!("terminal session released");
    }
}

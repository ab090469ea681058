use anyhow::Result;
use crossterm::{cursor, execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use tracing::info;

use crate::tui::state::TuiApp;

pub type TerminalType = Terminal<CrosstermBackend<io::Stdout>>;

impl TuiApp {
    /// Take over the terminal until the user quits. The guard restores it on
    /// every exit path, including errors from the loop.
    pub fn run(&mut self) -> Result<()> {
        struct TuiGuard;
        impl Drop for TuiGuard {
            fn drop(&mut self) {
                let mut stdout = io::stdout();
                let _ = execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show);
                let _ = terminal::disable_raw_mode();
            }
        }
        let _guard = acquire(
            terminal::enable_raw_mode,
            || TuiGuard,
            || execute!(io::stdout(), terminal::EnterAlternateScreen),
        )?;

        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;
        info!(fields = self.field_count(), theme = %self.theme.name, "tui started");
        self.event_loop(&mut terminal)
    }
}

/// Run `enable`, arm the restore guard, then run `enter`. A failing `enter`
/// drops the guard, so nothing enabled is left behind.
fn acquire<G>(
    enable: impl FnOnce() -> io::Result<()>,
    arm: impl FnOnce() -> G,
    enter: impl FnOnce() -> io::Result<()>,
) -> io::Result<G> {
    enable()?;
    let guard = arm();
    enter()?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Flag<'a>(&'a Cell<bool>);

    impl Drop for Flag<'_> {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    #[test]
    fn failed_enter_still_restores() {
        let restored = Cell::new(false);
        let res = acquire(
            || Ok(()),
            || Flag(&restored),
            || Err(io::Error::other("no alternate screen")),
        );
        assert!(res.is_err());
        assert!(restored.get());
    }

    #[test]
    fn failed_enable_arms_nothing() {
        let armed = Cell::new(false);
        let res = acquire(
            || Err(io::Error::other("not a tty")),
            || {
                armed.set(true);
            },
            || Ok(()),
        );
        assert!(res.is_err());
        assert!(!armed.get());
    }

    #[test]
    fn guard_survives_success() {
        let restored = Cell::new(false);
        let guard = acquire(|| Ok(()), || Flag(&restored), || Ok(())).unwrap();
        assert!(!restored.get());
        drop(guard);
        assert!(restored.get());
    }
}

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::tui::state::TuiApp;
use crate::tui::view::TerminalType;

const SCROLL_STEP: i32 = 5;

/// What a key press did to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Changed,
    Quit,
}

impl TuiApp {
    pub fn event_loop(&mut self, terminal: &mut TerminalType) -> Result<()> {
        let mut last_ctrl_c_at: Option<Instant> = None;
        let mut dirty = true;
        let mut last_spinner_update = Instant::now();
        loop {
            if self.state().loading && last_spinner_update.elapsed() >= Duration::from_millis(150)
            {
                self.spinner_state = self.spinner_state.wrapping_add(1);
                dirty = true;
                last_spinner_update = Instant::now();
            }

            if self.drain_inbox() {
                dirty = true;
            }

            if dirty {
                terminal.draw(|f| self.view(f))?;
                dirty = false;
            }

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(k) if k.kind == KeyEventKind::Press => {
                        if k.code == KeyCode::Char('c')
                            && k.modifiers.contains(KeyModifiers::CONTROL)
                        {
                            let now = Instant::now();
                            if let Some(prev) = last_ctrl_c_at
                                && now.duration_since(prev) <= Duration::from_secs(3)
                            {
                                return Ok(());
                            }
                            last_ctrl_c_at = Some(now);
                            self.notice = Some("[Press Ctrl+C again within 3s to exit]".into());
                            dirty = true;
                            continue;
                        }
                        match self.handle_key(k) {
                            KeyOutcome::Quit => return Ok(()),
                            KeyOutcome::Changed => dirty = true,
                            KeyOutcome::Ignored => {}
                        }
                    }
                    Event::Resize(..) => dirty = true,
                    _ => {}
                }
            }
        }
    }

    /// Everything but the double Ctrl+C exit, which needs the loop's clock.
    pub fn handle_key(&mut self, k: KeyEvent) -> KeyOutcome {
        if self.notice.take().is_some() {
            debug!("notice cleared");
        }
        let ctrl = k.modifiers.contains(KeyModifiers::CONTROL);
        match k.code {
            KeyCode::Esc => KeyOutcome::Quit,
            KeyCode::Char('q') if ctrl => KeyOutcome::Quit,
            KeyCode::Char('r') if ctrl => self.try_submit(),
            KeyCode::Enter => self.try_submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                KeyOutcome::Changed
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                KeyOutcome::Changed
            }
            KeyCode::PageUp => {
                self.scroll_results(-SCROLL_STEP);
                KeyOutcome::Changed
            }
            KeyCode::PageDown => {
                self.scroll_results(SCROLL_STEP);
                KeyOutcome::Changed
            }
            KeyCode::Left => {
                self.cursor_left();
                KeyOutcome::Changed
            }
            KeyCode::Right => {
                self.cursor_right();
                KeyOutcome::Changed
            }
            KeyCode::Home => {
                self.cursor_home();
                KeyOutcome::Changed
            }
            KeyCode::End => {
                self.cursor_end();
                KeyOutcome::Changed
            }
            KeyCode::Backspace => changed(self.backspace()),
            KeyCode::Delete => changed(self.delete()),
            KeyCode::Char(c) if !ctrl => {
                self.insert_char(c);
                KeyOutcome::Changed
            }
            _ => KeyOutcome::Ignored,
        }
    }

    fn try_submit(&mut self) -> KeyOutcome {
        if self.submit() {
            KeyOutcome::Changed
        } else {
            debug!("submit ignored while a request is in flight");
            KeyOutcome::Ignored
        }
    }
}

fn changed(did: bool) -> KeyOutcome {
    if did {
        KeyOutcome::Changed
    } else {
        KeyOutcome::Ignored
    }
}

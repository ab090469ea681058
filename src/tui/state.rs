use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};

use tracing::{debug, warn};

use crate::api::AnalysisService;
use crate::controller::{SubmissionController, SubmissionOutcome, UiState, dispatch};
use crate::form::FormStore;
use crate::report::build_report;
use crate::tui::rendering::detail_lines;
use crate::tui::state_render::{BuildRenderPlanParams, RenderPlan, build_render_plan};
use crate::tui::theme::Theme;

pub struct TuiApp {
    pub title: String,
    pub subtitle: String,
    pub store: FormStore,
    pub controller: SubmissionController,
    /// Index of the focused field, in parameter order.
    pub focus: usize,
    /// Cursor position in the focused field, in chars.
    pub cursor: usize,
    pub theme: Theme,
    pub spinner_state: usize,
    pub result_scroll: u16,
    pub notice: Option<String>,
    pub(crate) service: Arc<dyn AnalysisService>,
    pub(crate) inbox_rx: Receiver<SubmissionOutcome>,
    pub(crate) inbox_tx: Sender<SubmissionOutcome>,
}

impl TuiApp {
    pub fn new(store: FormStore, service: Arc<dyn AnalysisService>, theme_name: &str) -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut app = Self {
            title: "Constructive Builder".to_string(),
            subtitle: "Autonomous Construction Project Estimation & Scheduling".to_string(),
            store,
            controller: SubmissionController::new(),
            focus: 0,
            cursor: 0,
            theme: Theme::by_name(theme_name),
            spinner_state: 0,
            result_scroll: 0,
            notice: None,
            service,
            inbox_rx: rx,
            inbox_tx: tx,
        };
        app.cursor = app.focused_text().chars().count();
        app
    }

    pub fn state(&self) -> &UiState {
        self.controller.state()
    }

    pub fn field_count(&self) -> usize {
        self.store.get().len()
    }

    pub fn focused_key(&self) -> Option<String> {
        self.store.get().keys().nth(self.focus).map(str::to_string)
    }

    fn focused_text(&self) -> String {
        self.focused_key()
            .and_then(|k| self.store.value_text(&k))
            .unwrap_or_default()
    }

    pub fn focus_next(&mut self) {
        if self.store.get().is_empty() {
            return;
        }
        let n = self.field_count();
        self.focus = (self.focus + 1) % n;
        self.cursor = self.focused_text().chars().count();
    }

    pub fn focus_prev(&mut self) {
        if self.store.get().is_empty() {
            return;
        }
        let n = self.field_count();
        self.focus = (self.focus + n - 1) % n;
        self.cursor = self.focused_text().chars().count();
    }

    /// Every edit goes straight back into the store as raw text.
    fn write_focused(&mut self, text: String) {
        let Some(key) = self.focused_key() else {
            return;
        };
        if let Err(e) = self.store.set(&key, text) {
            warn!(error = %e, "form update rejected");
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let mut chars: Vec<char> = self.focused_text().chars().collect();
        let at = self.cursor.min(chars.len());
        chars.insert(at, c);
        self.cursor = at + 1;
        self.write_focused(chars.into_iter().collect());
    }

    pub fn backspace(&mut self) -> bool {
        let mut chars: Vec<char> = self.focused_text().chars().collect();
        let at = self.cursor.min(chars.len());
        if at == 0 {
            return false;
        }
        chars.remove(at - 1);
        self.cursor = at - 1;
        self.write_focused(chars.into_iter().collect());
        true
    }

    pub fn delete(&mut self) -> bool {
        let mut chars: Vec<char> = self.focused_text().chars().collect();
        if self.cursor >= chars.len() {
            return false;
        }
        chars.remove(self.cursor);
        self.write_focused(chars.into_iter().collect());
        true
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let len = self.focused_text().chars().count();
        if self.cursor < len {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.focused_text().chars().count();
    }

    /// Start a request unless one is already in flight.
    pub fn submit(&mut self) -> bool {
        let Some(payload) = self.controller.begin(&self.store) else {
            return false;
        };
        self.spinner_state = 0;
        dispatch(self.service.clone(), payload, self.inbox_tx.clone());
        true
    }

    /// Apply settled outcomes. Returns `true` if anything changed.
    pub fn drain_inbox(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.inbox_rx.try_recv() {
            self.controller.settle(outcome);
            debug!(phase = ?self.controller.phase(), "submission outcome applied");
            self.result_scroll = 0;
            changed = true;
        }
        changed
    }

    /// Lines in the scrollable details pane of the current result.
    pub fn detail_line_count(&self) -> usize {
        build_report(self.state().result.as_ref())
            .map(|report| detail_lines(&report, &self.theme).len())
            .unwrap_or(0)
    }

    /// The last detail line stays on screen; never scrolls into blank space.
    pub fn scroll_results(&mut self, delta: i32) {
        let max = self.detail_line_count().saturating_sub(1).min(usize::from(u16::MAX));
        let next = i64::from(self.result_scroll) + i64::from(delta);
        self.result_scroll = next.clamp(0, max as i64) as u16;
    }

    pub fn render_plan(&self, width: u16) -> RenderPlan {
        build_render_plan(BuildRenderPlanParams {
            title: &self.title,
            subtitle: &self.subtitle,
            params: self.store.get(),
            state: self.controller.state(),
            focus: self.focus,
            spinner_state: self.spinner_state,
            notice: self.notice.as_deref(),
            width,
        })
    }
}

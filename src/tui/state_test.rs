use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use reqwest::StatusCode;

use crate::api::{AnalysisError, AnalysisResult, AnalysisService, TotalCost};
use crate::form::{FormStore, ParamValue, ParameterSet};
use crate::tui::TuiApp;
use crate::tui::event_loop::KeyOutcome;
use crate::tui::state_render::{RUN_LABEL, RUNNING_LABEL, truncate_display};

struct FixedService(Result<AnalysisResult, AnalysisError>);

#[async_trait]
impl AnalysisService for FixedService {
    async fn analyze(&self, _params: &ParameterSet) -> Result<AnalysisResult, AnalysisError> {
        match &self.0 {
            Ok(r) => Ok(r.clone()),
            Err(AnalysisError::Server { status, detail }) => Err(AnalysisError::Server {
                status: *status,
                detail: detail.clone(),
            }),
            Err(e) => Err(AnalysisError::Aborted(e.to_string())),
        }
    }
}

fn feasible() -> AnalysisResult {
    AnalysisResult {
        feasibility_status: Some("Feasible".into()),
        total_duration: Some(180.0),
        total_cost: Some(TotalCost::Scalar(2_500_000.0)),
        critical_path_tasks: Some(vec!["Foundation".into(), "Framing".into()]),
        ..AnalysisResult::default()
    }
}

fn app_with(outcome: Result<AnalysisResult, AnalysisError>) -> TuiApp {
    TuiApp::new(
        FormStore::default(),
        Arc::new(FixedService(outcome)),
        "dark",
    )
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

async fn wait_for_outcome(app: &mut TuiApp) {
    for _ in 0..200 {
        if app.drain_inbox() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("analysis never settled");
}

#[test]
fn plan_has_one_row_per_parameter_in_order() {
    let app = app_with(Ok(feasible()));
    let plan = app.render_plan(120);
    let keys: Vec<&str> = plan.fields.iter().map(|r| r.field.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["area", "floors", "deadline", "budget", "workforce_cap", "provider", "api_key"]
    );
    assert_eq!(plan.fields[4].field.label, "workforce cap");
    assert!(plan.fields[0].focused);
    assert!(!plan.fields[1].focused);
    assert_eq!(plan.header_lines[0], "Constructive Builder");
}

#[test]
fn empty_secret_shows_nothing_and_typed_secret_is_masked() {
    let mut app = app_with(Ok(feasible()));
    let plan = app.render_plan(120);
    let secret = &plan.fields[6];
    assert_eq!(secret.text, "");
    assert!(!secret.is_placeholder);

    for _ in 0..6 {
        app.focus_next();
    }
    for c in "sk-1".chars() {
        app.insert_char(c);
    }
    let plan = app.render_plan(120);
    assert_eq!(plan.fields[6].text, "****");
    assert_eq!(app.store.value_text("api_key").as_deref(), Some("sk-1"));
}

#[test]
fn empty_provider_shows_hint() {
    let mut app = app_with(Ok(feasible()));
    app.store.set("provider", "").unwrap();
    let plan = app.render_plan(120);
    let provider = &plan.fields[5];
    assert!(provider.is_placeholder);
    assert_eq!(provider.text, "gemini or groq");
}

#[test]
fn editing_writes_raw_text_to_store() {
    let mut app = app_with(Ok(feasible()));
    // cursor starts at the end of "1000"
    assert_eq!(app.cursor, 4);
    assert!(app.backspace());
    assert!(app.backspace());
    app.insert_char('5');
    app.insert_char('x');
    assert_eq!(app.store.get().get("area"), Some(&ParamValue::text("105x")));

    app.cursor_home();
    assert!(!app.backspace());
    assert!(app.delete());
    assert_eq!(app.store.value_text("area").as_deref(), Some("05x"));
}

#[test]
fn focus_wraps_both_ways() {
    let mut app = app_with(Ok(feasible()));
    app.focus_prev();
    assert_eq!(app.focused_key().as_deref(), Some("api_key"));
    app.focus_next();
    assert_eq!(app.focused_key().as_deref(), Some("area"));
}

#[test]
fn key_handling() {
    let mut app = app_with(Ok(feasible()));
    assert_eq!(app.handle_key(key(KeyCode::Tab)), KeyOutcome::Changed);
    assert_eq!(app.focused_key().as_deref(), Some("floors"));
    assert_eq!(app.handle_key(key(KeyCode::Char('0'))), KeyOutcome::Changed);
    assert_eq!(app.store.value_text("floors").as_deref(), Some("20"));
    assert_eq!(app.handle_key(key(KeyCode::F(5))), KeyOutcome::Ignored);
    assert_eq!(app.handle_key(key(KeyCode::Esc)), KeyOutcome::Quit);
    assert_eq!(
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
        KeyOutcome::Quit
    );
}

#[test]
fn truncate_display_respects_width() {
    assert_eq!(truncate_display("Constructive", 6), "Constr");
    assert_eq!(truncate_display("abc", 0), "");
    assert_eq!(truncate_display("日本語", 4), "日本");
}

#[tokio::test]
async fn submit_shows_loading_then_report() {
    let mut app = app_with(Ok(feasible()));
    assert_eq!(app.render_plan(120).button_label, RUN_LABEL);

    assert!(app.submit());
    let plan = app.render_plan(120);
    assert!(!plan.button_enabled);
    assert!(plan.button_label.starts_with(RUNNING_LABEL));
    // a second submit while pending is ignored
    assert!(!app.submit());

    wait_for_outcome(&mut app).await;
    let plan = app.render_plan(120);
    assert!(plan.button_enabled);
    assert_eq!(plan.button_label, RUN_LABEL);
    assert!(plan.error_banner.is_none());
    let report = plan.report.unwrap();
    assert_eq!(report.duration, "180 days");
    assert_eq!(report.cost, "2,500,000");
    assert!(plan.footer.contains("last run"));
}

#[tokio::test]
async fn failure_shows_banner_and_keeps_stale_report() {
    let mut app = app_with(Ok(feasible()));
    app.submit();
    wait_for_outcome(&mut app).await;

    app.service = Arc::new(FixedService(Err(AnalysisError::Server {
        status: StatusCode::BAD_REQUEST,
        detail: Some("Unsupported provider".into()),
    })));
    assert_eq!(app.handle_key(key(KeyCode::Enter)), KeyOutcome::Changed);
    wait_for_outcome(&mut app).await;

    let plan = app.render_plan(120);
    assert_eq!(
        plan.error_banner.as_deref(),
        Some("Error: API Error. Check backend. Unsupported provider")
    );
    assert_eq!(plan.report.unwrap().status, "Feasible");
}

#[test]
fn scroll_stays_put_without_result() {
    let mut app = app_with(Ok(feasible()));
    app.scroll_results(-5);
    assert_eq!(app.result_scroll, 0);
    app.scroll_results(7);
    assert_eq!(app.result_scroll, 0);
}

#[tokio::test]
async fn scroll_is_capped_at_detail_content() {
    let mut app = app_with(Ok(feasible()));
    app.submit();
    wait_for_outcome(&mut app).await;

    // critical path heading, two tasks, trailing blank line
    assert_eq!(app.detail_line_count(), 4);
    for _ in 0..10 {
        assert_ne!(app.handle_key(key(KeyCode::PageDown)), KeyOutcome::Quit);
    }
    assert_eq!(app.result_scroll, 3);
    app.scroll_results(-1);
    assert_eq!(app.result_scroll, 2);
    app.scroll_results(-100);
    assert_eq!(app.result_scroll, 0);
}

#[test]
fn focus_moves_are_noops_on_an_empty_profile() {
    let mut app = TuiApp::new(
        FormStore::new(ParameterSet::default()),
        Arc::new(FixedService(Ok(feasible()))),
        "light",
    );
    app.focus_next();
    app.focus_prev();
    assert_eq!(app.focus, 0);
    assert_eq!(app.focused_key(), None);
    assert!(app.render_plan(80).fields.is_empty());
}

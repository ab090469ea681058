mod api;
mod config;
mod controller;
mod form;
mod logging;
mod report;
mod tui;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use dotenvy::dotenv;
use tracing::info;

use crate::api::AnalysisClient;
use crate::config::{AppConfig, DEFAULT_LOG_FILE};
use crate::controller::SubmissionController;
use crate::form::FormStore;
use crate::logging::{LogTarget, init_logging};
use crate::report::{build_report, render_text};
use crate::tui::TuiApp;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "cbuild",
    version,
    about = "Construction project estimation and scheduling client (TUI/CLI)"
)]
pub struct Cli {
    /// Submit once with the configured parameters and print the result
    #[arg(long, action = ArgAction::SetTrue)]
    no_tui: bool,

    /// Analysis endpoint URL (env CBUILD_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Color theme (dark, light)
    #[arg(long)]
    theme: Option<String>,

    /// Override a form field before starting, as key=value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// With --no-tui, print the raw result as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Log level (error,warn,info,debug,trace; env CBUILD_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("CBUILD_LOG").ok())
        .unwrap_or_else(|| "info".to_string());
    let target = if cli.no_tui {
        LogTarget::Stderr
    } else {
        LogTarget::File(DEFAULT_LOG_FILE.into())
    };
    init_logging(&level, target)?;

    let cfg = AppConfig::from_cli(&cli)?;
    info!(endpoint = %cfg.endpoint, theme = %cfg.theme, root = %cfg.project_root.display(), "app config");

    let mut store = FormStore::new(cfg.parameters.clone());
    for assignment in &cli.set {
        store
            .apply_assignment(assignment)
            .with_context(|| format!("--set {assignment}"))?;
    }

    let client = AnalysisClient::new(cfg.endpoint.clone())?;

    if cli.no_tui {
        run_once(client, store, cli.json).await
    } else {
        run_tui(cfg, client, store)
    }
}

async fn run_once(client: AnalysisClient, store: FormStore, json: bool) -> Result<()> {
    let mut controller = SubmissionController::new();
    if !controller.submit(&client, &store).await {
        bail!("{}", controller.state().error);
    }
    let result = controller.state().result.as_ref();
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(view) = build_report(result) {
        print!("{}", render_text(&view));
    }
    Ok(())
}

fn run_tui(cfg: AppConfig, client: AnalysisClient, store: FormStore) -> Result<()> {
    let mut app = TuiApp::new(store, Arc::new(client), &cfg.theme);
    // The UI loop blocks on terminal input; keep the runtime free for the request tasks.
    tokio::task::block_in_place(|| app.run())
}

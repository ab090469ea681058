//! Turns an [`AnalysisResult`] into display-ready panels. Everything here is a
//! pure function of the result; terminal drawing and plain-text output both
//! consume [`ReportView`].

mod format;
mod text;

pub use format::*;
pub use text::render_text;

use crate::api::AnalysisResult;

/// Shown in place of a value the response did not include.
pub const PLACEHOLDER: &str = "n/a";

const DAYS: &str = " days";
const FEASIBLE: &str = "Feasible";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Positive,
    Negative,
}

/// Two-way split: only the exact string `"Feasible"` is positive.
pub fn classify_status(status: &str) -> Badge {
    if status == FEASIBLE {
        Badge::Positive
    } else {
        Badge::Negative
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostBreakdownView {
    pub labor: String,
    pub material: String,
    pub overhead: String,
    pub per_sqyard: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportView {
    pub status: String,
    pub badge: Badge,
    pub duration: String,
    pub cost: String,
    pub risk_p80: String,
    pub risk_detail: Option<String>,
    pub breakdown: Option<CostBreakdownView>,
    pub critical_path: Vec<String>,
    pub summary: Option<Vec<String>>,
    pub constraint_issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub schedule: Vec<String>,
}

fn amount_or_placeholder(value: Option<f64>) -> String {
    value.map(format_amount).unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn plain_or_placeholder(value: Option<f64>) -> String {
    value.map(format_plain).unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn days_or_placeholder(value: Option<String>) -> String {
    match value {
        Some(v) => format!("{v}{DAYS}"),
        None => PLACEHOLDER.to_string(),
    }
}

/// `None` in, `None` out: no result means no panels at all.
pub fn build_report(result: Option<&AnalysisResult>) -> Option<ReportView> {
    let result = result?;

    let status = result.feasibility_status.clone().unwrap_or_default();
    let badge = classify_status(&status);

    let duration = days_or_placeholder(result.total_duration.map(format_plain));

    let cost = amount_or_placeholder(result.total_cost.as_ref().and_then(|c| c.amount()));
    let breakdown = result
        .total_cost
        .as_ref()
        .and_then(|c| c.breakdown())
        .map(|b| CostBreakdownView {
            labor: amount_or_placeholder(b.labor_cost),
            material: amount_or_placeholder(b.material_cost),
            overhead: amount_or_placeholder(b.overhead_cost),
            per_sqyard: b.cost_per_sqyard.map(format_amount),
        });

    let simulation = result.simulation_results.as_ref();
    let risk_p80 = days_or_placeholder(
        simulation
            .and_then(|s| s.p80_duration)
            .map(format_rounded),
    );
    let risk_detail = simulation.and_then(|s| {
        let mut parts = Vec::new();
        if let Some(p50) = s.p50_duration {
            parts.push(format!("P50 {}{DAYS}", format_rounded(p50)));
        }
        if let Some(p) = s.deadline_risk_probability {
            parts.push(format!("deadline risk {}", format_percent(p)));
        }
        (!parts.is_empty()).then(|| parts.join(" · "))
    });

    let summary = result
        .executive_summary
        .as_deref()
        .map(|s| s.lines().map(str::to_string).collect());

    let schedule = result
        .deterministic_schedule
        .as_ref()
        .map(|s| {
            s.iter()
                .map(|(task, w)| {
                    format!(
                        "{task}: day {} - {}",
                        plain_or_placeholder(w.start),
                        plain_or_placeholder(w.end)
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    Some(ReportView {
        status,
        badge,
        duration,
        cost,
        risk_p80,
        risk_detail,
        breakdown,
        critical_path: result.critical_path_tasks.clone().unwrap_or_default(),
        summary,
        constraint_issues: result.constraint_issues.clone().unwrap_or_default(),
        suggestions: result.optimization_suggestions.clone().unwrap_or_default(),
        schedule,
    })
}

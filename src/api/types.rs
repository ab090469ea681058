use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Response of `POST /analyze_project`.
///
/// Every field is optional: a body that parses but lacks data renders with
/// placeholders instead of failing the request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feasibility_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<TotalCost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_results: Option<SimulationResults>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_path_tasks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executive_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_issues: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization_suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deterministic_schedule: Option<IndexMap<String, ScheduleWindow>>,
}

/// `total_cost` arrives either as a bare number or as a breakdown object whose
/// own `total_cost` holds the scalar. Resolved once here so render code never
/// inspects JSON shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TotalCost {
    Scalar(f64),
    Breakdown(CostBreakdown),
}

impl TotalCost {
    pub fn amount(&self) -> Option<f64> {
        match self {
            TotalCost::Scalar(v) => Some(*v),
            TotalCost::Breakdown(b) => b.total_cost,
        }
    }

    pub fn breakdown(&self) -> Option<&CostBreakdown> {
        match self {
            TotalCost::Scalar(_) => None,
            TotalCost::Breakdown(b) => Some(b),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labor_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overhead_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_sqyard: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p50_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p80_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_risk_probability: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScheduleWindow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

/// Error body shape. FastAPI puts a string in `detail` for handled errors and
/// a list of validation entries for rejected input; only the string form is
/// surfaced.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }
}

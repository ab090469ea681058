use unicode_width::UnicodeWidthChar;

use crate::controller::UiState;
use crate::form::{FieldView, ParameterSet, field_views};
use crate::report::{ReportView, build_report};

pub const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub const RUN_LABEL: &str = "Run Analysis";
pub const RUNNING_LABEL: &str = "Analyzing Project...";
pub const KEY_HINTS: &str = "Tab/↑↓ field · Enter run · PgUp/PgDn scroll · Esc quit";

pub fn truncate_display(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let mut width = 0usize;
    let mut out = String::new();
    for ch in s.chars() {
        let ch_w = ch.width().unwrap_or(0);
        if ch_w == 0 {
            out.push(ch);
            continue;
        }
        if width + ch_w > max {
            break;
        }
        out.push(ch);
        width += ch_w;
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub field: FieldView,
    pub focused: bool,
    /// What the input box shows: the (masked) value, or the placeholder when empty.
    pub text: String,
    pub is_placeholder: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub header_lines: Vec<String>,
    pub fields: Vec<FieldRow>,
    pub button_label: String,
    pub button_enabled: bool,
    pub error_banner: Option<String>,
    pub report: Option<ReportView>,
    pub footer: String,
}

pub struct BuildRenderPlanParams<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub params: &'a ParameterSet,
    pub state: &'a UiState,
    pub focus: usize,
    pub spinner_state: usize,
    pub notice: Option<&'a str>,
    pub width: u16,
}

pub fn build_render_plan(p: BuildRenderPlanParams<'_>) -> RenderPlan {
    let w = p.width as usize;
    let header_lines = vec![
        truncate_display(p.title, w),
        truncate_display(p.subtitle, w),
    ];

    let fields = field_views(p.params)
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            let (text, is_placeholder) = match (field.display.is_empty(), field.placeholder) {
                (true, Some(hint)) => (hint.to_string(), true),
                _ => (field.display.clone(), false),
            };
            FieldRow {
                focused: i == p.focus,
                field,
                text,
                is_placeholder,
            }
        })
        .collect();

    let button_label = if p.state.loading {
        let spinner = SPINNER_CHARS[p.spinner_state % SPINNER_CHARS.len()];
        format!("{RUNNING_LABEL} {spinner}")
    } else {
        RUN_LABEL.to_string()
    };

    let error_banner = (!p.state.error.is_empty()).then(|| format!("Error: {}", p.state.error));

    let mut footer = p.notice.unwrap_or(KEY_HINTS).to_string();
    if let Some(at) = p.state.last_success_at {
        footer.push_str(&format!(" | last run {}", at.format("%H:%M:%S")));
    }

    RenderPlan {
        header_lines,
        fields,
        button_label,
        button_enabled: !p.state.loading,
        error_banner,
        report: build_report(p.state.result.as_ref()),
        footer: truncate_display(&footer, w),
    }
}

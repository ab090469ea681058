use std::fmt::Write;

use super::{Badge, ReportView};

/// Plain-text report for `--no-tui` mode.
pub fn render_text(view: &ReportView) -> String {
    let mut out = String::new();
    let badge = match view.badge {
        Badge::Positive => "+",
        Badge::Negative => "!",
    };
    let _ = writeln!(out, "Analysis Results  [{badge}] {}", view.status);
    let _ = writeln!(out, "  Total Duration      {}", view.duration);
    let _ = writeln!(out, "  Total Cost          {}", view.cost);
    let _ = writeln!(out, "  Risk Profile (P80)  {}", view.risk_p80);
    if let Some(detail) = &view.risk_detail {
        let _ = writeln!(out, "                      {detail}");
    }

    if let Some(b) = &view.breakdown {
        let _ = writeln!(out, "\nCost Breakdown");
        let _ = writeln!(out, "  Labor     {}", b.labor);
        let _ = writeln!(out, "  Material  {}", b.material);
        let _ = writeln!(out, "  Overhead  {}", b.overhead);
        if let Some(per) = &b.per_sqyard {
            let _ = writeln!(out, "  Per sq yd {per}");
        }
    }

    let _ = writeln!(out, "\nCritical Path Tasks");
    for task in &view.critical_path {
        let _ = writeln!(out, "  - {task}");
    }

    write_list(&mut out, "Constraint Issues", &view.constraint_issues);
    write_list(&mut out, "Optimization Suggestions", &view.suggestions);
    write_list(&mut out, "Schedule", &view.schedule);

    if let Some(lines) = &view.summary {
        let _ = writeln!(out, "\nExecutive Summary");
        for line in lines {
            let _ = writeln!(out, "  {line}");
        }
    }
    out
}

fn write_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{title}");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

use ratatui::{
    layout::Position,
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::report::{Badge, ReportView};
use crate::tui::state::TuiApp;
use crate::tui::state_render::{FieldRow, RenderPlan};
use crate::tui::theme::Theme;

const FIELD_COLUMNS: usize = 2;
const FIELD_HEIGHT: u16 = 3;

impl TuiApp {
    pub fn view(&self, f: &mut Frame) {
        let size = f.area();
        let plan = self.render_plan(size.width);

        let rows = plan.fields.len().div_ceil(FIELD_COLUMNS) as u16;
        let banner_height = u16::from(plan.error_banner.is_some());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),                   // Header
                Constraint::Length(rows * FIELD_HEIGHT), // Form grid
                Constraint::Length(1),                   // Button
                Constraint::Length(banner_height),       // Error banner
                Constraint::Min(1),                      // Results
                Constraint::Length(2),                   // Footer
            ])
            .split(size);

        render_header(f, chunks[0], &plan, &self.theme);
        self.render_form(f, chunks[1], &plan);
        render_button(f, chunks[2], &plan, &self.theme);
        if let Some(banner) = &plan.error_banner {
            let p = Paragraph::new(banner.as_str()).style(self.theme.error_style);
            f.render_widget(p, chunks[3]);
        }
        if let Some(report) = &plan.report {
            self.render_results(f, chunks[4], report);
        }
        render_footer(f, chunks[5], &plan, &self.theme);
    }

    fn render_form(&self, f: &mut Frame, area: Rect, plan: &RenderPlan) {
        if plan.fields.is_empty() {
            return;
        }
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                plan.fields
                    .chunks(FIELD_COLUMNS)
                    .map(|_| Constraint::Length(FIELD_HEIGHT)),
            )
            .split(area);

        for (row_idx, row) in plan.fields.chunks(FIELD_COLUMNS).enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, FIELD_COLUMNS as u32); FIELD_COLUMNS])
                .split(row_areas[row_idx]);
            for (col_idx, field) in row.iter().enumerate() {
                self.render_field(f, cells[col_idx], field);
            }
        }
    }

    fn render_field(&self, f: &mut Frame, area: Rect, row: &FieldRow) {
        let theme = &self.theme;
        let border_style = if row.focused {
            theme.input_focused_style
        } else {
            theme.label_style
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(row.field.label.clone(), theme.label_style));

        let text_style = if row.is_placeholder {
            theme.placeholder_style
        } else {
            theme.input_style
        };
        let inner = block.inner(area);
        f.render_widget(Paragraph::new(row.text.as_str()).style(text_style).block(block), area);

        if row.focused && !self.state().loading {
            // Masked text keeps one char per input char.
            let offset = row
                .text
                .chars()
                .take(if row.is_placeholder { 0 } else { self.cursor })
                .map(|c| unicode_width::UnicodeWidthChar::width(c).unwrap_or(0) as u16)
                .sum::<u16>();
            let x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
            f.set_cursor_position(Position::new(x, inner.y));
        }
    }

    fn render_results(&self, f: &mut Frame, area: Rect, report: &ReportView) {
        let theme = &self.theme;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title and badge
                Constraint::Length(4), // Stat boxes
                Constraint::Min(0),    // Details
            ])
            .split(area);

        let badge_style = match report.badge {
            Badge::Positive => theme.badge_positive_style,
            Badge::Negative => theme.badge_negative_style,
        };
        let title = Line::from(vec![
            Span::styled("Analysis Results ", theme.header_style),
            Span::styled(format!(" {} ", report.status), badge_style),
        ]);
        f.render_widget(Paragraph::new(title), chunks[0]);

        let boxes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(chunks[1]);
        render_stat(f, boxes[0], theme, "Total Duration", &report.duration, None);
        render_stat(f, boxes[1], theme, "Total Cost", &report.cost, None);
        render_stat(
            f,
            boxes[2],
            theme,
            "Risk Profile (P80)",
            &report.risk_p80,
            report.risk_detail.as_deref(),
        );

        let details = Paragraph::new(detail_lines(report, theme))
            .wrap(Wrap { trim: false })
            .scroll((self.result_scroll, 0));
        f.render_widget(details, chunks[2]);
    }
}

fn render_header(f: &mut Frame, area: Rect, plan: &RenderPlan, theme: &Theme) {
    let lines: Vec<Line> = plan
        .header_lines
        .iter()
        .enumerate()
        .map(|(i, l)| {
            let style = if i == 0 {
                theme.header_style
            } else {
                theme.subtitle_style
            };
            Line::styled(l.clone(), style)
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

fn render_button(f: &mut Frame, area: Rect, plan: &RenderPlan, theme: &Theme) {
    let style = if plan.button_enabled {
        theme.button_style
    } else {
        theme.button_disabled_style
    };
    let label = format!(" {} ", plan.button_label);
    let width = (unicode_width::UnicodeWidthStr::width(label.as_str()) as u16).min(area.width);
    let button_area = Rect::new(area.x, area.y, width, area.height);
    f.render_widget(Paragraph::new(label).style(style), button_area);
}

fn render_stat(
    f: &mut Frame,
    area: Rect,
    theme: &Theme,
    title: &str,
    value: &str,
    detail: Option<&str>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_title_style)
        .title(Span::styled(title.to_string(), theme.panel_title_style));
    let mut lines = vec![Line::styled(value.to_string(), theme.value_style)];
    if let Some(d) = detail {
        lines.push(Line::styled(d.to_string(), theme.panel_title_style));
    }
    f.render_widget(Paragraph::new(lines).block(block), area);
}

pub(crate) fn detail_lines(report: &ReportView, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(b) = &report.breakdown {
        let mut parts = vec![
            format!("Labor {}", b.labor),
            format!("Material {}", b.material),
            format!("Overhead {}", b.overhead),
        ];
        if let Some(per) = &b.per_sqyard {
            parts.push(format!("Per sq yd {per}"));
        }
        lines.push(Line::styled(parts.join(" | "), theme.breakdown_style));
        lines.push(Line::default());
    }

    push_section(&mut lines, theme, "Critical Path Tasks", &report.critical_path, true);
    push_section(&mut lines, theme, "Constraint Issues", &report.constraint_issues, false);
    push_section(&mut lines, theme, "Optimization Suggestions", &report.suggestions, false);
    push_section(&mut lines, theme, "Schedule", &report.schedule, false);

    if let Some(summary) = &report.summary {
        lines.push(Line::styled("Executive Summary", theme.panel_title_style));
        lines.extend(
            summary
                .iter()
                .map(|l| Line::styled(l.clone(), theme.text_style)),
        );
    }
    lines
}

/// Empty sections are skipped unless `always` is set; the critical path
/// heading shows even with no tasks.
fn push_section(
    lines: &mut Vec<Line<'static>>,
    theme: &Theme,
    title: &str,
    items: &[String],
    always: bool,
) {
    if items.is_empty() && !always {
        return;
    }
    lines.push(Line::styled(title.to_string(), theme.panel_title_style));
    lines.extend(
        items
            .iter()
            .map(|item| Line::styled(format!("  • {item}"), theme.text_style)),
    );
    lines.push(Line::default());
}

fn render_footer(f: &mut Frame, area: Rect, plan: &RenderPlan, theme: &Theme) {
    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let separator = Paragraph::new("─".repeat(area.width as usize)).style(theme.footer_style);
    f.render_widget(separator, footer_chunks[0]);

    let status = Paragraph::new(plan.footer.as_str())
        .style(theme.footer_style)
        .alignment(Alignment::Left);
    f.render_widget(status, footer_chunks[1]);
}

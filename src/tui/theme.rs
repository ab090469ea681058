use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub header_style: Style,
    pub subtitle_style: Style,
    pub footer_style: Style,
    pub label_style: Style,
    pub input_style: Style,
    pub input_focused_style: Style,
    pub placeholder_style: Style,
    pub button_style: Style,
    pub button_disabled_style: Style,
    pub error_style: Style,
    pub badge_positive_style: Style,
    pub badge_negative_style: Style,
    pub panel_title_style: Style,
    pub value_style: Style,
    pub breakdown_style: Style,
    pub text_style: Style,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            header_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            subtitle_style: Style::default().fg(Color::Gray),
            footer_style: Style::default().fg(Color::Cyan),
            label_style: Style::default().fg(Color::Gray),
            input_style: Style::default().fg(Color::White),
            input_focused_style: Style::default().fg(Color::LightBlue),
            placeholder_style: Style::default().fg(Color::DarkGray),
            button_style: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            button_disabled_style: Style::default().fg(Color::Gray).bg(Color::DarkGray),
            error_style: Style::default().fg(Color::LightRed),
            badge_positive_style: Style::default().fg(Color::Black).bg(Color::Green),
            badge_negative_style: Style::default().fg(Color::White).bg(Color::Red),
            panel_title_style: Style::default().fg(Color::Gray),
            value_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            breakdown_style: Style::default().fg(Color::LightBlue),
            text_style: Style::default().fg(Color::White),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            header_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            subtitle_style: Style::default().fg(Color::DarkGray),
            footer_style: Style::default().fg(Color::Blue),
            label_style: Style::default().fg(Color::DarkGray),
            input_style: Style::default().fg(Color::Black),
            input_focused_style: Style::default().fg(Color::Blue),
            placeholder_style: Style::default().fg(Color::Gray),
            button_style: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            button_disabled_style: Style::default().fg(Color::White).bg(Color::LightBlue),
            error_style: Style::default().fg(Color::Red),
            badge_positive_style: Style::default().fg(Color::Green).bg(Color::Black),
            badge_negative_style: Style::default().fg(Color::Red).bg(Color::Black),
            panel_title_style: Style::default().fg(Color::DarkGray),
            value_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            breakdown_style: Style::default().fg(Color::Blue),
            text_style: Style::default().fg(Color::Black),
        }
    }

    /// Unknown names fall back to the dark theme.
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}

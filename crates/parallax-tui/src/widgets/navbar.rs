use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, NAV_SECTIONS};
use super::ProgressRingWidget;

/// Width of the progress gauge at the right end of the bar
const GAUGE_WIDTH: u16 = 20;

pub struct NavbarWidget;

impl NavbarWidget {
    /// "experience" -> "Experience"
    pub fn label(id: &str) -> String {
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let nav = app.samples().nav.clone();

        // Bar turns solid once the page has scrolled
        let bar_bg = if nav.scrolled { theme.bg1 } else { theme.bg0 };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(GAUGE_WIDTH)])
            .split(area);

        let mut spans = vec![Span::styled(
            " ◆ parallax ",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )];
        for id in NAV_SECTIONS {
            let is_active = nav.active.as_deref() == Some(id);
            let style = if is_active {
                Style::default()
                    .fg(theme.active)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(theme.grey1)
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(Self::label(id), style));
        }

        let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bar_bg));
        frame.render_widget(paragraph, columns[0]);
        ProgressRingWidget::render(frame, columns[1], app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        assert_eq!(NavbarWidget::label("certifications"), "Certifications");
        assert_eq!(NavbarWidget::label(""), "");
    }
}

use parallax_core::scan::ScanState;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn status_text(app: &App) -> String {
        let samples = app.samples();
        let section = app
            .viewport()
            .page()
            .section_at(app.viewport().scroll_row())
            .map(|s| s.section.id)
            .unwrap_or("-");
        let scan = match app.scan.state() {
            ScanState::Scanning { progress } => format!("scanning {}%", progress),
            other => other.as_str().to_string(),
        };
        format!(
            " {} | {}% | scan: {} | samples: {}",
            section,
            samples.page_progress.percent(),
            scan,
            samples.samples_taken
        )
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let status_text = Self::status_text(app);

        let help_hint = " q:quit j/k:scroll n/p:section s:scan r:reset ";
        let padding_len = area
            .width
            .saturating_sub(status_text.chars().count() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

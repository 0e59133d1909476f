use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::app::App;

pub struct LoadingWidget;

impl LoadingWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        frame.render_widget(Block::default().style(Style::default().bg(theme.bg0)), area);

        let [row] = Layout::vertical([Constraint::Length(3)])
            .flex(Flex::Center)
            .areas(area);
        let [cell] = Layout::horizontal([Constraint::Percentage(50)])
            .flex(Flex::Center)
            .areas(row);

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(" Loading ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.grey0)),
            )
            .gauge_style(Style::default().fg(theme.blue).bg(theme.bg1))
            .label(format!("{}%", app.loading.value()))
            .ratio(app.loading.fraction().clamp(0.0, 1.0))
            .style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(gauge, cell);
    }
}

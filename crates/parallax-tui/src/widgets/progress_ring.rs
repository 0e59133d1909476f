use parallax_core::params::{ring_dash_offset, RING_CIRCUMFERENCE};
use parallax_core::Progress;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    widgets::LineGauge,
    Frame,
};

use crate::app::App;

pub struct ProgressRingWidget;

impl ProgressRingWidget {
    /// Filled share of the ring, recovered from its dash offset
    pub fn ratio(progress: Progress) -> f64 {
        let filled = 1.0 - ring_dash_offset(progress) / RING_CIRCUMFERENCE;
        filled.clamp(0.0, 1.0)
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let progress = app.samples().page_progress;

        let gauge = LineGauge::default()
            .ratio(Self::ratio(progress))
            .label(format!("{:>3}%", progress.percent()))
            .line_set(symbols::line::THICK)
            .style(Style::default().fg(theme.fg0).bg(theme.bg1).add_modifier(Modifier::BOLD))
            .filled_style(Style::default().fg(theme.blue))
            .unfilled_style(Style::default().fg(theme.bg2));
        frame.render_widget(gauge, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_tracks_progress() {
        assert_eq!(ProgressRingWidget::ratio(Progress::ZERO), 0.0);
        assert!((ProgressRingWidget::ratio(Progress::COMPLETE) - 1.0).abs() < 1e-9);
        assert!((ProgressRingWidget::ratio(Progress::new(0.42)) - 0.42).abs() < 1e-9);
    }
}

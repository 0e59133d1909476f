use parallax_core::particles::PALETTE;
use parallax_core::scan::ScanState;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, Borders,
    },
    Frame,
};

use crate::app::{App, SCAN_CANVAS};
use crate::theme::{parse_hex_color, Theme};

pub struct ScannerWidget;

impl ScannerWidget {
    pub fn caption(state: ScanState) -> String {
        match state {
            ScanState::Idle => " Press s to scan ".to_string(),
            ScanState::Scanning { progress } => format!(" Scanning {}% ", progress),
            ScanState::Success => " Access granted ".to_string(),
            ScanState::Error => " Access denied, press r ".to_string(),
        }
    }

    fn border_color(state: ScanState, theme: &Theme) -> Color {
        match state {
            ScanState::Idle => theme.grey0,
            ScanState::Scanning { .. } => theme.cyan,
            ScanState::Success => theme.success,
            ScanState::Error => theme.error,
        }
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let state = app.scan.state();
        let (width, height) = SCAN_CANVAS;

        // Canvas y grows upward; particle y grows downward
        let mut groups: Vec<Vec<(f64, f64)>> = vec![Vec::new(); PALETTE.len()];
        for particle in app.particles().particles() {
            groups[particle.color % PALETTE.len()].push((particle.x, height - particle.y));
        }
        let colors: Vec<Color> = PALETTE
            .iter()
            .map(|hex| parse_hex_color(hex).unwrap_or(theme.blue))
            .collect();
        let scan_y = match state {
            ScanState::Scanning { progress } => Some(height - height * progress as f64 / 100.0),
            _ => None,
        };

        let block = Block::default()
            .title(" Fingerprint ")
            .title_bottom(Self::caption(state))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Self::border_color(state, theme)))
            .style(Style::default().bg(theme.bg0));

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for (coords, color) in groups.iter().zip(&colors) {
                    ctx.draw(&Points {
                        coords,
                        color: *color,
                    });
                }
                if let Some(y) = scan_y {
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: y,
                        x2: width,
                        y2: y,
                        color: theme.cyan,
                    });
                }
            });
        frame.render_widget(canvas, area);
    }
}

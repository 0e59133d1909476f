use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;
use crate::widgets::{LoadingWidget, NavbarWidget, PageWidget, ScannerWidget, StatusBarWidget};

/// Whether the scanner panel is shown next to the page
pub fn shows_scanner(app: &App) -> bool {
    app.samples().scanner_revealed || app.scan.is_scanning()
}

pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();

    if app.is_loading() {
        LoadingWidget::render(frame, size, app);
        return;
    }

    // Navbar, page, status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(size);

    NavbarWidget::render(frame, main_layout[0], app);

    if shows_scanner(app) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_layout[1]);
        PageWidget::render(frame, columns[0], app);
        ScannerWidget::render(frame, columns[1], app);
    } else {
        PageWidget::render(frame, main_layout[1], app);
    }

    StatusBarWidget::render(frame, main_layout[2], app);
}

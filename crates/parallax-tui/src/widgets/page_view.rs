use parallax_core::DerivedVisualParams;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};

use crate::app::App;
use crate::page::{PlacedSection, PX_PER_ROW};

/// What a document row shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Blank,
    Title,
    Body,
}

/// Parallax offset in whole rows
pub fn row_shift(params: &DerivedVisualParams) -> i32 {
    (params.vertical_offset / PX_PER_ROW).round() as i32
}

/// Text of `doc_row` inside `placed`, with its content moved down by `shift`
///
/// Content shifted past the section edges is clipped.
pub fn section_row(placed: &PlacedSection, doc_row: u16, shift: i32) -> (&'static str, RowKind) {
    let section = &placed.section;
    let local = doc_row as i32 - placed.top as i32 - shift;
    let title_row = section.padding as i32;
    let body_start = title_row + 2;

    if doc_row < placed.top || doc_row >= placed.bottom() {
        return ("", RowKind::Blank);
    }
    if local == title_row {
        return (section.title, RowKind::Title);
    }
    let body_index = local - body_start;
    if body_index >= 0 {
        if let Some(text) = section.body.get(body_index as usize) {
            return (text, RowKind::Body);
        }
    }
    ("", RowKind::Blank)
}

pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let viewport = app.viewport();
        let samples = app.samples();
        let scroll = viewport.scroll_row();

        let lines: Vec<Line> = (0..area.height)
            .map(|y| {
                let doc_row = scroll.saturating_add(y);
                let Some(placed) = viewport.page().section_at(doc_row) else {
                    return Line::from("");
                };
                let sample = samples.section(placed.section.id);
                let (text, kind) = section_row(placed, doc_row, row_shift(&sample.params));
                let opacity = sample.params.opacity;
                let style = match kind {
                    RowKind::Blank => Style::default(),
                    RowKind::Title => Style::default()
                        .fg(theme.fade(theme.accent, opacity))
                        .add_modifier(Modifier::BOLD),
                    RowKind::Body => Style::default().fg(theme.fade(theme.fg1, opacity)),
                };
                Line::styled(format!("    {}", text), style)
            })
            .collect();

        let block = Block::default().style(Style::default().bg(theme.bg0));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Section;

    fn placed() -> PlacedSection {
        PlacedSection {
            section: Section::new("s", "Title", vec!["one", "two"]),
            top: 10,
        }
    }

    #[test]
    fn test_unshifted_layout() {
        let placed = placed();
        assert_eq!(section_row(&placed, 10, 0).1, RowKind::Blank);
        assert_eq!(section_row(&placed, 14, 0), ("Title", RowKind::Title));
        assert_eq!(section_row(&placed, 15, 0).1, RowKind::Blank);
        assert_eq!(section_row(&placed, 16, 0), ("one", RowKind::Body));
        assert_eq!(section_row(&placed, 17, 0), ("two", RowKind::Body));
        assert_eq!(section_row(&placed, 18, 0).1, RowKind::Blank);
    }

    #[test]
    fn test_shift_moves_content() {
        let placed = placed();
        assert_eq!(section_row(&placed, 16, 2), ("Title", RowKind::Title));
        assert_eq!(section_row(&placed, 12, -2), ("Title", RowKind::Title));
    }

    #[test]
    fn test_rows_outside_section_are_blank() {
        let placed = placed();
        assert_eq!(section_row(&placed, 9, -5).1, RowKind::Blank);
        assert_eq!(section_row(&placed, placed.bottom(), 0).1, RowKind::Blank);
    }

    #[test]
    fn test_row_shift_scales_pixels() {
        let params = DerivedVisualParams {
            vertical_offset: 50.0,
            opacity: 1.0,
        };
        assert_eq!(row_shift(&params), 3);
        assert_eq!(row_shift(&DerivedVisualParams::NEUTRAL), 0);
        let params = DerivedVisualParams {
            vertical_offset: -40.0,
            opacity: 1.0,
        };
        assert_eq!(row_shift(&params), -2);
    }
}

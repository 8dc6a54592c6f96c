//! Pad widget: the visible slice of the surface inside a border.

use super::styles::ViewerStyles;
use crate::view_state::PadSurface;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Renders the rows of a [`PadSurface`] that are on screen, with the rows
/// of the current line reversed.
pub struct PadView<'a> {
    surface: &'a PadSurface,
    styles: &'a ViewerStyles,
}

impl<'a> PadView<'a> {
    /// Widget over `surface`.
    pub fn new(surface: &'a PadSurface, styles: &'a ViewerStyles) -> Self {
        Self { surface, styles }
    }
}

impl Widget for PadView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.styles.border);
        let inner = block.inner(area);
        block.render(area, buf);

        let highlighted = self.surface.highlighted();
        let lines: Vec<Line> = self
            .surface
            .visible_rows()
            .take(usize::from(inner.height))
            .map(|(row, text)| {
                if highlighted.contains(&row) {
                    Line::styled(text, self.styles.cursor)
                } else {
                    Line::raw(text)
                }
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

//! Goto prompt widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Goto prompt widget.
/// Renders the typed address with a block cursor.
pub struct GotoInput<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> GotoInput<'a> {
    /// Create new GotoInput widget. `cursor` counts characters.
    pub fn new(text: &'a str, cursor: usize) -> Self {
        Self { text, cursor }
    }
}

impl Widget for GotoInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let before: String = self.text.chars().take(self.cursor).collect();
        let mut after = self.text.chars().skip(self.cursor);

        // Past the end the cursor sits on a blank cell
        let cursor_char = after.next().map_or_else(|| " ".to_string(), String::from);
        let after_text: String = after.collect();

        let line = Line::from(vec![
            Span::raw(before),
            Span::styled(
                cursor_char,
                Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(after_text),
        ]);

        Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Go to line (dec, 0x.., ..h) "),
            )
            .render(area, buf);
    }
}

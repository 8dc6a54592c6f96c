//! Screen layout rendering.
//!
//! Pure layout logic: title bar, pad, status bar, and whichever overlay the
//! current mode asks for.

use super::constants::{GOTO_INPUT_HEIGHT, GOTO_INPUT_WIDTH, STATUS_BAR_HEIGHT, TITLE_BAR_HEIGHT};
use super::goto_input::GotoInput;
use super::help::render_help_overlay;
use super::pad::PadView;
use super::styles::ViewerStyles;
use crate::state::{AppState, HexSession, Mode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::io::{Read, Seek};

/// Render the whole screen for `state`.
pub fn render_layout<R: Read + Seek>(frame: &mut Frame, state: &AppState<R>, styles: &ViewerStyles) {
    if let Mode::Failed { message } = &state.mode {
        render_failure(frame, message, styles);
        return;
    }

    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame.area());

    let title_area = vertical_chunks[0];
    let pad_area = vertical_chunks[1];
    let status_area = vertical_chunks[2];

    let Some(session) = state.session() else {
        return;
    };

    frame.render_widget(
        Paragraph::new(Line::from(format!(" {}", session.name()))).style(styles.title),
        title_area,
    );
    frame.render_widget(PadView::new(session.surface(), styles), pad_area);
    render_status_bar(frame, status_area, state, styles);

    match &state.mode {
        Mode::GotoPrompt { text, cursor } => {
            let popup = goto_popup_area(pad_area);
            frame.render_widget(Clear, popup);
            frame.render_widget(GotoInput::new(text, *cursor), popup);
        }
        Mode::Help => render_help_overlay(frame, styles),
        Mode::Viewing | Mode::Failed { .. } => {}
    }
}

/// Status line for `session`: position, loaded window, decoder, previews.
pub fn status_text<R: Read + Seek>(session: &HexSession<R>) -> String {
    let position = match (session.current_line(), session.last_line()) {
        (Some(line), Some(last)) => format!(
            "line {line}/{last} @ {:08X}",
            line * session.bytes_per_line() as u64
        ),
        _ => "empty file".to_string(),
    };

    format!(
        " {position} │ loaded {} │ decoder {} │ previews {} │ ? help",
        session.file_window(),
        session.decoder_name(),
        session.preview_lines().len()
    )
}

fn render_status_bar<R: Read + Seek>(
    frame: &mut Frame,
    area: Rect,
    state: &AppState<R>,
    styles: &ViewerStyles,
) {
    // An error from the last action replaces the position summary
    let line = match (&state.status_message, state.session()) {
        (Some(message), _) => Line::from(Span::styled(format!(" {message}"), styles.error)),
        (None, Some(session)) => Line::from(status_text(session)),
        (None, None) => Line::default(),
    };
    frame.render_widget(Paragraph::new(line).style(styles.status), area);
}

fn render_failure(frame: &mut Frame, message: &str, styles: &ViewerStyles) {
    let text = vec![
        Line::from(Span::styled(message.to_string(), styles.error)),
        Line::default(),
        Line::from(Span::styled("press any key to quit", styles.muted)),
    ];
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title(" hexview ")
                .borders(Borders::ALL)
                .border_style(styles.border),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, frame.area());
}

/// Bottom-left corner of the pad, inside its border.
fn goto_popup_area(pad_area: Rect) -> Rect {
    let height = GOTO_INPUT_HEIGHT.min(pad_area.height);
    let width = GOTO_INPUT_WIDTH.min(pad_area.width.saturating_sub(2));
    Rect {
        x: pad_area.x + 1,
        y: pad_area.y + pad_area.height.saturating_sub(height + 1),
        width,
        height,
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;

//! Address suggestion popup rendering

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use unicode_width::UnicodeWidthStr;

use super::state::App;
use crate::widgets::popup;

const MAX_VISIBLE_SUGGESTIONS: usize = 8;
const MAX_POPUP_WIDTH: usize = 70;
const MIN_POPUP_WIDTH: usize = 20;
const POPUP_BORDER_HEIGHT: u16 = 2;
// Borders plus the "► " marker
const POPUP_PADDING: u16 = 4;

/// Render the suggestion list under (or above) the focused address field
pub fn render_popup(app: &App, frame: &mut Frame, anchor: Rect, bounds: Rect) {
    let suggestions = app.suggestions();
    if suggestions.is_empty() {
        return;
    }

    let visible_count = suggestions.len().min(MAX_VISIBLE_SUGGESTIONS);
    let popup_height = (visible_count as u16) + POPUP_BORDER_HEIGHT;
    let text_width = suggestions
        .iter()
        .take(MAX_VISIBLE_SUGGESTIONS)
        .map(|s| s.formatted.width())
        .max()
        .unwrap_or(MIN_POPUP_WIDTH)
        .clamp(MIN_POPUP_WIDTH, MAX_POPUP_WIDTH);
    let popup_width = (text_width as u16) + POPUP_PADDING;

    let popup_area = popup::popup_near_anchor(anchor, bounds, popup_width, popup_height);
    if popup_area.height <= POPUP_BORDER_HEIGHT {
        return;
    }

    let items: Vec<ListItem> = suggestions
        .iter()
        .take(MAX_VISIBLE_SUGGESTIONS)
        .enumerate()
        .map(|(i, suggestion)| {
            let line = if app.suggestion_index == Some(i) {
                Line::from(Span::styled(
                    format!("► {}", suggestion.formatted),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(
                    format!("  {}", suggestion.formatted),
                    Style::default().fg(Color::White).bg(Color::Black),
                ))
            };
            ListItem::new(line)
        })
        .collect();

    // Clear the background area to prevent transparency
    popup::clear_area(frame, popup_area);

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Addresses ")
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(list, popup_area);
}

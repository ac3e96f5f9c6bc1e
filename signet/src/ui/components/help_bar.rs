//! Shared help bar component for bottom key hints.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;
use crate::view::KeyHint;

/// Render key hints as `key action · key action` in a bordered block
pub fn render_help_bar(f: &mut Frame, area: Rect, hints: &[KeyHint]) {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ·  ", theme::help_text_style()));
        }
        spans.push(Span::styled(hint.key, theme::key_style()));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            theme::help_text_style(),
        ));
    }

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, area);
}

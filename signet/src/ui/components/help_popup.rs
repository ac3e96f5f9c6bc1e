use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

use crate::session::{AuthPhase, SessionState};
use crate::ui::{layouts, theme};

const TITLE: &str = " Help (press ? or Esc to close) ";
const KEY_COLUMN: usize = 12;

pub fn render_help_popup(f: &mut Frame, session: &SessionState) {
    let items = help_items(session);
    let area = layouts::centered_rect(popup_width(&items), items.len() as u16 + 2, f.area());

    f.render_widget(Clear, area);
    let block = Block::default()
        .title(TITLE)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(theme::accent_border_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<ListItem> = items
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:width$}", key, width = KEY_COLUMN), theme::key_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(lines).style(Style::default().fg(Color::White));
    f.render_widget(list, inner);
}

/// Widest row or the title, plus borders and padding
fn popup_width(items: &[(&str, &str)]) -> u16 {
    let widest = items
        .iter()
        .map(|(_, description)| KEY_COLUMN + description.chars().count())
        .max()
        .unwrap_or(0);
    (widest.max(TITLE.chars().count()) + 4) as u16
}

fn help_items(session: &SessionState) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    match &session.phase {
        AuthPhase::Initializing => {}
        AuthPhase::Authenticated { .. } => {
            items.push(("L", "Sign out"));
        }
        phase => {
            items.push(("Tab", "Switch sign-in method"));
            items.push(("←/→", "Choose browser or device code"));
            items.push(("Enter", "Start sign-in"));
            if matches!(phase, AuthPhase::DevicePending { .. }) {
                items.push(("o", "Open the verification page"));
                items.push(("Esc", "Cancel device sign-in"));
            }
        }
    }

    items.push(("", ""));
    items.push(("--- Global ---", ""));
    items.push(("?", "Toggle this help"));
    items.push(("q / Ctrl-c", "Quit application"));

    items
}

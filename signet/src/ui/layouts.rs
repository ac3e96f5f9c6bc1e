//! Reusable layout builders for consistent screen structure.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{
    ERROR_HEIGHT, HELP_BAR_HEIGHT, METHOD_TABS_HEIGHT, SCREEN_MARGIN, TITLE_HEIGHT,
};

/// Areas of the sign-in screen, top to bottom
pub struct SignInAreas {
    pub title: Rect,
    pub tabs: Rect,
    pub content: Rect,
    pub error: Rect,
    pub help: Rect,
}

/// Sign-in layout; the tab and error rows collapse when they have nothing to show
pub fn sign_in_layout(area: Rect, with_tabs: bool, with_error: bool) -> SignInAreas {
    let tabs_height = if with_tabs { METHOD_TABS_HEIGHT } else { 0 };
    let error_height = if with_error { ERROR_HEIGHT } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(SCREEN_MARGIN)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Length(tabs_height),
            Constraint::Min(6),
            Constraint::Length(error_height),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);

    SignInAreas {
        title: chunks[0],
        tabs: chunks[1],
        content: chunks[2],
        error: chunks[3],
        help: chunks[4],
    }
}

/// Split a title area into title text and loading indicator.
///
/// Returns (title_text_area, loading_indicator_area)
pub fn title_with_loading(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    (chunks[0], chunks[1])
}

/// Center a `width` x `height` box in `area`, shrunk to fit when the terminal is smaller
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_small_terminal() {
        let area = Rect::new(0, 0, 30, 8);

        assert_eq!(centered_rect(20, 4, area), Rect::new(5, 2, 20, 4));
        assert_eq!(centered_rect(50, 20, area), area);
    }

    #[test]
    fn test_collapsed_rows_give_space_to_content() {
        let area = Rect::new(0, 0, 80, 30);
        let full = sign_in_layout(area, true, true);
        let bare = sign_in_layout(area, false, false);

        assert_eq!(bare.tabs.height, 0);
        assert_eq!(bare.error.height, 0);
        assert_eq!(
            bare.content.height,
            full.content.height + METHOD_TABS_HEIGHT + ERROR_HEIGHT
        );
    }
}

use ratatui::{layout::Rect, Frame};
use throbber_widgets_tui::ThrobberState;

/// Render the throbber in the top-right corner while something is in flight
pub fn render_loading_indicator(f: &mut Frame, area: Rect, busy: bool, throbber: &ThrobberState) {
    if !busy {
        return;
    }

    let simple =
        throbber_widgets_tui::Throbber::default().throbber_set(throbber_widgets_tui::BRAILLE_EIGHT);
    f.render_stateful_widget(simple, area, &mut throbber.clone());
}

pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;

use chrono::{DateTime, Utc};
use ratatui::Frame;

use crate::state::AppState;
use crate::view;

/// Pure render entry point. Never mutates state.
pub fn render_app(f: &mut Frame, state: &AppState, now: DateTime<Utc>) {
    let view = view::render(state.session(), state.method, now);
    screens::sign_in_screen::render(f, &view, &state.throbber);

    if state.help_visible {
        components::help_popup::render_help_popup(f, state.session());
    }
}

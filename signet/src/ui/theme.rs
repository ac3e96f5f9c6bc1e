//! Centralized theme constants and style functions for consistent UI styling.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Colors
// =============================================================================

/// Color for help text and secondary information
pub const COLOR_HELP_TEXT: Color = Color::Gray;

/// Color for screen titles and accent text
pub const COLOR_TITLE: Color = Color::Cyan;

/// Color for loading/status messages
pub const COLOR_LOADING: Color = Color::Yellow;

/// Color for the device code the user types elsewhere
pub const COLOR_USER_CODE: Color = Color::Green;

pub const COLOR_ERROR: Color = Color::Red;

/// Background for the selected sign-in method
pub const COLOR_SELECTION_BG: Color = Color::DarkGray;

pub const COLOR_BORDER_ACCENT: Color = Color::Cyan;

// =============================================================================
// Layout Constants
// =============================================================================

/// Standard margin around screen content
pub const SCREEN_MARGIN: u16 = 2;

/// Height of the title/header area
pub const TITLE_HEIGHT: u16 = 1;

/// Height of the method selector tabs
pub const METHOD_TABS_HEIGHT: u16 = 3;

/// Height of the error banner
pub const ERROR_HEIGHT: u16 = 3;

/// Height of the help bar at the bottom
pub const HELP_BAR_HEIGHT: u16 = 3;

// =============================================================================
// Style Functions
// =============================================================================

pub fn selection_style() -> Style {
    Style::default()
        .bg(COLOR_SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}

/// Style for keys in help listings
pub fn key_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn help_text_style() -> Style {
    Style::default().fg(COLOR_HELP_TEXT)
}

pub fn title_style() -> Style {
    Style::default()
        .fg(COLOR_TITLE)
        .add_modifier(Modifier::BOLD)
}

pub fn loading_style() -> Style {
    Style::default().fg(COLOR_LOADING)
}

pub fn user_code_style() -> Style {
    Style::default()
        .fg(COLOR_USER_CODE)
        .add_modifier(Modifier::BOLD)
}

pub fn error_style() -> Style {
    Style::default().fg(COLOR_ERROR)
}

pub fn error_border_style() -> Style {
    Style::default()
        .fg(COLOR_ERROR)
        .add_modifier(Modifier::BOLD)
}

pub fn accent_border_style() -> Style {
    Style::default().fg(COLOR_BORDER_ACCENT)
}

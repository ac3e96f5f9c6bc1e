use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};
use throbber_widgets_tui::ThrobberState;

use crate::session::AuthMethod;
use crate::ui::{
    components::{help_bar, loading_indicator},
    layouts, theme,
};
use crate::view::{Body, DeviceCodeView, ViewModel, Waiting};

const METHODS: [AuthMethod; 2] = [AuthMethod::Browser, AuthMethod::Device];

pub fn render(f: &mut Frame, view: &ViewModel, throbber: &ThrobberState) {
    let selected = match &view.body {
        Body::SignIn { selected, .. } => Some(*selected),
        _ => None,
    };
    let areas = layouts::sign_in_layout(f.area(), selected.is_some(), view.error.is_some());

    render_title(f, areas.title, view, throbber);
    if let Some(selected) = selected {
        render_method_tabs(f, areas.tabs, selected);
    }
    match &view.body {
        Body::SignIn { selected, waiting } => {
            render_sign_in(f, areas.content, *selected, waiting.as_ref())
        }
        Body::SignedIn {
            display_name,
            email,
        } => render_panel(
            f,
            areas.content,
            "Session",
            signed_in_lines(display_name, email.as_deref()),
        ),
        Body::Loading => render_panel(
            f,
            areas.content,
            "Session",
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Checking for an existing session...",
                    theme::loading_style(),
                )),
            ],
        ),
    }
    if let Some(error) = &view.error {
        render_error(f, areas.error, error);
    }
    help_bar::render_help_bar(f, areas.help, &view.hints);
}

fn render_title(f: &mut Frame, area: Rect, view: &ViewModel, throbber: &ThrobberState) {
    let (text_area, indicator_area) = layouts::title_with_loading(area);
    f.render_widget(
        Paragraph::new(Span::styled("signet", theme::title_style())),
        text_area,
    );
    loading_indicator::render_loading_indicator(f, indicator_area, view.busy, throbber);
}

fn render_method_tabs(f: &mut Frame, area: Rect, selected: AuthMethod) {
    let titles = METHODS.iter().map(|m| m.display_name());
    let index = METHODS.iter().position(|m| *m == selected).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(index)
        .highlight_style(theme::selection_style())
        .block(Block::default().borders(Borders::ALL).title("Sign in with"));

    f.render_widget(tabs, area);
}

fn render_sign_in(f: &mut Frame, area: Rect, selected: AuthMethod, waiting: Option<&Waiting>) {
    let lines = match waiting {
        None => idle_lines(selected),
        Some(Waiting::Starting(method)) => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Starting {} sign-in...", method.display_name().to_lowercase()),
                theme::loading_style(),
            )),
        ],
        Some(Waiting::Browser) => vec![
            Line::from(""),
            Line::from("Finish signing in in the browser window that just opened."),
            Line::from(Span::styled(
                "This screen updates on its own once you are done.",
                theme::help_text_style(),
            )),
        ],
        Some(Waiting::DeviceCodeRequested) => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Requesting a device code...",
                theme::loading_style(),
            )),
        ],
        Some(Waiting::DeviceCode(code)) => device_code_lines(code),
    };

    render_panel(f, area, "Status", lines);
}

fn idle_lines(selected: AuthMethod) -> Vec<Line<'static>> {
    let description = match selected {
        AuthMethod::Browser => "Opens your default browser to sign in.",
        AuthMethod::Device => "Shows a code to enter on another device.",
    };
    vec![
        Line::from(""),
        Line::from("You are not signed in."),
        Line::from(Span::styled(description, theme::help_text_style())),
    ]
}

fn device_code_lines(code: &DeviceCodeView) -> Vec<Line<'static>> {
    let expiry = if code.expired {
        Span::styled("Expired", theme::error_style())
    } else {
        Span::styled(
            format!("Expires in {}", code.countdown),
            theme::help_text_style(),
        )
    };

    vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Go to "),
            Span::styled(code.verification_uri.clone(), theme::title_style()),
        ]),
        Line::from("and enter this code:"),
        Line::from(""),
        Line::from(Span::styled(code.user_code.clone(), theme::user_code_style())),
        Line::from(""),
        Line::from(expiry),
    ]
}

fn signed_in_lines(display_name: &str, email: Option<&str>) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Signed in as "),
            Span::styled(display_name.to_string(), theme::title_style()),
        ]),
    ];
    if let Some(email) = email {
        lines.push(Line::from(Span::styled(
            email.to_string(),
            theme::help_text_style(),
        )));
    }
    lines
}

fn render_panel(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    f.render_widget(paragraph, area);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(Span::styled(message.to_string(), theme::error_style()))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::error_border_style()),
        );

    f.render_widget(paragraph, area);
}

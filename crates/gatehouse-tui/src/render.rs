//! Pure view functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference and draw to a
//! ratatui `Frame`. They never mutate state or return effects.

use gatehouse_core::session::View;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::state::AppState;
use crate::{home, login};

const TITLE: &str = "Gatehouse";

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(app, frame, header);

    match app.view() {
        View::Login => login::render_login(frame, body, &app.login),
        View::Home => home::render_home(frame, body),
    }

    render_footer(app, frame, footer);
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let bar = Style::default().bg(Color::Rgb(30, 30, 40));
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(14)]).areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {TITLE}"),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )))
        .style(bar),
        left,
    );

    let hint = if app.authenticated {
        Line::from(vec![
            Span::styled("Logout ", Style::default().fg(Color::White)),
            Span::styled("(l) ", Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::from("")
    };
    frame.render_widget(
        Paragraph::new(hint).alignment(Alignment::Right).style(bar),
        right,
    );
}

fn render_footer(app: &AppState, frame: &mut Frame, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);

    let line = if let Some(notice) = &app.notice {
        Line::from(Span::styled(
            format!(" {}", notice.text),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        let hints: &[(&str, &str)] = match app.view() {
            View::Login => &[
                ("Tab", "next field"),
                ("Enter", "login"),
                ("Ctrl+U", "clear"),
                ("Esc", "quit"),
            ],
            View::Home => &[("l", "logout"), ("Esc", "quit")],
        };
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" · ", dim));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
            spans.push(Span::styled(format!(" {action}"), dim));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line), area);
}

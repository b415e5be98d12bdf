use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::{centered_rect, render_card};

const CARD_WIDTH: u16 = 44;
const CARD_HEIGHT: u16 = 7;

/// Renders the authenticated home card.
pub fn render_home(frame: &mut Frame, area: Rect) {
    let card = centered_rect(area, CARD_WIDTH, CARD_HEIGHT);
    let inner = render_card(frame, card, "Home", Color::Green);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome back!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("l", Style::default().fg(Color::Yellow)),
            Span::styled(" to log out", Style::default().fg(Color::DarkGray)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

//! Login feature view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{Focus, LoginState};
use crate::common::{
    ButtonState, centered_rect, display_width, mask, render_button, render_card, tail_fit,
};

const CARD_WIDTH: u16 = 52;
const CARD_HEIGHT: u16 = 11;

const FIELD_BG: Color = Color::Rgb(38, 38, 46);
const INVALID_BG: Color = Color::Rgb(70, 24, 24);

/// Renders the login card centered in `area`.
pub fn render_login(frame: &mut Frame, area: Rect, login: &LoginState) {
    let card = centered_rect(area, CARD_WIDTH, CARD_HEIGHT);
    let inner = render_card(frame, card, "Login", Color::Magenta);

    let [
        email_label,
        email_input,
        _,
        password_label,
        password_input,
        _,
        button,
    ] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(Rect {
        y: inner.y + 1,
        height: inner.height.saturating_sub(1),
        ..inner
    });

    let form = &login.form;

    render_field(
        frame,
        email_label,
        email_input,
        &FieldView {
            label: "E-Mail",
            value: &form.email().value,
            invalid: form.email().validity.is_invalid(),
            focused: login.focus == Focus::Email,
            masked: false,
        },
    );
    render_field(
        frame,
        password_label,
        password_input,
        &FieldView {
            label: "Password",
            value: &form.password().value,
            invalid: form.password().validity.is_invalid(),
            focused: login.focus == Focus::Password,
            masked: true,
        },
    );

    render_button(
        frame,
        button,
        "Login",
        ButtonState {
            disabled: !form.is_valid(),
            focused: login.focus == Focus::Submit,
        },
    );
}

struct FieldView<'a> {
    label: &'a str,
    value: &'a str,
    invalid: bool,
    focused: bool,
    masked: bool,
}

fn render_field(frame: &mut Frame, label_area: Rect, input_area: Rect, field: &FieldView<'_>) {
    let label_style = if field.invalid {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if field.focused {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(field.label, label_style))),
        label_area,
    );

    let shown = if field.masked {
        mask(field.value)
    } else {
        field.value.to_string()
    };
    // One column stays free for the cursor.
    let visible = tail_fit(&shown, input_area.width.saturating_sub(2) as usize);

    let input_style = if field.invalid {
        Style::default().fg(Color::Red).bg(INVALID_BG)
    } else {
        Style::default().fg(Color::White).bg(FIELD_BG)
    };
    frame.render_widget(
        Paragraph::new(format!(" {visible}")).style(input_style),
        input_area,
    );

    if field.focused {
        let x = input_area.x + 1 + display_width(visible) as u16;
        frame.set_cursor_position(Position::new(
            x.min(input_area.right().saturating_sub(1)),
            input_area.y,
        ));
    }
}

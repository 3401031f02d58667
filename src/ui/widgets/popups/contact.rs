use crate::contact::{ContactForm, Field, FormState};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

pub fn render_contact_popup(f: &mut Frame, form: &ContactForm) {
    let popup_width = (f.area().width as f32 * 0.6) as u16;
    // Label, input and error row per field, plus the send row
    let popup_height = (Field::ALL.len() as u16 * 3 + 4).min(f.area().height);

    let popup_area = Rect {
        x: (f.area().width.saturating_sub(popup_width)) / 2,
        y: (f.area().height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    };
    f.render_widget(Clear, popup_area);

    let input_width = popup_width.saturating_sub(6) as usize;
    let mut lines = Vec::new();

    for field in Field::ALL {
        let state = form.field(field);
        let focused = form.focused() == field;

        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(field.label(), label_style)));

        // Show the tail of long input so the cursor stays visible
        let chars: Vec<char> = state.value.chars().collect();
        let skip = chars.len().saturating_sub(input_width.saturating_sub(1));
        let visible: String = chars[skip..].iter().collect();
        let cursor = if focused { "█" } else { "" };
        let border = if state.error.is_some() {
            Color::Red
        } else {
            Color::DarkGray
        };
        lines.push(Line::from(vec![
            Span::styled("› ", Style::default().fg(border)),
            Span::raw(visible),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]));

        lines.push(match state.error {
            Some(error) => Line::from(Span::styled(error, Style::default().fg(Color::Red))),
            None => Line::raw(""),
        });
    }

    let send = match form.state() {
        FormState::Editing => Span::styled(
            "[ Send Message ]",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        FormState::Sending => Span::styled("Sending...", Style::default().fg(Color::Yellow)),
    };
    lines.push(Line::from(send).alignment(Alignment::Center));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Get in touch ")
            .title_bottom(" Tab: next field · Enter: send · Esc: close ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, popup_area);
}

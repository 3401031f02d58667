use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn heading(text: &str) -> Line<'_> {
    Line::from(vec![Span::styled(
        text,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

pub fn render_help_popup(f: &mut Frame) {
    // Calculate popup size (70% width, 80% height)
    let popup_width = (f.area().width as f32 * 0.7) as u16;
    let popup_height = (f.area().height as f32 * 0.8) as u16;

    let popup_x = (f.area().width.saturating_sub(popup_width)) / 2;
    let popup_y = (f.area().height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect {
        x: popup_x,
        y: popup_y,
        width: popup_width,
        height: popup_height,
    };

    let help_text = vec![
        heading("SCROLLING"),
        Line::from(""),
        Line::from("  j / k              Scroll down/up one line"),
        Line::from("  Mouse wheel        Scroll three lines"),
        Line::from("  PgDn / PgUp        Scroll a page"),
        Line::from("  Home / End         Top/bottom of the page"),
        Line::from("  ↓ / ↑              Next/previous section"),
        Line::from("  1-9 / click link   Jump to a navbar section"),
        Line::from(""),
        heading("PAGE"),
        Line::from(""),
        Line::from("  Click button       Run it (CV, contact, back to top)"),
        Line::from("  Click Tech stack   Open/close a project's details"),
        Line::from("  c                  Open the contact form"),
        Line::from("  d                  Download CV"),
        Line::from("  Esc                Close details and popups"),
        Line::from(""),
        heading("CONTACT FORM"),
        Line::from(""),
        Line::from("  Tab / Shift-Tab    Next/previous field"),
        Line::from("  Enter              Send"),
        Line::from(""),
        heading("APPLICATION"),
        Line::from(""),
        Line::from("  ?                  Toggle this help"),
        Line::from("  q / Ctrl-c         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press Esc or ? to close",
            Style::default().fg(Color::Gray),
        )]),
    ];

    f.render_widget(Clear, popup_area);
    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

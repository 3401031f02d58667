//! Full-screen splash shown while the page "loads"

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Spinner animation styles
#[derive(Debug, Clone, Copy)]
pub enum SpinnerStyle {
    /// Braille dots: ⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏
    Dots,
}

impl SpinnerStyle {
    fn frames(&self) -> &'static [&'static str] {
        match self {
            Self::Dots => &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
        }
    }

    fn frame_at(&self, elapsed_ms: u64) -> &'static str {
        let frames = self.frames();
        frames[(elapsed_ms / 80) as usize % frames.len()]
    }
}

pub struct SplashWidget<'a> {
    style: SpinnerStyle,
    owner: &'a str,
    tagline: &'a str,
}

impl<'a> SplashWidget<'a> {
    pub fn new(owner: &'a str, tagline: &'a str) -> Self {
        Self {
            style: SpinnerStyle::Dots,
            owner,
            tagline,
        }
    }

    /// Cover the whole frame. `elapsed_ms` drives the spinner.
    pub fn render(&self, f: &mut Frame, elapsed_ms: u64) {
        let area = f.area();
        f.render_widget(Clear, area);
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 18, 24))),
            area,
        );

        let spinner = self.style.frame_at(elapsed_ms);
        let lines = vec![
            Line::from(Span::styled(
                self.owner,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(self.tagline, Style::default().fg(Color::Gray))),
            Line::raw(""),
            Line::from(vec![
                Span::styled(
                    spinner,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled("press any key", Style::default().fg(Color::DarkGray)),
            ]),
        ];

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        f.render_widget(paragraph, centered_rect(60, 6, area));
    }
}

/// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

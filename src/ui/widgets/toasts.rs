use crate::toast::{ToastKind, Toasts};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const TOAST_WIDTH: u16 = 40;

/// Stack toasts in the top-right corner of `area`, newest lowest
pub fn render_toasts(f: &mut Frame, toasts: &Toasts, area: Rect) {
    let width = TOAST_WIDTH.min(area.width.saturating_sub(2));
    let mut y = area.y;

    for toast in toasts.iter() {
        let body_width = width.saturating_sub(4).max(1) as usize;
        let height = textwrap::wrap(&toast.message, body_width).len() as u16 + 2;
        if y + height > area.bottom() {
            break;
        }

        let (icon, color) = match toast.kind {
            ToastKind::Success => ("✓", Color::Green),
            ToastKind::Error => ("✗", Color::Red),
            ToastKind::Info => ("ℹ", Color::Cyan),
        };
        let mut style = Style::default().fg(color);
        // Leaving toasts slide one column right
        let mut x = area.right().saturating_sub(width + 1);
        if toast.leaving {
            style = style.add_modifier(Modifier::DIM);
            x += 1;
        }

        let popup = Rect {
            x,
            y,
            width: width.min(area.right().saturating_sub(x)),
            height,
        };
        f.render_widget(Clear, popup);
        let paragraph = Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", icon), style.add_modifier(Modifier::BOLD)),
            Span::raw(toast.message.as_str()),
        ]))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(style));
        f.render_widget(paragraph, popup);

        y += height;
    }
}

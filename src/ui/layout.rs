use crate::app::AppState;
use crate::constants::{NAVBAR_HEIGHT, PAGE_MARGIN_WIDTH};
use crate::navigation::NavbarStyle;
use crate::page::{LineKind, PageLine};
use crate::reveal::parallax_offset;
use crate::types::UiMode;
use crate::ui::widgets::popups::contact::render_contact_popup;
use crate::ui::widgets::popups::help::render_help_popup;
use crate::ui::widgets::splash::SplashWidget;
use crate::ui::widgets::toasts::render_toasts;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const ACCENT: Color = Color::Rgb(99, 179, 237);

pub fn render(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(NAVBAR_HEIGHT), // Navbar
            Constraint::Min(0),                // Page
        ])
        .split(f.area());

    render_page(f, app, chunks[1]);
    render_decorations(f.buffer_mut(), app, chunks[1]);
    render_navbar(f, app, chunks[0]);

    if app.reveal.scroll_top_visible() {
        let area = scroll_top_button_area(f.area().width, f.area().height);
        let button = Paragraph::new(" ↑ Top ")
            .style(Style::default().fg(Color::Black).bg(ACCENT));
        f.render_widget(button, area);
    }

    render_particles(f.buffer_mut(), app);
    render_toasts(f, &app.toasts, chunks[1]);

    match app.ui_mode {
        UiMode::Normal => {}
        UiMode::Help => render_help_popup(f),
        UiMode::ContactForm => render_contact_popup(f, &app.contact),
    }

    if app.splash.is_visible() {
        SplashWidget::new(&app.portfolio.owner, &app.portfolio.tagline)
            .render(f, app.now_ms().saturating_sub(app.splash.shown_at_ms()));
    }
}

/// Bottom-right corner cell run of the scroll-to-top button
pub fn scroll_top_button_area(width: u16, height: u16) -> Rect {
    let button_width = 7;
    Rect {
        x: width.saturating_sub(button_width + 2),
        y: height.saturating_sub(2),
        width: button_width.min(width),
        height: 1.min(height),
    }
}

fn render_navbar(f: &mut Frame, app: &AppState, area: Rect) {
    let nav = app.navigator.surface();
    let base = match nav.style() {
        NavbarStyle::Translucent => Style::default(),
        NavbarStyle::Solid => Style::default().bg(Color::Rgb(30, 32, 40)),
    };
    f.buffer_mut().set_style(area, base);

    let metrics = app.config.cells;
    let buf = f.buffer_mut();

    buf.set_string(
        area.x + 1,
        area.y,
        &app.portfolio.owner,
        base.fg(Color::White).add_modifier(Modifier::BOLD),
    );

    for (idx, link) in app.navigator.links().iter().enumerate() {
        let Some(bounds) = nav.bounds(idx) else {
            continue;
        };
        let column = area.x + (bounds.left / metrics.cell_width_px) as u16;
        let style = if nav.is_active(idx) {
            base.fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            base.fg(Color::Gray)
        };
        buf.set_string(column, area.y, format!(" {} ", link.label), style);
    }

    // Underline sits on the second navbar row
    if let (Some(indicator), Some(menu)) = (nav.indicator(), nav.menu()) {
        if area.height > 1 {
            let column = ((menu.left + indicator.left) / metrics.cell_width_px) as u16;
            let width = (indicator.width / metrics.cell_width_px) as usize;
            buf.set_string(
                area.x + column,
                area.y + 1,
                "▔".repeat(width),
                base.fg(ACCENT),
            );
        }
    }
}

fn render_page(f: &mut Frame, app: &AppState, area: Rect) {
    let now = app.now_ms();
    let start = app.viewport.scroll_offset;
    let end = (start + area.height as usize).min(app.layout.total_rows());

    let lines: Vec<Line> = app.layout.lines[start.min(end)..end]
        .iter()
        .map(|line| page_line(app, line, now))
        .collect();

    let margin = PAGE_MARGIN_WIDTH as u16;
    let inner = Rect {
        x: area.x + margin.min(area.width),
        width: area.width.saturating_sub(margin * 2),
        ..area
    };
    f.render_widget(Paragraph::new(lines), inner);
}

fn page_line<'a>(app: &'a AppState, line: &'a PageLine, now: u64) -> Line<'a> {
    // Revealable elements stay blank until revealed, then fade in
    let mut fade = Style::default();
    if let Some(key) = line.element {
        let revealable = app
            .layout
            .element(key)
            .is_some_and(|element| element.kind.reveals());
        if revealable {
            let progress = app.reveal.progress(key, now);
            if progress == 0.0 {
                return Line::raw("");
            }
            if progress < 1.0 {
                fade = fade.add_modifier(Modifier::DIM);
            }
        }
    }

    let text = line.text.as_str();
    match &line.kind {
        LineKind::Blank => Line::raw(""),
        LineKind::Hero => Line::styled(
            text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        LineKind::Tagline => Line::styled(text, Style::default().fg(ACCENT)),
        LineKind::SectionTitle => Line::styled(
            text,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ),
        LineKind::Text => Line::raw(text),
        LineKind::CardTitle | LineKind::ProjectTitle => Line::styled(
            text,
            fade.fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        LineKind::CardBody | LineKind::ProjectBody => Line::styled(text, fade.fg(Color::Gray)),
        LineKind::Skill { level } => skill_line(text, *level, fade),
        LineKind::TechToggle { open } => {
            let (marker, style) = if *open {
                ("▾", fade.fg(ACCENT).add_modifier(Modifier::BOLD))
            } else {
                ("▸", fade.fg(Color::Gray))
            };
            Line::styled(format!("  {} {}", marker, text), style)
        }
        LineKind::TechDetail => Line::styled(text, fade.fg(Color::Gray)),
        LineKind::Image { name } => {
            let loaded = line
                .element
                .is_some_and(|key| app.lazy_images.is_loaded(key));
            if loaded {
                Line::styled(
                    format!("  ▌ {} ", name),
                    Style::default().fg(Color::Black).bg(Color::Rgb(70, 90, 120)),
                )
            } else {
                Line::styled("  ░░░░░░░░░░░░░░░░", Style::default().fg(Color::DarkGray))
            }
        }
        LineKind::Contact => Line::styled(text, fade.fg(Color::White)),
        LineKind::Button => Line::styled(
            text,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        LineKind::Footer => Line::styled(text, Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
    }
}

fn skill_line(name: &str, level: u8, style: Style) -> Line<'_> {
    let bar_width = 20;
    let filled = bar_width * level as usize / 100;
    Line::from(vec![
        Span::styled(format!("{:<24}", name), style.fg(Color::White)),
        Span::styled("█".repeat(filled), style.fg(ACCENT)),
        Span::styled("░".repeat(bar_width - filled), style.fg(Color::DarkGray)),
        Span::styled(format!(" {}%", level), style.fg(Color::Gray)),
    ])
}

fn render_decorations(buf: &mut Buffer, app: &AppState, area: Rect) {
    let metrics = app.config.cells;
    let scroll_y = app.scroll_y();

    for (idx, decoration) in app.layout.decorations.iter().enumerate() {
        let page_y = metrics.rows_to_px(decoration.row) + parallax_offset(idx, scroll_y);
        let screen_y = page_y - scroll_y;
        if screen_y < 0.0 {
            continue;
        }
        let row = area.y + (screen_y / metrics.cell_height_px) as u16;
        let column = area.x + (decoration.column_fraction * area.width as f64) as u16;
        if row < area.bottom() && column < area.right() {
            buf.set_string(column, row, decoration.glyph, Style::default().fg(Color::DarkGray));
        }
    }
}

fn render_particles(buf: &mut Buffer, app: &AppState) {
    let metrics = app.config.cells;
    let now = app.now_ms();
    let size_range = &app.smoke.config().size;
    let span = (size_range.end - size_range.start).max(f64::EPSILON);
    let area = buf.area;

    for particle in app.smoke.surface().sprites() {
        let Some((column, row)) = metrics.to_cell(particle.position) else {
            continue;
        };
        if column >= area.right() || row >= area.bottom() {
            continue;
        }

        let grown = ((particle.size - size_range.start) / span).clamp(0.0, 1.0);
        let glyph = match grown {
            g if g < 0.33 => "·",
            g if g < 0.66 => "•",
            _ => "●",
        };

        // Fade out over the particle's lifetime
        let remaining = 1.0 - particle.age_ms(now) as f64 / particle.lifetime_ms.max(1) as f64;
        let shade = (60.0 + 180.0 * particle.opacity * remaining.clamp(0.0, 1.0)) as u8;

        if let Some(cell) = buf.cell_mut((column, row)) {
            cell.set_symbol(glyph)
                .set_fg(Color::Rgb(shade, shade, shade.saturating_add(10)));
        }
    }
}

use cybermd_engine::{PassExecutor, StyleTag, Theme, highlight::Rgb};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::app::App;

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn style_for(theme: Theme, tag: Option<StyleTag>) -> Style {
    let Some(tag) = tag else {
        return Style::default().fg(color(theme.text()));
    };
    let spec = theme.style(tag);
    let mut style = Style::default().fg(color(spec.fg));
    if spec.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if spec.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if spec.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

pub fn ui<E: PassExecutor>(f: &mut Frame, app: &mut App<E>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());

    let editor_area = if app.show_outline {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(rows[0]);
        render_outline(f, app, cols[1]);
        cols[0]
    } else {
        rows[0]
    };

    render_editor(f, app, editor_area);
    render_status(f, app, rows[1]);
}

fn render_editor<E: PassExecutor>(f: &mut Frame, app: &mut App<E>, area: Rect) {
    let height = area.height as usize;
    app.scroll_to_cursor(height);

    let text = app.document.text();
    let line_count = app.document.line_count();
    let gutter_width = line_count.to_string().len();
    let gutter_style = Style::default().fg(color(app.theme.gutter()));

    let last = (app.scroll + height).min(line_count);
    let lines: Vec<Line> = (app.scroll..last)
        .map(|line| {
            let range = app.line_range(line);
            let mut spans = vec![Span::styled(
                format!("{:>gutter_width$} ", line + 1),
                gutter_style,
            )];
            for (span, tag) in app.view.runs(range.clone()) {
                spans.push(Span::styled(
                    text[span.as_range()].to_string(),
                    style_for(app.theme, tag),
                ));
            }
            // Bytes past the style map (not yet resized) render plain.
            let styled_end = range.end.min(app.view.len()).max(range.start);
            if styled_end < range.end {
                spans.push(Span::styled(
                    text[styled_end..range.end].to_string(),
                    style_for(app.theme, None),
                ));
            }
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);

    let row = app.cursor_line() - app.scroll;
    let col = gutter_width + 1 + app.cursor_column();
    f.set_cursor_position(Position::new(
        area.x + col as u16,
        area.y + row as u16,
    ));
}

fn render_outline<E: PassExecutor>(f: &mut Frame, app: &App<E>, area: Rect) {
    let items: Vec<ListItem> = app
        .session
        .outline()
        .iter()
        .map(|entry| {
            let indent = "  ".repeat(entry.level.saturating_sub(1) as usize);
            let style = style_for(app.theme, Some(StyleTag::heading(entry.level)));
            ListItem::new(Line::from(Span::styled(
                format!("{indent}{}", entry.title),
                style,
            )))
        })
        .collect();

    let outline = List::new(items).block(Block::default().borders(Borders::LEFT).title("Outline"));
    f.render_widget(outline, area);
}

fn render_status<E: PassExecutor>(f: &mut Frame, app: &App<E>, area: Rect) {
    let style = Style::default().add_modifier(Modifier::REVERSED);
    if let Some(prompt) = &app.prompt {
        let text = format!(" {}", prompt.text());
        let col = text.chars().count() as u16;
        f.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), area);
        f.set_cursor_position(Position::new(area.x + col, area.y));
        return;
    }

    let name = app
        .path
        .as_ref()
        .map_or("[scratch]".to_string(), |p| p.display().to_string());
    let dirty = if app.is_dirty() { " [+]" } else { "" };
    let detail = app
        .message
        .clone()
        .unwrap_or_else(|| app.session.status().to_string());
    let status = format!(
        " {name}{dirty} | {detail} | Ln {}, Col {} | ^S save ^W save as ^N new ^O outline ^Q quit",
        app.cursor_line() + 1,
        app.cursor_column() + 1,
    );
    f.render_widget(Paragraph::new(Line::from(Span::styled(status, style))), area);
}

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;
use suggestbox_core::ListContent;

use crate::app::App;

/// Widest the widget grows on large terminals.
const MAX_WIDTH: u16 = 64;

/// Main render function.
pub fn render(frame: &mut Frame, app: &App) {
    let area = widget_area(frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", app.messages.title),
            Style::default()
                .fg(app.theme.fg_bright())
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border()))
        .style(Style::default().bg(app.theme.bg()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Min(1),    // Dropdown space
            Constraint::Length(2), // Available candidates
            Constraint::Length(1), // Help hints
        ])
        .split(inner);

    render_input(frame, app, chunks[0]);
    render_footer(frame, app, chunks[2]);
    render_hints(frame, app, chunks[3]);
    // Drawn last so it overlays whatever sits below the input.
    render_dropdown(frame, app, chunks[0], inner);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.state().is_focused();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            app.theme.active_border()
        } else {
            app.theme.border()
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let query = app.query();
    let cursor = app.cursor.min(query.len());
    let cursor_style = Style::default().bg(app.theme.cursor_bg()).fg(app.theme.fg_bright());
    let text_style = Style::default().fg(app.theme.fg_bright());

    let mut spans = Vec::new();
    if query.is_empty() {
        if focused {
            spans.push(Span::styled(" ", cursor_style));
        }
        spans.push(Span::styled(
            app.messages.input_placeholder(),
            Style::default().fg(app.theme.muted()),
        ));
    } else {
        let before = &query[..cursor];
        let rest = &query[cursor..];
        let at_len = rest.chars().next().map_or(0, char::len_utf8);
        spans.push(Span::styled(before, text_style));
        if focused {
            let at = if at_len == 0 { " " } else { &rest[..at_len] };
            spans.push(Span::styled(at, cursor_style));
            spans.push(Span::styled(&rest[at_len..], text_style));
        } else {
            spans.push(Span::styled(rest, text_style));
        }
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(inner);
    frame.render_widget(Paragraph::new(Line::from(spans)), columns[0]);

    if app.presentation().spinner {
        frame.render_widget(
            Paragraph::new(Span::styled(app.spinner(), Style::default().fg(app.theme.frost_ice())))
                .alignment(Alignment::Right),
            columns[1],
        );
    }
}

fn render_dropdown(frame: &mut Frame, app: &App, input: Rect, bounds: Rect) {
    let view = app.presentation();
    if !view.list_visible {
        return;
    }

    let (items, rows): (Vec<ListItem>, u16) = match view.list {
        ListContent::Suggestions(results) => {
            let visible = usize::from(app.max_visible);
            let offset = view
                .highlighted
                .map_or(0, |h| (h + 1).saturating_sub(visible));
            let items = results
                .iter()
                .enumerate()
                .skip(offset)
                .take(visible)
                .map(|(i, s)| {
                    let is_sel = view.highlighted == Some(i);
                    let prefix = if is_sel { "▶ " } else { "  " };
                    let style = if is_sel {
                        Style::default()
                            .bg(app.theme.bg_secondary())
                            .fg(app.theme.fg_bright())
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(app.theme.fg())
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(prefix, Style::default().fg(app.theme.frost_ice())),
                        Span::styled(capitalize(s), style),
                    ]))
                })
                .collect::<Vec<_>>();
            let rows = items.len() as u16;
            (items, rows)
        }
        ListContent::NoMatches(query) => (
            vec![ListItem::new(Span::styled(
                app.messages.no_matches(query),
                Style::default().fg(app.theme.warning()),
            ))],
            1,
        ),
        ListContent::Placeholder => (
            vec![ListItem::new(Span::styled(
                app.messages.start_typing(),
                Style::default().fg(app.theme.muted()),
            ))],
            1,
        ),
    };

    let y = input.y + input.height;
    let max_height = (bounds.y + bounds.height).saturating_sub(y);
    let area = Rect {
        x: input.x,
        y,
        width: input.width,
        height: (rows + 2).min(max_height),
    };
    if area.height == 0 {
        return;
    }
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.green()))
        .style(Style::default().bg(app.theme.bg_secondary()));
    frame.render_widget(List::new(items).block(block), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let text = app.messages.available(&app.candidates.joined());
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(app.theme.muted())))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_hints(frame: &mut Frame, app: &App, area: Rect) {
    let key = Style::default().fg(app.theme.yellow());
    let label = Style::default().fg(app.theme.muted());
    let hints = if app.state().is_focused() {
        Line::from(vec![
            Span::styled(" ↑↓ ", key),
            Span::styled("highlight", label),
            Span::styled("  Enter ", key),
            Span::styled("select", label),
            Span::styled("  Tab ", key),
            Span::styled("blur", label),
            Span::styled("  C-c ", key),
            Span::styled("quit", label),
        ])
    } else {
        Line::from(vec![
            Span::styled(" Tab ", key),
            Span::styled("focus", label),
            Span::styled("  q ", key),
            Span::styled("quit", label),
        ])
    };
    frame.render_widget(Paragraph::new(hints).alignment(Alignment::Center), area);
}

/// Horizontally centered column of at most `MAX_WIDTH`, full height.
fn widget_area(r: Rect) -> Rect {
    let width = r.width.min(MAX_WIDTH);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y,
        width,
        height: r.height.min(20),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use suggestbox_core::AppConfig;

    use super::*;

    fn screen(app: &App) -> String {
        let backend = TestBackend::new(64, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_after(query: &str) -> App {
        let mut app = App::new(AppConfig::default());
        for c in query.chars() {
            app.insert_char(c);
        }
        app
    }

    #[tokio::test]
    async fn test_idle_screen() {
        let app = App::new(AppConfig::default());
        let text = screen(&app);
        assert!(text.contains("Fruit Autocomplete"));
        assert!(text.contains("Type to search fruits..."));
        assert!(text.contains("Available fruits: apple, banana, cherry"));
        assert!(!text.contains("Start typing"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_screen() {
        let mut app = app_after("e");
        app.session.settle().await.unwrap();
        let text = screen(&app);
        for fruit in ["Apple", "Cherry", "Date", "Elderberry"] {
            assert!(text.contains(fruit), "missing {fruit}");
        }
        assert!(!text.contains("Banana"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_results_screen() {
        let mut app = app_after("xyz");
        app.session.settle().await.unwrap();
        assert!(screen(&app).contains("No fruits found matching \"xyz\""));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropdown_scrolls_with_highlight() {
        let mut config = AppConfig::default();
        config.ui.max_visible = 2;
        let mut app = App::new(config);
        app.insert_char('e');
        app.session.settle().await.unwrap();
        for _ in 0..4 {
            app.dispatch(suggestbox_core::Event::HighlightNext);
        }
        let text = screen(&app);
        assert!(text.contains("▶ Elderberry"));
        assert!(text.contains("Date"));
        assert!(!text.contains("Apple"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("fig"), "Fig");
        assert_eq!(capitalize(""), "");
    }
}

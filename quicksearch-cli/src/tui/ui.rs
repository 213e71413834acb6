//! UI rendering using ratatui

use quicksearch_core::{PageLink, Status};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::app::App;

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for selected items
const HIGHLIGHT: Color = Color::Yellow;
const ERROR: Color = Color::Red;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Length(1), // Status line
            Constraint::Min(3),    // Results
            Constraint::Length(1), // Page strip
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    render_input(frame, app, chunks[0]);
    render_status(frame, app, chunks[1]);
    render_results(frame, app, chunks[2]);
    render_pages(frame, app, chunks[3]);
    render_hints(frame, chunks[4]);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Search ")
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let content = if app.input.is_empty() {
        Line::from(Span::styled("Type to search titles...", Style::default().fg(DIM)))
    } else {
        Line::from(app.input.as_str())
    };
    frame.render_widget(Paragraph::new(content).block(block), area);

    // Inside the border
    let offset = u16::try_from(app.cursor).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(1).saturating_add(offset);
    frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(2)), area.y + 1));
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let view = &app.view;
    let line = match &view.status {
        Status::Idle => Line::from(Span::styled(" Start typing to search", Style::default().fg(DIM))),
        Status::Loading => Line::from(Span::styled(" Loading...", Style::default().fg(HIGHLIGHT))),
        Status::Empty => Line::from(Span::styled(" No results", Style::default().fg(SECONDARY))),
        Status::Error(message) => Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(ERROR).add_modifier(Modifier::BOLD),
        )),
        Status::Populated => Line::from(vec![
            Span::styled(format!(" {} results", view.total_items), Style::default().fg(ACCENT)),
            Span::styled(
                format!("  page {}/{}", view.page, view.total_pages),
                Style::default().fg(SECONDARY),
            ),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let view = &app.view;
    let block = Block::default()
        .title(" Results ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SECONDARY));

    // Error hides the list; loading keeps the previous rows on screen
    let rows: Vec<ListItem> = if matches!(view.status, Status::Error(_)) {
        Vec::new()
    } else {
        view.items
            .iter()
            .enumerate()
            .map(|(offset, item)| {
                let mut spans = vec![
                    Span::styled(
                        format!("{:>3}. ", view.first_index + offset + 1),
                        Style::default().fg(DIM),
                    ),
                    Span::raw(item.title.clone()),
                ];
                if let Some(year) = &item.subtitle {
                    spans.push(Span::styled(format!(" ({})", year), Style::default().fg(SECONDARY)));
                }
                if let Some(kind) = &item.badge {
                    spans.push(Span::styled(format!(" [{}]", kind), Style::default().fg(ACCENT)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    let list = List::new(rows)
        .block(block)
        .highlight_style(Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD))
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    if !view.items.is_empty() {
        state.select(Some(app.selected_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_pages(frame: &mut Frame, app: &App, area: Rect) {
    let view = &app.view;
    if !view.has_multiple_pages() || !matches!(view.status, Status::Populated | Status::Loading) {
        return;
    }

    let mut spans = vec![Span::styled(" ‹ ", prev_next_style(view.has_prev))];
    for link in &view.page_links {
        let span = match link {
            PageLink::Page(p) if *p == view.page => Span::styled(
                format!(" {} ", p),
                Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            PageLink::Page(p) => Span::raw(format!(" {} ", p)),
            PageLink::Ellipsis => Span::styled(" … ", Style::default().fg(DIM)),
        };
        spans.push(span);
    }
    spans.push(Span::styled(" › ", prev_next_style(view.has_next)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn prev_next_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(DIM)
    }
}

fn render_hints(frame: &mut Frame, area: Rect) {
    let hints = Line::from(Span::styled(
        " ↑/↓ select  PgUp/PgDn page  Alt+1-9 jump  Ctrl+U clear  Esc quit",
        Style::default().fg(SECONDARY),
    ));
    frame.render_widget(Paragraph::new(hints), area);
}

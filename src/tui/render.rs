use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::rc::Rc;

use crate::conversation::Sender;
use crate::tui::app::{App, AppState};

fn layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Chat
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(area)
}

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App, state: AppState) {
    let chunks = layout(frame.area());

    render_header(frame, chunks[0], app);
    render_chat(frame, chunks[1], app);
    render_input(frame, chunks[2], app, state);
    render_status_bar(frame, chunks[3], app, state);
}

/// How far the chat can be scrolled up for a terminal of this size
pub fn max_scroll(app: &App, area: Rect) -> u16 {
    let chat = layout(area)[1];
    let inner_width = chat.width.saturating_sub(2);
    let inner_height = chat.height.saturating_sub(2);
    wrapped_height(&chat_lines(app), inner_width).saturating_sub(inner_height)
}

/// Rows the lines occupy once word-wrapped to `width` columns, as the chat pane draws them
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let rows = Paragraph::new(lines.to_vec())
        .wrap(Wrap { trim: false })
        .line_count(width);
    rows.min(u16::MAX as usize) as u16
}

/// Render the header
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.theme.colors;
    let header_text = vec![Line::from(vec![
        Span::styled("🚌 ", Style::default().fg(colors.header.to_color())),
        Span::styled(
            app.bot_name.as_str(),
            Style::default()
                .fg(colors.header.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | Service: "),
        Span::styled(
            app.service_url.as_str(),
            Style::default().fg(colors.text_secondary.to_color()),
        ),
    ])];

    let header = Paragraph::new(header_text)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(colors.border.to_color())),
        )
        .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

fn chat_lines(app: &App) -> Vec<Line<'_>> {
    let colors = &app.theme.colors;
    let mut lines = Vec::new();

    for msg in app.session.messages() {
        let (who, color) = match msg.sender {
            Sender::User => ("You", colors.user_message.to_color()),
            Sender::Bot => (app.bot_name.as_str(), colors.bot_message.to_color()),
        };

        let mut role_line = vec![Span::styled(
            format!("[{}] ", who),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )];
        if app.show_timestamps {
            role_line.push(Span::styled(
                msg.timestamp.format("%H:%M").to_string(),
                Style::default().fg(colors.text_secondary.to_color()),
            ));
        }
        lines.push(Line::from(role_line));

        // Empty messages still take a row so the turn stays visible.
        if msg.text.is_empty() {
            lines.push(Line::from(""));
        }
        for line in msg.text.lines() {
            lines.push(Line::from(Span::styled(
                line,
                Style::default().fg(colors.text_primary.to_color()),
            )));
        }

        lines.push(Line::from("")); // Empty line between messages
    }

    if app.session.is_waiting() {
        lines.push(Line::from(Span::styled(
            "▋",
            Style::default()
                .fg(colors.waiting.to_color())
                .add_modifier(Modifier::SLOW_BLINK),
        )));
    }

    lines
}

/// Render the chat area
fn render_chat(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.theme.colors;
    let lines = chat_lines(app);

    // scroll_offset counts rows up from the bottom; Paragraph wants rows from the top.
    let inner_height = area.height.saturating_sub(2);
    let total = wrapped_height(&lines, area.width.saturating_sub(2));
    let bottom = total.saturating_sub(inner_height);
    let top = bottom.saturating_sub(app.scroll_offset);

    let title = format!("Chat [{}]", app.prompt_hint());
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border.to_color())),
        )
        .wrap(Wrap { trim: false })
        .scroll((top, 0));

    frame.render_widget(paragraph, area);
}

/// Render the input area
fn render_input(frame: &mut Frame, area: Rect, app: &App, state: AppState) {
    let colors = &app.theme.colors;
    let (title, border) = match state {
        AppState::Insert => (
            "Type your message (Enter to send, Esc for normal mode)",
            colors.border_focused.to_color(),
        ),
        AppState::Normal => (
            "Press i to type, q to quit",
            colors.border.to_color(),
        ),
    };

    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(colors.text_primary.to_color()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border)),
        );

    frame.render_widget(input, area);

    if state == AppState::Insert {
        let cursor_x = area.x + 1 + Line::from(app.input.as_str()).width() as u16;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, state: AppState) {
    let colors = &app.theme.colors;
    let mode = match state {
        AppState::Insert => "INSERT",
        AppState::Normal => "NORMAL",
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode),
            Style::default()
                .fg(colors.border_focused.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("| Next: {} ", app.prompt_hint()),
            Style::default().fg(colors.status_bar.to_color()),
        ),
        Span::styled(
            "| type \"reset\" to start over | Ctrl+C to quit ",
            Style::default().fg(colors.status_bar.to_color()),
        ),
    ];

    if let Some(status) = &app.status_message {
        spans.push(Span::styled(
            format!("| {}", status),
            Style::default().fg(colors.warning.to_color()),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

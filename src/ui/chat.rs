//! Chat screen rendering
//!
//! Inbox on the left, the open conversation and message box on the right.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{cursor, titled_block};
use crate::app::App;
use crate::chat::ChatSession;
use crate::theme::Palette;

/// Renders the chat screen into `area`
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    render_threads(frame, &app.chat, columns[0], &palette);

    if app.chat.selected_thread().is_some() {
        render_conversation(frame, app, columns[1], &palette);
    } else {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Select a conversation to start chatting",
                Style::default().fg(palette.muted),
            )),
        ])
        .alignment(Alignment::Center)
        .block(titled_block("Conversation", &palette));
        frame.render_widget(hint, columns[1]);
    }
}

fn render_threads(frame: &mut Frame, chat: &ChatSession, area: Rect, palette: &Palette) {
    let mut lines = Vec::new();
    for (index, thread) in chat.threads().iter().enumerate() {
        let highlighted = index == chat.cursor;
        let name_style = if highlighted {
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.foreground)
        };
        let presence = if thread.online { "● " } else { "○ " };

        let mut header = vec![
            Span::styled(cursor(highlighted), Style::default().fg(palette.primary)),
            Span::styled(presence, Style::default().fg(palette.success)),
            Span::styled(thread.name.clone(), name_style),
            Span::styled(format!("  {}", thread.time), Style::default().fg(palette.muted)),
        ];
        if thread.unread > 0 {
            header.push(Span::styled(
                format!("  ({})", thread.unread),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(header));
        lines.push(Line::from(Span::styled(
            format!("    {}", thread.last_message),
            Style::default().fg(palette.muted),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(titled_block("Messages", palette)),
        area,
    );
}

fn render_conversation(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let chat = &app.chat;
    let Some(thread) = chat.selected_thread() else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(
            if thread.online { "Online" } else { "Offline" },
            Style::default().fg(palette.muted),
        )),
        Line::from(""),
    ];
    for message in chat.messages() {
        let (alignment, color) = if message.is_own {
            (Alignment::Right, palette.primary)
        } else {
            (Alignment::Left, palette.foreground)
        };
        lines.push(
            Line::from(Span::styled(message.body.clone(), Style::default().fg(color)))
                .alignment(alignment),
        );
        lines.push(
            Line::from(Span::styled(
                message.time.clone(),
                Style::default().fg(palette.muted),
            ))
            .alignment(alignment),
        );
    }

    let title = format!("{}  ·  c: call  v: video  o: more", thread.name);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(titled_block(&title, palette)),
        rows[0],
    );

    let input = if app.chat_typing {
        Span::styled(
            format!("{}_", chat.draft),
            Style::default().fg(palette.foreground),
        )
    } else if chat.draft.is_empty() {
        Span::styled("Type a message...", Style::default().fg(palette.muted))
    } else {
        Span::styled(chat.draft.clone(), Style::default().fg(palette.foreground))
    };
    frame.render_widget(
        Paragraph::new(Line::from(input)).block(titled_block("Message", palette)),
        rows[1],
    );
}

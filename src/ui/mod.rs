//! UI rendering module for Wheel Deal
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components. [`render`] draws the navigation
//! bar, the current screen, a key hint line and any overlays.

pub mod chat;
pub mod detail;
pub mod help_overlay;
pub mod home;
pub mod profile;
pub mod rental;
pub mod search;
pub mod sell;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Screen};
use crate::theme::Palette;
use crate::toast::Toast;

/// Draws the whole interface for the current state
pub fn render(frame: &mut Frame, app: &App) {
    let palette = app.palette();
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.foreground)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Navigation bar
            Constraint::Min(3),    // Screen
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    render_nav_bar(frame, app, chunks[0], &palette);

    match app.screen {
        Screen::Home => home::render(frame, app, chunks[1]),
        Screen::Search => search::render(frame, app, chunks[1]),
        Screen::Detail(_) => detail::render(frame, app, chunks[1]),
        Screen::Rental => rental::render(frame, app, chunks[1]),
        Screen::Chat => chat::render(frame, app, chunks[1]),
        Screen::Sell => sell::render(frame, app, chunks[1]),
        Screen::Profile => profile::render(frame, app, chunks[1]),
    }

    let hint = Paragraph::new(Span::styled(
        footer_hint(app),
        Style::default().fg(palette.muted),
    ));
    frame.render_widget(hint, chunks[2]);

    if let Some(toast) = &app.toast {
        render_toast(frame, toast, &palette);
    }
    if app.show_help {
        help_overlay::render(frame, &palette);
    }
}

/// Brand, navigation items and the unread badge
fn render_nav_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let mut spans = vec![
        Span::styled(
            " 🏍 WHEEL DEAL ",
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    for item in Screen::nav_items() {
        let active = *item == app.screen
            || (*item == Screen::Search && matches!(app.screen, Screen::Detail(_)));
        let style = if active {
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(palette.foreground)
        };
        spans.push(Span::styled(format!(" {} ", item.label()), style));

        if *item == Screen::Chat {
            let unread = app.data.chat.unread_total();
            if unread > 0 {
                spans.push(Span::styled(
                    format!("({})", unread),
                    Style::default().fg(palette.accent),
                ));
            }
        }
    }

    let nav = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(palette.border)),
    );
    frame.render_widget(nav, area);
}

/// Key hints for the current screen and input mode
fn footer_hint(app: &App) -> &'static str {
    if app.text_input_active() {
        return " Type to edit · Enter: done · Esc: stop editing";
    }
    match app.screen {
        Screen::Home => {
            " ↑↓: browse · Enter: open · 1-5: category · /: search · s: sell · ←→/Space: why us · ?: help"
        }
        Screen::Search => {
            " /: search · l: location · c: category · v: view · x: clear · Enter: open · Esc: back"
        }
        Screen::Detail(_) => " ←→: photos · Enter: rent/buy · f: favourite · s: share · c: contact · Esc: back",
        Screen::Rental => {
            " ↑↓: field · Enter: edit/toggle · g: location · c: contract · p: pay · n: new · Esc: back"
        }
        Screen::Chat => " ↑↓: conversations · Enter: open/type · c: call · v: video · o: options · Esc: back",
        Screen::Sell => " ↑↓: field · Enter: edit · x: remove feature · u: photos · p: publish · Esc: back",
        Screen::Profile => " ←→: tabs · e: edit profile · Space: toggle setting · s: save settings · Esc: back",
    }
}

/// Notification box in the top-right corner
fn render_toast(frame: &mut Frame, toast: &Toast, palette: &Palette) {
    let area = frame.area();
    let width = area.width.min(46);
    let height = area.height.min(4);
    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + area.height.saturating_sub(height).min(1),
        width,
        height,
    };

    frame.render_widget(Clear, toast_area);
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", toast.title),
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.background).fg(palette.foreground));
    let body = Paragraph::new(toast.description.as_str())
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(body, toast_area);
}

/// Bordered block with a title, coloured from the palette
pub(crate) fn titled_block<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(palette.foreground)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
}

/// Cursor marker for list rows
pub(crate) fn cursor(selected: bool) -> &'static str {
    if selected {
        "\u{25B8} " // ▸
    } else {
        "  "
    }
}

/// Star rating like `★ 4.8 (127)`
pub(crate) fn rating_span(rating: f32, reviews: u32, palette: &Palette) -> Span<'static> {
    Span::styled(
        format!("★ {:.1} ({})", rating, reviews),
        Style::default().fg(palette.accent),
    )
}

/// Helper function to create a centered rect
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Shared helpers for the render smoke tests
#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{backend::TestBackend, Terminal};

    use crate::app::App;
    use crate::data::MockData;
    use crate::theme::Theme;

    pub fn app() -> App {
        App::new(MockData::load().unwrap(), Theme::Light)
    }

    /// Renders the full interface and returns the buffer as one string
    pub fn render_to_string(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| super::render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{app, render_to_string};
    use super::*;
    use crate::toast::Toast;

    #[test]
    fn test_nav_bar_lists_screens_and_unread() {
        let app = app();
        let content = render_to_string(&app, 120, 30);
        assert!(content.contains("WHEEL DEAL"));
        for label in ["Home", "Search", "Rent", "Sell", "Messages", "Profile"] {
            assert!(content.contains(label), "missing nav item {}", label);
        }
        assert!(content.contains("(3)"), "unread badge");
    }

    #[test]
    fn test_toast_is_drawn() {
        let mut app = app();
        app.toast = Some(Toast::new("Saved", "All good"));
        let content = render_to_string(&app, 100, 30);
        assert!(content.contains("Saved"));
        assert!(content.contains("All good"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = app();
        app.toast = Some(Toast::coming_soon("Sharing"));
        app.show_help = true;
        let _ = render_to_string(&app, 10, 4);
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect(50, 30, area);
        assert!(rect.width <= 20);
        assert!(rect.height <= 10);
    }
}

//! Help overlay showing all keybindings
//!
//! Renders a centered modal overlay with keyboard shortcuts.

use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::theme::Palette;

/// Renders the help overlay on top of the current view
pub fn render(frame: &mut Frame, palette: &Palette) {
    let area = frame.area();

    // Calculate centered overlay area
    let overlay_area = centered_rect(58, 32, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().add_modifier(Modifier::BOLD),
        ))
    };

    let lines = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Navigation"),
        help_line("Tab, S-Tab", "Next / previous screen", palette),
        help_line("↑/k, ↓/j", "Move selection up/down", palette),
        help_line("Enter", "Open / edit / confirm", palette),
        help_line("Esc", "Go back / Close", palette),
        help_line("q", "Quit application", palette),
        Line::from(""),
        heading("Browsing"),
        help_line("1-5", "Category (home) or tab (profile)", palette),
        help_line("/, l, c", "Search term, location, category", palette),
        help_line("v", "Grid / list view", palette),
        help_line("f", "Favourite listing", palette),
        help_line("s", "Sell your motorcycle (home)", palette),
        Line::from(""),
        heading("Renting"),
        help_line("Space", "Toggle insurance / helmet", palette),
        help_line("g", "Pickup location on the map", palette),
        help_line("c", "Rental contract", palette),
        help_line("p", "Proceed to payment", palette),
        help_line("n", "New rental after confirming", palette),
        Line::from(""),
        heading("Other"),
        help_line("p", "Publish listing (sell)", palette),
        help_line("e", "Edit profile", palette),
        help_line("?", "Toggle this help", palette),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or ? to close",
            Style::default().fg(palette.muted),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.background).fg(palette.foreground));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, overlay_area);
}

/// Creates a help line with key and description
fn help_line(key: &str, description: &str, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), Style::default().fg(palette.accent)),
        Span::raw(description.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_help_overlay_renders() {
        let backend = TestBackend::new(80, 34);
        let mut terminal = Terminal::new(backend).unwrap();
        let palette = Theme::Dark.palette();

        terminal
            .draw(|frame| {
                render(frame, &palette);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();

        assert!(content.contains("Help"), "Should render help title");
        assert!(
            content.contains("Navigation"),
            "Should show navigation section"
        );
        assert!(content.contains("Renting"), "Should show rental keys");
    }
}

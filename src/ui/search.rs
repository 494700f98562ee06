//! Search screen rendering
//!
//! Search bar with term, location and category filters, and the results as
//! a card grid or a compact list.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{cursor, rating_span, titled_block};
use crate::app::{App, SearchInput};
use crate::data::Listing;
use crate::search::ViewMode;
use crate::theme::Palette;

/// Cards per row in grid view
const GRID_COLUMNS: usize = 3;

/// Height of one card in grid view
const CARD_HEIGHT: u16 = 6;

/// Renders the search screen into `area`
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let results = app.search_results();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Search bar
            Constraint::Min(3),    // Results
        ])
        .split(area);

    render_search_bar(frame, app, chunks[0], &palette);

    let title = format!(
        "{} result{} · {} view",
        results.len(),
        if results.len() == 1 { "" } else { "s" },
        app.search.view_mode.label()
    );

    if results.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No motorcycles match your search.",
                Style::default().fg(palette.foreground),
            )),
            Line::from(Span::styled(
                "Press x to clear the filters.",
                Style::default().fg(palette.muted),
            )),
        ])
        .block(titled_block(&title, &palette));
        frame.render_widget(empty, chunks[1]);
        return;
    }

    match app.search.view_mode {
        ViewMode::Grid => render_grid(frame, &results, app.search.cursor, chunks[1], &palette, &title),
        ViewMode::List => render_list(frame, &results, app.search.cursor, chunks[1], &palette, &title),
    }
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let query = &app.search.query;
    let input_style = |input: SearchInput| {
        if app.search.input == Some(input) {
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.foreground)
        }
    };
    let shown = |text: &str, placeholder: &'static str, active: bool| -> String {
        let caret = if active { "_" } else { "" };
        if text.is_empty() && !active {
            placeholder.to_string()
        } else {
            format!("{}{}", text, caret)
        }
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("🔍 ", Style::default().fg(palette.muted)),
            Span::styled(
                shown(
                    &query.term,
                    "Make, model or category...",
                    app.search.input == Some(SearchInput::Term),
                ),
                input_style(SearchInput::Term),
            ),
        ]),
        Line::from(vec![
            Span::styled("📍 ", Style::default().fg(palette.muted)),
            Span::styled(
                shown(
                    &query.location,
                    "Any location",
                    app.search.input == Some(SearchInput::Location),
                ),
                input_style(SearchInput::Location),
            ),
            Span::styled("   Category: ", Style::default().fg(palette.muted)),
            Span::styled(query.category_label(), Style::default().fg(palette.accent)),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(titled_block("Search", palette)),
        area,
    );
}

fn render_grid(
    frame: &mut Frame,
    results: &[&Listing],
    selected: usize,
    area: Rect,
    palette: &Palette,
    title: &str,
) {
    let block = titled_block(title, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = selected / GRID_COLUMNS;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    let rows: Vec<&[&Listing]> = results
        .chunks(GRID_COLUMNS)
        .skip(first_row)
        .take(visible_rows)
        .collect();

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); rows.len()])
        .split(inner);

    for (row_offset, (row, row_area)) in rows.iter().zip(row_areas.iter()).enumerate() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row_area);

        for (col, listing) in row.iter().enumerate() {
            let index = (first_row + row_offset) * GRID_COLUMNS + col;
            render_card(frame, listing, index == selected, columns[col], palette);
        }
    }
}

/// One listing card
fn render_card(frame: &mut Frame, listing: &Listing, selected: bool, area: Rect, palette: &Palette) {
    let border = if selected {
        palette.primary
    } else {
        palette.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let lines = vec![
        Line::from(Span::styled(
            listing.name.clone(),
            Style::default()
                .fg(palette.foreground)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("{} · {}  ", listing.category.label(), listing.kind.label()),
                Style::default().fg(palette.muted),
            ),
            Span::styled(listing.price_label(), Style::default().fg(palette.success)),
        ]),
        Line::from(rating_span(listing.rating, listing.reviews, palette)),
        Line::from(Span::styled(
            format!("📍 {}", listing.location),
            Style::default().fg(palette.muted),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_list(
    frame: &mut Frame,
    results: &[&Listing],
    selected: usize,
    area: Rect,
    palette: &Palette,
    title: &str,
) {
    let lines: Vec<Line> = results
        .iter()
        .enumerate()
        .map(|(index, listing)| {
            let is_selected = index == selected;
            let name_style = if is_selected {
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.foreground)
            };
            Line::from(vec![
                Span::styled(cursor(is_selected), Style::default().fg(palette.primary)),
                Span::styled(format!("{:<28}", listing.name), name_style),
                Span::styled(
                    format!("{:<9}", listing.category.label()),
                    Style::default().fg(palette.muted),
                ),
                Span::styled(
                    format!("{:<12}", listing.price_label()),
                    Style::default().fg(palette.success),
                ),
                rating_span(listing.rating, listing.reviews, palette),
                Span::styled(
                    format!("  {}", listing.location),
                    Style::default().fg(palette.muted),
                ),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(titled_block(title, palette)),
        area,
    );
}

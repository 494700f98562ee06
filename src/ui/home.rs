//! Home screen rendering
//!
//! Hero banner, category shortcuts, the featured listings and the
//! "Why Wheel Deal" highlights.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{cursor, rating_span, titled_block};
use crate::app::{App, HomeFeature};
use crate::theme::Palette;
use crate::data::Category;

/// Renders the home screen into `area`
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Hero
            Constraint::Length(7), // Categories
            Constraint::Min(3),    // Featured
            Constraint::Length(5), // Why Wheel Deal
        ])
        .split(area);

    let hero = vec![
        Line::from(Span::styled(
            "Your next ride is waiting",
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Rent or buy motorcycles from trusted owners across Spain.",
            Style::default().fg(palette.foreground),
        )),
        Line::from(Span::styled(
            "Press / to search, s to sell your motorcycle, or pick a category below.",
            Style::default().fg(palette.muted),
        )),
    ];
    frame.render_widget(Paragraph::new(hero), chunks[0]);

    let categories: Vec<Line> = Category::all()
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let count = app
                .data
                .catalog
                .all()
                .iter()
                .filter(|l| l.category == *category)
                .count();
            Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(palette.accent)),
                Span::raw(format!("{:<10}", category.label())),
                Span::styled(
                    format!("{} listing{}", count, if count == 1 { "" } else { "s" }),
                    Style::default().fg(palette.muted),
                ),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(categories).block(titled_block("Browse by category", &palette)),
        chunks[1],
    );

    let mut featured = Vec::new();
    for (index, listing) in app.data.catalog.featured().iter().enumerate() {
        let selected = index == app.home_cursor;
        let name_style = if selected {
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.foreground)
        };
        featured.push(Line::from(vec![
            Span::styled(cursor(selected), Style::default().fg(palette.primary)),
            Span::styled(format!("{:<28}", listing.name), name_style),
            Span::styled(
                format!("{:<8}", listing.kind.label()),
                Style::default().fg(palette.muted),
            ),
            Span::styled(
                format!("{:<12}", listing.price_label()),
                Style::default().fg(palette.success),
            ),
            rating_span(listing.rating, listing.reviews, &palette),
            Span::styled(
                format!("  📍 {}", listing.location),
                Style::default().fg(palette.muted),
            ),
        ]));
    }
    frame.render_widget(
        Paragraph::new(featured).block(titled_block("Featured motorcycles", &palette)),
        chunks[2],
    );

    render_features(frame, app.home_feature, chunks[3], &palette);
}

/// Three highlight cards side by side
fn render_features(frame: &mut Frame, selected: usize, area: Rect, palette: &Palette) {
    let block = titled_block("Why choose Wheel Deal", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(inner);

    for (index, (feature, column)) in HomeFeature::all().iter().zip(columns.iter()).enumerate() {
        let title_style = if index == selected {
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.foreground)
        };
        let card = vec![
            Line::from(vec![
                Span::styled(cursor(index == selected), Style::default().fg(palette.primary)),
                Span::styled(feature.title(), title_style),
            ]),
            Line::from(Span::styled(
                format!("  {}", feature.description()),
                Style::default().fg(palette.muted),
            )),
        ];
        frame.render_widget(Paragraph::new(card), *column);
    }
}

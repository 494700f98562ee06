//! Listing detail screen rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{rating_span, titled_block};
use crate::app::App;
use crate::data::Listing;
use crate::theme::Palette;

/// Renders the detail page of the listing on screen
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let Some(listing) = app.detail_listing() else {
        let missing = Paragraph::new("Listing not found.").style(Style::default().fg(palette.muted));
        frame.render_widget(missing, area);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Gallery
            Constraint::Min(4),    // Description
            Constraint::Length(listing.features.len() as u16 + 2),
        ])
        .split(columns[0]);

    render_gallery(frame, listing, app.image_index, left[0], &palette);

    let description = Paragraph::new(listing.description.as_str())
        .wrap(Wrap { trim: true })
        .block(titled_block("Description", &palette));
    frame.render_widget(description, left[1]);

    let features: Vec<Line> = listing
        .features
        .iter()
        .map(|f| {
            Line::from(vec![
                Span::styled(" ✓ ", Style::default().fg(palette.success)),
                Span::raw(f.clone()),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(features).block(titled_block("Features", &palette)),
        left[2],
    );

    render_summary(frame, app, listing, columns[1], &palette);
}

fn render_gallery(frame: &mut Frame, listing: &Listing, index: usize, area: Rect, palette: &Palette) {
    let count = listing.images.len();
    let caption = listing
        .images
        .get(index)
        .map(String::as_str)
        .unwrap_or("No photos");
    let dots: String = (0..count)
        .map(|i| if i == index { '●' } else { '○' })
        .collect();

    let lines = vec![
        Line::from(vec![
            Span::styled("◀ ", Style::default().fg(palette.muted)),
            Span::styled(
                format!("📷 {}", caption),
                Style::default().fg(palette.foreground),
            ),
            Span::styled(" ▶", Style::default().fg(palette.muted)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  {}/{}", dots, (index + 1).min(count), count),
            Style::default().fg(palette.accent),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(titled_block("Photos", palette)),
        area,
    );
}

/// Title, price, owner and the call to action
fn render_summary(frame: &mut Frame, app: &App, listing: &Listing, area: Rect, palette: &Palette) {
    let favorite = if app.is_favorite(listing.id) {
        "♥ In favourites"
    } else {
        "♡ Add to favourites"
    };
    let availability = if listing.availability.available {
        Span::styled("✓ Available now", Style::default().fg(palette.success))
    } else {
        let next = listing
            .availability
            .next_available
            .map(|d| format!("Available from {}", d.format("%d %b %Y")))
            .unwrap_or_else(|| "Not available".to_string());
        Span::styled(next, Style::default().fg(palette.muted))
    };
    let action = if listing.is_rental() {
        "[Enter] Rent now"
    } else {
        "[Enter] Buy now"
    };

    let lines = vec![
        Line::from(Span::styled(
            listing.name.clone(),
            Style::default()
                .fg(palette.foreground)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} · {}", listing.category.label(), listing.kind.label()),
            Style::default().fg(palette.muted),
        )),
        Line::from(""),
        Line::from(Span::styled(
            listing.price_label(),
            Style::default()
                .fg(palette.success)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(rating_span(listing.rating, listing.reviews, palette)),
        Line::from(Span::styled(
            format!("📍 {}", listing.location),
            Style::default().fg(palette.muted),
        )),
        Line::from(availability),
        Line::from(""),
        Line::from(Span::styled(
            "Owner",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(listing.owner.name.clone()),
        Line::from(Span::styled(
            format!(
                "★ {:.1} · {} rentals",
                listing.owner.rating, listing.owner.total_rentals
            ),
            Style::default().fg(palette.muted),
        )),
        Line::from(""),
        Line::from(Span::styled(
            action,
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(favorite, Style::default().fg(palette.accent))),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(titled_block("Details", palette)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use crate::app::Screen;
    use crate::ui::test_support::{app, render_to_string};

    #[test]
    fn test_rental_detail() {
        let mut app = app();
        app.navigate(Screen::Detail(1));
        let content = render_to_string(&app, 120, 36);
        assert!(content.contains("Yamaha MT-07"));
        assert!(content.contains("€45/day"));
        assert!(content.contains("Carlos Ruiz"));
        assert!(content.contains("Rent now"));
        assert!(content.contains("1/4"));
        assert!(content.contains("In favourites"));
    }

    #[test]
    fn test_sale_detail_offers_buying() {
        let mut app = app();
        app.navigate(Screen::Detail(2));
        let content = render_to_string(&app, 120, 36);
        assert!(content.contains("€8500"));
        assert!(content.contains("Buy now"));
        assert!(content.contains("Add to favourites"));
    }

    #[test]
    fn test_gallery_follows_image_index() {
        let mut app = app();
        app.navigate(Screen::Detail(1));
        app.image_index = 2;
        let content = render_to_string(&app, 120, 36);
        assert!(content.contains("Engine detail"));
        assert!(content.contains("3/4"));
    }
}

//! Sell screen rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{cursor, titled_block};
use crate::app::App;
use crate::sell::SellField;

/// Renders the listing form and its live preview into `area`
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let form = &app.sell;
    let focused_field = app.sell_field();
    let mut lines = Vec::new();

    for field in SellField::all() {
        let focused = *field == focused_field;
        let editing = focused && app.sell_editing;
        let label_style = if focused {
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.foreground)
        };

        let text = form.value(*field);
        let value = if *field == SellField::Category {
            Span::styled(format!("‹ {} ›", text), Style::default().fg(palette.accent))
        } else if editing {
            Span::styled(format!("{}_", text), Style::default().fg(palette.foreground))
        } else if text.is_empty() {
            Span::styled(field.placeholder(), Style::default().fg(palette.muted))
        } else {
            Span::styled(text.to_string(), Style::default().fg(palette.foreground))
        };

        lines.push(Line::from(vec![
            Span::styled(cursor(focused), Style::default().fg(palette.primary)),
            Span::styled(format!("{:<16}", field.label()), label_style),
            value,
        ]));

        if *field == SellField::Feature {
            for feature in &form.features {
                lines.push(Line::from(vec![
                    Span::raw(" ".repeat(18)),
                    Span::styled("• ", Style::default().fg(palette.success)),
                    Span::raw(feature.clone()),
                ]));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "📷 Photos: press u to upload (up to 10)",
        Style::default().fg(palette.muted),
    )));

    frame.render_widget(
        Paragraph::new(lines).block(titled_block("Sell your motorcycle", &palette)),
        columns[0],
    );

    let draft = form.draft();
    let price = draft
        .price
        .map(|p| format!("€{}", p))
        .unwrap_or_else(|| "Price not set".to_string());
    let title = if draft.title.is_empty() {
        "Untitled listing".to_string()
    } else {
        draft.title.clone()
    };
    let details: Vec<String> = [
        Some(draft.brand.clone()).filter(|b| !b.is_empty()),
        Some(draft.model.clone()).filter(|m| !m.is_empty()),
        draft.year.map(|y| y.to_string()),
        draft.mileage.map(|km| format!("{} km", km)),
    ]
    .into_iter()
    .flatten()
    .collect();

    let preview = vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(palette.foreground)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            draft.category.label(),
            Style::default().fg(palette.muted),
        )),
        Line::from(Span::styled(
            price,
            Style::default()
                .fg(palette.success)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(details.join(" · ")),
        Line::from(""),
        Line::from(draft.description.clone()),
        Line::from(""),
        Line::from(Span::styled(
            "[p] Publish listing",
            Style::default().fg(palette.primary),
        )),
    ];
    frame.render_widget(
        Paragraph::new(preview)
            .wrap(Wrap { trim: true })
            .block(titled_block("Preview", &palette)),
        columns[1],
    );
}

#[cfg(test)]
mod tests {
    use crate::app::Screen;
    use crate::ui::test_support::{app, render_to_string};

    #[test]
    fn test_empty_form_shows_placeholders() {
        let mut app = app();
        app.navigate(Screen::Sell);
        let content = render_to_string(&app, 130, 30);
        assert!(content.contains("Sell your motorcycle"));
        assert!(content.contains("Describe your motorcycle..."));
        assert!(content.contains("‹ Sport ›"));
        assert!(content.contains("Price not set"));
    }

    #[test]
    fn test_preview_follows_form() {
        let mut app = app();
        app.navigate(Screen::Sell);
        app.sell.title = "Ducati Monster".into();
        app.sell.brand = "Ducati".into();
        app.sell.year = "2021".into();
        app.sell.price = "9000".into();
        app.sell.features = vec!["Quickshifter".into()];
        let content = render_to_string(&app, 130, 30);
        assert!(content.contains("€9000"));
        assert!(content.contains("Ducati · 2021"));
        assert!(content.contains("• Quickshifter"));
    }
}

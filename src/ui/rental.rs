//! Rental checkout screen rendering
//!
//! The form and the price summary sit side by side. Location, contract and
//! payment open as modals over them, as does the confirmation once paid.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use super::{centered_rect, cursor, titled_block};
use crate::app::App;
use crate::booking::{
    BookingFlow, FlowStep, CONTRACT_ACCEPTANCE, CONTRACT_CLAUSES, CONTRACT_PREAMBLE,
};
use crate::rental::{RentalField, RentalSession};
use crate::theme::Palette;

/// Renders the rental checkout into `area`
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let Some(session) = app.rental.as_ref() else {
        let empty = Paragraph::new("No motorcycle selected for rental.")
            .style(Style::default().fg(palette.muted));
        frame.render_widget(empty, area);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_form(frame, session, columns[0], &palette);
    render_summary(frame, &session.flow, columns[1], &palette);

    match session.flow.step() {
        FlowStep::Editing => {}
        FlowStep::ViewingLocation => render_location(frame, &session.flow, area, &palette),
        FlowStep::ViewingContract => render_contract(frame, area, &palette),
        FlowStep::AwaitingPayment => render_payment(frame, &session.flow, area, &palette),
        FlowStep::Confirmed => render_confirmed(frame, &session.flow, area, &palette),
    }
}

fn render_form(frame: &mut Frame, session: &RentalSession, area: Rect, palette: &Palette) {
    let listing = session.flow.listing();
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                listing.name.clone(),
                Style::default()
                    .fg(palette.foreground)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} · 📍 {}", listing.category.label(), listing.location),
                Style::default().fg(palette.muted),
            ),
        ]),
        Line::from(Span::styled(
            format!("€{} per day", session.flow.daily_price()),
            Style::default().fg(palette.success),
        )),
        Line::from(""),
    ];

    for (index, field) in RentalField::all().iter().enumerate() {
        let focused = index == session.cursor;
        let label_style = if focused {
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.foreground)
        };

        let value = if field.is_toggle() {
            let mark = if session.is_checked(*field) { "[x]" } else { "[ ]" };
            Span::styled(mark, Style::default().fg(palette.accent))
        } else {
            let text = session.field_text(*field);
            let caret = if focused && session.editing { "_" } else { "" };
            if text.is_empty() && caret.is_empty() {
                Span::styled(placeholder(*field), Style::default().fg(palette.muted))
            } else {
                Span::styled(
                    format!("{}{}", text, caret),
                    Style::default().fg(palette.foreground),
                )
            }
        };

        let mut spans = vec![
            Span::styled(cursor(focused), Style::default().fg(palette.primary)),
            Span::styled(format!("{:<30}", field.label()), label_style),
        ];
        if field.is_toggle() {
            spans.insert(1, value);
            spans.insert(2, Span::raw(" "));
        } else {
            spans.push(value);
        }
        lines.push(Line::from(spans));

        if *field == RentalField::EndTime {
            lines.push(Line::from(""));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "g: use my current location",
        Style::default().fg(palette.muted),
    )));

    frame.render_widget(
        Paragraph::new(lines).block(titled_block("Rental Process", palette)),
        area,
    );
}

/// Hint shown in an empty text field
fn placeholder(field: RentalField) -> &'static str {
    match field {
        RentalField::StartDate | RentalField::EndDate => "YYYY-MM-DD",
        RentalField::StartTime | RentalField::EndTime => "HH:MM",
        RentalField::PickupLocation => "Pickup address",
        RentalField::Insurance | RentalField::Helmet => "",
    }
}

/// Price breakdown and the two actions
fn render_summary(frame: &mut Frame, flow: &BookingFlow, area: Rect, palette: &Palette) {
    let quote = flow.quote();
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<20}", label), Style::default().fg(palette.muted)),
            Span::styled(value, Style::default().fg(palette.foreground)),
        ])
    };

    let mut lines = vec![
        row("Rental days:", quote.days.to_string()),
        row("Price per day:", format!("€{}", quote.daily_price)),
    ];
    if let Some(insurance) = quote.insurance {
        lines.push(row("Premium insurance:", format!("€{}", insurance)));
    }
    if let Some(helmet) = quote.helmet {
        lines.push(row("Helmet:", format!("€{}", helmet)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("{:<20}", "Total:"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("€{}", quote.total),
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[p] Proceed to payment",
        Style::default().fg(palette.primary),
    )));
    lines.push(Line::from(Span::styled(
        "[c] View contract",
        Style::default().fg(palette.accent),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "By continuing you accept our terms and conditions.",
        Style::default().fg(palette.muted),
    )));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(titled_block("Rental Summary", palette)),
        area,
    );
}

/// Draws a modal with the step's title over `area`
fn render_modal(
    frame: &mut Frame,
    step: FlowStep,
    lines: Vec<Line>,
    size: (u16, u16),
    area: Rect,
    palette: &Palette,
) {
    let modal = centered_rect(size.0, size.1, area);
    frame.render_widget(Clear, modal);
    let block = titled_block(step.title(), palette)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.background).fg(palette.foreground));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        modal,
    );
}

fn render_location(frame: &mut Frame, flow: &BookingFlow, area: Rect, palette: &Palette) {
    let pickup = &flow.selection().pickup_location;
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "📍 Finding your location...",
            Style::default().fg(palette.accent),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Motorcycle pickup point: {}", flow.listing().location),
            Style::default().fg(palette.foreground),
        )),
        Line::from(Span::styled(
            if pickup.trim().is_empty() {
                "No pickup address entered yet.".to_string()
            } else {
                format!("Your address: {}", pickup)
            },
            Style::default().fg(palette.muted),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Esc: close",
            Style::default().fg(palette.muted),
        )),
    ];
    render_modal(frame, FlowStep::ViewingLocation, lines, (56, 10), area, palette);
}

fn render_contract(frame: &mut Frame, area: Rect, palette: &Palette) {
    let mut lines = vec![Line::from(CONTRACT_PREAMBLE), Line::from("")];
    for clause in CONTRACT_CLAUSES.iter() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", clause.heading),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(clause.body),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        CONTRACT_ACCEPTANCE,
        Style::default().fg(palette.muted),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: accept · Esc: close",
        Style::default().fg(palette.primary),
    )));
    render_modal(frame, FlowStep::ViewingContract, lines, (76, 26), area, palette);
}

fn render_payment(frame: &mut Frame, flow: &BookingFlow, area: Rect, palette: &Palette) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Amount due: "),
            Span::styled(
                format!("€{}", flow.total()),
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from("Card number     4242 4242 4242 4242"),
        Line::from("Expiry          12/28      CVC ***"),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: pay now · Esc: cancel",
            Style::default().fg(palette.primary),
        )),
    ];
    render_modal(frame, FlowStep::AwaitingPayment, lines, (50, 11), area, palette);
}

fn render_confirmed(frame: &mut Frame, flow: &BookingFlow, area: Rect, palette: &Palette) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "✅ Your booking has been confirmed.",
            Style::default()
                .fg(palette.success)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "{} · {} day{} · €{}",
            flow.listing().name,
            flow.rental_days(),
            if flow.rental_days() == 1 { "" } else { "s" },
            flow.total()
        )),
        Line::from(""),
        Line::from(Span::styled(
            "n: new rental · Esc: back",
            Style::default().fg(palette.muted),
        )),
    ];
    render_modal(frame, FlowStep::Confirmed, lines, (52, 10), area, palette);
}

#[cfg(test)]
mod tests {
    use crate::booking::SideView;
    use crate::ui::test_support::{app, render_to_string};

    fn rental_app() -> crate::app::App {
        let mut app = app();
        app.open_rental(1);
        app
    }

    #[test]
    fn test_form_and_summary_render() {
        let app = rental_app();
        let content = render_to_string(&app, 120, 36);
        assert!(content.contains("Rental Process"));
        assert!(content.contains("Yamaha MT-07"));
        assert!(content.contains("YYYY-MM-DD"));
        assert!(content.contains("09:00"));
        assert!(content.contains("Rental Summary"));
        assert!(content.contains("€45"));
        assert!(content.contains("Proceed to payment"));
    }

    #[test]
    fn test_summary_lists_extras() {
        let mut app = rental_app();
        let session = app.rental.as_mut().unwrap();
        session.set_text(crate::rental::RentalField::StartDate, "2024-06-01".into()).unwrap();
        session.set_text(crate::rental::RentalField::EndDate, "2024-06-03".into()).unwrap();
        session.cursor = 5;
        session.toggle_focused().unwrap();
        let content = render_to_string(&app, 120, 36);
        assert!(content.contains("Premium insurance:"));
        assert!(content.contains("€30"));
        assert!(content.contains("€165"));
    }

    #[test]
    fn test_contract_modal() {
        let mut app = rental_app();
        app.rental
            .as_mut()
            .unwrap()
            .flow
            .open_step(SideView::Contract)
            .unwrap();
        let content = render_to_string(&app, 120, 40);
        assert!(content.contains("Rental Contract"));
        assert!(content.contains("Security Deposit"));
    }

    #[test]
    fn test_payment_then_confirmation_modal() {
        let mut app = rental_app();
        let flow = &mut app.rental.as_mut().unwrap().flow;
        flow.open_step(SideView::Payment).unwrap();
        let content = render_to_string(&app, 120, 36);
        assert!(content.contains("Amount due"));

        app.rental.as_mut().unwrap().flow.confirm_payment().unwrap();
        let content = render_to_string(&app, 120, 36);
        assert!(content.contains("Payment Successful!"));
        assert!(content.contains("booking has been confirmed"));
    }

    #[test]
    fn test_location_modal() {
        let mut app = rental_app();
        app.rental
            .as_mut()
            .unwrap()
            .flow
            .open_step(SideView::Location)
            .unwrap();
        let content = render_to_string(&app, 120, 36);
        assert!(content.contains("Current Location"));
        assert!(content.contains("Madrid Centro"));
    }
}

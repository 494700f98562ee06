//! Profile screen rendering
//!
//! Tab sidebar on the left; the selected tab fills the rest.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{cursor, titled_block};
use crate::app::App;
use crate::data::UserProfile;
use crate::profile::{ProfileField, ProfileState, ProfileTab, SettingsRow};
use crate::theme::{Palette, Theme};

/// Renders the profile screen into `area`
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(20)])
        .split(area);

    render_sidebar(frame, &app.profile, columns[0], &palette);

    let profile = &app.profile;
    match profile.tab {
        ProfileTab::Profile | ProfileTab::Messages => {
            render_profile(frame, profile, columns[1], &palette)
        }
        ProfileTab::Favorites => render_favorites(frame, app, columns[1], &palette),
        ProfileTab::History => render_history(frame, profile, columns[1], &palette),
        ProfileTab::Settings => {
            render_settings(frame, profile, app.theme_watcher.current(), columns[1], &palette)
        }
    }
}

fn render_sidebar(frame: &mut Frame, profile: &ProfileState, area: Rect, palette: &Palette) {
    let user = profile.profile();
    let mut lines = vec![
        Line::from(Span::styled(
            user.name.clone(),
            Style::default()
                .fg(palette.foreground)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("★ {:.1} · since {}", user.rating, user.member_since),
            Style::default().fg(palette.muted),
        )),
        Line::from(""),
    ];
    for (index, tab) in ProfileTab::all().iter().enumerate() {
        let active = *tab == profile.tab;
        let style = if active {
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.foreground)
        };
        lines.push(Line::from(vec![
            Span::styled(cursor(active), Style::default().fg(palette.primary)),
            Span::styled(format!("{} ", index + 1), Style::default().fg(palette.muted)),
            Span::styled(tab.label(), style),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines).block(titled_block("Account", palette)),
        area,
    );
}

fn render_profile(frame: &mut Frame, profile: &ProfileState, area: Rect, palette: &Palette) {
    let shown = profile.displayed();
    let editing = profile.is_editing();

    let mut lines = Vec::new();
    for field in ProfileField::all() {
        let focused = editing && *field == profile.focused_field();
        let caret = if focused { "_" } else { "" };
        let value_style = if focused {
            Style::default().fg(palette.primary)
        } else {
            Style::default().fg(palette.foreground)
        };
        lines.push(Line::from(vec![
            Span::styled(cursor(focused), Style::default().fg(palette.primary)),
            Span::styled(format!("{:<10}", field.label()), Style::default().fg(palette.muted)),
            Span::styled(format!("{}{}", field_value(shown, *field), caret), value_style),
        ]));
    }
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<10}", "Phone"), Style::default().fg(palette.muted)),
        Span::raw(shown.phone.clone()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "{} rentals · {} purchases",
            shown.total_rentals, shown.total_purchases
        ),
        Style::default().fg(palette.accent),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        if editing {
            "Enter: save · Esc: cancel · ↑↓: field"
        } else {
            "e: edit profile"
        },
        Style::default().fg(palette.muted),
    )));

    let title = if editing {
        "My Profile (editing)"
    } else {
        "My Profile"
    };
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(titled_block(title, palette)),
        area,
    );
}

fn field_value(profile: &UserProfile, field: ProfileField) -> &str {
    match field {
        ProfileField::Name => &profile.name,
        ProfileField::Email => &profile.email,
        ProfileField::Location => &profile.location,
        ProfileField::Bio => &profile.bio,
    }
}

fn render_favorites(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let favorites = app.favorite_listings();
    let lines: Vec<Line> = if favorites.is_empty() {
        vec![Line::from(Span::styled(
            "No favourites yet. Press f on a listing to save it.",
            Style::default().fg(palette.muted),
        ))]
    } else {
        favorites
            .iter()
            .enumerate()
            .map(|(index, listing)| {
                let selected = index == app.favorites_cursor;
                Line::from(vec![
                    Span::styled(cursor(selected), Style::default().fg(palette.primary)),
                    Span::styled(
                        format!("{:<28}", listing.name),
                        Style::default().fg(palette.foreground),
                    ),
                    Span::styled(listing.price_label(), Style::default().fg(palette.success)),
                    Span::styled(
                        format!("  {}", listing.location),
                        Style::default().fg(palette.muted),
                    ),
                ])
            })
            .collect()
    };

    frame.render_widget(
        Paragraph::new(lines).block(titled_block("Favorites", palette)),
        area,
    );
}

fn render_history(frame: &mut Frame, profile: &ProfileState, area: Rect, palette: &Palette) {
    let lines: Vec<Line> = if profile.history.is_empty() {
        vec![Line::from(Span::styled(
            "No rentals yet.",
            Style::default().fg(palette.muted),
        ))]
    } else {
        profile
            .history
            .iter()
            .map(|record| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<24}", record.bike_name),
                        Style::default().fg(palette.foreground),
                    ),
                    Span::styled(
                        format!("{}  ", record.date.format("%d %b %Y")),
                        Style::default().fg(palette.muted),
                    ),
                    Span::raw(format!(
                        "{} day{}  ",
                        record.days,
                        if record.days == 1 { "" } else { "s" }
                    )),
                    Span::styled(
                        format!("€{:<6}", record.total),
                        Style::default().fg(palette.success),
                    ),
                    Span::styled(record.status.label(), Style::default().fg(palette.accent)),
                ])
            })
            .collect()
    };

    frame.render_widget(
        Paragraph::new(lines).block(titled_block("My History", palette)),
        area,
    );
}

fn render_settings(
    frame: &mut Frame,
    profile: &ProfileState,
    theme: Theme,
    area: Rect,
    palette: &Palette,
) {
    let mut lines = Vec::new();
    for row in SettingsRow::all() {
        let focused = *row == profile.focused_setting();
        let on = match row {
            SettingsRow::EmailNotifications => profile.notifications.email,
            SettingsRow::PushNotifications => profile.notifications.push,
            SettingsRow::DarkMode => theme == Theme::Dark,
        };
        lines.push(Line::from(vec![
            Span::styled(cursor(focused), Style::default().fg(palette.primary)),
            Span::styled(
                if on { "[x] " } else { "[ ] " },
                Style::default().fg(palette.accent),
            ),
            Span::styled(row.label(), Style::default().fg(palette.foreground)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Space: toggle · s: save preferences",
        Style::default().fg(palette.muted),
    )));

    frame.render_widget(
        Paragraph::new(lines).block(titled_block("Settings", palette)),
        area,
    );
}

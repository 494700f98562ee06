//! Light/dark theme setting
//!
//! One process-wide [`ThemeSettings`] owns the current theme. Views that
//! depend on it hold a [`ThemeWatcher`], which always reads the latest value
//! and can tell whether it changed since the view last looked.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    /// Parses a theme name, case-insensitively
    pub fn from_name(s: &str) -> Option<Theme> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Terminal colours for this theme
    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Color::White,
                foreground: Color::Black,
                muted: Color::DarkGray,
                primary: Color::Rgb(234, 88, 12),
                accent: Color::Blue,
                success: Color::Green,
                border: Color::Gray,
            },
            Theme::Dark => Palette {
                background: Color::Black,
                foreground: Color::White,
                muted: Color::Gray,
                primary: Color::Rgb(251, 146, 60),
                accent: Color::Cyan,
                success: Color::LightGreen,
                border: Color::DarkGray,
            },
        }
    }
}

/// Colours used by every screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub border: Color,
}

/// Owner of the current theme
#[derive(Debug)]
pub struct ThemeSettings {
    tx: watch::Sender<Theme>,
}

impl ThemeSettings {
    pub fn new(initial: Theme) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn current(&self) -> Theme {
        *self.tx.borrow()
    }

    /// Sets the theme, notifying watchers only if it actually changed
    pub fn set(&self, theme: Theme) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == theme {
                false
            } else {
                *current = theme;
                true
            }
        });
        if changed {
            info!(theme = theme.label(), "theme changed");
        }
    }

    /// Flips between light and dark and returns the new theme
    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next);
        next
    }

    /// Registers a dependent view
    pub fn subscribe(&self) -> ThemeWatcher {
        ThemeWatcher {
            rx: self.tx.subscribe(),
        }
    }
}

/// A view's handle on the theme
#[derive(Debug, Clone)]
pub struct ThemeWatcher {
    rx: watch::Receiver<Theme>,
}

impl ThemeWatcher {
    pub fn current(&self) -> Theme {
        *self.rx.borrow()
    }

    pub fn palette(&self) -> Palette {
        self.current().palette()
    }

    /// Returns true once per change, then false until the next change
    pub fn take_change(&mut self) -> bool {
        match self.rx.has_changed() {
            Ok(true) => {
                self.rx.borrow_and_update();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        assert_eq!(Theme::from_name("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_name("LIGHT"), Some(Theme::Light));
        assert_eq!(Theme::from_name("sepia"), None);
    }

    #[test]
    fn test_toggle_flips() {
        let settings = ThemeSettings::new(Theme::Light);
        assert_eq!(settings.toggle(), Theme::Dark);
        assert_eq!(settings.current(), Theme::Dark);
        assert_eq!(settings.toggle(), Theme::Light);
    }

    #[test]
    fn test_watcher_sees_latest_theme() {
        let settings = ThemeSettings::new(Theme::Light);
        let watcher = settings.subscribe();
        settings.set(Theme::Dark);
        assert_eq!(watcher.current(), Theme::Dark);
        assert_eq!(watcher.palette(), Theme::Dark.palette());
    }

    #[test]
    fn test_watcher_notified_once_per_change() {
        let settings = ThemeSettings::new(Theme::Light);
        let mut watcher = settings.subscribe();
        assert!(!watcher.take_change());

        settings.toggle();
        assert!(watcher.take_change());
        assert!(!watcher.take_change());
    }

    #[test]
    fn test_setting_same_theme_does_not_notify() {
        let settings = ThemeSettings::new(Theme::Dark);
        let mut watcher = settings.subscribe();
        settings.set(Theme::Dark);
        assert!(!watcher.take_change());
    }

    #[test]
    fn test_set_without_watchers_still_updates() {
        let settings = ThemeSettings::new(Theme::Light);
        settings.set(Theme::Dark);
        assert_eq!(settings.current(), Theme::Dark);
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Theme::Light.palette(), Theme::Dark.palette());
    }
}

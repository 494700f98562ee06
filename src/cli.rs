//! Command-line interface parsing for Wheel Deal
//!
//! This module handles parsing of CLI arguments using clap: the start screen,
//! the listing to open, the theme override and the config/log file paths.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::data::Catalog;
use crate::theme::Theme;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified screen name is not recognized
    #[error("Invalid screen: '{0}'. Valid screens: home, search, rental, sell, chat, profile")]
    InvalidScreen(String),
    /// The specified theme name is not recognized
    #[error("Invalid theme: '{0}'. Valid themes: light, dark")]
    InvalidTheme(String),
    /// No listing with this id exists
    #[error("Unknown listing: {0}")]
    UnknownListing(u32),
    /// The listing is for sale and cannot be rented
    #[error("Listing {0} is for sale, not for rent")]
    NotRentable(u32),
}

/// Wheel Deal - rent and buy motorcycles from the terminal
#[derive(Parser, Debug)]
#[command(name = "wheeldeal")]
#[command(about = "Motorcycle rental and sale marketplace")]
#[command(version)]
pub struct Cli {
    /// Screen to open at startup
    ///
    /// Valid screens: home, search, rental, sell, chat, profile
    #[arg(long, value_name = "SCREEN")]
    pub screen: Option<String>,

    /// Listing to open: its detail page, or its checkout with --screen rental
    #[arg(long, value_name = "ID")]
    pub listing: Option<u32>,

    /// Colour theme, overriding the config file (light, dark)
    #[arg(long, value_name = "THEME")]
    pub theme: Option<String>,

    /// Path to a config file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the log file (defaults to the user data directory)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Screens that can be opened from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartScreen {
    #[default]
    Home,
    Search,
    Rental,
    Sell,
    Chat,
    Profile,
}

impl StartScreen {
    /// Parses a screen name, case-insensitively. "rent" is an alias for rental.
    pub fn from_name(s: &str) -> Option<StartScreen> {
        match s.trim().to_lowercase().as_str() {
            "home" => Some(StartScreen::Home),
            "search" => Some(StartScreen::Search),
            "rental" | "rent" => Some(StartScreen::Rental),
            "sell" => Some(StartScreen::Sell),
            "chat" | "messages" => Some(StartScreen::Chat),
            "profile" => Some(StartScreen::Profile),
            _ => None,
        }
    }
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Screen to show first
    pub screen: StartScreen,
    /// Listing to open, if one was named
    pub listing: Option<u32>,
    /// Theme override
    pub theme: Option<Theme>,
    pub config_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if a screen or theme name was not recognized
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let screen = match &cli.screen {
            Some(name) => {
                StartScreen::from_name(name).ok_or_else(|| CliError::InvalidScreen(name.clone()))?
            }
            None => StartScreen::default(),
        };
        let theme = match &cli.theme {
            Some(name) => {
                Some(Theme::from_name(name).ok_or_else(|| CliError::InvalidTheme(name.clone()))?)
            }
            None => None,
        };

        Ok(StartupConfig {
            screen,
            listing: cli.listing,
            theme,
            config_path: cli.config.clone(),
            log_file: cli.log_file.clone(),
        })
    }

    /// Checks the requested listing against the catalogue.
    ///
    /// The listing must exist, and must be a rental when opening the checkout.
    pub fn check_listing(&self, catalog: &Catalog) -> Result<(), CliError> {
        let Some(id) = self.listing else {
            return Ok(());
        };
        let listing = catalog.get(id).ok_or(CliError::UnknownListing(id))?;
        if self.screen == StartScreen::Rental && !listing.is_rental() {
            return Err(CliError::NotRentable(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_screen_aliases() {
        assert_eq!(StartScreen::from_name("rent"), Some(StartScreen::Rental));
        assert_eq!(StartScreen::from_name("Rental"), Some(StartScreen::Rental));
        assert_eq!(StartScreen::from_name("messages"), Some(StartScreen::Chat));
        assert_eq!(StartScreen::from_name("garage"), None);
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["wheeldeal"]);
        assert!(cli.screen.is_none());
        assert!(cli.listing.is_none());
        assert!(cli.theme.is_none());
    }

    #[test]
    fn test_cli_parse_all_flags() {
        let cli = Cli::parse_from([
            "wheeldeal",
            "--screen",
            "rental",
            "--listing",
            "3",
            "--theme",
            "dark",
            "--config",
            "/tmp/wd.json",
            "--log-file",
            "/tmp/wd.log",
        ]);
        assert_eq!(cli.screen.as_deref(), Some("rental"));
        assert_eq!(cli.listing, Some(3));
        assert_eq!(cli.theme.as_deref(), Some("dark"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/wd.json")));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/wd.log")));
    }

    #[test]
    fn test_cli_rejects_non_numeric_listing() {
        assert!(Cli::try_parse_from(["wheeldeal", "--listing", "abc"]).is_err());
    }

    #[test]
    fn test_startup_config_default() {
        let config = StartupConfig::default();
        assert_eq!(config.screen, StartScreen::Home);
        assert!(config.listing.is_none());
        assert!(config.theme.is_none());
    }

    #[test]
    fn test_startup_config_from_cli() {
        let cli = Cli::parse_from(["wheeldeal", "--screen", "sell", "--theme", "Dark"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.screen, StartScreen::Sell);
        assert_eq!(config.theme, Some(Theme::Dark));
    }

    #[test]
    fn test_startup_config_invalid_screen() {
        let cli = Cli::parse_from(["wheeldeal", "--screen", "garage"]);
        let err = StartupConfig::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("Invalid screen"));
        assert!(err.to_string().contains("garage"));
    }

    #[test]
    fn test_startup_config_invalid_theme() {
        let cli = Cli::parse_from(["wheeldeal", "--theme", "sepia"]);
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::InvalidTheme(_))
        ));
    }

    #[test]
    fn test_check_listing() {
        let catalog = Catalog::load().unwrap();

        let detail = StartupConfig {
            listing: Some(2),
            ..Default::default()
        };
        assert!(detail.check_listing(&catalog).is_ok());

        let unknown = StartupConfig {
            listing: Some(99),
            ..Default::default()
        };
        assert!(matches!(
            unknown.check_listing(&catalog),
            Err(CliError::UnknownListing(99))
        ));

        let rent_sale = StartupConfig {
            screen: StartScreen::Rental,
            listing: Some(2),
            ..Default::default()
        };
        assert!(matches!(
            rent_sale.check_listing(&catalog),
            Err(CliError::NotRentable(2))
        ));
    }
}

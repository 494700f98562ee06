//! Marketplace records and their mock sources
//!
//! Every page of the marketplace reads from the records defined here. The
//! records are loaded from embedded JSON and validated on the way in, so the
//! rest of the application only ever sees well-formed data.

pub mod catalog;
pub mod chat;
pub mod profile;

pub use catalog::Catalog;
pub use chat::ChatData;
pub use profile::ProfileData;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating mock records
#[derive(Debug, Error)]
pub enum DataError {
    /// The embedded JSON could not be parsed
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        source: serde_json::Error,
    },
    /// A listing failed validation
    #[error("invalid listing {id}: {reason}")]
    InvalidListing { id: u32, reason: String },
    /// Two listings share an id
    #[error("duplicate listing id {0}")]
    DuplicateListing(u32),
    /// Category name is not one of the known categories
    #[error("unknown category '{0}'. Valid categories: sport, naked, touring, scooter, cruiser")]
    UnknownCategory(String),
    /// Any other record failed validation
    #[error("invalid {record}: {reason}")]
    InvalidRecord {
        record: &'static str,
        reason: String,
    },
}

/// Whether a listing is offered for rent or for sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Rental,
    Sale,
}

impl ListingKind {
    pub fn label(&self) -> &'static str {
        match self {
            ListingKind::Rental => "Rental",
            ListingKind::Sale => "Sale",
        }
    }
}

/// Motorcycle category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sport,
    Naked,
    Touring,
    Scooter,
    Cruiser,
}

impl Category {
    /// Returns all categories in menu order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Sport,
            Category::Naked,
            Category::Touring,
            Category::Scooter,
            Category::Cruiser,
        ]
    }

    /// Returns a human-readable display label for the category.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Sport => "Sport",
            Category::Naked => "Naked",
            Category::Touring => "Touring",
            Category::Scooter => "Scooter",
            Category::Cruiser => "Cruiser",
        }
    }

    /// Parses a category name, case-insensitively.
    ///
    /// The Spanish catalogue name "deportiva" is accepted as an alias for Sport.
    pub fn from_name(s: &str) -> Option<Category> {
        match s.trim().to_lowercase().as_str() {
            "sport" | "deportiva" => Some(Category::Sport),
            "naked" => Some(Category::Naked),
            "touring" => Some(Category::Touring),
            "scooter" => Some(Category::Scooter),
            "cruiser" => Some(Category::Cruiser),
            _ => None,
        }
    }

    /// Next category in menu order, wrapping around
    pub fn next(&self) -> Category {
        let all = Self::all();
        let index = all.iter().position(|c| c == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }
}

/// Person or dealer offering a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub rating: f32,
    pub total_rentals: u32,
}

/// Rental availability of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub available: bool,
    pub next_available: Option<NaiveDate>,
}

/// A motorcycle offered on the marketplace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub id: u32,
    pub name: String,
    pub kind: ListingKind,
    /// Daily rate for rentals, asking price for sales (whole euros)
    pub price: u64,
    pub category: Category,
    /// Average review score, 0.0 to 5.0
    pub rating: f32,
    pub reviews: u32,
    pub location: String,
    pub description: String,
    pub features: Vec<String>,
    /// Image captions, in gallery order
    pub images: Vec<String>,
    pub owner: Owner,
    pub availability: Availability,
}

impl Listing {
    /// Daily rate, for rental listings only
    pub fn daily_price(&self) -> Option<u64> {
        match self.kind {
            ListingKind::Rental => Some(self.price),
            ListingKind::Sale => None,
        }
    }

    pub fn is_rental(&self) -> bool {
        self.kind == ListingKind::Rental
    }

    /// Price with its unit, e.g. "€45/day" or "€8500"
    pub fn price_label(&self) -> String {
        match self.kind {
            ListingKind::Rental => format!("€{}/day", self.price),
            ListingKind::Sale => format!("€{}", self.price),
        }
    }
}

/// A conversation in the inbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatThread {
    pub id: u32,
    pub name: String,
    pub last_message: String,
    /// Display time of the last message ("10:30", "Yesterday")
    pub time: String,
    pub unread: u32,
    pub online: bool,
}

/// One message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u32,
    pub sender: String,
    pub body: String,
    pub time: String,
    /// Sent by the current user
    pub is_own: bool,
}

/// The signed-in user's public profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub member_since: String,
    pub rating: f32,
    pub total_rentals: u32,
    pub total_purchases: u32,
    pub bio: String,
}

/// Outcome of a past rental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Completed,
    Cancelled,
}

impl RentalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RentalStatus::Completed => "Completed",
            RentalStatus::Cancelled => "Cancelled",
        }
    }
}

/// A past rental in the user's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalRecord {
    pub id: u32,
    pub bike_name: String,
    pub date: NaiveDate,
    pub days: u32,
    pub total: u64,
    pub status: RentalStatus,
}

/// Everything the pages need, loaded and validated together
#[derive(Debug, Clone)]
pub struct MockData {
    pub catalog: Catalog,
    pub chat: ChatData,
    pub profile: ProfileData,
}

impl MockData {
    /// Loads every embedded mock source
    pub fn load() -> Result<Self, DataError> {
        Ok(Self {
            catalog: Catalog::load()?,
            chat: ChatData::load()?,
            profile: ProfileData::load()?,
        })
    }
}

/// Ratings are on a five-star scale
pub(crate) fn valid_rating(rating: f32) -> bool {
    rating.is_finite() && (0.0..=5.0).contains(&rating)
}

/// Minimal rental listing for unit tests
#[cfg(test)]
pub(crate) fn test_listing(daily_price: u64) -> Listing {
    Listing {
        id: 1,
        name: "Yamaha MT-07".to_string(),
        kind: ListingKind::Rental,
        price: daily_price,
        category: Category::Sport,
        rating: 4.8,
        reviews: 24,
        location: "Madrid Centro".to_string(),
        description: String::new(),
        features: Vec::new(),
        images: Vec::new(),
        owner: Owner {
            name: "Carlos Ruiz".to_string(),
            rating: 4.9,
            total_rentals: 156,
        },
        availability: Availability {
            available: true,
            next_available: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_name() {
        assert_eq!(Category::from_name("sport"), Some(Category::Sport));
        assert_eq!(Category::from_name("Deportiva"), Some(Category::Sport));
        assert_eq!(Category::from_name("NAKED"), Some(Category::Naked));
        assert_eq!(Category::from_name(" touring "), Some(Category::Touring));
        assert_eq!(Category::from_name("enduro"), None);
    }

    #[test]
    fn test_category_next_wraps() {
        assert_eq!(Category::Sport.next(), Category::Naked);
        assert_eq!(Category::Cruiser.next(), Category::Sport);
    }

    #[test]
    fn test_daily_price_only_for_rentals() {
        let mut listing = test_listing(45);
        assert_eq!(listing.daily_price(), Some(45));
        assert_eq!(listing.price_label(), "€45/day");

        listing.kind = ListingKind::Sale;
        assert_eq!(listing.daily_price(), None);
        assert_eq!(listing.price_label(), "€45");
    }

    #[test]
    fn test_valid_rating_bounds() {
        assert!(valid_rating(0.0));
        assert!(valid_rating(5.0));
        assert!(!valid_rating(5.1));
        assert!(!valid_rating(-0.1));
        assert!(!valid_rating(f32::NAN));
    }

    #[test]
    fn test_mock_data_loads() {
        let data = MockData::load().unwrap();
        assert!(!data.catalog.all().is_empty());
        assert!(!data.chat.threads.is_empty());
        assert_eq!(data.profile.profile.name, "María González");
    }
}

//! Listing catalogue
//!
//! Loads the embedded listing records and validates them into [`Listing`]s.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::debug;

use super::{valid_rating, Availability, Category, DataError, Listing, ListingKind, Owner};

/// Embedded listing records
const LISTINGS_JSON: &str = include_str!("mock/listings.json");

/// Number of listings promoted on the home screen
pub const FEATURED_COUNT: usize = 3;

/// Listing as it appears in the source data, before validation
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawListing {
    id: u32,
    name: String,
    kind: ListingKind,
    price: u64,
    category: String,
    rating: f32,
    #[serde(default)]
    reviews: u32,
    location: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    images: Vec<String>,
    owner: Owner,
    availability: Availability,
}

impl TryFrom<RawListing> for Listing {
    type Error = DataError;

    fn try_from(raw: RawListing) -> Result<Self, Self::Error> {
        let id = raw.id;
        let invalid = |reason: &str| DataError::InvalidListing {
            id,
            reason: reason.to_string(),
        };

        if raw.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if raw.location.trim().is_empty() {
            return Err(invalid("location is empty"));
        }
        if raw.price == 0 {
            return Err(invalid("price must be greater than zero"));
        }
        if !valid_rating(raw.rating) {
            return Err(invalid("rating must be between 0 and 5"));
        }
        if raw.owner.name.trim().is_empty() {
            return Err(invalid("owner name is empty"));
        }
        if !valid_rating(raw.owner.rating) {
            return Err(invalid("owner rating must be between 0 and 5"));
        }
        let category = Category::from_name(&raw.category)
            .ok_or_else(|| DataError::UnknownCategory(raw.category.clone()))?;

        Ok(Listing {
            id: raw.id,
            name: raw.name,
            kind: raw.kind,
            price: raw.price,
            category,
            rating: raw.rating,
            reviews: raw.reviews,
            location: raw.location,
            description: raw.description,
            features: raw.features,
            images: raw.images,
            owner: raw.owner,
            availability: raw.availability,
        })
    }
}

/// Validated set of listings, in source order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    listings: Vec<Listing>,
}

impl Catalog {
    /// Loads the embedded catalogue
    pub fn load() -> Result<Self, DataError> {
        Self::from_json(LISTINGS_JSON)
    }

    /// Parses and validates a JSON array of listings
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let raw: Vec<RawListing> = serde_json::from_str(json).map_err(|source| {
            DataError::Parse {
                what: "listings",
                source,
            }
        })?;

        let mut seen = HashSet::new();
        let mut listings = Vec::with_capacity(raw.len());
        for record in raw {
            if !seen.insert(record.id) {
                return Err(DataError::DuplicateListing(record.id));
            }
            listings.push(Listing::try_from(record)?);
        }

        debug!(count = listings.len(), "catalog loaded");
        Ok(Self { listings })
    }

    pub fn all(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Get a listing by its id
    pub fn get(&self, id: u32) -> Option<&Listing> {
        self.listings.iter().find(|listing| listing.id == id)
    }

    /// Listings promoted on the home screen
    pub fn featured(&self) -> &[Listing] {
        &self.listings[..self.listings.len().min(FEATURED_COUNT)]
    }

    /// Resolves favourite ids to listings, skipping ids not in the catalogue
    pub fn favorites(&self, ids: &[u32]) -> Vec<&Listing> {
        ids.iter().filter_map(|id| self.get(*id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_json(id: u32, overrides: &str) -> String {
        format!(
            r#"{{
                "id": {id},
                "name": "Test Bike",
                "kind": "rental",
                "price": 30,
                "category": "naked",
                "rating": 4.0,
                "location": "Madrid",
                "owner": {{ "name": "Owner", "rating": 4.5, "total_rentals": 1 }},
                "availability": {{ "available": true, "next_available": null }}
                {overrides}
            }}"#
        )
    }

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.len(), 6);
        let first = catalog.get(1).unwrap();
        assert_eq!(first.name, "Yamaha MT-07");
        assert_eq!(first.daily_price(), Some(45));
        assert_eq!(first.category, Category::Sport);
    }

    #[test]
    fn test_featured_is_first_three() {
        let catalog = Catalog::load().unwrap();
        let ids: Vec<u32> = catalog.featured().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_featured_with_short_catalog() {
        let catalog = Catalog::from_json(&format!("[{}]", listing_json(7, ""))).unwrap();
        assert_eq!(catalog.featured().len(), 1);
    }

    #[test]
    fn test_favorites_skip_unknown_ids() {
        let catalog = Catalog::load().unwrap();
        let favorites = catalog.favorites(&[4, 99, 1]);
        let ids: Vec<u32> = favorites.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![4, 1]);
    }

    #[test]
    fn test_get_unknown_returns_none() {
        let catalog = Catalog::load().unwrap();
        assert!(catalog.get(999).is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = format!("[{}, {}]", listing_json(3, ""), listing_json(3, ""));
        assert!(matches!(
            Catalog::from_json(&json),
            Err(DataError::DuplicateListing(3))
        ));
    }

    #[test]
    fn test_rejects_unknown_category() {
        let json = format!("[{}]", listing_json(1, "").replace("naked", "enduro"));
        let err = Catalog::from_json(&json).unwrap_err();
        assert!(matches!(err, DataError::UnknownCategory(ref c) if c == "enduro"));
    }

    #[test]
    fn test_rejects_out_of_range_rating() {
        let json = format!("[{}]", listing_json(1, "").replace("4.0", "7.5"));
        let err = Catalog::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("rating"));
    }

    #[test]
    fn test_rejects_zero_price() {
        let json = format!(
            "[{}]",
            listing_json(1, "").replace("\"price\": 30", "\"price\": 0")
        );
        assert!(matches!(
            Catalog::from_json(&json),
            Err(DataError::InvalidListing { id: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_blank_name() {
        let json = format!("[{}]", listing_json(1, "").replace("Test Bike", "  "));
        let err = Catalog::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("name is empty"));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let json = format!("[{}]", listing_json(1, r#", "colour": "red""#));
        assert!(matches!(
            Catalog::from_json(&json),
            Err(DataError::Parse { .. })
        ));
    }

    #[test]
    fn test_optional_fields_default() {
        let catalog = Catalog::from_json(&format!("[{}]", listing_json(1, ""))).unwrap();
        let listing = catalog.get(1).unwrap();
        assert_eq!(listing.reviews, 0);
        assert!(listing.features.is_empty());
        assert!(listing.description.is_empty());
    }
}

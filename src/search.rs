//! Listing search
//!
//! Free-text, location and category filtering over the catalogue, plus the
//! grid/list toggle of the results page.

use crate::data::{Category, Listing};

/// What the user typed into the search bar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Matched against listing name and category label
    pub term: String,
    /// Matched against listing location
    pub location: String,
    /// `None` means every category
    pub category: Option<Category>,
}

impl SearchQuery {
    /// Query restricted to one category, as opened from the home screen
    pub fn for_category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.term.trim().is_empty() && self.location.trim().is_empty() && self.category.is_none()
    }

    /// Whether a single listing satisfies every part of the query
    pub fn matches(&self, listing: &Listing) -> bool {
        let term = self.term.trim().to_lowercase();
        if !term.is_empty() {
            let in_name = listing.name.to_lowercase().contains(&term);
            let in_category = listing.category.label().to_lowercase().contains(&term);
            if !in_name && !in_category {
                return false;
            }
        }

        let location = self.location.trim().to_lowercase();
        if !location.is_empty() && !listing.location.to_lowercase().contains(&location) {
            return false;
        }

        match self.category {
            Some(category) => listing.category == category,
            None => true,
        }
    }

    /// Cycles the category filter: all, then each category, then all again
    pub fn cycle_category(&mut self) {
        let all = Category::all();
        self.category = match self.category {
            None => all.first().copied(),
            Some(current) if Some(&current) == all.last() => None,
            Some(current) => Some(current.next()),
        };
    }

    /// Label of the active category filter
    pub fn category_label(&self) -> &'static str {
        self.category.map(|c| c.label()).unwrap_or("All")
    }
}

/// Filters listings by the query, preserving catalogue order
pub fn filter_listings<'a>(listings: &'a [Listing], query: &SearchQuery) -> Vec<&'a Listing> {
    listings.iter().filter(|listing| query.matches(listing)).collect()
}

/// How results are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Grid => "Grid",
            ViewMode::List => "List",
        }
    }
}

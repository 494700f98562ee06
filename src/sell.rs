//! Listing creation form
//!
//! Form state for publishing a motorcycle for sale. Submission is mocked:
//! every form is accepted and queued "for review".

use serde::Serialize;
use tracing::info;

use crate::data::Category;
use crate::toast::Toast;

/// Editable fields of the sell form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellField {
    Title,
    Category,
    Brand,
    Model,
    Year,
    Mileage,
    Description,
    Feature,
    Price,
}

impl SellField {
    pub fn all() -> &'static [SellField] {
        &[
            SellField::Title,
            SellField::Category,
            SellField::Brand,
            SellField::Model,
            SellField::Year,
            SellField::Mileage,
            SellField::Description,
            SellField::Feature,
            SellField::Price,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SellField::Title => "Title",
            SellField::Category => "Category",
            SellField::Brand => "Brand",
            SellField::Model => "Model",
            SellField::Year => "Year",
            SellField::Mileage => "Mileage (km)",
            SellField::Description => "Description",
            SellField::Feature => "Add feature",
            SellField::Price => "Sale price (€)",
        }
    }

    /// Hint shown while the field is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            SellField::Title => "e.g. Yamaha MT-07, nearly new",
            SellField::Category => "",
            SellField::Brand => "Brand",
            SellField::Model => "Model",
            SellField::Year => "Year",
            SellField::Mileage => "Mileage",
            SellField::Description => "Describe your motorcycle...",
            SellField::Feature => "e.g. Akrapovic exhaust, heated grips...",
            SellField::Price => "Sale price",
        }
    }
}

/// Form contents as submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub brand: String,
    pub model: String,
    /// `None` when the year field is not a number
    pub year: Option<u16>,
    pub mileage: Option<u32>,
    pub price: Option<u64>,
    pub features: Vec<String>,
}

/// In-progress sell form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellForm {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub mileage: String,
    pub price: String,
    pub features: Vec<String>,
    /// Text of the feature being typed, not yet added
    pub pending_feature: String,
}

impl Default for SellForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: Category::Sport,
            brand: String::new(),
            model: String::new(),
            year: String::new(),
            mileage: String::new(),
            price: String::new(),
            features: Vec::new(),
            pending_feature: String::new(),
        }
    }
}

impl SellForm {
    /// Text buffer behind a field; `None` for the category selector
    pub fn text_mut(&mut self, field: SellField) -> Option<&mut String> {
        match field {
            SellField::Title => Some(&mut self.title),
            SellField::Category => None,
            SellField::Brand => Some(&mut self.brand),
            SellField::Model => Some(&mut self.model),
            SellField::Year => Some(&mut self.year),
            SellField::Mileage => Some(&mut self.mileage),
            SellField::Description => Some(&mut self.description),
            SellField::Feature => Some(&mut self.pending_feature),
            SellField::Price => Some(&mut self.price),
        }
    }

    /// Current text of a field, or the category label
    pub fn value(&self, field: SellField) -> &str {
        match field {
            SellField::Title => &self.title,
            SellField::Category => self.category.label(),
            SellField::Brand => &self.brand,
            SellField::Model => &self.model,
            SellField::Year => &self.year,
            SellField::Mileage => &self.mileage,
            SellField::Description => &self.description,
            SellField::Feature => &self.pending_feature,
            SellField::Price => &self.price,
        }
    }

    pub fn cycle_category(&mut self) {
        self.category = self.category.next();
    }

    /// Adds the pending feature if it is not blank, then clears it.
    ///
    /// Returns whether a feature was added.
    pub fn add_feature(&mut self) -> bool {
        let feature = self.pending_feature.trim();
        if feature.is_empty() {
            return false;
        }
        self.features.push(feature.to_string());
        self.pending_feature.clear();
        true
    }

    /// Removes a feature by index; out of range does nothing
    pub fn remove_feature(&mut self, index: usize) -> Option<String> {
        (index < self.features.len()).then(|| self.features.remove(index))
    }

    /// Snapshot of the form with numeric fields parsed leniently
    pub fn draft(&self) -> ListingDraft {
        ListingDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category,
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            year: self.year.trim().parse().ok(),
            mileage: self.mileage.trim().parse().ok(),
            price: self.price.trim().parse().ok(),
            features: self.features.clone(),
        }
    }

    /// Submits the listing for review and resets the form
    pub fn submit(&mut self) -> Submission {
        let draft = self.draft();
        info!(title = %draft.title, category = ?draft.category, "listing submitted for review");
        *self = Self::default();
        Submission {
            draft,
            toast: Toast::new(
                "🚧 Listing sent for review",
                "Thanks for publishing. Your listing will be visible soon. 🚀",
            ),
        }
    }
}

/// Result of publishing the sell form
#[derive(Debug, Clone)]
pub struct Submission {
    pub draft: ListingDraft,
    /// Confirmation shown to the seller
    pub toast: Toast,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_category_is_sport() {
        assert_eq!(SellForm::default().category, Category::Sport);
    }

    #[test]
    fn test_add_feature_trims_and_clears() {
        let mut form = SellForm::default();
        form.pending_feature = "  Heated grips ".to_string();
        assert!(form.add_feature());
        assert_eq!(form.features, vec!["Heated grips"]);
        assert!(form.pending_feature.is_empty());
    }

    #[test]
    fn test_add_blank_feature_is_ignored() {
        let mut form = SellForm::default();
        form.pending_feature = "   ".to_string();
        assert!(!form.add_feature());
        assert!(form.features.is_empty());
        assert_eq!(form.pending_feature, "   ", "blank text is left in place");
    }

    #[test]
    fn test_remove_feature() {
        let mut form = SellForm::default();
        form.features = vec!["A".into(), "B".into(), "C".into()];
        assert_eq!(form.remove_feature(1), Some("B".to_string()));
        assert_eq!(form.features, vec!["A", "C"]);
        assert_eq!(form.remove_feature(5), None);
        assert_eq!(form.features.len(), 2);
    }

    #[test]
    fn test_text_mut_routes_to_fields() {
        let mut form = SellForm::default();
        form.text_mut(SellField::Brand).unwrap().push_str("Honda");
        form.text_mut(SellField::Price).unwrap().push_str("8500");
        assert!(form.text_mut(SellField::Category).is_none());
        assert_eq!(form.value(SellField::Brand), "Honda");
        assert_eq!(form.value(SellField::Price), "8500");
        assert_eq!(form.value(SellField::Category), "Sport");
    }

    #[test]
    fn test_draft_parses_numbers_leniently() {
        let mut form = SellForm::default();
        form.year = "2021".into();
        form.mileage = "12k".into();
        form.price = " 7900 ".into();

        let draft = form.draft();
        assert_eq!(draft.year, Some(2021));
        assert_eq!(draft.mileage, None);
        assert_eq!(draft.price, Some(7900));
    }

    #[test]
    fn test_submit_accepts_empty_form_and_resets() {
        let mut form = SellForm::default();
        form.title = "Honda CB650R".into();
        form.cycle_category();
        form.features.push("ABS".into());

        let submission = form.submit();
        assert!(submission.toast.title.contains("review"));
        let draft = submission.draft;
        assert_eq!(draft.title, "Honda CB650R");
        assert_eq!(draft.category, Category::Naked);
        assert_eq!(draft.features, vec!["ABS"]);
        assert_eq!(form, SellForm::default());

        let empty = form.submit().draft;
        assert!(empty.title.is_empty());
    }
}

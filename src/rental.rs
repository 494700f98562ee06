//! Rental checkout form
//!
//! Keyboard-facing wrapper around [`BookingFlow`]: tracks which field has
//! focus and the raw text of the date inputs, and forwards every edit to the
//! flow as a typed field update.

use crate::booking::{parse_date_input, BookingField, BookingFlow, FlowError};
use crate::data::Listing;

/// Form fields in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalField {
    StartDate,
    EndDate,
    StartTime,
    EndTime,
    PickupLocation,
    Insurance,
    Helmet,
}

impl RentalField {
    pub fn all() -> &'static [RentalField] {
        &[
            RentalField::StartDate,
            RentalField::EndDate,
            RentalField::StartTime,
            RentalField::EndTime,
            RentalField::PickupLocation,
            RentalField::Insurance,
            RentalField::Helmet,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            RentalField::StartDate => "Start date",
            RentalField::EndDate => "End date",
            RentalField::StartTime => "Pickup time",
            RentalField::EndTime => "Return time",
            RentalField::PickupLocation => "Pickup address",
            RentalField::Insurance => "Premium insurance (+€10/day)",
            RentalField::Helmet => "Helmet included (+€5)",
        }
    }

    /// Checkbox fields are toggled rather than typed into
    pub fn is_toggle(&self) -> bool {
        matches!(self, RentalField::Insurance | RentalField::Helmet)
    }
}

/// One checkout session on the rental screen
#[derive(Debug, Clone)]
pub struct RentalSession {
    pub flow: BookingFlow,
    /// Index of the focused field
    pub cursor: usize,
    /// Whether keystrokes go into the focused text field
    pub editing: bool,
    start_date_input: String,
    end_date_input: String,
}

impl RentalSession {
    pub fn new(listing: Listing) -> Result<Self, FlowError> {
        Ok(Self {
            flow: BookingFlow::new(listing)?,
            cursor: 0,
            editing: false,
            start_date_input: String::new(),
            end_date_input: String::new(),
        })
    }

    pub fn focused(&self) -> RentalField {
        let fields = RentalField::all();
        fields[self.cursor % fields.len()]
    }

    pub fn next_field(&mut self) {
        self.cursor = (self.cursor + 1) % RentalField::all().len();
    }

    pub fn previous_field(&mut self) {
        let count = RentalField::all().len();
        self.cursor = (self.cursor + count - 1) % count;
    }

    /// Text shown in a field; empty for checkboxes
    pub fn field_text(&self, field: RentalField) -> &str {
        let selection = self.flow.selection();
        match field {
            RentalField::StartDate => &self.start_date_input,
            RentalField::EndDate => &self.end_date_input,
            RentalField::StartTime => &selection.start_time,
            RentalField::EndTime => &selection.end_time,
            RentalField::PickupLocation => &selection.pickup_location,
            RentalField::Insurance | RentalField::Helmet => "",
        }
    }

    /// Whether a checkbox field is ticked
    pub fn is_checked(&self, field: RentalField) -> bool {
        let selection = self.flow.selection();
        match field {
            RentalField::Insurance => selection.insurance,
            RentalField::Helmet => selection.helmet,
            _ => false,
        }
    }

    /// Replaces the text of a field and forwards it to the flow.
    ///
    /// The displayed text only changes if the flow accepts the edit.
    pub fn set_text(&mut self, field: RentalField, text: String) -> Result<(), FlowError> {
        match field {
            RentalField::StartDate => {
                self.flow
                    .set_field(BookingField::StartDate(parse_date_input(&text)))?;
                self.start_date_input = text;
            }
            RentalField::EndDate => {
                self.flow
                    .set_field(BookingField::EndDate(parse_date_input(&text)))?;
                self.end_date_input = text;
            }
            RentalField::StartTime => self.flow.set_field(BookingField::StartTime(text))?,
            RentalField::EndTime => self.flow.set_field(BookingField::EndTime(text))?,
            RentalField::PickupLocation => {
                self.flow.set_field(BookingField::PickupLocation(text))?
            }
            RentalField::Insurance | RentalField::Helmet => {}
        }
        Ok(())
    }

    /// Appends a character to the focused text field
    pub fn push_char(&mut self, c: char) -> Result<(), FlowError> {
        let field = self.focused();
        if field.is_toggle() {
            return Ok(());
        }
        let mut text = self.field_text(field).to_string();
        text.push(c);
        self.set_text(field, text)
    }

    /// Deletes the last character of the focused text field
    pub fn pop_char(&mut self) -> Result<(), FlowError> {
        let field = self.focused();
        if field.is_toggle() {
            return Ok(());
        }
        let mut text = self.field_text(field).to_string();
        text.pop();
        self.set_text(field, text)
    }

    /// Flips the focused checkbox; does nothing on text fields
    pub fn toggle_focused(&mut self) -> Result<(), FlowError> {
        let field = self.focused();
        let checked = self.is_checked(field);
        match field {
            RentalField::Insurance => self.flow.set_field(BookingField::Insurance(!checked)),
            RentalField::Helmet => self.flow.set_field(BookingField::Helmet(!checked)),
            _ => Ok(()),
        }
    }

    /// Starts a brand-new session for the same listing
    pub fn restart(&mut self) {
        self.flow.restart();
        self.cursor = 0;
        self.editing = false;
        self.start_date_input.clear();
        self.end_date_input.clear();
    }
}

//! Rental booking flow
//!
//! Holds the in-progress selections for one rental checkout session, derives
//! the price quote from them, and drives the side views (location, contract,
//! payment) through to a confirmed booking.
//!
//! Every field value is accepted as-is. An inverted or incomplete date range
//! is not an error; it simply quotes zero.

mod contract;

pub use contract::{
    ContractClause, CONTRACT_ACCEPTANCE, CONTRACT_CLAUSES, CONTRACT_PREAMBLE,
    SECURITY_DEPOSIT_EUR,
};

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::data::Listing;

/// Premium insurance, charged per rental day
pub const INSURANCE_PER_DAY: u64 = 10;

/// Helmet hire, charged once per booking
pub const HELMET_FEE: u64 = 5;

/// Default pickup time
pub const DEFAULT_START_TIME: &str = "09:00";

/// Default return time
pub const DEFAULT_END_TIME: &str = "18:00";

/// Date format accepted by the date input fields
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// In-progress rental choices for one checkout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSelection {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Pickup time of day; free text, not checked against `end_time`
    pub start_time: String,
    /// Return time of day
    pub end_time: String,
    pub pickup_location: String,
    /// Premium insurance add-on
    pub insurance: bool,
    /// Helmet add-on
    pub helmet: bool,
}

impl Default for BookingSelection {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            start_time: DEFAULT_START_TIME.to_string(),
            end_time: DEFAULT_END_TIME.to_string(),
            pickup_location: String::new(),
            insurance: false,
            helmet: false,
        }
    }
}

impl BookingSelection {
    /// Overwrites one attribute. No validation is performed.
    pub fn apply(&mut self, field: BookingField) {
        match field {
            BookingField::StartDate(date) => self.start_date = date,
            BookingField::EndDate(date) => self.end_date = date,
            BookingField::StartTime(time) => self.start_time = time,
            BookingField::EndTime(time) => self.end_time = time,
            BookingField::PickupLocation(location) => self.pickup_location = location,
            BookingField::Insurance(enabled) => self.insurance = enabled,
            BookingField::Helmet(enabled) => self.helmet = enabled,
        }
    }

    /// Inclusive number of rental days covered by the selected dates
    pub fn rental_days(&self) -> u32 {
        rental_days(self.start_date, self.end_date)
    }
}

/// A single edit to a [`BookingSelection`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingField {
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    StartTime(String),
    EndTime(String),
    PickupLocation(String),
    Insurance(bool),
    Helmet(bool),
}

/// Counts rental days between two dates, inclusive of both ends.
///
/// Returns 0 when either date is missing or when `start` falls after `end`.
/// A same-day rental counts as one day.
pub fn rental_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> u32 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0;
    };
    if start > end {
        return 0;
    }
    let days = (end - start).num_days() + 1;
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Parses the text of a date input field.
///
/// Blank or malformed input yields `None`, the same as a date that was never
/// chosen.
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_INPUT_FORMAT).ok()
}

/// Stage of a booking session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlowStep {
    /// Selections are being edited (initial)
    Editing,
    /// Current-location lookup is shown
    ViewingLocation,
    /// Rental contract is shown
    ViewingContract,
    /// Payment form is shown
    AwaitingPayment,
    /// Payment went through (terminal)
    Confirmed,
}

impl FlowStep {
    /// Whether this step is one of the modal side views
    pub fn is_side_view(self) -> bool {
        matches!(
            self,
            FlowStep::ViewingLocation | FlowStep::ViewingContract | FlowStep::AwaitingPayment
        )
    }

    /// Title shown on the modal for this step
    pub fn title(self) -> &'static str {
        match self {
            FlowStep::Editing => "Rental",
            FlowStep::ViewingLocation => "Current Location",
            FlowStep::ViewingContract => "Rental Contract",
            FlowStep::AwaitingPayment => "Payment",
            FlowStep::Confirmed => "Payment Successful!",
        }
    }
}

/// Side views that can be opened from the editing step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideView {
    Location,
    Contract,
    Payment,
}

impl From<SideView> for FlowStep {
    fn from(view: SideView) -> Self {
        match view {
            SideView::Location => FlowStep::ViewingLocation,
            SideView::Contract => FlowStep::ViewingContract,
            SideView::Payment => FlowStep::AwaitingPayment,
        }
    }
}

/// Events the flow refuses to apply
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Payment can only be confirmed from the payment view
    #[error("payment can only be confirmed from the payment view (current step: {0:?})")]
    NotAwaitingPayment(FlowStep),
    /// The booking is already paid; start a new session to change it
    #[error("booking is already confirmed; start a new rental to make changes")]
    SessionConfirmed,
    /// Only rental listings have a daily rate
    #[error("listing {0} is for sale and cannot be rented")]
    NotRentable(u32),
}

/// Line items of the rental summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub days: u32,
    pub daily_price: u64,
    /// `days * daily_price`
    pub base: u64,
    /// Present when insurance is selected
    pub insurance: Option<u64>,
    /// Present when a helmet is selected
    pub helmet: Option<u64>,
    pub total: u64,
}

/// Controller for one rental checkout session
#[derive(Debug, Clone)]
pub struct BookingFlow {
    listing: Listing,
    daily_price: u64,
    selection: BookingSelection,
    step: FlowStep,
}

impl BookingFlow {
    /// Starts a session for a rental listing.
    ///
    /// Sale listings have no daily rate and are rejected.
    pub fn new(listing: Listing) -> Result<Self, FlowError> {
        let daily_price = listing
            .daily_price()
            .ok_or(FlowError::NotRentable(listing.id))?;
        debug!(listing = %listing.id, "starting rental session");
        Ok(Self {
            listing,
            daily_price,
            selection: BookingSelection::default(),
            step: FlowStep::Editing,
        })
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn step(&self) -> FlowStep {
        self.step
    }

    pub fn is_confirmed(&self) -> bool {
        self.step == FlowStep::Confirmed
    }

    /// Daily rate of the listing being booked
    pub fn daily_price(&self) -> u64 {
        self.daily_price
    }

    /// Updates one attribute of the selection.
    ///
    /// Accepts any value while the session is open; rejected once confirmed.
    pub fn set_field(&mut self, field: BookingField) -> Result<(), FlowError> {
        if self.is_confirmed() {
            return Err(FlowError::SessionConfirmed);
        }
        debug!(?field, "booking field updated");
        self.selection.apply(field);
        Ok(())
    }

    pub fn rental_days(&self) -> u32 {
        self.selection.rental_days()
    }

    /// Total price in euros, derived from the current selection
    pub fn total(&self) -> u64 {
        self.quote().total
    }

    /// Full price breakdown for the rental summary
    pub fn quote(&self) -> PriceBreakdown {
        let days = self.rental_days();
        let daily_price = self.daily_price();
        let day_count = u64::from(days);

        let base = day_count.saturating_mul(daily_price);
        let insurance = self
            .selection
            .insurance
            .then(|| day_count.saturating_mul(INSURANCE_PER_DAY));
        let helmet = self.selection.helmet.then_some(HELMET_FEE);

        let total = if days == 0 {
            0
        } else {
            base.saturating_add(insurance.unwrap_or(0))
                .saturating_add(helmet.unwrap_or(0))
        };

        PriceBreakdown {
            days,
            daily_price,
            base,
            insurance,
            helmet,
            total,
        }
    }

    /// Opens a side view, replacing any side view already open
    pub fn open_step(&mut self, view: SideView) -> Result<FlowStep, FlowError> {
        if self.is_confirmed() {
            return Err(FlowError::SessionConfirmed);
        }
        self.step = view.into();
        debug!(step = ?self.step, "side view opened");
        Ok(self.step)
    }

    /// Closes the current side view.
    ///
    /// Returns to `Editing` from any side view. Does nothing while editing or
    /// once confirmed.
    pub fn close(&mut self) -> FlowStep {
        if self.step.is_side_view() {
            self.step = FlowStep::Editing;
        }
        self.step
    }

    /// Completes the mocked payment.
    ///
    /// Only valid from the payment view; the transition cannot be undone.
    pub fn confirm_payment(&mut self) -> Result<(), FlowError> {
        match self.step {
            FlowStep::AwaitingPayment => {
                self.step = FlowStep::Confirmed;
                info!(
                    listing = %self.listing.id,
                    days = self.rental_days(),
                    total = self.total(),
                    "rental confirmed"
                );
                Ok(())
            }
            FlowStep::Confirmed => Err(FlowError::SessionConfirmed),
            step => Err(FlowError::NotAwaitingPayment(step)),
        }
    }

    /// Discards the selection and starts a fresh session for the same listing
    pub fn restart(&mut self) {
        debug!(listing = %self.listing.id, "rental session restarted");
        self.selection = BookingSelection::default();
        self.step = FlowStep::Editing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{test_listing, ListingKind};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn flow_with_dates(start: &str, end: &str) -> BookingFlow {
        let mut flow = BookingFlow::new(test_listing(45)).unwrap();
        flow.set_field(BookingField::StartDate(Some(date(start))))
            .unwrap();
        flow.set_field(BookingField::EndDate(Some(date(end)))).unwrap();
        flow
    }

    // ========================================================================
    // Selection defaults
    // ========================================================================

    #[test]
    fn test_selection_defaults() {
        let selection = BookingSelection::default();
        assert!(selection.start_date.is_none());
        assert!(selection.end_date.is_none());
        assert_eq!(selection.start_time, "09:00");
        assert_eq!(selection.end_time, "18:00");
        assert!(selection.pickup_location.is_empty());
        assert!(!selection.insurance);
        assert!(!selection.helmet);
    }

    #[test]
    fn test_new_flow_starts_editing() {
        let flow = BookingFlow::new(test_listing(45)).unwrap();
        assert_eq!(flow.step(), FlowStep::Editing);
        assert_eq!(flow.daily_price(), 45);
    }

    #[test]
    fn test_sale_listing_is_not_rentable() {
        let mut listing = test_listing(8500);
        listing.id = 2;
        listing.kind = ListingKind::Sale;
        assert!(matches!(
            BookingFlow::new(listing),
            Err(FlowError::NotRentable(2))
        ));
    }

    // ========================================================================
    // Rental day count
    // ========================================================================

    #[test]
    fn test_same_day_counts_as_one() {
        assert_eq!(
            rental_days(Some(date("2024-06-01")), Some(date("2024-06-01"))),
            1
        );
    }

    #[test]
    fn test_day_count_is_inclusive() {
        assert_eq!(
            rental_days(Some(date("2024-06-01")), Some(date("2024-06-03"))),
            3
        );
        assert_eq!(
            rental_days(Some(date("2024-02-28")), Some(date("2024-03-01"))),
            3,
            "leap day is counted"
        );
    }

    #[test]
    fn test_inverted_range_is_zero_days() {
        assert_eq!(
            rental_days(Some(date("2024-06-05")), Some(date("2024-06-01"))),
            0
        );
    }

    #[test]
    fn test_missing_dates_are_zero_days() {
        assert_eq!(rental_days(None, None), 0);
        assert_eq!(rental_days(Some(date("2024-06-01")), None), 0);
        assert_eq!(rental_days(None, Some(date("2024-06-01"))), 0);
    }

    // ========================================================================
    // Pricing
    // ========================================================================

    #[test]
    fn test_three_days_no_extras() {
        let flow = flow_with_dates("2024-06-01", "2024-06-03");
        assert_eq!(flow.rental_days(), 3);
        assert_eq!(flow.total(), 135);
    }

    #[test]
    fn test_insurance_adds_ten_per_day() {
        let mut flow = flow_with_dates("2024-06-01", "2024-06-03");
        flow.set_field(BookingField::Insurance(true)).unwrap();
        assert_eq!(flow.total(), 165);
    }

    #[test]
    fn test_insurance_and_helmet() {
        let mut flow = flow_with_dates("2024-06-01", "2024-06-03");
        flow.set_field(BookingField::Insurance(true)).unwrap();
        flow.set_field(BookingField::Helmet(true)).unwrap();
        assert_eq!(flow.total(), 170);
    }

    #[test]
    fn test_helmet_is_flat_fee() {
        for end in ["2024-06-01", "2024-06-02", "2024-06-10"] {
            let mut flow = flow_with_dates("2024-06-01", end);
            let without = flow.total();
            flow.set_field(BookingField::Helmet(true)).unwrap();
            assert_eq!(flow.total(), without + HELMET_FEE, "end date {}", end);
        }
    }

    #[test]
    fn test_inverted_range_quotes_zero_with_extras() {
        let mut flow = flow_with_dates("2024-06-05", "2024-06-01");
        flow.set_field(BookingField::Insurance(true)).unwrap();
        flow.set_field(BookingField::Helmet(true)).unwrap();
        assert_eq!(flow.rental_days(), 0);
        assert_eq!(flow.total(), 0);
    }

    #[test]
    fn test_unset_dates_quote_zero_with_extras() {
        let mut flow = BookingFlow::new(test_listing(45)).unwrap();
        flow.set_field(BookingField::Helmet(true)).unwrap();
        flow.set_field(BookingField::Insurance(true)).unwrap();
        assert_eq!(flow.rental_days(), 0);
        assert_eq!(flow.total(), 0);
    }

    #[test]
    fn test_total_non_decreasing_in_days() {
        let mut previous = 0;
        for end_day in 1..=20 {
            let end = format!("2024-06-{:02}", end_day);
            let mut flow = flow_with_dates("2024-06-01", &end);
            flow.set_field(BookingField::Insurance(true)).unwrap();
            let total = flow.total();
            assert!(total >= previous);
            previous = total;
        }
    }

    #[test]
    fn test_quote_breakdown_matches_total() {
        let mut flow = flow_with_dates("2024-06-01", "2024-06-03");
        flow.set_field(BookingField::Insurance(true)).unwrap();
        flow.set_field(BookingField::Helmet(true)).unwrap();

        let quote = flow.quote();
        assert_eq!(quote.days, 3);
        assert_eq!(quote.daily_price, 45);
        assert_eq!(quote.base, 135);
        assert_eq!(quote.insurance, Some(30));
        assert_eq!(quote.helmet, Some(5));
        assert_eq!(quote.total, flow.total());
    }

    #[test]
    fn test_quote_omits_unselected_extras() {
        let flow = flow_with_dates("2024-06-01", "2024-06-03");
        let quote = flow.quote();
        assert!(quote.insurance.is_none());
        assert!(quote.helmet.is_none());
    }

    #[test]
    fn test_set_field_accepts_inverted_dates() {
        let flow = flow_with_dates("2024-06-05", "2024-06-01");
        assert_eq!(flow.selection().start_date, Some(date("2024-06-05")));
        assert_eq!(flow.selection().end_date, Some(date("2024-06-01")));
    }

    #[test]
    fn test_set_field_text_fields() {
        let mut flow = BookingFlow::new(test_listing(45)).unwrap();
        flow.set_field(BookingField::StartTime("10:30".into()))
            .unwrap();
        flow.set_field(BookingField::EndTime("08:00".into())).unwrap();
        flow.set_field(BookingField::PickupLocation("Gran Vía 1".into()))
            .unwrap();
        assert_eq!(flow.selection().start_time, "10:30");
        assert_eq!(flow.selection().end_time, "08:00");
        assert_eq!(flow.selection().pickup_location, "Gran Vía 1");
    }

    #[test]
    fn test_parse_date_input() {
        assert_eq!(parse_date_input("2024-06-01"), Some(date("2024-06-01")));
        assert_eq!(parse_date_input(" 2024-06-01 "), Some(date("2024-06-01")));
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("2024-13-01"), None);
        assert_eq!(parse_date_input("01/06/2024"), None);
    }

    // ========================================================================
    // Step transitions
    // ========================================================================

    #[test]
    fn test_side_views_return_to_editing() {
        let mut flow = BookingFlow::new(test_listing(45)).unwrap();
        for view in [SideView::Location, SideView::Contract, SideView::Payment] {
            let step = flow.open_step(view).unwrap();
            assert_eq!(step, FlowStep::from(view));
            assert_eq!(flow.close(), FlowStep::Editing);
        }
    }

    #[test]
    fn test_side_views_do_not_touch_selection() {
        let mut flow = flow_with_dates("2024-06-01", "2024-06-03");
        let before = flow.selection().clone();
        flow.open_step(SideView::Location).unwrap();
        flow.open_step(SideView::Contract).unwrap();
        flow.close();
        assert_eq!(flow.selection(), &before);
    }

    #[test]
    fn test_close_while_editing_is_noop() {
        let mut flow = BookingFlow::new(test_listing(45)).unwrap();
        assert_eq!(flow.close(), FlowStep::Editing);
    }

    #[test]
    fn test_payment_confirms() {
        let mut flow = BookingFlow::new(test_listing(45)).unwrap();
        flow.open_step(SideView::Payment).unwrap();
        flow.confirm_payment().unwrap();
        assert_eq!(flow.step(), FlowStep::Confirmed);
    }

    #[test]
    fn test_confirm_requires_payment_view() {
        let mut flow = BookingFlow::new(test_listing(45)).unwrap();
        assert_eq!(
            flow.confirm_payment(),
            Err(FlowError::NotAwaitingPayment(FlowStep::Editing))
        );

        flow.open_step(SideView::Contract).unwrap();
        assert_eq!(
            flow.confirm_payment(),
            Err(FlowError::NotAwaitingPayment(FlowStep::ViewingContract))
        );
        assert_eq!(flow.step(), FlowStep::ViewingContract);
    }

    #[test]
    fn test_confirmed_is_terminal() {
        let mut flow = flow_with_dates("2024-06-01", "2024-06-03");
        flow.open_step(SideView::Payment).unwrap();
        flow.confirm_payment().unwrap();

        assert_eq!(flow.close(), FlowStep::Confirmed);
        assert_eq!(
            flow.open_step(SideView::Contract),
            Err(FlowError::SessionConfirmed)
        );
        assert_eq!(
            flow.set_field(BookingField::Helmet(true)),
            Err(FlowError::SessionConfirmed)
        );
        assert_eq!(flow.confirm_payment(), Err(FlowError::SessionConfirmed));
        assert_eq!(flow.step(), FlowStep::Confirmed);
        assert!(!flow.selection().helmet, "rejected edit must not apply");
        assert_eq!(flow.total(), 135);
    }

    #[test]
    fn test_restart_starts_new_session() {
        let mut flow = flow_with_dates("2024-06-01", "2024-06-03");
        flow.open_step(SideView::Payment).unwrap();
        flow.confirm_payment().unwrap();

        flow.restart();
        assert_eq!(flow.step(), FlowStep::Editing);
        assert_eq!(flow.selection(), &BookingSelection::default());
        assert_eq!(flow.total(), 0);
    }
}

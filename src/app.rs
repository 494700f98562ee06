//! Application state management for Wheel Deal
//!
//! This module contains the main application state, handling keyboard input
//! and navigation between the marketplace screens.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

use crate::booking::{FlowError, FlowStep, SideView};
use crate::chat::{ChatAction, ChatSession};
use crate::cli::{StartScreen, StartupConfig};
use crate::data::{Category, Listing, MockData};
use crate::profile::{ProfileState, ProfileTab, SettingsRow, TabOutcome};
use crate::rental::RentalSession;
use crate::search::{filter_listings, SearchQuery, ViewMode};
use crate::sell::{ListingDraft, SellField, SellForm};
use crate::theme::{Palette, Theme, ThemeSettings, ThemeWatcher};
use crate::toast::Toast;

/// Screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Search,
    /// Detail page of the listing with this id
    Detail(u32),
    /// Checkout for the listing held by the rental session
    Rental,
    Chat,
    Sell,
    Profile,
}

impl Screen {
    /// Top navigation bar, in order
    pub fn nav_items() -> &'static [Screen] {
        &[
            Screen::Home,
            Screen::Search,
            Screen::Rental,
            Screen::Sell,
            Screen::Chat,
            Screen::Profile,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Search => "Search",
            Screen::Detail(_) => "Details",
            Screen::Rental => "Rent",
            Screen::Chat => "Messages",
            Screen::Sell => "Sell",
            Screen::Profile => "Profile",
        }
    }
}

/// Marketplace highlights on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeFeature {
    SecurePayments,
    Geolocation,
    VerifiedCommunity,
}

impl HomeFeature {
    pub fn all() -> &'static [HomeFeature] {
        &[
            HomeFeature::SecurePayments,
            HomeFeature::Geolocation,
            HomeFeature::VerifiedCommunity,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            HomeFeature::SecurePayments => "Secure transactions",
            HomeFeature::Geolocation => "Geolocation",
            HomeFeature::VerifiedCommunity => "Verified community",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            HomeFeature::SecurePayments => "Verification and protection for everyone.",
            HomeFeature::Geolocation => "Find motorcycles available near you.",
            HomeFeature::VerifiedCommunity => "Rated users for your peace of mind.",
        }
    }
}

/// Search bar input that has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchInput {
    Term,
    Location,
}

/// Search screen state
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: SearchQuery,
    pub view_mode: ViewMode,
    /// Highlighted result
    pub cursor: usize,
    /// Input being typed into, if any
    pub input: Option<SearchInput>,
}

/// Main application struct managing state and data
pub struct App {
    /// Current screen
    pub screen: Screen,
    /// Screens to return to with Esc
    history: Vec<Screen>,
    /// Marketplace records
    pub data: MockData,
    /// Highlighted featured listing on the home screen
    pub home_cursor: usize,
    /// Highlighted card in the "Why Wheel Deal" panel
    pub home_feature: usize,
    pub search: SearchState,
    /// Selected gallery image on the detail screen
    pub image_index: usize,
    /// Active checkout; dropped when leaving the rental screen
    pub rental: Option<RentalSession>,
    pub chat: ChatSession,
    /// Whether keystrokes go into the chat message box
    pub chat_typing: bool,
    pub sell: SellForm,
    /// Focused field on the sell form
    pub sell_cursor: usize,
    /// Whether keystrokes go into the focused sell field
    pub sell_editing: bool,
    /// Listings published from the sell form, awaiting review
    pub pending_listings: Vec<ListingDraft>,
    pub profile: ProfileState,
    /// Highlighted favourite on the profile favourites tab
    pub favorites_cursor: usize,
    theme: ThemeSettings,
    /// Render-side handle on the theme
    pub theme_watcher: ThemeWatcher,
    /// Notification shown over the current screen
    pub toast: Option<Toast>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
}

impl App {
    /// Creates a new App on the home screen
    pub fn new(data: MockData, theme: Theme) -> Self {
        let theme = ThemeSettings::new(theme);
        let theme_watcher = theme.subscribe();
        let chat = ChatSession::new(data.chat.clone());
        let profile = ProfileState::new(data.profile.clone());
        Self {
            screen: Screen::Home,
            history: Vec::new(),
            data,
            home_cursor: 0,
            home_feature: 0,
            search: SearchState::default(),
            image_index: 0,
            rental: None,
            chat,
            chat_typing: false,
            sell: SellForm::default(),
            sell_cursor: 0,
            sell_editing: false,
            pending_listings: Vec::new(),
            profile,
            favorites_cursor: 0,
            theme,
            theme_watcher,
            toast: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// Creates a new App instance with the given startup configuration.
    ///
    /// The listing named in `config` is expected to have been checked with
    /// [`StartupConfig::check_listing`]; an unknown id falls back to home.
    pub fn with_startup_config(data: MockData, theme: Theme, config: &StartupConfig) -> Self {
        let mut app = Self::new(data, theme);
        match (config.screen, config.listing) {
            (StartScreen::Home, Some(id)) if app.data.catalog.get(id).is_some() => {
                app.screen = Screen::Detail(id);
            }
            (StartScreen::Home, _) => {}
            (StartScreen::Search, _) => app.screen = Screen::Search,
            (StartScreen::Rental, Some(id)) => app.open_rental(id),
            (StartScreen::Rental, None) => app.open_default_rental(),
            (StartScreen::Sell, _) => app.screen = Screen::Sell,
            (StartScreen::Chat, _) => app.screen = Screen::Chat,
            (StartScreen::Profile, _) => app.screen = Screen::Profile,
        }
        app.history.clear();
        app
    }

    pub fn theme(&self) -> &ThemeSettings {
        &self.theme
    }

    pub fn palette(&self) -> Palette {
        self.theme_watcher.palette()
    }

    /// Listings matching the current search query
    pub fn search_results(&self) -> Vec<&Listing> {
        filter_listings(self.data.catalog.all(), &self.search.query)
    }

    /// Listing shown on the detail screen
    pub fn detail_listing(&self) -> Option<&Listing> {
        match self.screen {
            Screen::Detail(id) => self.data.catalog.get(id),
            _ => None,
        }
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.profile.favorites.contains(&id)
    }

    pub fn favorite_listings(&self) -> Vec<&Listing> {
        self.data.catalog.favorites(&self.profile.favorites)
    }

    /// Drops toasts that have been up long enough
    pub fn tick(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    fn notify(&mut self, toast: Toast) {
        debug!(title = %toast.title, "toast raised");
        self.toast = Some(toast);
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Moves to another screen, remembering the current one for Esc.
    ///
    /// The rental screen is never remembered: leaving it ends the session.
    /// Returning to a screen already in the history unwinds back to it, so
    /// each screen appears at most once.
    pub fn navigate(&mut self, screen: Screen) {
        if self.screen == screen {
            return;
        }
        self.leave_screen();
        if let Some(pos) = self.history.iter().position(|s| *s == screen) {
            self.history.truncate(pos);
        } else if self.screen != Screen::Rental {
            self.history.push(self.screen);
        }
        debug!(from = ?self.screen, to = ?screen, "navigate");
        self.screen = screen;
        self.image_index = 0;
    }

    /// Returns to the previous screen, or home when there is none
    pub fn go_back(&mut self) {
        self.leave_screen();
        self.screen = self.history.pop().unwrap_or(Screen::Home);
        debug!(to = ?self.screen, "back");
    }

    /// Resets per-screen input state when a screen is left
    fn leave_screen(&mut self) {
        match self.screen {
            Screen::Rental => {
                if self.rental.take().is_some() {
                    debug!("rental session ended");
                }
            }
            Screen::Search => self.search.input = None,
            Screen::Chat => self.chat_typing = false,
            Screen::Sell => self.sell_editing = false,
            Screen::Profile => self.profile.cancel_edit(),
            Screen::Home | Screen::Detail(_) => {}
        }
    }

    /// Opens the checkout for a listing.
    ///
    /// Listings for sale cannot be rented; buying is not available yet.
    pub fn open_rental(&mut self, id: u32) {
        let Some(listing) = self.data.catalog.get(id).cloned() else {
            warn!(id, "rental requested for unknown listing");
            return;
        };
        match RentalSession::new(listing) {
            Ok(session) => {
                self.navigate(Screen::Rental);
                self.rental = Some(session);
            }
            Err(FlowError::NotRentable(_)) => self.notify(Toast::coming_soon("Buying")),
            Err(err) => warn!(%err, "could not start rental session"),
        }
    }

    /// First rental listing in the catalogue
    fn default_rental_id(&self) -> Option<u32> {
        self.data.catalog.all().iter().find(|l| l.is_rental()).map(|l| l.id)
    }

    /// Opens the checkout for the first rental listing in the catalogue
    pub fn open_default_rental(&mut self) {
        if let Some(id) = self.default_rental_id() {
            self.open_rental(id);
        }
    }

    /// Opens search filtered to one category
    pub fn open_category(&mut self, category: Category) {
        self.search.query = SearchQuery::for_category(category);
        self.search.cursor = 0;
        self.navigate(Screen::Search);
    }

    /// Steps through the top navigation bar.
    ///
    /// The rental tab is skipped when the catalogue has nothing to rent.
    fn cycle_nav(&mut self, forward: bool) {
        let rentable = self.default_rental_id().is_some();
        let items: Vec<Screen> = Screen::nav_items()
            .iter()
            .copied()
            .filter(|s| rentable || *s != Screen::Rental)
            .collect();
        let current = items.iter().position(|s| *s == self.screen).unwrap_or(0);
        let next = if forward {
            (current + 1) % items.len()
        } else {
            (current + items.len() - 1) % items.len()
        };
        match items[next] {
            Screen::Rental => self.open_default_rental(),
            screen => self.navigate(screen),
        }
    }

    /// Whether keystrokes are currently being typed into a text field
    pub fn text_input_active(&self) -> bool {
        match self.screen {
            Screen::Search => self.search.input.is_some(),
            Screen::Rental => self.rental.as_ref().is_some_and(|r| r.editing),
            Screen::Chat => self.chat_typing,
            Screen::Sell => self.sell_editing,
            Screen::Profile => self.profile.is_editing(),
            Screen::Home | Screen::Detail(_) => false,
        }
    }

    // ------------------------------------------------------------------
    // Keyboard input
    // ------------------------------------------------------------------

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `Tab`/`Shift+Tab`: Next/previous screen in the navigation bar
    /// - `q`: Quit (outside text fields), `Ctrl+C`: Quit anywhere
    /// - `?`: Toggle help
    /// - `Esc`: Close the open view, stop typing, or go back
    ///
    /// Screen-specific bindings are listed in the help overlay.
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        // Any key dismisses a toast; Esc does nothing else
        if self.toast.take().is_some() && key_event.code == KeyCode::Esc {
            return;
        }

        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {} // Ignore other keys when help is shown
            }
            return;
        }

        if !self.text_input_active() {
            match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                    return;
                }
                KeyCode::Tab => {
                    self.cycle_nav(true);
                    return;
                }
                KeyCode::BackTab => {
                    self.cycle_nav(false);
                    return;
                }
                _ => {}
            }
        }

        match self.screen {
            Screen::Home => self.handle_home_key(key_event),
            Screen::Search => self.handle_search_key(key_event),
            Screen::Detail(id) => self.handle_detail_key(key_event, id),
            Screen::Rental => self.handle_rental_key(key_event),
            Screen::Chat => self.handle_chat_key(key_event),
            Screen::Sell => self.handle_sell_key(key_event),
            Screen::Profile => self.handle_profile_key(key_event),
        }
    }

    fn handle_home_key(&mut self, key_event: KeyEvent) {
        let featured = self.data.catalog.featured().len();
        match key_event.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.home_cursor = wrap_up(self.home_cursor, featured);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.home_cursor = wrap_down(self.home_cursor, featured);
            }
            KeyCode::Enter => {
                if let Some(listing) = self.data.catalog.featured().get(self.home_cursor) {
                    let id = listing.id;
                    self.navigate(Screen::Detail(id));
                }
            }
            KeyCode::Char('/') => {
                self.navigate(Screen::Search);
                self.search.input = Some(SearchInput::Term);
            }
            KeyCode::Char('s') => self.navigate(Screen::Sell),
            KeyCode::Left | KeyCode::Char('h') => {
                self.home_feature = wrap_up(self.home_feature, HomeFeature::all().len());
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.home_feature = wrap_down(self.home_feature, HomeFeature::all().len());
            }
            KeyCode::Char(' ') => {
                if let Some(feature) = HomeFeature::all().get(self.home_feature) {
                    self.notify(Toast::coming_soon(feature.title()));
                }
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                if let Some(category) = Category::all().get(index) {
                    self.open_category(*category);
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key_event: KeyEvent) {
        if let Some(input) = self.search.input {
            let text = match input {
                SearchInput::Term => &mut self.search.query.term,
                SearchInput::Location => &mut self.search.query.location,
            };
            match key_event.code {
                KeyCode::Char(c) => {
                    text.push(c);
                    self.search.cursor = 0;
                }
                KeyCode::Backspace => {
                    text.pop();
                    self.search.cursor = 0;
                }
                KeyCode::Enter | KeyCode::Esc => self.search.input = None,
                _ => {}
            }
            return;
        }

        let count = self.search_results().len();
        match key_event.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Char('/') => self.search.input = Some(SearchInput::Term),
            KeyCode::Char('l') => self.search.input = Some(SearchInput::Location),
            KeyCode::Char('c') => {
                self.search.query.cycle_category();
                self.search.cursor = 0;
            }
            KeyCode::Char('v') => self.search.view_mode = self.search.view_mode.toggle(),
            KeyCode::Char('f') => self.notify(Toast::coming_soon("Advanced filters")),
            KeyCode::Char('x') => {
                self.search.query = SearchQuery::default();
                self.search.cursor = 0;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.search.cursor = wrap_up(self.search.cursor, count);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.search.cursor = wrap_down(self.search.cursor, count);
            }
            KeyCode::Enter => {
                let selected = self.search_results().get(self.search.cursor).map(|l| l.id);
                if let Some(id) = selected {
                    self.navigate(Screen::Detail(id));
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key_event: KeyEvent, id: u32) {
        let image_count = self
            .data
            .catalog
            .get(id)
            .map(|l| l.images.len())
            .unwrap_or(0);
        match key_event.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Left | KeyCode::Char('h') => {
                self.image_index = wrap_up(self.image_index, image_count);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.image_index = wrap_down(self.image_index, image_count);
            }
            KeyCode::Char('f') => self.toggle_favorite(id),
            KeyCode::Char('s') => self.notify(Toast::coming_soon("Sharing")),
            KeyCode::Char('c') => self.notify(Toast::coming_soon("Contacting the owner")),
            KeyCode::Enter | KeyCode::Char('r') => self.open_rental(id),
            _ => {}
        }
    }

    fn toggle_favorite(&mut self, id: u32) {
        if let Some(pos) = self.profile.favorites.iter().position(|f| *f == id) {
            self.profile.favorites.remove(pos);
        } else {
            self.profile.favorites.push(id);
        }
        debug!(id, favorite = self.is_favorite(id), "favorite toggled");
    }

    fn handle_rental_key(&mut self, key_event: KeyEvent) {
        let Some(session) = self.rental.as_mut() else {
            self.go_back();
            return;
        };

        let mut result: Result<(), FlowError> = Ok(());
        let mut leave = false;

        if session.editing {
            match key_event.code {
                KeyCode::Char(c) => result = session.push_char(c),
                KeyCode::Backspace => result = session.pop_char(),
                KeyCode::Enter | KeyCode::Esc => session.editing = false,
                KeyCode::Up => {
                    session.editing = false;
                    session.previous_field();
                }
                KeyCode::Down => {
                    session.editing = false;
                    session.next_field();
                }
                _ => {}
            }
        } else {
            match session.flow.step() {
                FlowStep::Editing => match key_event.code {
                    KeyCode::Esc => leave = true,
                    KeyCode::Up | KeyCode::Char('k') => session.previous_field(),
                    KeyCode::Down | KeyCode::Char('j') => session.next_field(),
                    KeyCode::Enter => {
                        if session.focused().is_toggle() {
                            result = session.toggle_focused();
                        } else {
                            session.editing = true;
                        }
                    }
                    KeyCode::Char(' ') => result = session.toggle_focused(),
                    KeyCode::Char('g') => result = open_side_view(session, SideView::Location),
                    KeyCode::Char('c') => result = open_side_view(session, SideView::Contract),
                    KeyCode::Char('p') => result = open_side_view(session, SideView::Payment),
                    _ => {}
                },
                FlowStep::ViewingLocation | FlowStep::ViewingContract => {
                    if matches!(key_event.code, KeyCode::Esc | KeyCode::Enter) {
                        session.flow.close();
                    }
                }
                FlowStep::AwaitingPayment => match key_event.code {
                    KeyCode::Enter => result = session.flow.confirm_payment(),
                    KeyCode::Esc => {
                        session.flow.close();
                    }
                    _ => {}
                },
                FlowStep::Confirmed => match key_event.code {
                    KeyCode::Char('n') => session.restart(),
                    KeyCode::Esc | KeyCode::Enter => leave = true,
                    KeyCode::Char(' ') => result = session.toggle_focused(),
                    KeyCode::Char('g') => result = open_side_view(session, SideView::Location),
                    KeyCode::Char('c') => result = open_side_view(session, SideView::Contract),
                    KeyCode::Char('p') => result = open_side_view(session, SideView::Payment),
                    _ => {}
                },
            }
        }

        if let Err(err) = result {
            warn!(error = %err, "booking event rejected");
            self.notify(Toast::new("Action not available", err.to_string()));
        }
        if leave {
            self.go_back();
        }
    }

    fn handle_chat_key(&mut self, key_event: KeyEvent) {
        if self.chat_typing {
            match key_event.code {
                KeyCode::Char(c) => self.chat.draft.push(c),
                KeyCode::Backspace => {
                    self.chat.draft.pop();
                }
                KeyCode::Enter => {
                    if let Some(toast) = self.chat.send() {
                        self.notify(toast);
                    }
                }
                KeyCode::Esc => self.chat_typing = false,
                _ => {}
            }
            return;
        }

        if self.chat.selected_thread().is_some() {
            match key_event.code {
                KeyCode::Esc => self.chat.back(),
                KeyCode::Enter | KeyCode::Char('i') => self.chat_typing = true,
                KeyCode::Char('c') => {
                    let toast = self.chat.action(ChatAction::VoiceCall);
                    self.notify(toast);
                }
                KeyCode::Char('v') => {
                    let toast = self.chat.action(ChatAction::VideoCall);
                    self.notify(toast);
                }
                KeyCode::Char('o') => {
                    let toast = self.chat.action(ChatAction::MoreOptions);
                    self.notify(toast);
                }
                _ => {}
            }
            return;
        }

        match key_event.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Up | KeyCode::Char('k') => self.chat.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.chat.move_down(),
            KeyCode::Enter => self.chat.open_highlighted(),
            _ => {}
        }
    }

    /// Field of the sell form with focus
    pub fn sell_field(&self) -> SellField {
        let fields = SellField::all();
        fields[self.sell_cursor % fields.len()]
    }

    fn handle_sell_key(&mut self, key_event: KeyEvent) {
        let field = self.sell_field();
        if self.sell_editing {
            match key_event.code {
                KeyCode::Char(c) => {
                    if let Some(text) = self.sell.text_mut(field) {
                        text.push(c);
                    }
                }
                KeyCode::Backspace => {
                    if let Some(text) = self.sell.text_mut(field) {
                        text.pop();
                    }
                }
                KeyCode::Enter if field == SellField::Feature => {
                    self.sell.add_feature();
                }
                KeyCode::Enter | KeyCode::Esc => self.sell_editing = false,
                _ => {}
            }
            return;
        }

        let count = SellField::all().len();
        match key_event.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Up | KeyCode::Char('k') => self.sell_cursor = wrap_up(self.sell_cursor, count),
            KeyCode::Down | KeyCode::Char('j') => {
                self.sell_cursor = wrap_down(self.sell_cursor, count)
            }
            KeyCode::Enter => {
                if field == SellField::Category {
                    self.sell.cycle_category();
                } else {
                    self.sell_editing = true;
                }
            }
            KeyCode::Char('x') => {
                if let Some(last) = self.sell.features.len().checked_sub(1) {
                    self.sell.remove_feature(last);
                }
            }
            KeyCode::Char('u') => self.notify(Toast::coming_soon("Photo upload")),
            KeyCode::Char('p') => {
                let submission = self.sell.submit();
                self.sell_cursor = 0;
                self.pending_listings.push(submission.draft);
                self.notify(submission.toast);
            }
            _ => {}
        }
    }

    fn handle_profile_key(&mut self, key_event: KeyEvent) {
        if self.profile.is_editing() {
            let field = self.profile.focused_field();
            match key_event.code {
                KeyCode::Char(c) => {
                    if let Some(text) = self.profile.draft_text_mut(field) {
                        text.push(c);
                    }
                }
                KeyCode::Backspace => {
                    if let Some(text) = self.profile.draft_text_mut(field) {
                        text.pop();
                    }
                }
                KeyCode::Up => self.profile.previous_field(),
                KeyCode::Down => self.profile.next_field(),
                KeyCode::Enter => match self.profile.save() {
                    Ok(toast) => self.notify(toast),
                    Err(err) => self.notify(Toast::new("Could not save profile", err.to_string())),
                },
                KeyCode::Esc => self.profile.cancel_edit(),
                _ => {}
            }
            return;
        }

        match key_event.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Right | KeyCode::Char('l') => {
                let mut next = self.profile.tab.next();
                if next == ProfileTab::Messages {
                    next = next.next();
                }
                self.select_profile_tab(next);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                let mut previous = self.profile.tab.previous();
                if previous == ProfileTab::Messages {
                    previous = previous.previous();
                }
                self.select_profile_tab(previous);
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                if let Some(tab) = ProfileTab::all().get(index) {
                    self.select_profile_tab(*tab);
                }
            }
            _ => match self.profile.tab {
                ProfileTab::Profile => {
                    if key_event.code == KeyCode::Char('e') {
                        self.profile.begin_edit();
                    }
                }
                ProfileTab::Favorites => self.handle_favorites_key(key_event),
                ProfileTab::Settings => self.handle_settings_key(key_event),
                ProfileTab::History | ProfileTab::Messages => {}
            },
        }
    }

    fn select_profile_tab(&mut self, tab: ProfileTab) {
        match self.profile.select_tab(tab) {
            TabOutcome::OpenChat => self.navigate(Screen::Chat),
            TabOutcome::Switched(_) => self.favorites_cursor = 0,
        }
    }

    fn handle_favorites_key(&mut self, key_event: KeyEvent) {
        let favorites: Vec<u32> = self.favorite_listings().iter().map(|l| l.id).collect();
        match key_event.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.favorites_cursor = wrap_up(self.favorites_cursor, favorites.len());
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.favorites_cursor = wrap_down(self.favorites_cursor, favorites.len());
            }
            KeyCode::Enter => {
                if let Some(id) = favorites.get(self.favorites_cursor) {
                    self.navigate(Screen::Detail(*id));
                }
            }
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Up | KeyCode::Char('k') => self.profile.previous_setting(),
            KeyCode::Down | KeyCode::Char('j') => self.profile.next_setting(),
            KeyCode::Enter | KeyCode::Char(' ') => match self.profile.focused_setting() {
                SettingsRow::EmailNotifications => self.profile.toggle_email_notifications(),
                SettingsRow::PushNotifications => self.profile.toggle_push_notifications(),
                SettingsRow::DarkMode => {
                    self.theme.toggle();
                }
            },
            KeyCode::Char('s') => {
                let toast = self.profile.save_settings();
                self.notify(toast);
            }
            _ => {}
        }
    }
}

/// Opens a side view, discarding the step on success
fn open_side_view(session: &mut RentalSession, view: SideView) -> Result<(), FlowError> {
    session.flow.open_step(view).map(|_| ())
}

/// Index above `index`, wrapping to the bottom; 0 for empty lists
fn wrap_up(index: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else if index == 0 {
        count - 1
    } else {
        (index - 1).min(count - 1)
    }
}

/// Index below `index`, wrapping to the top; 0 for empty lists
fn wrap_down(index: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        (index + 1) % count
    }
}

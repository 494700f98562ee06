//! Profile and settings screen state

use tracing::{debug, info};

use crate::data::profile::validate_profile;
use crate::data::{DataError, ProfileData, RentalRecord, UserProfile};
use crate::toast::Toast;

/// Sidebar tabs of the profile screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileTab {
    #[default]
    Profile,
    Favorites,
    History,
    /// Not a tab of its own; selecting it opens the chat screen
    Messages,
    Settings,
}

impl ProfileTab {
    pub fn all() -> &'static [ProfileTab] {
        &[
            ProfileTab::Profile,
            ProfileTab::Favorites,
            ProfileTab::History,
            ProfileTab::Messages,
            ProfileTab::Settings,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileTab::Profile => "My Profile",
            ProfileTab::Favorites => "Favorites",
            ProfileTab::History => "My History",
            ProfileTab::Messages => "Messages",
            ProfileTab::Settings => "Settings",
        }
    }

    fn index(&self) -> usize {
        Self::all().iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> ProfileTab {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> ProfileTab {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// What selecting a tab did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabOutcome {
    Switched(ProfileTab),
    /// The caller should navigate to the chat screen
    OpenChat,
}

/// Fields editable on the profile tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    Location,
    Bio,
}

impl ProfileField {
    pub fn all() -> &'static [ProfileField] {
        &[
            ProfileField::Name,
            ProfileField::Email,
            ProfileField::Location,
            ProfileField::Bio,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Name => "Name",
            ProfileField::Email => "Email",
            ProfileField::Location => "Location",
            ProfileField::Bio => "Bio",
        }
    }
}

/// Notification preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationSettings {
    pub email: bool,
    pub push: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            push: false,
        }
    }
}

/// Rows of the settings tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    EmailNotifications,
    PushNotifications,
    DarkMode,
}

impl SettingsRow {
    pub fn all() -> &'static [SettingsRow] {
        &[
            SettingsRow::EmailNotifications,
            SettingsRow::PushNotifications,
            SettingsRow::DarkMode,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsRow::EmailNotifications => "Email notifications",
            SettingsRow::PushNotifications => "Push notifications",
            SettingsRow::DarkMode => "Dark mode",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileState {
    profile: UserProfile,
    pub favorites: Vec<u32>,
    pub history: Vec<RentalRecord>,
    pub tab: ProfileTab,
    /// Draft being edited, when in edit mode
    draft: Option<UserProfile>,
    /// Highlighted field while editing
    pub field_cursor: usize,
    pub notifications: NotificationSettings,
    /// Highlighted row on the settings tab
    pub settings_cursor: usize,
}

impl ProfileState {
    pub fn new(data: ProfileData) -> Self {
        Self {
            profile: data.profile,
            favorites: data.favorites,
            history: data.history,
            tab: ProfileTab::default(),
            draft: None,
            field_cursor: 0,
            notifications: NotificationSettings::default(),
            settings_cursor: 0,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Switches tab, or asks the caller to open the chat for Messages
    pub fn select_tab(&mut self, tab: ProfileTab) -> TabOutcome {
        if tab == ProfileTab::Messages {
            return TabOutcome::OpenChat;
        }
        debug!(tab = tab.label(), "profile tab selected");
        self.tab = tab;
        TabOutcome::Switched(tab)
    }

    // ------------------------------------------------------------------
    // Profile editing
    // ------------------------------------------------------------------

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// The profile as it should be displayed: the draft while editing
    pub fn displayed(&self) -> &UserProfile {
        self.draft.as_ref().unwrap_or(&self.profile)
    }

    pub fn begin_edit(&mut self) {
        self.draft = Some(self.profile.clone());
        self.field_cursor = 0;
    }

    pub fn focused_field(&self) -> ProfileField {
        let fields = ProfileField::all();
        fields[self.field_cursor % fields.len()]
    }

    pub fn next_field(&mut self) {
        self.field_cursor = (self.field_cursor + 1) % ProfileField::all().len();
    }

    pub fn previous_field(&mut self) {
        let count = ProfileField::all().len();
        self.field_cursor = (self.field_cursor + count - 1) % count;
    }

    /// Text buffer of a field in the draft; `None` when not editing
    pub fn draft_text_mut(&mut self, field: ProfileField) -> Option<&mut String> {
        let draft = self.draft.as_mut()?;
        Some(match field {
            ProfileField::Name => &mut draft.name,
            ProfileField::Email => &mut draft.email,
            ProfileField::Location => &mut draft.location,
            ProfileField::Bio => &mut draft.bio,
        })
    }

    /// Replaces the profile with the draft.
    ///
    /// The draft is kept open if it fails validation.
    pub fn save(&mut self) -> Result<Toast, DataError> {
        let Some(draft) = self.draft.as_ref() else {
            return Ok(Toast::new("Nothing to save", "You are not editing your profile."));
        };
        validate_profile(draft)?;
        self.profile = draft.clone();
        self.draft = None;
        info!("profile updated");
        Ok(Toast::new(
            "✅ Profile updated!",
            "Your changes have been saved.",
        ))
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn focused_setting(&self) -> SettingsRow {
        let rows = SettingsRow::all();
        rows[self.settings_cursor % rows.len()]
    }

    pub fn next_setting(&mut self) {
        self.settings_cursor = (self.settings_cursor + 1) % SettingsRow::all().len();
    }

    pub fn previous_setting(&mut self) {
        let count = SettingsRow::all().len();
        self.settings_cursor = (self.settings_cursor + count - 1) % count;
    }

    pub fn toggle_email_notifications(&mut self) {
        self.notifications.email = !self.notifications.email;
    }

    pub fn toggle_push_notifications(&mut self) {
        self.notifications.push = !self.notifications.push;
    }

    pub fn save_settings(&self) -> Toast {
        info!(
            email = self.notifications.email,
            push = self.notifications.push,
            "notification settings saved"
        );
        Toast::new(
            "✅ Settings saved!",
            "Your preferences have been updated.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ProfileState {
        ProfileState::new(ProfileData::load().unwrap())
    }

    #[test]
    fn test_starts_on_profile_tab() {
        assert_eq!(state().tab, ProfileTab::Profile);
    }

    #[test]
    fn test_messages_tab_opens_chat() {
        let mut profile = state();
        profile.select_tab(ProfileTab::History);
        assert_eq!(profile.select_tab(ProfileTab::Messages), TabOutcome::OpenChat);
        assert_eq!(profile.tab, ProfileTab::History, "tab is unchanged");
    }

    #[test]
    fn test_tab_cycling_wraps() {
        assert_eq!(ProfileTab::Settings.next(), ProfileTab::Profile);
        assert_eq!(ProfileTab::Profile.previous(), ProfileTab::Settings);
    }

    #[test]
    fn test_edit_and_save() {
        let mut profile = state();
        profile.begin_edit();
        assert!(profile.is_editing());

        let name = profile.draft_text_mut(ProfileField::Name).unwrap();
        name.clear();
        name.push_str("María G.");
        assert_eq!(profile.displayed().name, "María G.");
        assert_eq!(profile.profile().name, "María González", "not saved yet");

        let toast = profile.save().unwrap();
        assert!(toast.title.contains("Profile updated"));
        assert!(!profile.is_editing());
        assert_eq!(profile.profile().name, "María G.");
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut profile = state();
        profile.begin_edit();
        profile
            .draft_text_mut(ProfileField::Bio)
            .unwrap()
            .push_str(" And coffee.");
        profile.cancel_edit();
        assert!(!profile.is_editing());
        assert_eq!(
            profile.profile().bio,
            "Passionate about motorcycles and road trips."
        );
    }

    #[test]
    fn test_invalid_draft_stays_open() {
        let mut profile = state();
        profile.begin_edit();
        profile.draft_text_mut(ProfileField::Email).unwrap().clear();
        assert!(profile.save().is_err());
        assert!(profile.is_editing());
        assert_eq!(profile.profile().email, "maria.gonzalez@email.com");
    }

    #[test]
    fn test_draft_text_requires_edit_mode() {
        let mut profile = state();
        assert!(profile.draft_text_mut(ProfileField::Name).is_none());
    }

    #[test]
    fn test_field_cursor_wraps() {
        let mut profile = state();
        profile.begin_edit();
        profile.previous_field();
        assert_eq!(profile.focused_field(), ProfileField::Bio);
        profile.next_field();
        assert_eq!(profile.focused_field(), ProfileField::Name);
    }

    #[test]
    fn test_notification_toggles() {
        let mut profile = state();
        assert!(profile.notifications.email);
        assert!(!profile.notifications.push);
        profile.toggle_email_notifications();
        profile.toggle_push_notifications();
        assert!(!profile.notifications.email);
        assert!(profile.notifications.push);
        assert!(profile.save_settings().title.contains("Settings saved"));
    }

    #[test]
    fn test_settings_cursor_wraps() {
        let mut profile = state();
        profile.previous_setting();
        assert_eq!(profile.focused_setting(), SettingsRow::DarkMode);
        profile.next_setting();
        assert_eq!(profile.focused_setting(), SettingsRow::EmailNotifications);
    }
}

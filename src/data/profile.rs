//! The signed-in user's profile, favourites and rental history

use serde::Deserialize;

use super::{valid_rating, DataError, RentalRecord, UserProfile};

const PROFILE_JSON: &str = include_str!("mock/profile.json");

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileData {
    pub profile: UserProfile,
    /// Listing ids the user starred
    #[serde(default)]
    pub favorites: Vec<u32>,
    #[serde(default)]
    pub history: Vec<RentalRecord>,
}

impl ProfileData {
    pub fn load() -> Result<Self, DataError> {
        Self::from_json(PROFILE_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let data: ProfileData = serde_json::from_str(json)
            .map_err(|source| DataError::Parse { what: "profile", source })?;
        validate_profile(&data.profile)?;
        Ok(data)
    }
}

/// Checks the fields a profile must always carry.
///
/// Also used when the user saves an edited profile.
pub fn validate_profile(profile: &UserProfile) -> Result<(), DataError> {
    let invalid = |reason: &str| DataError::InvalidRecord {
        record: "profile",
        reason: reason.to_string(),
    };

    if profile.name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if !profile.email.contains('@') {
        return Err(invalid("email address is not valid"));
    }
    if !valid_rating(profile.rating) {
        return Err(invalid("rating must be between 0 and 5"));
    }
    Ok(())
}

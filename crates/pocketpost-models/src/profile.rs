//! Typed user-profile view.
//!
//! Profiles reuse the same table as posts with a caller-assigned id of the
//! form `profile-<username>`, the one deliberate use of caller-supplied ids.

use crate::entry::{Entry, fields};
use crate::post::{PROFILE_ID_PREFIX, is_profile_id};

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub biography: Option<String>,
    pub profile_picture_url: Option<String>,
}

impl Profile {
    pub fn id_for(username: &str) -> String {
        format!("{}{}", PROFILE_ID_PREFIX, username)
    }

    /// `Some` iff the id carries the profile prefix. A missing `username`
    /// field falls back to the id suffix, which is where legacy rows keep it
    /// anyway.
    pub fn from_entry(entry: &Entry) -> Option<Self> {
        if !is_profile_id(&entry.id) {
            return None;
        }
        let username = entry
            .get_text(fields::USERNAME)
            .unwrap_or(&entry.id[PROFILE_ID_PREFIX.len()..]);
        Some(Self {
            id: entry.id.clone(),
            username: username.to_string(),
            biography: entry.get_text(fields::BIOGRAPHY).map(str::to_string),
            profile_picture_url: entry
                .get_text(fields::PROFILE_PICTURE_URL)
                .map(str::to_string),
        })
    }
}

//! Typed post view over a raw entry.
//!
//! A record is a post iff `title` and `content` are both present and
//! non-empty and its id does not carry the profile prefix. Legacy course
//! records (course fields only) are not posts.

use crate::comment::Comment;
use crate::entry::{Entry, fields};
use crate::normalize;
use crate::vote::VoteState;

pub const PROFILE_ID_PREFIX: &str = "profile-";

/// Profile records are distinguished by id convention alone.
pub fn is_profile_id(id: &str) -> bool {
    id.starts_with(PROFILE_ID_PREFIX)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub is_public: bool,
    pub author_id: Option<String>,
    pub photo_url: Option<String>,
    /// Short code carried in the historical `course_code` slot ("BLOG" for
    /// posts created by this client).
    pub code: Option<String>,
    /// Human label carried in the historical `course_name` slot.
    pub label: Option<String>,
    pub votes: VoteState,
    pub comments: Vec<Comment>,
}

impl Post {
    /// `Some` iff the entry classifies as a post. Comment entries that fail
    /// to decode are dropped rather than failing the whole view; the
    /// consistency layer re-decodes with logging where the loss matters.
    pub fn from_entry(entry: &Entry) -> Option<Self> {
        if is_profile_id(&entry.id) {
            return None;
        }
        let title = entry.get_text(fields::TITLE)?;
        let content = entry.get_text(fields::CONTENT)?;

        let comments = normalize::value_list(entry.get(fields::COMMENTS))
            .unwrap_or_default()
            .into_iter()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect();

        Some(Self {
            id: entry.id.clone(),
            title: title.to_string(),
            content: content.to_string(),
            is_public: normalize::flag(entry.get(fields::IS_PUBLIC)),
            author_id: entry.get_text(fields::AUTHOR_ID).map(str::to_string),
            photo_url: entry.get_text(fields::PHOTO_URL).map(str::to_string),
            code: entry.get_text(fields::COURSE_CODE).map(str::to_string),
            label: entry.get_text(fields::COURSE_NAME).map(str::to_string),
            votes: VoteState::from_entry(entry),
            comments,
        })
    }
}

//! The raw entry document: an id plus an open field map.
//!
//! The table stores heterogeneous records (posts, profiles, legacy courses)
//! distinguished only by which fields are present. No schema is enforced
//! beyond the create validator, so the document type keeps every field it
//! does not recognize and round-trips it untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names shared by the server and the client.
pub mod fields {
    pub const ID: &str = "id";
    pub const COURSE_CODE: &str = "course_code";
    pub const COURSE_NAME: &str = "course_name";
    pub const TITLE: &str = "title";
    pub const CONTENT: &str = "content";
    pub const IS_PUBLIC: &str = "isPublic";
    pub const AUTHOR_ID: &str = "authorId";
    pub const PHOTO_URL: &str = "photoUrl";
    pub const UPVOTES: &str = "upvotes";
    pub const DOWNVOTES: &str = "downvotes";
    pub const UPVOTED_BY: &str = "upvotedBy";
    pub const DOWNVOTED_BY: &str = "downvotedBy";
    pub const COMMENTS: &str = "comments";
    pub const BIOGRAPHY: &str = "biography";
    pub const PROFILE_PICTURE_URL: &str = "profilePictureUrl";
    pub const USERNAME: &str = "username";
}

/// One persisted record. `id` is immutable once assigned; everything else is
/// an open map of named fields with legacy value encodings tolerated on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Entry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Non-empty string field, `None` when absent or blank.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get_str(name).filter(|s| !s.trim().is_empty())
    }
}

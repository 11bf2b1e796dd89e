//! Typed view for legacy course-catalog records.
//!
//! The table predates the blogging features; records carrying only the two
//! course fields are the catalog's original inhabitants. Anything that
//! classifies as a post or a profile is excluded here even if it also
//! carries course fields (posts repurpose them as label/code).

use crate::entry::{Entry, fields};
use crate::post::{Post, is_profile_id};

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    pub photo_url: Option<String>,
}

impl Course {
    pub fn from_entry(entry: &Entry) -> Option<Self> {
        if is_profile_id(&entry.id) || Post::from_entry(entry).is_some() {
            return None;
        }
        let code = entry.get_text(fields::COURSE_CODE)?;
        let name = entry.get_text(fields::COURSE_NAME)?;
        Some(Self {
            id: entry.id.clone(),
            code: code.to_string(),
            name: name.to_string(),
            photo_url: entry.get_text(fields::PHOTO_URL).map(str::to_string),
        })
    }
}

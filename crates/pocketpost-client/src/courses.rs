//! The catalog's original inhabitants: legacy course records.
//!
//! File upload itself belongs to the object-storage collaborator; callers
//! pass the resulting URL.

use pocketpost_models::Course;
use pocketpost_models::entry::fields;
use serde_json::{Map, json};

use crate::DataService;
use crate::error::Result;

impl DataService {
    pub async fn create_course(
        &self,
        code: &str,
        name: &str,
        photo_url: Option<&str>,
    ) -> Result<String> {
        let mut record = Map::new();
        record.insert(fields::COURSE_CODE.into(), json!(code));
        record.insert(fields::COURSE_NAME.into(), json!(name));
        if let Some(url) = photo_url {
            record.insert(fields::PHOTO_URL.into(), json!(url));
        }
        self.api.create(record).await
    }

    /// Records that are neither posts nor profiles but carry both course
    /// fields.
    pub async fn courses(&self) -> Result<Vec<Course>> {
        Ok(self
            .api
            .list()
            .await?
            .iter()
            .filter_map(Course::from_entry)
            .collect())
    }
}

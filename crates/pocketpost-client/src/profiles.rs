//! User profiles: records with the caller-assigned `profile-<username>` id.

use pocketpost_models::Profile;
use pocketpost_models::entry::fields;
use serde_json::{Map, json};

use crate::DataService;
use crate::error::{ClientError, Result};

pub const PROFILE_CODE: &str = "PROFILE";

impl DataService {
    /// The caller's own profile; `None` when never saved.
    pub async fn get_profile(&self) -> Result<Option<Profile>> {
        let identity = self.identity()?;
        self.profile_of(identity).await
    }

    /// Any user's profile, for rendering next to their posts and comments.
    pub async fn profile_of(&self, username: &str) -> Result<Option<Profile>> {
        let entry = self.api.get_optional(&Profile::id_for(username)).await?;
        Ok(entry.as_ref().and_then(Profile::from_entry))
    }

    /// Create-or-update. A first save posts the whole record under the
    /// profile id; later saves are one atomic update of the edited fields.
    /// An omitted picture leaves the stored one untouched.
    pub async fn save_profile(
        &self,
        biography: &str,
        picture_url: Option<&str>,
    ) -> Result<Profile> {
        let identity = self.identity()?.to_string();
        let profile_id = Profile::id_for(&identity);

        match self.api.get_optional(&profile_id).await? {
            None => {
                let mut record = Map::new();
                record.insert(fields::ID.into(), json!(profile_id));
                record.insert(fields::USERNAME.into(), json!(identity));
                record.insert(fields::COURSE_NAME.into(), json!(identity));
                record.insert(fields::COURSE_CODE.into(), json!(PROFILE_CODE));
                record.insert(fields::BIOGRAPHY.into(), json!(biography));
                if let Some(url) = picture_url {
                    record.insert(fields::PROFILE_PICTURE_URL.into(), json!(url));
                }
                self.api.create(record).await?;
            }
            Some(existing) => {
                let mut updates = Map::new();
                updates.insert(fields::BIOGRAPHY.into(), json!(biography));
                if let Some(url) = picture_url {
                    updates.insert(fields::PROFILE_PICTURE_URL.into(), json!(url));
                }
                self.api.update_fields(&existing.id, updates).await?;
            }
        }

        self.profile_of(&identity)
            .await?
            .ok_or_else(|| ClientError::NotFound(format!("Profile {}", identity)))
    }
}

//! PocketPost client: the consistency layer over the entry service.
//!
//! The store is a schemaless single table, so everything that makes the app
//! a blog — post-ness, visibility, ownership, vote tallies, the embedded
//! comment list — is decided here, one fetch-compute-write round per action.
//! Each logical mutation lands as one atomic request, so vote counters can
//! no longer drift from their membership sets mid-write; read-modify-write
//! races between concurrent callers remain (last write wins on the whole
//! subject, and concurrent comment appends can lose one).

pub mod api;
pub mod comments;
pub mod courses;
pub mod error;
pub mod posts;
pub mod profiles;
pub mod votes;

pub use api::EntryApi;
pub use error::{ClientError, Result};

/// One user's view of the blog. Holds the HTTP client, the bearer token, and
/// the caller's username, all injected at construction; anonymous readers
/// pass `None` for both.
pub struct DataService {
    pub(crate) api: EntryApi,
    pub(crate) username: Option<String>,
}

impl DataService {
    pub fn new(base_url: &str, token: Option<String>, username: Option<String>) -> Self {
        Self {
            api: EntryApi::new(base_url, token),
            username,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Raw access to the entry surface, for callers that outgrow the typed
    /// flows.
    pub fn api(&self) -> &EntryApi {
        &self.api
    }

    /// The caller's identity, required by every mutating flow.
    pub(crate) fn identity(&self) -> Result<&str> {
        self.username.as_deref().ok_or(ClientError::IdentityRequired)
    }
}

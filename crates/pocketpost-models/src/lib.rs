//! Shared typing, normalization, and validation for PocketPost entries.
//!
//! Everything the server and the client agree on lives here: the raw entry
//! document, the tolerant read-side coercions for legacy value encodings,
//! typed views (post / profile / course / embedded comment), the vote state
//! machine, and the store-level create validator.

pub mod comment;
pub mod course;
pub mod entry;
pub mod normalize;
pub mod post;
pub mod profile;
pub mod validate;
pub mod vote;

pub use comment::Comment;
pub use course::Course;
pub use entry::Entry;
pub use post::{Post, is_profile_id};
pub use profile::Profile;
pub use validate::{ValidationError, validate_entry};
pub use vote::{VoteKind, VoteStanding, VoteState};

//! Vote toggles for posts and embedded comments.
//!
//! Each toggle is one fetch of the subject, one transition of the vote
//! machine, and one atomic write of the vote block, so counters and
//! membership sets can never diverge from a partial write. Two concurrent
//! voters still race whole-subject: both read the same prior state and the
//! later write wins. There is no version token; that trade-off is inherited
//! from the store.

use pocketpost_models::{Post, VoteKind, VoteState};
use tracing::warn;

use crate::DataService;
use crate::comments::{comments_field, decode_comments};
use crate::error::{ClientError, Result};

impl DataService {
    /// Toggle the caller's vote on a post and persist the result. Returns
    /// the vote state as written.
    pub async fn toggle_post_vote(&self, post_id: &str, kind: VoteKind) -> Result<VoteState> {
        let identity = self.identity()?.to_string();
        let entry = self.api.get(post_id).await?;
        if Post::from_entry(&entry).is_none() {
            return Err(ClientError::NotFound(format!("Post {}", post_id)));
        }

        let mut votes = VoteState::from_entry(&entry);
        if votes.repair() {
            warn!(id = %post_id, "vote counters drifted from membership sets, repaired");
        }
        votes.toggle(kind, &identity);

        self.api.update_fields(post_id, votes.field_map()).await?;
        Ok(votes)
    }

    /// Toggle the caller's vote on one embedded comment and rewrite the
    /// post's comment list.
    pub async fn toggle_comment_vote(
        &self,
        post_id: &str,
        comment_id: &str,
        kind: VoteKind,
    ) -> Result<VoteState> {
        let identity = self.identity()?.to_string();
        let entry = self.api.get(post_id).await?;
        if Post::from_entry(&entry).is_none() {
            return Err(ClientError::NotFound(format!("Post {}", post_id)));
        }

        let mut comments = decode_comments(&entry);
        let comment = comments
            .iter_mut()
            .find(|comment| comment.id == comment_id)
            .ok_or_else(|| ClientError::NotFound(format!("Comment {}", comment_id)))?;

        let mut votes = comment.votes();
        if votes.repair() {
            warn!(
                post = %post_id,
                comment = %comment_id,
                "comment vote counters drifted, repaired"
            );
        }
        votes.toggle(kind, &identity);
        comment.set_votes(votes.clone());

        self.api
            .update_fields(post_id, comments_field(&comments)?)
            .await?;
        Ok(votes)
    }
}

//! The embedded comment list: tolerant decode, append, rewrite.
//!
//! Comments live inside one attribute of their post and the whole list is
//! rewritten per change. That rewrite is an unguarded read-modify-write:
//! two concurrent commenters race on the field and the later writer's list
//! wins, losing the other append.

use pocketpost_models::entry::fields;
use pocketpost_models::{Comment, Entry, Post, normalize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::DataService;
use crate::error::{ClientError, Result};

/// Decode the `comments` field, tolerating the legacy JSON-encoded-string
/// representation. An undecodable list degrades to empty with a warning
/// rather than failing the caller.
pub(crate) fn decode_comments(entry: &Entry) -> Vec<Comment> {
    let raw = match normalize::value_list(entry.get(fields::COMMENTS)) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(id = %entry.id, error = %err, "undecodable comment list, treating as empty");
            return Vec::new();
        }
    };

    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<Comment>(value) {
            Ok(comment) => Some(comment),
            Err(err) => {
                warn!(id = %entry.id, error = %err, "dropping malformed comment");
                None
            }
        })
        .collect()
}

pub(crate) fn comments_field(comments: &[Comment]) -> Result<Map<String, Value>> {
    let mut map = Map::new();
    map.insert(fields::COMMENTS.into(), serde_json::to_value(comments)?);
    Ok(map)
}

impl DataService {
    /// Append one comment and rewrite the list. Existing comments, known
    /// fields or not, round-trip untouched.
    pub async fn add_comment(&self, post_id: &str, content: &str) -> Result<Comment> {
        let identity = self.identity()?;
        let entry = self.api.get(post_id).await?;
        if Post::from_entry(&entry).is_none() {
            return Err(ClientError::NotFound(format!("Post {}", post_id)));
        }

        let mut comments = decode_comments(&entry);
        let comment = Comment::new(post_id, identity, content);
        comments.push(comment.clone());

        self.api
            .update_fields(post_id, comments_field(&comments)?)
            .await?;
        Ok(comment)
    }

    /// The decoded comment list of one post.
    pub async fn comments(&self, post_id: &str) -> Result<Vec<Comment>> {
        let entry = self.api.get(post_id).await?;
        Ok(decode_comments(&entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: Value) -> Entry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decode_handles_array_and_string_encodings() {
        let native = entry(json!({
            "id": "p-1",
            "comments": [{"id": "c-1", "postId": "p-1", "author": "bob", "content": "hi"}],
        }));
        assert_eq!(decode_comments(&native).len(), 1);

        let stringified = entry(json!({
            "id": "p-1",
            "comments": r#"[{"id":"c-1","postId":"p-1","author":"bob","content":"hi"}]"#,
        }));
        assert_eq!(decode_comments(&stringified), decode_comments(&native));
    }

    #[test]
    fn decode_failure_degrades_to_empty() {
        let broken = entry(json!({"id": "p-1", "comments": "{not json"}));
        assert!(decode_comments(&broken).is_empty());
        let absent = entry(json!({"id": "p-1"}));
        assert!(decode_comments(&absent).is_empty());
    }

    #[test]
    fn rewrite_preserves_unknown_comment_fields() {
        let with_extra = entry(json!({
            "id": "p-1",
            "comments": [{
                "id": "c-1", "postId": "p-1", "author": "bob", "content": "hi",
                "editedAt": "2024-05-01T00:00:00Z",
            }],
        }));
        let comments = decode_comments(&with_extra);
        let field = comments_field(&comments).unwrap();
        assert_eq!(
            field["comments"][0]["editedAt"],
            json!("2024-05-01T00:00:00Z")
        );
    }
}

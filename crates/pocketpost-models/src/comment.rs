//! Comments embedded in a post's `comments` field.
//!
//! Comments are not independently addressable records; the whole list lives
//! inside one attribute of the parent post and is rewritten as a unit. Field
//! names match the stored camelCase convention. Legacy comments may lack any
//! of these fields; an absent field stays absent through a rewrite, never
//! fabricated, and fields this type does not know about survive untouched.

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::normalize;
use crate::vote::VoteState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, skip_serializing_if = "str::is_empty")]
    pub id: String,
    #[serde(rename = "postId", default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(default, skip_serializing_if = "str::is_empty")]
    pub author: String,
    #[serde(default, skip_serializing_if = "str::is_empty")]
    pub content: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_count"
    )]
    pub upvotes: Option<u64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_count"
    )]
    pub downvotes: Option<u64>,
    #[serde(
        rename = "upvotedBy",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_id_set"
    )]
    pub upvoted_by: Option<Vec<String>>,
    #[serde(
        rename = "downvotedBy",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_id_set"
    )]
    pub downvoted_by: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn opt_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(Some(normalize::count(Some(&value))))
}

fn opt_id_set<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(Some(normalize::id_set(Some(&value))))
}

impl Comment {
    /// Fresh comment: generated id, current timestamp, zeroed votes.
    pub fn new(post_id: &str, author: &str, content: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            post_id: Some(post_id.to_string()),
            author: author.to_string(),
            content: content.to_string(),
            created_at: Some(Utc::now().to_rfc3339()),
            upvotes: Some(0),
            downvotes: Some(0),
            upvoted_by: Some(Vec::new()),
            downvoted_by: Some(Vec::new()),
            extra: Map::new(),
        }
    }

    /// The vote block as the machine sees it; absent fields read as zero.
    pub fn votes(&self) -> VoteState {
        VoteState {
            upvotes: self.upvotes.unwrap_or(0),
            downvotes: self.downvotes.unwrap_or(0),
            upvoted_by: self.upvoted_by.clone().unwrap_or_default(),
            downvoted_by: self.downvoted_by.clone().unwrap_or_default(),
        }
    }

    /// Write a toggled vote block back; a voted-on comment legitimately
    /// gains the vote fields it lacked.
    pub fn set_votes(&mut self, votes: VoteState) {
        self.upvotes = Some(votes.upvotes);
        self.downvotes = Some(votes.downvotes);
        self.upvoted_by = Some(votes.upvoted_by);
        self.downvoted_by = Some(votes.downvoted_by);
    }
}

//! Post predicates, listings, and CRUD flows.
//!
//! Listings are pure filters over one full scan per call; there is no cache
//! or index, so every listing costs O(total records) by design.

use pocketpost_models::Post;
use pocketpost_models::entry::fields;
use serde_json::{Map, json};

use crate::DataService;
use crate::error::{ClientError, Result};

pub const BLOG_CODE: &str = "BLOG";

/// Does `identity` own this post?
///
/// When the post records an author the answer is exact. Legacy rows without
/// `authorId` fall back to membership in the unowned-private listing (every
/// private post with no recorded author), which misclassifies in both
/// directions: any caller "owns" an authorless private post, and an
/// authorless public post is owned by nobody.
pub fn owns(post: &Post, identity: &str) -> bool {
    match &post.author_id {
        Some(author) => author.trim() == identity.trim(),
        None => !post.is_public,
    }
}

/// Viewable iff public, or the caller owns it.
pub fn visible(post: &Post, identity: Option<&str>) -> bool {
    post.is_public || identity.is_some_and(|user| owns(post, user))
}

impl DataService {
    /// Every public post, regardless of caller.
    pub async fn public_posts(&self) -> Result<Vec<Post>> {
        Ok(self
            .scan_posts()
            .await?
            .into_iter()
            .filter(|post| post.is_public)
            .collect())
    }

    /// The caller's private posts.
    pub async fn private_posts(&self) -> Result<Vec<Post>> {
        let identity = self.identity()?;
        Ok(self
            .scan_posts()
            .await?
            .into_iter()
            .filter(|post| !post.is_public && owns(post, identity))
            .collect())
    }

    /// Everything the caller owns, public and private.
    pub async fn my_posts(&self) -> Result<Vec<Post>> {
        let identity = self.identity()?;
        Ok(self
            .scan_posts()
            .await?
            .into_iter()
            .filter(|post| owns(post, identity))
            .collect())
    }

    pub async fn get_post(&self, id: &str) -> Result<Post> {
        let entry = self.api.get(id).await?;
        Post::from_entry(&entry).ok_or_else(|| ClientError::NotFound(format!("Post {}", id)))
    }

    /// One POST carrying the whole natively-typed record: post fields, the
    /// repurposed course slots, zeroed votes, an empty comment list.
    pub async fn create_post(
        &self,
        title: &str,
        content: &str,
        is_public: bool,
    ) -> Result<String> {
        let identity = self.identity()?;
        let mut record = Map::new();
        record.insert(fields::TITLE.into(), json!(title));
        record.insert(fields::CONTENT.into(), json!(content));
        record.insert(fields::IS_PUBLIC.into(), json!(is_public));
        record.insert(fields::AUTHOR_ID.into(), json!(identity));
        record.insert(fields::COURSE_NAME.into(), json!(title));
        record.insert(fields::COURSE_CODE.into(), json!(BLOG_CODE));
        record.insert(fields::UPVOTES.into(), json!(0));
        record.insert(fields::DOWNVOTES.into(), json!(0));
        record.insert(fields::UPVOTED_BY.into(), json!([]));
        record.insert(fields::DOWNVOTED_BY.into(), json!([]));
        record.insert(fields::COMMENTS.into(), json!([]));
        self.api.create(record).await
    }

    /// Edit title, content, and visibility in one atomic update. The label
    /// slot tracks the title and the author is re-stamped, so a legacy row
    /// edited by its owner gains a recorded author.
    pub async fn update_post(
        &self,
        id: &str,
        title: &str,
        content: &str,
        is_public: bool,
    ) -> Result<()> {
        let identity = self.identity()?;
        let mut updates = Map::new();
        updates.insert(fields::TITLE.into(), json!(title));
        updates.insert(fields::CONTENT.into(), json!(content));
        updates.insert(fields::IS_PUBLIC.into(), json!(is_public));
        updates.insert(fields::COURSE_NAME.into(), json!(title));
        updates.insert(fields::AUTHOR_ID.into(), json!(identity));
        self.api.update_fields(id, updates).await?;
        Ok(())
    }

    /// The server enforces admin-or-author.
    pub async fn delete_post(&self, id: &str) -> Result<()> {
        self.api.delete(id).await
    }

    async fn scan_posts(&self) -> Result<Vec<Post>> {
        Ok(self
            .api
            .list()
            .await?
            .iter()
            .filter_map(Post::from_entry)
            .collect())
    }
}

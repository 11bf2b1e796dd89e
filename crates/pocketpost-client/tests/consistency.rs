//! End-to-end consistency-layer scenarios against an in-process server.

use std::sync::Arc;

use jsonwebtoken::{EncodingKey, Header, encode};
use pocketpost_client::{ClientError, DataService};
use pocketpost_models::VoteKind;
use pocketpost_server::router;
use pocketpost_server::storage::Storage;
use serde_json::json;
use tempfile::TempDir;

async fn spawn_server() -> (String, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(Storage::new(&dir.path().join("entries.db")).unwrap());
    let app = router(storage);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), dir)
}

fn token_for(username: &str) -> String {
    encode(
        &Header::default(),
        &json!({ "cognito:username": username }),
        &EncodingKey::from_secret(b"test-only"),
    )
    .unwrap()
}

fn signed_in(base: &str, username: &str) -> DataService {
    DataService::new(base, Some(token_for(username)), Some(username.to_string()))
}

fn anonymous(base: &str) -> DataService {
    DataService::new(base, None, None)
}

#[tokio::test]
async fn created_post_resolves_author_visibility_and_ownership() {
    let (base, _dir) = spawn_server().await;
    let alice = signed_in(&base, "alice");
    let bob = signed_in(&base, "bob");

    let id = alice.create_post("T", "C", true).await.unwrap();
    let post = alice.get_post(&id).await.unwrap();
    assert_eq!(post.author_id.as_deref(), Some("alice"));
    assert!(pocketpost_client::posts::owns(&post, "alice"));
    assert!(!pocketpost_client::posts::owns(&post, "bob"));
    assert!(pocketpost_client::posts::visible(&post, Some("alice")));
    assert!(pocketpost_client::posts::visible(&post, Some("bob")));

    // Public listings agree for every caller, anonymous included.
    assert_eq!(bob.public_posts().await.unwrap().len(), 1);
    assert_eq!(anonymous(&base).public_posts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn listings_split_on_visibility_and_ownership() {
    let (base, _dir) = spawn_server().await;
    let alice = signed_in(&base, "alice");
    let bob = signed_in(&base, "bob");

    let public_id = alice.create_post("Public", "C", true).await.unwrap();
    let private_id = alice.create_post("Private", "C", false).await.unwrap();

    let public = alice.public_posts().await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].id, public_id);

    let private = alice.private_posts().await.unwrap();
    assert_eq!(private.len(), 1);
    assert_eq!(private[0].id, private_id);

    assert!(bob.private_posts().await.unwrap().is_empty());
    assert_eq!(alice.my_posts().await.unwrap().len(), 2);

    // Profiles never appear in post listings even with post-shaped fields.
    alice.save_profile("hello", None).await.unwrap();
    assert_eq!(alice.my_posts().await.unwrap().len(), 2);
    assert_eq!(bob.public_posts().await.unwrap().len(), 1);

    // Listings require an identity.
    assert!(matches!(
        anonymous(&base).private_posts().await,
        Err(ClientError::IdentityRequired)
    ));
}

#[tokio::test]
async fn legacy_string_flags_are_normalized_for_every_viewer() {
    let (base, _dir) = spawn_server().await;
    let alice = signed_in(&base, "alice");

    // A row shaped like the old single-field update path left it: string
    // flag, stringified vote sets.
    alice
        .api()
        .create(
            json!({
                "id": "legacy-1",
                "title": "Old",
                "content": "C",
                "isPublic": "True",
                "authorId": "alice",
                "upvotes": "2",
                "upvotedBy": "[\"x\",\"y\"]",
                "course_name": "Old",
                "course_code": "BLOG",
            })
            .as_object()
            .unwrap()
            .clone(),
        )
        .await
        .unwrap();

    let post = alice.get_post("legacy-1").await.unwrap();
    assert!(post.is_public);
    assert_eq!(post.votes.upvotes, 2);
    assert_eq!(post.votes.upvoted_by, vec!["x", "y"]);
    assert_eq!(signed_in(&base, "bob").public_posts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn edit_keeps_the_id_and_lands_atomically() {
    let (base, _dir) = spawn_server().await;
    let alice = signed_in(&base, "alice");

    let id = alice.create_post("T", "C", true).await.unwrap();
    alice
        .update_post(&id, "Edited", "New body", false)
        .await
        .unwrap();

    let post = alice.get_post(&id).await.unwrap();
    assert_eq!(post.id, id);
    assert_eq!(post.title, "Edited");
    assert_eq!(post.content, "New body");
    assert!(!post.is_public);
    assert_eq!(post.label.as_deref(), Some("Edited"));
    assert_eq!(post.author_id.as_deref(), Some("alice"));
}

#[tokio::test]
async fn delete_is_admin_or_author_only() {
    let (base, _dir) = spawn_server().await;
    let alice = signed_in(&base, "alice");
    let bob = signed_in(&base, "bob");

    let id = alice.create_post("Mine", "C", true).await.unwrap();

    let err = bob.delete_post(&id).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 403, .. }));

    alice.delete_post(&id).await.unwrap();
    assert!(matches!(
        alice.get_post(&id).await,
        Err(ClientError::NotFound(_))
    ));
}

#[tokio::test]
async fn vote_scenario_upvote_then_downvote() {
    let (base, _dir) = spawn_server().await;
    let alice = signed_in(&base, "alice");
    let carol = signed_in(&base, "carol");

    let id = alice.create_post("T", "C", true).await.unwrap();

    let votes = carol.toggle_post_vote(&id, VoteKind::Up).await.unwrap();
    assert_eq!(votes.upvotes, 1);
    assert_eq!(votes.upvoted_by, vec!["carol"]);

    let votes = carol.toggle_post_vote(&id, VoteKind::Down).await.unwrap();
    assert_eq!(votes.upvotes, 0);
    assert!(votes.upvoted_by.is_empty());
    assert_eq!(votes.downvotes, 1);
    assert_eq!(votes.downvoted_by, vec!["carol"]);

    // Persisted, not just computed.
    let post = alice.get_post(&id).await.unwrap();
    assert_eq!(post.votes, votes);
    assert_eq!(post.votes.format_score(), "-1");
}

#[tokio::test]
async fn double_toggle_returns_to_neutral() {
    let (base, _dir) = spawn_server().await;
    let alice = signed_in(&base, "alice");
    let carol = signed_in(&base, "carol");

    let id = alice.create_post("T", "C", true).await.unwrap();
    let before = alice.get_post(&id).await.unwrap().votes;

    carol.toggle_post_vote(&id, VoteKind::Up).await.unwrap();
    carol.toggle_post_vote(&id, VoteKind::Up).await.unwrap();

    let after = alice.get_post(&id).await.unwrap().votes;
    assert_eq!(after, before);
}

#[tokio::test]
async fn add_comment_appends_and_preserves_priors() {
    let (base, _dir) = spawn_server().await;
    let alice = signed_in(&base, "alice");
    let bob = signed_in(&base, "bob");

    let id = alice.create_post("T", "C", true).await.unwrap();
    let first = alice.add_comment(&id, "first").await.unwrap();
    let second = bob.add_comment(&id, "second").await.unwrap();

    let call_time = chrono::Utc::now();
    let third = bob.add_comment(&id, "third").await.unwrap();

    let comments = alice.comments(&id).await.unwrap();
    assert_eq!(comments.len(), 3);
    assert_eq!(comments[0], first);
    assert_eq!(comments[1], second);

    assert_eq!(comments[2].id, third.id);
    assert_eq!(comments[2].content, "third");
    assert_eq!(comments[2].author, "bob");
    assert_eq!(comments[2].post_id.as_deref(), Some(id.as_str()));
    let created = chrono::DateTime::parse_from_rfc3339(
        comments[2].created_at.as_deref().unwrap(),
    )
    .unwrap();
    assert!(created >= call_time - chrono::Duration::seconds(1));

    // Anonymous commenters are rejected client-side.
    assert!(matches!(
        anonymous(&base).add_comment(&id, "nope").await,
        Err(ClientError::IdentityRequired)
    ));
}

#[tokio::test]
async fn rewrite_never_fabricates_fields_on_legacy_comments() {
    let (base, _dir) = spawn_server().await;
    let alice = signed_in(&base, "alice");

    // A comment written by the old client: no postId, no timestamp, no vote
    // fields.
    alice
        .api()
        .create(
            json!({
                "id": "p-legacy",
                "title": "T",
                "content": "C",
                "isPublic": true,
                "authorId": "alice",
                "comments": [{"id": "c-1", "author": "bob", "content": "hi"}],
                "course_name": "T",
                "course_code": "BLOG",
            })
            .as_object()
            .unwrap()
            .clone(),
        )
        .await
        .unwrap();

    alice.add_comment("p-legacy", "second").await.unwrap();

    let entry = alice.api().get("p-legacy").await.unwrap();
    let stored = entry.get("comments").unwrap();
    assert_eq!(stored.as_array().unwrap().len(), 2);
    // The untouched comment comes back exactly as it went in.
    assert_eq!(
        stored[0],
        json!({"id": "c-1", "author": "bob", "content": "hi"})
    );
}

#[tokio::test]
async fn comment_votes_follow_the_same_machine() {
    let (base, _dir) = spawn_server().await;
    let alice = signed_in(&base, "alice");
    let carol = signed_in(&base, "carol");

    let id = alice.create_post("T", "C", true).await.unwrap();
    let comment = alice.add_comment(&id, "hot take").await.unwrap();

    let votes = carol
        .toggle_comment_vote(&id, &comment.id, VoteKind::Up)
        .await
        .unwrap();
    assert_eq!(votes.upvotes, 1);
    assert_eq!(votes.upvoted_by, vec!["carol"]);

    let votes = carol
        .toggle_comment_vote(&id, &comment.id, VoteKind::Down)
        .await
        .unwrap();
    assert_eq!(votes.downvotes, 1);
    assert!(votes.upvoted_by.is_empty());

    let persisted = alice.comments(&id).await.unwrap();
    assert_eq!(persisted[0].votes(), votes);

    assert!(matches!(
        carol.toggle_comment_vote(&id, "missing", VoteKind::Up).await,
        Err(ClientError::NotFound(_))
    ));
}

#[tokio::test]
async fn profile_save_and_reload() {
    let (base, _dir) = spawn_server().await;
    let alice = signed_in(&base, "alice");

    assert!(alice.get_profile().await.unwrap().is_none());

    let profile = alice
        .save_profile("rustacean", Some("https://example.com/a.png"))
        .await
        .unwrap();
    assert_eq!(profile.id, "profile-alice");
    assert_eq!(profile.username, "alice");

    // A later save without a picture keeps the stored one.
    let profile = alice.save_profile("still here", None).await.unwrap();
    assert_eq!(profile.biography.as_deref(), Some("still here"));
    assert_eq!(
        profile.profile_picture_url.as_deref(),
        Some("https://example.com/a.png")
    );

    let seen_by_other = signed_in(&base, "bob").profile_of("alice").await.unwrap();
    assert_eq!(seen_by_other.unwrap().biography.as_deref(), Some("still here"));
}

#[tokio::test]
async fn legacy_courses_classify_apart_from_posts() {
    let (base, _dir) = spawn_server().await;
    let alice = signed_in(&base, "alice");

    alice
        .create_course("CS101", "Intro", Some("https://example.com/c.png"))
        .await
        .unwrap();
    alice.create_post("T", "C", true).await.unwrap();

    let courses = alice.courses().await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].code, "CS101");
    // The post does not leak into the catalog, nor the course into listings.
    assert_eq!(alice.public_posts().await.unwrap().len(), 1);
}

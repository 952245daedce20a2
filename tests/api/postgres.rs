use crate::helpers::{TestDatabase, spawn_database};
use blogpress::domain::{
    CreatePostPayload, NewComment, NewPost, Page, PostChanges, PostStatus, UpdatePostPayload,
};
use blogpress::repository::{CommentStore, PostStore, delete_comment_thread};
use blogpress::routes::{CommentError, PostError};
use claims::{assert_matches, assert_ok_eq};
use uuid::Uuid;

async fn comment_ids(db: &TestDatabase) -> Vec<Uuid> {
    db.store
        .find_all_comments()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect()
}

// ============================================================================
// Comments
// ============================================================================

#[tokio::test]
async fn inserted_comment_is_read_back_with_author_and_post() {
    let db = spawn_database().await;
    let post_id = db.new_post("Joined rows").await;
    let comment = NewComment::new(post_id.to_string(), "  hi  ".into(), None).unwrap();

    let record = db.store.insert_comment(&comment, db.author_id).await.unwrap();

    assert_eq!(record.content, "hi");
    assert_eq!(record.post_title, "Joined rows");
    assert_eq!(record.author_name, "Ada Lovelace");
    assert_eq!(record.parent_id, None);
}

#[tokio::test]
async fn comments_come_back_oldest_first() {
    let db = spawn_database().await;
    let first_post = db.new_post("First").await;
    let second_post = db.new_post("Second").await;

    let late = db.comment_at(first_post, None, 30).await;
    let early = db.comment_at(first_post, None, 10).await;
    let other_post = db.comment_at(second_post, None, 20).await;
    let tied_a = db.comment_at(first_post, None, 40).await;
    let tied_b = db.comment_at(first_post, None, 40).await;
    let (tie_first, tie_second) = if tied_a < tied_b {
        (tied_a, tied_b)
    } else {
        (tied_b, tied_a)
    };

    let for_post: Vec<Uuid> = db
        .store
        .find_comments_by_post(first_post)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(for_post, vec![early, late, tie_first, tie_second]);

    assert_eq!(
        comment_ids(&db).await,
        vec![early, other_post, late, tie_first, tie_second]
    );
}

#[tokio::test]
async fn deleting_a_comment_removes_it_and_its_direct_replies() {
    let db = spawn_database().await;
    let post_id = db.new_post("Cascade").await;
    let top = db.comment_at(post_id, None, 1).await;
    let reply = db.comment_at(post_id, Some(top), 2).await;
    let second_reply = db.comment_at(post_id, Some(top), 3).await;
    let nested = db.comment_at(post_id, Some(reply), 4).await;
    let sibling = db.comment_at(post_id, None, 5).await;

    assert_ok_eq!(delete_comment_thread(&db.store, top).await, 2);

    let remaining = comment_ids(&db).await;
    assert_eq!(remaining, vec![nested, sibling]);
    assert!(!remaining.contains(&second_reply));
}

#[tokio::test]
async fn deleting_an_unknown_comment_touches_nothing() {
    let db = spawn_database().await;
    let post_id = db.new_post("Untouched").await;
    let top = db.comment_at(post_id, None, 1).await;
    let reply = db.comment_at(post_id, Some(top), 2).await;

    assert_matches!(
        delete_comment_thread(&db.store, Uuid::new_v4()).await,
        Err(CommentError::NotFound)
    );

    assert_eq!(comment_ids(&db).await, vec![top, reply]);
}

#[tokio::test]
async fn deleting_a_post_removes_its_comments() {
    let db = spawn_database().await;
    let doomed = db.new_post("Doomed").await;
    let kept = db.new_post("Kept").await;
    db.comment_at(doomed, None, 1).await;
    let survivor = db.comment_at(kept, None, 2).await;

    assert_ok_eq!(db.store.delete_post(doomed).await, true);
    assert_ok_eq!(db.store.delete_post(doomed).await, false);

    assert_eq!(comment_ids(&db).await, vec![survivor]);
}

// ============================================================================
// Posts
// ============================================================================

#[tokio::test]
async fn inserting_a_taken_slug_is_a_conflict() {
    let db = spawn_database().await;
    db.new_post("Same Title").await;

    let clash = NewPost::try_from(CreatePostPayload {
        title: "same title".into(),
        content: "Body".into(),
        cover_image_url: None,
        tags: Vec::new(),
        is_draft: false,
        generated_by_ai: false,
    })
    .unwrap();

    assert_matches!(
        db.store.insert_post(&clash, db.author_id).await,
        Err(PostError::SlugTaken)
    );
}

#[tokio::test]
async fn renaming_onto_a_taken_slug_is_a_conflict() {
    let db = spawn_database().await;
    db.new_post("Taken").await;
    let other = db.new_post("Free").await;
    let changes = PostChanges::try_from(UpdatePostPayload {
        title: Some("TAKEN".into()),
        ..Default::default()
    })
    .unwrap();

    assert_matches!(
        db.store.update_post(other, &changes).await,
        Err(PostError::SlugTaken)
    );
}

#[tokio::test]
async fn update_keeps_fields_that_are_not_given() {
    let db = spawn_database().await;
    let id = db.new_post_with("Original", "Original body", false).await;
    let changes = PostChanges::try_from(UpdatePostPayload {
        title: Some("Renamed".into()),
        is_draft: Some(true),
        ..Default::default()
    })
    .unwrap();

    let updated = db.store.update_post(id, &changes).await.unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.slug, "renamed");
    assert_eq!(updated.content, "Original body");
    assert_eq!(updated.tags, vec!["rust".to_string()]);
    assert!(updated.is_draft);
    assert!(updated.updated_at > updated.created_at);
}

#[tokio::test]
async fn updating_a_missing_post_is_not_found() {
    let db = spawn_database().await;
    let changes = PostChanges::try_from(UpdatePostPayload {
        content: Some("New".into()),
        ..Default::default()
    })
    .unwrap();

    assert_matches!(
        db.store.update_post(Uuid::new_v4(), &changes).await,
        Err(PostError::NotFound)
    );
}

#[tokio::test]
async fn listing_is_most_recently_updated_first_with_counts() {
    let db = spawn_database().await;
    let older = db.new_post("Older").await;
    let newer = db.new_post("Newer").await;
    db.new_post_with("Hidden", "Draft body", true).await;

    let page = Page::parse(1).unwrap();
    let listing = db
        .store
        .list_posts(PostStatus::Published, page, 10)
        .await
        .unwrap();
    let ids: Vec<Uuid> = listing.posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![newer, older]);
    assert_eq!(listing.counts.all, 3);
    assert_eq!(listing.counts.published, 2);
    assert_eq!(listing.counts.draft, 1);

    // Touching the older post moves it to the front
    let changes = PostChanges::try_from(UpdatePostPayload {
        content: Some("Edited".into()),
        ..Default::default()
    })
    .unwrap();
    db.store.update_post(older, &changes).await.unwrap();

    let listing = db
        .store
        .list_posts(PostStatus::Published, page, 1)
        .await
        .unwrap();
    assert_eq!(listing.posts.len(), 1);
    assert_eq!(listing.posts[0].id, older);
}

#[tokio::test]
async fn search_takes_wildcards_literally_and_skips_drafts() {
    let db = spawn_database().await;
    let literal = db.new_post_with("Progress", "We are 100% done", false).await;
    db.new_post_with("Other", "We are 1000 done", false).await;
    db.new_post_with("Secret", "Also 100% done", true).await;

    let found: Vec<Uuid> = db
        .store
        .search_posts("100%")
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();

    assert_eq!(found, vec![literal]);
}

#[tokio::test]
async fn trending_orders_by_views_then_likes() {
    let db = spawn_database().await;
    let liked = db.new_post("Liked").await;
    let viewed = db.new_post("Viewed").await;
    let quiet = db.new_post("Quiet").await;

    for _ in 0..2 {
        assert_ok_eq!(db.store.increment_views(viewed).await, true);
    }
    assert_ok_eq!(db.store.increment_views(liked).await, true);
    assert_ok_eq!(db.store.increment_views(quiet).await, true);
    assert_ok_eq!(db.store.increment_likes(liked).await, true);
    assert_ok_eq!(db.store.increment_likes(Uuid::new_v4()).await, false);

    let ids: Vec<Uuid> = db
        .store
        .trending_posts(10)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();

    assert_eq!(ids, vec![viewed, liked, quiet]);
}

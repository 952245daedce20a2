use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{CommentRecord, NewComment};
use crate::repository::{CommentStore, PgStore};
use crate::routes::CommentError;

const SELECT_COMMENTS: &str = r#"
    SELECT c.id, c.post_id, p.title AS post_title, p.cover_image_url AS post_cover_image_url,
           c.author_id, u.name AS author_name, u.profile_image_url AS author_profile_image_url,
           c.content, c.parent_id, c.created_at, c.updated_at
    FROM comments c
    INNER JOIN users u ON c.author_id = u.id
    INNER JOIN posts p ON c.post_id = p.id
"#;

/// Deletes a comment and its direct replies. Replies to those replies are
/// left in place and drop out of threads as orphans.
///
/// Returns the number of replies removed alongside the comment.
#[tracing::instrument(skip_all, fields(comment_id = %id))]
pub async fn delete_comment_thread(store: &dyn CommentStore, id: Uuid) -> Result<u64, CommentError> {
    if !store.delete_comment(id).await? {
        return Err(CommentError::NotFound);
    }

    let replies = store.delete_comments_by_parent(id).await?;
    tracing::info!(replies, "Deleted comment and its replies");

    Ok(replies)
}

#[async_trait]
impl CommentStore for PgStore {
    #[tracing::instrument(skip(self))]
    async fn find_comments_by_post(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<CommentRecord>, anyhow::Error> {
        let query = format!("{SELECT_COMMENTS} WHERE c.post_id = $1 ORDER BY c.created_at, c.id");

        sqlx::query_as::<_, CommentRecord>(&query)
            .bind(post_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to load comments for post")
    }

    #[tracing::instrument(skip(self))]
    async fn find_all_comments(&self) -> Result<Vec<CommentRecord>, anyhow::Error> {
        let query = format!("{SELECT_COMMENTS} ORDER BY c.created_at, c.id");

        sqlx::query_as::<_, CommentRecord>(&query)
            .fetch_all(&self.pool)
            .await
            .context("Failed to load comments")
    }

    #[tracing::instrument(skip(self))]
    async fn find_comment(&self, id: Uuid) -> Result<Option<CommentRecord>, anyhow::Error> {
        let query = format!("{SELECT_COMMENTS} WHERE c.id = $1");

        sqlx::query_as::<_, CommentRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load comment")
    }

    #[tracing::instrument(skip(self, comment), fields(post_id = %comment.post_id))]
    async fn insert_comment(
        &self,
        comment: &NewComment,
        author_id: Uuid,
    ) -> Result<CommentRecord, anyhow::Error> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO comments (id, post_id, author_id, content, parent_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(comment.post_id)
        .bind(author_id)
        .bind(comment.content.as_ref())
        .bind(comment.parent_id)
        .execute(&self.pool)
        .await
        .context("Failed to insert comment")?;

        self.find_comment(id)
            .await?
            .context("Inserted comment could not be read back")
    }

    #[tracing::instrument(skip(self))]
    async fn delete_comment(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete comment")?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_comments_by_parent(&self, parent_id: Uuid) -> Result<u64, anyhow::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE parent_id = $1")
            .bind(parent_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete replies")?;

        Ok(result.rows_affected())
    }
}

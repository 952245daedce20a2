use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    NewPost, Page, PostChanges, PostCounts, PostListing, PostRecord, PostStatus,
};
use crate::repository::{PgStore, PostStore};
use crate::routes::PostError;

const SELECT_POSTS: &str = r#"
    SELECT p.id, p.title, p.slug, p.content, p.cover_image_url, p.tags, p.author_id,
           u.name AS author_name, u.profile_image_url AS author_profile_image_url,
           p.is_draft, p.generated_by_ai, p.views, p.likes, p.created_at, p.updated_at
    FROM posts p
    INNER JOIN users u ON p.author_id = u.id
"#;

/// Turns a unique violation on `posts.slug` into a conflict.
fn write_error(e: sqlx::Error, action: &'static str) -> PostError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => PostError::SlugTaken,
        _ => PostError::UnexpectedError(anyhow::Error::new(e).context(action)),
    }
}

/// `ILIKE` pattern matching `query` anywhere, with wildcards in it taken literally.
fn contains_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl PostStore for PgStore {
    #[tracing::instrument(skip(self, post), fields(slug = %post.slug.as_ref()))]
    async fn insert_post(&self, post: &NewPost, author_id: Uuid) -> Result<PostRecord, PostError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO posts
                (id, title, slug, content, cover_image_url, tags, author_id, is_draft, generated_by_ai)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(id)
        .bind(post.title.as_ref())
        .bind(post.slug.as_ref())
        .bind(post.content.as_ref())
        .bind(post.cover_image_url.as_ref().map(|url| url.as_ref()))
        .bind(post.tags.as_ref())
        .bind(author_id)
        .bind(post.is_draft)
        .bind(post.generated_by_ai)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to insert post"))?;

        Ok(self
            .find_post_by_id(id)
            .await?
            .context("Inserted post could not be read back")?)
    }

    #[tracing::instrument(skip(self, changes))]
    async fn update_post(
        &self,
        id: Uuid,
        changes: &PostChanges,
    ) -> Result<PostRecord, PostError> {
        let result = sqlx::query(
            r#"
            UPDATE posts SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                content = COALESCE($4, content),
                cover_image_url = COALESCE($5, cover_image_url),
                tags = COALESCE($6, tags),
                is_draft = COALESCE($7, is_draft),
                generated_by_ai = COALESCE($8, generated_by_ai),
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.title.as_ref().map(|t| t.as_ref()))
        .bind(changes.slug.as_ref().map(|s| s.as_ref()))
        .bind(changes.content.as_ref().map(|c| c.as_ref()))
        .bind(changes.cover_image_url.as_ref().map(|url| url.as_ref()))
        .bind(changes.tags.as_ref().map(|t| t.as_ref().to_vec()))
        .bind(changes.is_draft)
        .bind(changes.generated_by_ai)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to update post"))?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound);
        }

        self.find_post_by_id(id).await?.ok_or(PostError::NotFound)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_post(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        // Comments go with the post through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete post")?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn find_post_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, anyhow::Error> {
        let query = format!("{SELECT_POSTS} WHERE p.id = $1");

        sqlx::query_as::<_, PostRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load post")
    }

    #[tracing::instrument(skip(self))]
    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, anyhow::Error> {
        let query = format!("{SELECT_POSTS} WHERE p.slug = $1");

        sqlx::query_as::<_, PostRecord>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load post by slug")
    }

    #[tracing::instrument(skip(self))]
    async fn list_posts(
        &self,
        status: PostStatus,
        page: Page,
        per_page: i64,
    ) -> Result<PostListing, anyhow::Error> {
        let query = format!(
            r#"
            {SELECT_POSTS}
            WHERE ($1::BOOLEAN IS NULL OR p.is_draft = $1)
            ORDER BY p.updated_at DESC, p.id
            LIMIT $2 OFFSET $3
            "#
        );

        let posts = sqlx::query_as::<_, PostRecord>(&query)
            .bind(status.draft_filter())
            .bind(per_page)
            .bind(page.offset(per_page))
            .fetch_all(&self.pool)
            .await
            .context("Failed to list posts")?;

        let (all, published, draft): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE NOT is_draft),
                   COUNT(*) FILTER (WHERE is_draft)
            FROM posts
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .context("Failed to count posts")?;

        Ok(PostListing {
            posts,
            counts: PostCounts {
                all,
                published,
                draft,
            },
        })
    }

    #[tracing::instrument(skip(self))]
    async fn posts_by_tag(&self, tag: &str) -> Result<Vec<PostRecord>, anyhow::Error> {
        let query = format!(
            "{SELECT_POSTS} WHERE NOT p.is_draft AND $1 = ANY(p.tags) ORDER BY p.updated_at DESC"
        );

        sqlx::query_as::<_, PostRecord>(&query)
            .bind(tag)
            .fetch_all(&self.pool)
            .await
            .context("Failed to load posts by tag")
    }

    #[tracing::instrument(skip(self))]
    async fn search_posts(&self, query: &str) -> Result<Vec<PostRecord>, anyhow::Error> {
        let sql = format!(
            r#"
            {SELECT_POSTS}
            WHERE NOT p.is_draft AND (p.title ILIKE $1 OR p.content ILIKE $1)
            ORDER BY p.updated_at DESC
            "#
        );

        sqlx::query_as::<_, PostRecord>(&sql)
            .bind(contains_pattern(query))
            .fetch_all(&self.pool)
            .await
            .context("Failed to search posts")
    }

    #[tracing::instrument(skip(self))]
    async fn increment_views(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("UPDATE posts SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to count view")?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn increment_likes(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("UPDATE posts SET likes = likes + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to count like")?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn trending_posts(&self, limit: i64) -> Result<Vec<PostRecord>, anyhow::Error> {
        let query = format!(
            "{SELECT_POSTS} WHERE NOT p.is_draft ORDER BY p.views DESC, p.likes DESC LIMIT $1"
        );

        sqlx::query_as::<_, PostRecord>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .context("Failed to load trending posts")
    }
}

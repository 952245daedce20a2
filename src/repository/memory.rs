use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    AuthorSummary, CommentRecord, NewComment, NewPost, Page, PostChanges, PostCounts,
    PostListing, PostRecord, PostStatus,
};
use crate::repository::{CommentStore, PostStore};
use crate::routes::PostError;

/// Process-local store with the same behavior as the Postgres one.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    users: HashMap<Uuid, AuthorSummary>,
    posts: Vec<StoredPost>,
    comments: Vec<StoredComment>,
    /// Bumped on every post write, breaks `updated_at` ties.
    revision: u64,
}

struct StoredPost {
    id: Uuid,
    title: String,
    slug: String,
    content: String,
    cover_image_url: Option<String>,
    tags: Vec<String>,
    author_id: Uuid,
    is_draft: bool,
    generated_by_ai: bool,
    views: i64,
    likes: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    revision: u64,
}

struct StoredComment {
    id: Uuid,
    post_id: Uuid,
    author_id: Uuid,
    content: String,
    parent_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InMemoryStore {
    /// Registers a user so their posts and comments can be joined with a name.
    pub async fn add_user(&self, user: AuthorSummary) {
        self.state.write().await.users.insert(user.id, user);
    }
}

impl State {
    fn next_revision(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    fn post(&self, id: Uuid) -> Option<&StoredPost> {
        self.posts.iter().find(|p| p.id == id)
    }

    fn post_mut(&mut self, id: Uuid) -> Option<&mut StoredPost> {
        self.posts.iter_mut().find(|p| p.id == id)
    }

    fn slug_taken(&self, slug: &str, except: Option<Uuid>) -> bool {
        self.posts
            .iter()
            .any(|p| p.slug == slug && Some(p.id) != except)
    }

    /// `None` when the author is unknown, mirroring the inner join.
    fn post_record(&self, post: &StoredPost) -> Option<PostRecord> {
        let author = self.users.get(&post.author_id)?;
        Some(PostRecord {
            id: post.id,
            title: post.title.clone(),
            slug: post.slug.clone(),
            content: post.content.clone(),
            cover_image_url: post.cover_image_url.clone(),
            tags: post.tags.clone(),
            author_id: author.id,
            author_name: author.name.clone(),
            author_profile_image_url: author.profile_image_url.clone(),
            is_draft: post.is_draft,
            generated_by_ai: post.generated_by_ai,
            views: post.views,
            likes: post.likes,
            created_at: post.created_at,
            updated_at: post.updated_at,
        })
    }

    fn comment_record(&self, comment: &StoredComment) -> Option<CommentRecord> {
        let author = self.users.get(&comment.author_id)?;
        let post = self.post(comment.post_id)?;
        Some(CommentRecord {
            id: comment.id,
            post_id: post.id,
            post_title: post.title.clone(),
            post_cover_image_url: post.cover_image_url.clone(),
            author_id: author.id,
            author_name: author.name.clone(),
            author_profile_image_url: author.profile_image_url.clone(),
            content: comment.content.clone(),
            parent_id: comment.parent_id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        })
    }

    /// Published posts matching `keep`, most recently updated first.
    fn published_posts(&self, keep: impl Fn(&StoredPost) -> bool) -> Vec<PostRecord> {
        let mut posts: Vec<&StoredPost> = self
            .posts
            .iter()
            .filter(|p| !p.is_draft && keep(p))
            .collect();
        posts.sort_by(|a, b| b.revision.cmp(&a.revision));
        posts
            .into_iter()
            .filter_map(|p| self.post_record(p))
            .collect()
    }
}

#[async_trait]
impl CommentStore for InMemoryStore {
    async fn find_comments_by_post(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<CommentRecord>, anyhow::Error> {
        let state = self.state.read().await;
        Ok(state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .filter_map(|c| state.comment_record(c))
            .collect())
    }

    async fn find_all_comments(&self) -> Result<Vec<CommentRecord>, anyhow::Error> {
        let state = self.state.read().await;
        Ok(state
            .comments
            .iter()
            .filter_map(|c| state.comment_record(c))
            .collect())
    }

    async fn find_comment(&self, id: Uuid) -> Result<Option<CommentRecord>, anyhow::Error> {
        let state = self.state.read().await;
        Ok(state
            .comments
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| state.comment_record(c)))
    }

    async fn insert_comment(
        &self,
        comment: &NewComment,
        author_id: Uuid,
    ) -> Result<CommentRecord, anyhow::Error> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&author_id) {
            return Err(anyhow!("Comment author {author_id} does not exist"));
        }
        if state.post(comment.post_id).is_none() {
            return Err(anyhow!("Post {} does not exist", comment.post_id));
        }

        let now = Utc::now();
        let stored = StoredComment {
            id: Uuid::new_v4(),
            post_id: comment.post_id,
            author_id,
            content: comment.content.as_ref().to_string(),
            parent_id: comment.parent_id,
            created_at: now,
            updated_at: now,
        };
        let record = state
            .comment_record(&stored)
            .ok_or_else(|| anyhow!("Inserted comment could not be read back"))?;
        state.comments.push(stored);

        Ok(record)
    }

    async fn delete_comment(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let mut state = self.state.write().await;
        let before = state.comments.len();
        state.comments.retain(|c| c.id != id);
        Ok(state.comments.len() < before)
    }

    async fn delete_comments_by_parent(&self, parent_id: Uuid) -> Result<u64, anyhow::Error> {
        let mut state = self.state.write().await;
        let before = state.comments.len();
        state.comments.retain(|c| c.parent_id != Some(parent_id));
        Ok((before - state.comments.len()) as u64)
    }
}

#[async_trait]
impl PostStore for InMemoryStore {
    async fn insert_post(&self, post: &NewPost, author_id: Uuid) -> Result<PostRecord, PostError> {
        let mut state = self.state.write().await;
        if state.slug_taken(post.slug.as_ref(), None) {
            return Err(PostError::SlugTaken);
        }
        if !state.users.contains_key(&author_id) {
            return Err(anyhow!("Post author {author_id} does not exist").into());
        }

        let now = Utc::now();
        let revision = state.next_revision();
        let stored = StoredPost {
            id: Uuid::new_v4(),
            title: post.title.as_ref().to_string(),
            slug: post.slug.as_ref().to_string(),
            content: post.content.as_ref().to_string(),
            cover_image_url: post.cover_image_url.as_ref().map(|u| u.as_ref().to_string()),
            tags: post.tags.as_ref().to_vec(),
            author_id,
            is_draft: post.is_draft,
            generated_by_ai: post.generated_by_ai,
            views: 0,
            likes: 0,
            created_at: now,
            updated_at: now,
            revision,
        };
        let record = state
            .post_record(&stored)
            .ok_or_else(|| anyhow!("Inserted post could not be read back"))?;
        state.posts.push(stored);

        Ok(record)
    }

    async fn update_post(
        &self,
        id: Uuid,
        changes: &PostChanges,
    ) -> Result<PostRecord, PostError> {
        let mut state = self.state.write().await;
        if state.post(id).is_none() {
            return Err(PostError::NotFound);
        }
        if let Some(slug) = &changes.slug {
            if state.slug_taken(slug.as_ref(), Some(id)) {
                return Err(PostError::SlugTaken);
            }
        }

        let revision = state.next_revision();
        let post = state.post_mut(id).ok_or(PostError::NotFound)?;
        if let Some(title) = &changes.title {
            post.title = title.as_ref().to_string();
        }
        if let Some(slug) = &changes.slug {
            post.slug = slug.as_ref().to_string();
        }
        if let Some(content) = &changes.content {
            post.content = content.as_ref().to_string();
        }
        if let Some(url) = &changes.cover_image_url {
            post.cover_image_url = Some(url.as_ref().to_string());
        }
        if let Some(tags) = &changes.tags {
            post.tags = tags.as_ref().to_vec();
        }
        if let Some(is_draft) = changes.is_draft {
            post.is_draft = is_draft;
        }
        if let Some(generated_by_ai) = changes.generated_by_ai {
            post.generated_by_ai = generated_by_ai;
        }
        post.updated_at = Utc::now();
        post.revision = revision;

        let post = state.post(id).ok_or(PostError::NotFound)?;
        Ok(state
            .post_record(post)
            .ok_or_else(|| anyhow!("Updated post could not be read back"))?)
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let mut state = self.state.write().await;
        let before = state.posts.len();
        state.posts.retain(|p| p.id != id);
        if state.posts.len() == before {
            return Ok(false);
        }
        state.comments.retain(|c| c.post_id != id);
        Ok(true)
    }

    async fn find_post_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, anyhow::Error> {
        let state = self.state.read().await;
        Ok(state.post(id).and_then(|p| state.post_record(p)))
    }

    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, anyhow::Error> {
        let state = self.state.read().await;
        Ok(state
            .posts
            .iter()
            .find(|p| p.slug == slug)
            .and_then(|p| state.post_record(p)))
    }

    async fn list_posts(
        &self,
        status: PostStatus,
        page: Page,
        per_page: i64,
    ) -> Result<PostListing, anyhow::Error> {
        let state = self.state.read().await;
        let draft = state.posts.iter().filter(|p| p.is_draft).count() as i64;
        let counts = PostCounts {
            all: state.posts.len() as i64,
            published: state.posts.len() as i64 - draft,
            draft,
        };

        let mut matching: Vec<&StoredPost> = state
            .posts
            .iter()
            .filter(|p| status.draft_filter().is_none_or(|d| p.is_draft == d))
            .collect();
        matching.sort_by(|a, b| b.revision.cmp(&a.revision));

        let posts = matching
            .into_iter()
            .skip(page.offset(per_page) as usize)
            .take(per_page as usize)
            .filter_map(|p| state.post_record(p))
            .collect();

        Ok(PostListing { posts, counts })
    }

    async fn posts_by_tag(&self, tag: &str) -> Result<Vec<PostRecord>, anyhow::Error> {
        let state = self.state.read().await;
        Ok(state.published_posts(|p| p.tags.iter().any(|t| t == tag)))
    }

    async fn search_posts(&self, query: &str) -> Result<Vec<PostRecord>, anyhow::Error> {
        let needle = query.to_lowercase();
        let state = self.state.read().await;
        Ok(state.published_posts(|p| {
            p.title.to_lowercase().contains(&needle) || p.content.to_lowercase().contains(&needle)
        }))
    }

    async fn increment_views(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let mut state = self.state.write().await;
        Ok(state.post_mut(id).map(|p| p.views += 1).is_some())
    }

    async fn increment_likes(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let mut state = self.state.write().await;
        Ok(state.post_mut(id).map(|p| p.likes += 1).is_some())
    }

    async fn trending_posts(&self, limit: i64) -> Result<Vec<PostRecord>, anyhow::Error> {
        let state = self.state.read().await;
        let mut posts: Vec<&StoredPost> = state.posts.iter().filter(|p| !p.is_draft).collect();
        posts.sort_by(|a, b| b.views.cmp(&a.views).then(b.likes.cmp(&a.likes)));
        Ok(posts
            .into_iter()
            .take(limit as usize)
            .filter_map(|p| state.post_record(p))
            .collect())
    }
}

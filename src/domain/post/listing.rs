use serde::{Deserialize, Serialize};

use crate::domain::{PostRecord, PostResponse};

pub const POSTS_PER_PAGE: i64 = 5;
pub const TRENDING_POSTS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStatus {
    Published,
    Draft,
    All,
}

impl PostStatus {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "published" => Ok(Self::Published),
            "draft" => Ok(Self::Draft),
            "all" => Ok(Self::All),
            _ => Err("status must be one of published, draft or all".to_string()),
        }
    }

    /// The `is_draft` value a post must have to be listed, if any.
    pub fn draft_filter(&self) -> Option<bool> {
        match self {
            PostStatus::Published => Some(false),
            PostStatus::Draft => Some(true),
            PostStatus::All => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Page(i64);

impl Page {
    pub fn parse(value: i64) -> Result<Self, String> {
        if value <= 0 {
            return Err("page must be greater than zero".to_string());
        }

        if value > 1_000_000 {
            return Err("page must be a maximum of 1 million".to_string());
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn offset(&self, per_page: i64) -> i64 {
        (self.0 - 1) * per_page
    }
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostCounts {
    pub all: i64,
    pub published: i64,
    pub draft: i64,
}

impl PostCounts {
    pub fn for_status(&self, status: PostStatus) -> i64 {
        match status {
            PostStatus::Published => self.published,
            PostStatus::Draft => self.draft,
            PostStatus::All => self.all,
        }
    }
}

/// One page of posts plus the per-status totals, as returned by storage.
#[derive(Debug)]
pub struct PostListing {
    pub posts: Vec<PostRecord>,
    pub counts: PostCounts,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub posts: Vec<PostResponse>,
    pub page: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub counts: PostCounts,
}

impl PostPage {
    pub fn new(listing: PostListing, status: PostStatus, page: Page, per_page: i64) -> Self {
        let total_count = listing.counts.for_status(status);
        Self {
            posts: listing.posts.into_iter().map(PostResponse::from).collect(),
            page: page.value(),
            total_pages: (total_count + per_page - 1) / per_page,
            total_count,
            counts: listing.counts,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
}

#[derive(Deserialize, Debug)]
pub struct PostListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_status")]
    pub status: String,
}

#[derive(Deserialize, Debug)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

fn default_page() -> i64 {
    1
}

fn default_status() -> String {
    "published".to_string()
}

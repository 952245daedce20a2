mod cover_image;
mod listing;
mod post_content;
mod post_title;
mod slug;
mod tags;
mod types;

pub use cover_image::CoverImageUrl;
pub use listing::*;
pub use post_content::PostContent;
pub use post_title::PostTitle;
pub use slug::Slug;
pub use tags::Tags;
pub use types::*;

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: PostTitle,
    pub slug: Slug,
    pub content: PostContent,
    pub cover_image_url: Option<CoverImageUrl>,
    pub tags: Tags,
    pub is_draft: bool,
    pub generated_by_ai: bool,
}

impl TryFrom<CreatePostPayload> for NewPost {
    type Error = String;

    fn try_from(payload: CreatePostPayload) -> Result<Self, Self::Error> {
        let title = PostTitle::parse(payload.title)?;
        Ok(Self {
            slug: Slug::from_title(&title)?,
            title,
            content: PostContent::parse(payload.content)?,
            cover_image_url: CoverImageUrl::parse_optional(payload.cover_image_url)?,
            tags: Tags::parse(payload.tags)?,
            is_draft: payload.is_draft,
            generated_by_ai: payload.generated_by_ai,
        })
    }
}

/// A partial edit of a post. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<PostTitle>,
    /// Set whenever `title` is, so the URL follows the title.
    pub slug: Option<Slug>,
    pub content: Option<PostContent>,
    pub cover_image_url: Option<CoverImageUrl>,
    pub tags: Option<Tags>,
    pub is_draft: Option<bool>,
    pub generated_by_ai: Option<bool>,
}

impl TryFrom<UpdatePostPayload> for PostChanges {
    type Error = String;

    fn try_from(payload: UpdatePostPayload) -> Result<Self, Self::Error> {
        let title = payload.title.map(PostTitle::parse).transpose()?;
        let slug = title.as_ref().map(Slug::from_title).transpose()?;

        Ok(Self {
            title,
            slug,
            content: payload.content.map(PostContent::parse).transpose()?,
            cover_image_url: CoverImageUrl::parse_optional(payload.cover_image_url)?,
            tags: payload.tags.map(Tags::parse).transpose()?,
            is_draft: payload.is_draft,
            generated_by_ai: payload.generated_by_ai,
        })
    }
}

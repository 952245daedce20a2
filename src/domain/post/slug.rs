use crate::domain::PostTitle;

/// URL key of a post, derived from its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slug(String);

impl Slug {
    /// Lowercases the title, turns spaces into `-` and drops anything that is
    /// not an ASCII letter, digit, `_` or `-`.
    pub fn from_title(title: &PostTitle) -> Result<Self, String> {
        let slug: String = title
            .as_ref()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' { '-' } else { c })
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();

        if slug.chars().all(|c| c == '-') {
            return Err("Invalid title: needs at least one letter or digit.".to_string());
        }

        Ok(Self(slug))
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Markdown body of a post.
#[derive(Debug, Clone)]
pub struct PostContent(String);

impl PostContent {
    pub fn parse(s: String) -> Result<Self, String> {
        if s.trim().is_empty() {
            return Err("Invalid content: cannot be empty.".to_string());
        }

        // Leading indentation is significant in markdown, only trim the tail
        Ok(Self(s.trim_end().to_string()))
    }
}

impl AsRef<str> for PostContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

use unicode_segmentation::UnicodeSegmentation;

const MAX_GRAPHEMES: usize = 1000;

#[derive(Debug, Clone)]
pub struct CommentContent(String);

impl CommentContent {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Invalid comment: cannot be empty.".to_string());
        }

        if trimmed.graphemes(true).count() > MAX_GRAPHEMES {
            return Err(format!(
                "Invalid comment: cannot exceed {MAX_GRAPHEMES} characters."
            ));
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for CommentContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommentContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

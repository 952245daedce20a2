use std::fmt;
use std::fmt::{Display, Formatter};
use unicode_segmentation::UnicodeSegmentation;

const MAX_GRAPHEMES: usize = 150;

#[derive(Debug, Clone)]
pub struct PostTitle(String);

impl PostTitle {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Invalid title: cannot be empty.".to_string());
        }

        if trimmed.graphemes(true).count() > MAX_GRAPHEMES {
            return Err(format!(
                "Invalid title: cannot be longer than {MAX_GRAPHEMES} characters."
            ));
        }

        // A digits-only title would also yield a digits-only slug
        let has_non_numeric = trimmed
            .chars()
            .any(|c| !c.is_numeric() && !c.is_whitespace());
        if !has_non_numeric {
            return Err("Invalid title: cannot contain only numbers.".to_string());
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for PostTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PostTitle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

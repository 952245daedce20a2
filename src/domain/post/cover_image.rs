#[derive(Debug, Clone)]
pub struct CoverImageUrl(String);

impl CoverImageUrl {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Invalid cover image URL: cannot be empty.".to_string());
        }

        if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
            return Err("Invalid cover image URL: must be an HTTP or HTTPS URL.".to_string());
        }

        if trimmed.len() > 2048 {
            return Err(
                "Invalid cover image URL: cannot be longer than 2048 characters.".to_string(),
            );
        }

        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err("Invalid cover image URL: contains forbidden characters.".to_string());
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Absent and blank URLs both mean "no cover image".
    pub fn parse_optional(s: Option<String>) -> Result<Option<Self>, String> {
        match s {
            Some(url) if !url.trim().is_empty() => Self::parse(url).map(Some),
            _ => Ok(None),
        }
    }
}

impl AsRef<str> for CoverImageUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

use unicode_segmentation::UnicodeSegmentation;

const MAX_TAGS: usize = 10;
const MAX_TAG_GRAPHEMES: usize = 30;

/// Lowercased, de-duplicated tags in the order they were given.
#[derive(Debug, Clone, Default)]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn parse(raw: Vec<String>) -> Result<Self, String> {
        let mut tags: Vec<String> = Vec::with_capacity(raw.len());

        for tag in raw {
            let tag = tag.trim().to_lowercase();

            if tag.is_empty() {
                return Err("Invalid tag: cannot be empty.".to_string());
            }
            if tag.graphemes(true).count() > MAX_TAG_GRAPHEMES {
                return Err(format!(
                    "Invalid tag: cannot be longer than {MAX_TAG_GRAPHEMES} characters."
                ));
            }
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        if tags.len() > MAX_TAGS {
            return Err(format!("Invalid tags: at most {MAX_TAGS} tags are allowed."));
        }

        Ok(Self(tags))
    }
}

impl AsRef<[String]> for Tags {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

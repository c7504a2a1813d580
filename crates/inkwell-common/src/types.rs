//! Core types for Inkwell
//!
//! A post is identified by its title, which doubles as the storage key and
//! as a path segment in URLs, so titles are validated once at the edge and
//! carried around as [`PostTitle`].

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum title length, in characters
pub const MAX_TITLE_CHARS: usize = 100;

/// Maximum content length, in characters
pub const MAX_CONTENT_CHARS: usize = 10_240;

/// Titles that collide with fixed routes and could never be viewed
pub const RESERVED_TITLES: &[&str] = &["new", "search", "edit", "delete", "health"];

/// Post title (unique storage key)
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(try_from = "String", into = "String")]
#[display("{_0}")]
pub struct PostTitle(String);

impl PostTitle {
    /// Create a new post title, trimming surrounding whitespace
    pub fn new(title: impl AsRef<str>) -> Result<Self, TitleError> {
        let title = title.as_ref().trim();
        Self::validate(title)?;
        Ok(Self(title.to_string()))
    }

    /// Get the title as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(title: &str) -> Result<(), TitleError> {
        if title.is_empty() {
            return Err(TitleError::Empty);
        }

        let len = title.chars().count();
        if len > MAX_TITLE_CHARS {
            return Err(TitleError::TooLong { len });
        }

        if let Some(c) = title
            .chars()
            .find(|c| *c == '/' || *c == '\\' || c.is_control())
        {
            return Err(TitleError::InvalidChar(c));
        }

        if title == "." || title == ".." {
            return Err(TitleError::DotSegment);
        }

        if RESERVED_TITLES.contains(&title) {
            return Err(TitleError::Reserved(title.to_string()));
        }

        Ok(())
    }
}

impl fmt::Debug for PostTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PostTitle({:?})", self.0)
    }
}

impl AsRef<str> for PostTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PostTitle {
    type Error = TitleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PostTitle> for String {
    fn from(title: PostTitle) -> Self {
        title.0
    }
}

/// Errors that can occur when creating a post title
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TitleError {
    #[error("title is required")]
    Empty,
    #[error("title must be at most {} characters (it has {len})", MAX_TITLE_CHARS)]
    TooLong { len: usize },
    #[error("title contains invalid character: {0:?}")]
    InvalidChar(char),
    #[error("title cannot be '.' or '..'")]
    DotSegment,
    #[error("title '{0}' is reserved")]
    Reserved(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_titles() {
        assert!(PostTitle::new("Intro").is_ok());
        assert!(PostTitle::new("Rust & Markdown: notes").is_ok());
        assert!(PostTitle::new("Ünïcödé title").is_ok());
        assert!(PostTitle::new("a".repeat(MAX_TITLE_CHARS)).is_ok());
        assert!(PostTitle::new("newsletter").is_ok());
        assert!(PostTitle::new(".plan").is_ok());
    }

    #[test]
    fn test_title_is_trimmed() {
        let title = PostTitle::new("  Intro \n").unwrap();
        assert_eq!(title.as_str(), "Intro");
    }

    #[test]
    fn test_invalid_titles() {
        assert_eq!(PostTitle::new(""), Err(TitleError::Empty));
        assert_eq!(PostTitle::new("   "), Err(TitleError::Empty));
        assert_eq!(
            PostTitle::new("a".repeat(MAX_TITLE_CHARS + 1)),
            Err(TitleError::TooLong {
                len: MAX_TITLE_CHARS + 1
            })
        );
        assert_eq!(PostTitle::new("a/b"), Err(TitleError::InvalidChar('/')));
        assert_eq!(PostTitle::new("a\\b"), Err(TitleError::InvalidChar('\\')));
        assert_eq!(PostTitle::new("a\tb"), Err(TitleError::InvalidChar('\t')));
        assert_eq!(PostTitle::new(".."), Err(TitleError::DotSegment));
        assert!(matches!(
            PostTitle::new("search"),
            Err(TitleError::Reserved(_))
        ));
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // 100 two-byte characters are still within the limit
        assert!(PostTitle::new("é".repeat(MAX_TITLE_CHARS)).is_ok());
    }

    #[test]
    fn test_serde_validates() {
        let title: PostTitle = serde_json::from_str("\"Intro\"").unwrap();
        assert_eq!(title.to_string(), "Intro");
        assert!(serde_json::from_str::<PostTitle>("\"../etc\"").is_err());
    }
}

//! Form data and validation.
//!
//! Each form deserializes leniently (missing fields become empty strings)
//! and is then checked by a typed `validate` that yields either cleaned
//! values or the list of offending fields.

use inkwell_common::{MAX_CONTENT_CHARS, PostTitle};
use serde::Deserialize;

/// A constraint violation on one form field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Submitted "new post" form
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewPostForm {
    pub title: String,
    pub content: String,
}

/// Cleaned "new post" values
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPost {
    pub title: PostTitle,
    pub content: String,
}

impl NewPostForm {
    pub fn validate(&self) -> Result<NewPost, Vec<FieldError>> {
        let title = PostTitle::new(&self.title).map_err(|e| FieldError::new("title", e.to_string()));
        let content = clean_content(&self.content);

        match (title, content) {
            (Ok(title), Ok(content)) => Ok(NewPost { title, content }),
            (title, content) => Err(title.err().into_iter().chain(content.err()).collect()),
        }
    }
}

/// Submitted "edit post" form
///
/// `title` is echoed back from a hidden field for display only; the storage
/// key always comes from the route.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EditPostForm {
    pub title: String,
    pub content: String,
}

impl EditPostForm {
    /// Returns the cleaned content
    pub fn validate(&self) -> Result<String, Vec<FieldError>> {
        clean_content(&self.content).map_err(|e| vec![e])
    }
}

/// Submitted delete confirmation
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeletePostForm {
    pub title: String,
}

impl DeletePostForm {
    /// The confirmation must name the post being deleted
    pub fn validate(&self, expected: &PostTitle) -> Result<(), Vec<FieldError>> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(vec![FieldError::new("title", "This field is required.")]);
        }
        if title != expected.as_str() {
            return Err(vec![FieldError::new(
                "title",
                format!("Confirmation does not match '{expected}'."),
            )]);
        }
        Ok(())
    }
}

fn clean_content(raw: &str) -> Result<String, FieldError> {
    let content = raw.trim();
    if content.is_empty() {
        return Err(FieldError::new("content", "This field is required."));
    }
    let len = content.chars().count();
    if len > MAX_CONTENT_CHARS {
        return Err(FieldError::new(
            "content",
            format!("Ensure this value has at most {MAX_CONTENT_CHARS} characters (it has {len})."),
        ));
    }
    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_form(title: &str, content: &str) -> NewPostForm {
        NewPostForm {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_new_post_valid() {
        let post = new_form(" Intro ", "# Hi\n").validate().unwrap();
        assert_eq!(post.title.as_str(), "Intro");
        assert_eq!(post.content, "# Hi");
    }

    #[test]
    fn test_new_post_reports_every_field() {
        let errors = new_form("", "").validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "content"]);
    }

    #[test]
    fn test_new_post_limits() {
        let long_title = "t".repeat(101);
        let errors = new_form(&long_title, "ok").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");

        let long_content = "c".repeat(MAX_CONTENT_CHARS + 1);
        let errors = new_form("ok", &long_content).validate().unwrap_err();
        assert_eq!(errors[0].field, "content");
        assert!(errors[0].message.contains("10240"));

        let max_content = "c".repeat(MAX_CONTENT_CHARS);
        assert!(new_form("ok", &max_content).validate().is_ok());
    }

    #[test]
    fn test_edit_ignores_title() {
        let form = EditPostForm {
            title: "something else".to_string(),
            content: "Bye".to_string(),
        };
        assert_eq!(form.validate().unwrap(), "Bye");
    }

    #[test]
    fn test_edit_requires_content() {
        let form = EditPostForm {
            title: "Intro".to_string(),
            content: "  \n".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors[0].field, "content");
    }

    #[test]
    fn test_delete_confirmation() {
        let expected = PostTitle::new("Intro").unwrap();
        let form = |t: &str| DeletePostForm {
            title: t.to_string(),
        };

        assert!(form("Intro").validate(&expected).is_ok());
        assert!(form("").validate(&expected).is_err());
        assert!(form("Other").validate(&expected).is_err());
    }
}

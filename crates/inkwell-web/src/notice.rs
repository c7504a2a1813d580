//! One-shot status messages shown at the top of a page.
//!
//! Handlers hand notices to the page renderer explicitly. When a notice has
//! to survive a redirect it travels as a [`NoticeCode`] in the `notice`
//! query parameter of the redirect target.

use serde::Deserialize;
use std::borrow::Cow;
use std::str::FromStr;

/// Severity of a notice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

impl NoticeLevel {
    /// CSS class used by the page layout
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Info => "notice notice-info",
            Self::Error => "notice notice-error",
        }
    }
}

/// A user-visible status message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: Cow<'static, str>,
}

impl Notice {
    pub fn info(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Notices that can be carried across a redirect
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeCode {
    PostSaved,
    PostDeleted,
}

impl NoticeCode {
    /// Value used in the `notice` query parameter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostSaved => "post-saved",
            Self::PostDeleted => "post-deleted",
        }
    }

    #[must_use]
    pub fn to_notice(self) -> Notice {
        match self {
            Self::PostSaved => Notice::info("Post saved"),
            Self::PostDeleted => Notice::info("Deleted post"),
        }
    }

    /// Append this code to a redirect target
    #[must_use]
    pub fn attach(self, location: &str) -> String {
        let sep = if location.contains('?') { '&' } else { '?' };
        format!("{location}{sep}notice={}", self.as_str())
    }
}

impl FromStr for NoticeCode {
    type Err = UnknownNoticeCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post-saved" => Ok(Self::PostSaved),
            "post-deleted" => Ok(Self::PostDeleted),
            _ => Err(UnknownNoticeCode),
        }
    }
}

#[derive(Debug)]
pub struct UnknownNoticeCode;

/// Query parameters for pages that may show a carried notice
#[derive(Debug, Default, Deserialize)]
pub struct NoticeParams {
    #[serde(default, deserialize_with = "lenient_code")]
    pub notice: Option<NoticeCode>,
}

impl NoticeParams {
    /// The carried notice, if any, as a list ready for rendering
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notice.map(NoticeCode::to_notice).into_iter().collect()
    }
}

/// Unknown codes are dropped instead of failing the whole request.
fn lenient_code<'de, D>(deserializer: D) -> Result<Option<NoticeCode>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

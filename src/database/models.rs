/*!
 * Record types for authors and posts.
 *
 * `AuthorRecord` and `PostRecord` map directly to database rows.
 * `NewAuthor` and `NewPost` are values that have already passed every
 * field rule and are ready to be written.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{ModelError, ValidationError};
use crate::validation::{AuthorLookup, AuthorValidator, PostValidator};

/// Post category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostCategory {
    /// Fiction
    #[serde(rename = "Fiction")]
    Fiction,
    /// Non-Fiction
    #[serde(rename = "Non-Fiction")]
    NonFiction,
}

impl PostCategory {
    /// Stored and displayed form
    pub fn as_str(&self) -> &'static str {
        match self {
            PostCategory::Fiction => "Fiction",
            PostCategory::NonFiction => "Non-Fiction",
        }
    }
}

impl fmt::Display for PostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Exact, case-sensitive match; no trimming.
impl std::str::FromStr for PostCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fiction" => Ok(PostCategory::Fiction),
            "Non-Fiction" => Ok(PostCategory::NonFiction),
            _ => Err(ValidationError::InvalidCategory),
        }
    }
}

/// Persisted author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    /// Database ID
    pub id: i64,
    /// Unique author name
    pub name: String,
    /// Phone number as entered, formatting preserved
    pub phone_number: Option<String>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}

impl fmt::Display for AuthorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Author(id={}, name={})", self.id, self.name)
    }
}

/// Persisted post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Database ID
    pub id: i64,
    /// Title containing at least one required phrase
    pub title: String,
    /// Body text
    pub content: String,
    /// Optional short summary
    pub summary: Option<String>,
    /// Category
    pub category: PostCategory,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}

impl fmt::Display for PostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Post(id={}, title={}, category={})",
            self.id, self.title, self.category
        )
    }
}

/// An author that passed validation but has not been written yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub name: String,
    pub phone_number: Option<String>,
}

impl NewAuthor {
    /// Run the name rule, then the phone rule, against a store lookup.
    ///
    /// The new author has no identity yet, so any existing author with the
    /// same name is a conflict.
    pub fn validated<L: AuthorLookup + ?Sized>(
        name: Option<&str>,
        phone_number: Option<&str>,
        validator: &AuthorValidator<'_, L>,
    ) -> Result<Self, ModelError> {
        let name = validator.validate_name(name, None)?;
        let phone_number = validator.validate_phone_number(phone_number)?;

        Ok(Self {
            name: name.to_string(),
            phone_number: phone_number.map(str::to_string),
        })
    }
}

/// Raw post fields as supplied by a caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub category: Option<String>,
}

impl PostDraft {
    /// Draft with every required field present
    pub fn new(title: &str, content: &str, category: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            summary: None,
            category: Some(category.to_string()),
        }
    }

    /// Attach a summary
    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }
}

/// A post that passed validation but has not been written yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub category: PostCategory,
}

impl NewPost {
    /// Run title, content, category and summary rules in that order.
    /// The first failure is returned; later fields are not checked.
    pub fn validated(draft: &PostDraft, validator: &PostValidator) -> Result<Self, ValidationError> {
        let title = validator.validate_title(draft.title.as_deref())?;
        let content = validator.validate_content(draft.content.as_deref())?;
        let category = validator.validate_category(draft.category.as_deref())?;
        let summary = validator.validate_summary(draft.summary.as_deref())?;

        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
            summary: summary.map(str::to_string),
            category,
        })
    }
}

/// Field changes for an existing author.
///
/// `phone_number: Some(None)` clears the phone number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorChanges {
    pub name: Option<String>,
    pub phone_number: Option<Option<String>>,
}

impl AuthorChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone_number.is_none()
    }
}

/// Field changes for an existing post.
///
/// `summary: Some(None)` clears the summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<Option<String>>,
    pub category: Option<String>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.summary.is_none()
            && self.category.is_none()
    }
}

/// Current time in the stored timestamp format
pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/*!
 * Error types for the scribe library.
 *
 * `ValidationError` is the single kind produced by a failed field rule.
 * `ModelError` wraps it for operations that also touch the store.
 */

use thiserror::Error;

/// A field rule rejected a candidate value.
///
/// The `Display` text of each variant is the exact message callers may
/// match on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Author name was empty or absent
    #[error("Author must have a name")]
    MissingName,

    /// Another author already uses this name
    #[error("Author name must be unique")]
    DuplicateName,

    /// Phone number does not contain exactly 10 digits
    #[error("Phone number must be exactly 10 digits")]
    InvalidPhoneNumber,

    /// Post content absent or under the minimum length
    #[error("Post content must be at least 250 characters long")]
    ContentTooShort,

    /// Post summary over the maximum length
    #[error("Post summary must be a maximum of 250 characters")]
    SummaryTooLong,

    /// Category outside the Fiction / Non-Fiction pair
    #[error("Post category must be either Fiction or Non-Fiction")]
    InvalidCategory,

    /// Title contains none of the required phrases
    #[error("Post title must contain one of the following: {phrases}")]
    TitleMissingPhrase {
        /// Required phrases, quoted and comma separated
        phrases: String,
    },
}

impl ValidationError {
    /// Name of the field whose rule failed
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingName | Self::DuplicateName => "name",
            Self::InvalidPhoneNumber => "phone_number",
            Self::ContentTooShort => "content",
            Self::SummaryTooLong => "summary",
            Self::InvalidCategory => "category",
            Self::TitleMissingPhrase { .. } => "title",
        }
    }
}

/// Errors from store-backed operations
#[derive(Error, Debug)]
pub enum ModelError {
    /// A field rule rejected the write
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record with the given id
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Record type, e.g. "Author"
        entity: &'static str,
        /// Requested id
        id: i64,
    },

    /// SQLite reported an error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Connection or lookup failure outside SQLite itself
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ModelError {
    /// The validation failure, if that is what this error is
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for ModelError {
    fn from(error: anyhow::Error) -> Self {
        Self::Storage(format!("{:#}", error))
    }
}

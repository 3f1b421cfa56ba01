/*!
 * Post field rules.
 *
 * The title rule is a plain substring filter over a configurable phrase
 * list. It does not try to judge what a title means.
 */

use serde::{Deserialize, Serialize};

use crate::database::models::PostCategory;
use crate::errors::ValidationError;

/// Minimum post content length, in characters
pub const MIN_CONTENT_CHARS: usize = 250;

/// Maximum post summary length, in characters
pub const MAX_SUMMARY_CHARS: usize = 250;

/// Configurable part of the post rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRules {
    /// A title must contain at least one of these, case-sensitively
    #[serde(default = "default_title_phrases")]
    pub title_phrases: Vec<String>,
}

impl Default for PostRules {
    fn default() -> Self {
        Self {
            title_phrases: default_title_phrases(),
        }
    }
}

fn default_title_phrases() -> Vec<String> {
    ["Won't Believe", "Secret", "Top", "Guess"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

/// Validator for post fields
#[derive(Debug, Clone, Default)]
pub struct PostValidator {
    rules: PostRules,
}

impl PostValidator {
    /// Create a validator with the given rules
    pub fn new(rules: PostRules) -> Self {
        Self { rules }
    }

    /// Content must be present and at least `MIN_CONTENT_CHARS` long
    pub fn validate_content<'c>(&self, candidate: Option<&'c str>) -> Result<&'c str, ValidationError> {
        match candidate {
            Some(content) if content.chars().count() >= MIN_CONTENT_CHARS => Ok(content),
            _ => Err(ValidationError::ContentTooShort),
        }
    }

    /// Summary is optional, but no longer than `MAX_SUMMARY_CHARS`
    pub fn validate_summary<'c>(
        &self,
        candidate: Option<&'c str>,
    ) -> Result<Option<&'c str>, ValidationError> {
        match candidate {
            Some(summary) if summary.chars().count() > MAX_SUMMARY_CHARS => {
                Err(ValidationError::SummaryTooLong)
            }
            other => Ok(other),
        }
    }

    /// Category must be exactly "Fiction" or "Non-Fiction"
    pub fn validate_category(&self, candidate: Option<&str>) -> Result<PostCategory, ValidationError> {
        candidate
            .ok_or(ValidationError::InvalidCategory)?
            .parse()
    }

    /// Title must contain at least one configured phrase
    pub fn validate_title<'c>(&self, candidate: Option<&'c str>) -> Result<&'c str, ValidationError> {
        match candidate {
            Some(title)
                if self
                    .rules
                    .title_phrases
                    .iter()
                    .any(|phrase| title.contains(phrase.as_str())) =>
            {
                Ok(title)
            }
            _ => Err(ValidationError::TitleMissingPhrase {
                phrases: self.quoted_phrases(),
            }),
        }
    }

    fn quoted_phrases(&self) -> String {
        self.rules
            .title_phrases
            .iter()
            .map(|p| format!("'{}'", p))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

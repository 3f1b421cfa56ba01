/*!
 * Author field rules.
 *
 * The uniqueness check is a read followed by a decision, so two concurrent
 * writers can both pass it. The `UNIQUE` index on `authors.name` is what
 * actually guarantees uniqueness; this check exists to report the conflict
 * with a readable message before the insert is attempted.
 */

use anyhow::Result;
use log::debug;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

use crate::database::models::AuthorRecord;
use crate::errors::{ModelError, ValidationError};

/// Number of digits a phone number must contain
pub const PHONE_DIGITS: usize = 10;

/// Read access to persisted authors, as needed by the name rule
pub trait AuthorLookup {
    /// Find the author whose name matches exactly (case-sensitive)
    fn find_author_by_name(&self, name: &str) -> Result<Option<AuthorRecord>>;
}

/// Validator for author fields, backed by a store lookup
pub struct AuthorValidator<'a, L: AuthorLookup + ?Sized> {
    lookup: &'a L,
}

impl<'a, L: AuthorLookup + ?Sized> AuthorValidator<'a, L> {
    /// Create a validator that checks names against `lookup`
    pub fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }

    /// Check that a name is present and not used by a different author.
    ///
    /// `identity` is the id of the author being validated, or `None` for an
    /// author that has not been stored yet. An author keeping its own name
    /// passes. Lookup failures propagate as store errors.
    pub fn validate_name<'c>(
        &self,
        candidate: Option<&'c str>,
        identity: Option<i64>,
    ) -> Result<&'c str, ModelError> {
        let name = match candidate {
            Some(name) if !name.is_empty() => name,
            _ => return Err(ValidationError::MissingName.into()),
        };

        if let Some(existing) = self.lookup.find_author_by_name(name)? {
            if Some(existing.id) != identity {
                debug!("Name '{}' already taken by author {}", name, existing.id);
                return Err(ValidationError::DuplicateName.into());
            }
        }

        Ok(name)
    }

    /// See [`validate_phone_number`]
    pub fn validate_phone_number<'c>(
        &self,
        candidate: Option<&'c str>,
    ) -> Result<Option<&'c str>, ValidationError> {
        validate_phone_number(candidate)
    }
}

/// Check that a phone number, if given, has exactly ten digits.
///
/// A digit is any Unicode decimal digit (general category `Nd`), so
/// fullwidth and Arabic-Indic digits count. Other characters are ignored for
/// counting and kept in the returned value. An absent or empty number passes
/// unchanged.
pub fn validate_phone_number(candidate: Option<&str>) -> Result<Option<&str>, ValidationError> {
    match candidate {
        Some(phone) if !phone.is_empty() => {
            let digits = phone.chars().filter(|c| is_decimal_digit(*c)).count();
            if digits != PHONE_DIGITS {
                return Err(ValidationError::InvalidPhoneNumber);
            }
            Ok(Some(phone))
        }
        other => Ok(other),
    }
}

fn is_decimal_digit(c: char) -> bool {
    c.general_category() == GeneralCategory::DecimalNumber
}

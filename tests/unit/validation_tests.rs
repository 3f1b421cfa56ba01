/*!
 * Tests for the field rules through the public API
 */

use scribe::database::{AuthorRecord, NewAuthor, NewPost, PostCategory, PostDraft};
use scribe::validation::{AuthorLookup, AuthorValidator, PostValidator, validate_phone_number};
use scribe::ValidationError;

use crate::common;

/// Fixed set of stored authors
struct StoredAuthors(Vec<(i64, &'static str)>);

impl AuthorLookup for StoredAuthors {
    fn find_author_by_name(&self, name: &str) -> anyhow::Result<Option<AuthorRecord>> {
        Ok(self
            .0
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(id, n)| AuthorRecord {
                id: *id,
                name: n.to_string(),
                phone_number: None,
                created_at: String::new(),
                updated_at: String::new(),
            }))
    }
}

#[test]
fn test_validateName_identityExclusion_shouldOnlyAllowSameAuthor() {
    let store = StoredAuthors(vec![(1, "Jane Doe"), (2, "John Roe")]);
    let validator = AuthorValidator::new(&store);

    assert!(validator.validate_name(Some("Jane Doe"), Some(1)).is_ok());
    assert!(validator.validate_name(Some("Jane Doe"), Some(2)).is_err());
    assert!(validator.validate_name(Some("Jane Doe"), None).is_err());
    assert!(validator.validate_name(Some("Janet Doe"), None).is_ok());
}

#[test]
fn test_validateName_withWhitespaceOnlyName_shouldPass() {
    // Only an empty name counts as missing
    let store = StoredAuthors(vec![]);
    let validator = AuthorValidator::new(&store);

    assert_eq!(validator.validate_name(Some(" "), None).unwrap(), " ");
}

#[test]
fn test_validatePhoneNumber_shouldCountUnicodeDecimalDigits() {
    assert!(validate_phone_number(Some("555 123 4567 ext")).is_ok());
    assert!(validate_phone_number(Some("٥٥٥١٢٣٤٥٦٧")).is_ok());
    assert!(validate_phone_number(Some("５５５１２３４５６７")).is_ok());
    assert!(validate_phone_number(Some("٥٥٥١٢٣٤٥٦")).is_err());
}

#[test]
fn test_newAuthor_validated_withMissingName_shouldReportName() {
    let store = StoredAuthors(vec![]);
    let validator = AuthorValidator::new(&store);

    let err = NewAuthor::validated(None, Some("5551234567"), &validator).unwrap_err();

    assert_eq!(err.as_validation(), Some(&ValidationError::MissingName));
}

#[test]
fn test_postValidator_publicExamples_shouldHold() {
    let validator = PostValidator::default();

    assert!(validator.validate_title(Some("The Top 10 Secrets")).is_ok());
    assert!(validator.validate_title(Some("A Normal Day")).is_err());
    assert_eq!(validator.validate_category(Some("Fiction")).unwrap(), PostCategory::Fiction);
    assert!(validator.validate_category(Some("fiction")).is_err());
}

#[test]
fn test_newPost_validated_withEachBadField_shouldReportThatField() {
    let validator = PostValidator::default();
    let good = PostDraft::new("Guess What", &common::valid_content(), "Fiction");

    let cases = [
        (PostDraft { title: Some("Plain".into()), ..good.clone() }, "title"),
        (PostDraft { content: Some("short".into()), ..good.clone() }, "content"),
        (PostDraft { content: None, ..good.clone() }, "content"),
        (PostDraft { category: Some("Memoir".into()), ..good.clone() }, "category"),
        (PostDraft { summary: Some("x".repeat(300)), ..good.clone() }, "summary"),
    ];

    for (draft, field) in cases {
        let err = NewPost::validated(&draft, &validator).unwrap_err();
        assert_eq!(err.field(), field);
    }

    assert!(NewPost::validated(&good, &validator).is_ok());
}

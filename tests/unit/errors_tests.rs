/*!
 * Tests for error types and conversions
 */

use scribe::errors::{ModelError, ValidationError};

#[test]
fn test_validationError_messages_shouldMatchCallerContract() {
    let cases = [
        (ValidationError::MissingName, "Author must have a name"),
        (ValidationError::DuplicateName, "Author name must be unique"),
        (ValidationError::InvalidPhoneNumber, "Phone number must be exactly 10 digits"),
        (
            ValidationError::ContentTooShort,
            "Post content must be at least 250 characters long",
        ),
        (
            ValidationError::SummaryTooLong,
            "Post summary must be a maximum of 250 characters",
        ),
        (
            ValidationError::InvalidCategory,
            "Post category must be either Fiction or Non-Fiction",
        ),
    ];

    for (error, message) in cases {
        assert_eq!(error.to_string(), message);
    }
}

#[test]
fn test_modelError_notFound_shouldDisplayEntityAndId() {
    let error = ModelError::NotFound { entity: "Post", id: 7 };
    assert_eq!(error.to_string(), "Post with id 7 not found");
}

#[test]
fn test_modelError_intoAnyhow_shouldDowncastBack() {
    let error: anyhow::Error = ModelError::from(ValidationError::DuplicateName).into();

    let model_error = error.downcast_ref::<ModelError>().expect("ModelError");
    assert_eq!(model_error.as_validation(), Some(&ValidationError::DuplicateName));
}

/*!
 * End-to-end tests for author and post workflows against an on-disk database
 */

use scribe::database::{DatabaseConnection, PostCategory, PostChanges, PostDraft, Repository};
use scribe::{ModelError, ValidationError};

use crate::common;

#[test]
fn test_createAuthor_twiceWithSameName_shouldRejectSecond() {
    let dir = common::create_temp_dir().unwrap();
    let repo = common::create_file_repository(&dir).unwrap();

    let jane = repo
        .create_author("Jane Doe", Some("555-123-4567"))
        .expect("first author should be accepted");
    assert_eq!(jane.phone_number.as_deref(), Some("555-123-4567"));

    let err = repo.create_author("Jane Doe", None).unwrap_err();
    assert_eq!(err.to_string(), "Author name must be unique");
    assert_eq!(repo.list_authors().unwrap(), vec![jane]);
}

#[test]
fn test_records_shouldSurviveReopen() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::database_path(&dir);

    let (author, post) = {
        let repo = common::create_file_repository(&dir).unwrap();
        let author = repo.create_author("Jane Doe", None).unwrap();
        let post = repo
            .create_post(
                &PostDraft::new("You Won't Believe It", &common::valid_content(), "Fiction")
                    .with_summary("A story"),
            )
            .unwrap();
        (author, post)
    };

    let repo = Repository::new(DatabaseConnection::new(&path).unwrap());

    assert_eq!(repo.get_author(author.id).unwrap(), Some(author));
    assert_eq!(repo.get_post(post.id).unwrap(), Some(post));
    assert!(repo.create_author("Jane Doe", None).is_err(), "index must survive reopen");

    let stats = repo.connection().stats().unwrap();
    assert_eq!(stats.author_count, 1);
    assert_eq!(stats.post_count, 1);
    assert!(stats.file_size_bytes > 0);
}

#[test]
fn test_concurrentHandles_shouldStillRejectDuplicateName() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::database_path(&dir);
    let first = common::create_file_repository(&dir).unwrap();
    let second = Repository::new(DatabaseConnection::new(&path).unwrap());

    first.create_author("Jane Doe", None).unwrap();
    let err = second.create_author("Jane Doe", None).unwrap_err();

    assert!(matches!(
        err,
        ModelError::Validation(ValidationError::DuplicateName)
    ));
}

#[test]
fn test_renameAuthor_shouldRefreshUpdatedAt() {
    let dir = common::create_temp_dir().unwrap();
    let repo = common::create_file_repository(&dir).unwrap();
    let author = repo.create_author("Jane Doe", None).unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));
    let renamed = repo.set_author_name(author.id, "Jane Smith").unwrap();

    assert_eq!(renamed.created_at, author.created_at);
    assert_ne!(renamed.updated_at, author.updated_at);
    assert!(repo.find_author_by_name("Jane Doe").unwrap().is_none());
    assert!(repo.create_author("Jane Doe", None).is_ok(), "old name is free again");
}

#[test]
fn test_updatePost_withMultipleFields_shouldApplyAll() {
    let dir = common::create_temp_dir().unwrap();
    let repo = common::create_file_repository(&dir).unwrap();
    let post = repo
        .create_post(&PostDraft::new("Top Stories", &common::valid_content(), "Fiction"))
        .unwrap();

    let changes = PostChanges {
        title: Some("Secret Stories".to_string()),
        category: Some("Non-Fiction".to_string()),
        summary: Some(Some("Now true".to_string())),
        ..Default::default()
    };
    let updated = repo.update_post(post.id, &changes).unwrap();

    assert_eq!(updated.title, "Secret Stories");
    assert_eq!(updated.category, PostCategory::NonFiction);
    assert_eq!(updated.summary.as_deref(), Some("Now true"));
    assert_eq!(updated.content, post.content);
    assert_eq!(repo.get_post(post.id).unwrap(), Some(updated));
}

#[test]
fn test_deletePost_withUnknownId_shouldReturnFalse() {
    let dir = common::create_temp_dir().unwrap();
    let repo = common::create_file_repository(&dir).unwrap();

    assert!(!repo.delete_post(99).unwrap());
    assert!(matches!(
        repo.set_post_title(99, "Top"),
        Err(ModelError::NotFound { entity: "Post", id: 99 })
    ));
}

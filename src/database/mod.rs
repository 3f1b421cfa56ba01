/*!
 * Database module for persistent storage of authors and posts.
 *
 * This module provides SQLite-based persistence for:
 * - Authors, with a unique index on the name
 * - Posts
 *
 * All writes go through `Repository`, which validates before writing.
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use models::{
    AuthorChanges, AuthorRecord, NewAuthor, NewPost, PostCategory, PostChanges, PostDraft,
    PostRecord,
};
pub use repository::Repository;

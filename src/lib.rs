/*!
 * # scribe - validated authors and posts
 *
 * A Rust library for storing blog authors and posts in SQLite, with every
 * write checked against a fixed set of field rules.
 *
 * ## Features
 *
 * - Author names are required and unique (checked before the write and
 *   enforced by a unique index)
 * - Phone numbers must contain exactly ten digits, formatting preserved
 * - Post content of at least 250 characters, summaries of at most 250
 * - Post categories limited to Fiction and Non-Fiction
 * - Post titles must contain one of a configurable list of phrases
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `validation`: Field rules:
 *   - `validation::author`: Name and phone number rules, `AuthorLookup`
 *   - `validation::post`: Content, summary, category and title rules
 * - `database`: SQLite persistence:
 *   - `database::connection`: Connection handling and transactions
 *   - `database::schema`: Table definitions and schema versioning
 *   - `database::models`: Record types
 *   - `database::repository`: Validated create, read, update, delete
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod database;
pub mod errors;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use database::{
    AuthorChanges, AuthorRecord, DatabaseConnection, PostCategory, PostChanges, PostDraft,
    PostRecord, Repository,
};
pub use errors::{ModelError, ValidationError};
pub use validation::{AuthorLookup, AuthorValidator, PostRules, PostValidator};

/*!
 * Repository layer for database operations.
 *
 * This module provides the write and read API for authors and posts.
 * Every create or update runs the field rules first, inside the same
 * transaction as the write, so a rejected value leaves the stored record
 * untouched.
 */

use log::{debug, info, warn};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::connection::DatabaseConnection;
use super::models::{
    AuthorChanges, AuthorRecord, NewAuthor, NewPost, PostCategory, PostChanges, PostDraft,
    PostRecord, now_timestamp,
};
use crate::errors::{ModelError, ValidationError};
use crate::validation::{AuthorLookup, AuthorValidator, PostRules, PostValidator};

const AUTHOR_COLUMNS: &str = "id, name, phone_number, created_at, updated_at";
const POST_COLUMNS: &str = "id, title, content, summary, category, created_at, updated_at";

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
    /// Rules applied to post writes
    post_validator: PostValidator,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            post_validator: PostValidator::default(),
        }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> anyhow::Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> anyhow::Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Replace the post rules
    pub fn with_post_rules(mut self, rules: PostRules) -> Self {
        self.post_validator = PostValidator::new(rules);
        self
    }

    /// Underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // =========================================================================
    // Author Operations
    // =========================================================================

    /// Validate and insert a new author
    pub fn create_author(
        &self,
        name: &str,
        phone_number: Option<&str>,
    ) -> Result<AuthorRecord, ModelError> {
        let result = self.db.transaction(|tx| -> Result<AuthorRecord, ModelError> {
            let validator = AuthorValidator::new(&**tx);
            let author = NewAuthor::validated(Some(name), phone_number, &validator)?;
            Self::insert_author_sync(tx, &author)
        });

        match &result {
            Ok(author) => info!("Created {}", author),
            Err(e) => warn!("Rejected author '{}': {}", name, e),
        }
        result
    }

    fn insert_author_sync(conn: &Connection, author: &NewAuthor) -> Result<AuthorRecord, ModelError> {
        let now = now_timestamp();

        conn.execute(
            "INSERT INTO authors (name, phone_number, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
            params![author.name, author.phone_number, now, now],
        )
        .map_err(map_unique_violation)?;

        Ok(AuthorRecord {
            id: conn.last_insert_rowid(),
            name: author.name.clone(),
            phone_number: author.phone_number.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Get an author by ID
    pub fn get_author(&self, id: i64) -> Result<Option<AuthorRecord>, ModelError> {
        self.db.execute(|conn| Self::get_author_sync(conn, id))
    }

    /// Get an author by ID (synchronous version for use within transactions)
    fn get_author_sync(conn: &Connection, id: i64) -> Result<Option<AuthorRecord>, ModelError> {
        let sql = format!("SELECT {} FROM authors WHERE id = ?1", AUTHOR_COLUMNS);
        let result = conn.query_row(&sql, [id], author_from_row).optional()?;
        Ok(result)
    }

    /// Find an author by exact name
    pub fn find_author_by_name(&self, name: &str) -> Result<Option<AuthorRecord>, ModelError> {
        self.db
            .execute(|conn| find_author_by_name_sync(conn, name).map_err(ModelError::from))
    }

    /// List all authors ordered by ID
    pub fn list_authors(&self) -> Result<Vec<AuthorRecord>, ModelError> {
        self.db.execute(|conn| -> Result<Vec<AuthorRecord>, ModelError> {
            let sql = format!("SELECT {} FROM authors ORDER BY id", AUTHOR_COLUMNS);
            let mut stmt = conn.prepare(&sql)?;
            let authors = stmt
                .query_map([], author_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(authors)
        })
    }

    /// Apply field changes to an author.
    ///
    /// Each changed field is validated in turn (name, then phone number);
    /// the first failure aborts the whole update.
    pub fn update_author(&self, id: i64, changes: &AuthorChanges) -> Result<AuthorRecord, ModelError> {
        let result = self.db.transaction(|tx| -> Result<AuthorRecord, ModelError> {
            let mut author = Self::get_author_sync(tx, id)?
                .ok_or(ModelError::NotFound { entity: "Author", id })?;

            if changes.is_empty() {
                return Ok(author);
            }

            let validator = AuthorValidator::new(&**tx);
            if let Some(name) = &changes.name {
                author.name = validator.validate_name(Some(name.as_str()), Some(id))?.to_string();
            }
            if let Some(phone_number) = &changes.phone_number {
                author.phone_number = validator
                    .validate_phone_number(phone_number.as_deref())?
                    .map(str::to_string);
            }
            author.updated_at = now_timestamp();

            tx.execute(
                "UPDATE authors SET name = ?1, phone_number = ?2, updated_at = ?3 WHERE id = ?4",
                params![author.name, author.phone_number, author.updated_at, id],
            )
            .map_err(map_unique_violation)?;

            Ok(author)
        });

        match &result {
            Ok(author) => info!("Updated {}", author),
            Err(e) => warn!("Rejected update of author {}: {}", id, e),
        }
        result
    }

    /// Set an author's name
    pub fn set_author_name(&self, id: i64, name: &str) -> Result<AuthorRecord, ModelError> {
        let changes = AuthorChanges {
            name: Some(name.to_string()),
            ..Default::default()
        };
        self.update_author(id, &changes)
    }

    /// Set or clear an author's phone number
    pub fn set_author_phone_number(
        &self,
        id: i64,
        phone_number: Option<&str>,
    ) -> Result<AuthorRecord, ModelError> {
        let changes = AuthorChanges {
            phone_number: Some(phone_number.map(str::to_string)),
            ..Default::default()
        };
        self.update_author(id, &changes)
    }

    /// Delete an author. Returns whether a row was removed.
    pub fn delete_author(&self, id: i64) -> Result<bool, ModelError> {
        let deleted = self
            .db
            .execute(|conn| Ok::<_, ModelError>(conn.execute("DELETE FROM authors WHERE id = ?1", [id])?))?;

        debug!("Deleted {} author row(s) for id {}", deleted, id);
        Ok(deleted > 0)
    }

    // =========================================================================
    // Post Operations
    // =========================================================================

    /// Validate and insert a new post
    pub fn create_post(&self, draft: &PostDraft) -> Result<PostRecord, ModelError> {
        let post = match NewPost::validated(draft, &self.post_validator) {
            Ok(post) => post,
            Err(e) => {
                warn!("Rejected post: {}", e);
                return Err(e.into());
            }
        };

        let record = self.db.transaction(|tx| -> Result<PostRecord, ModelError> {
            let now = now_timestamp();
            tx.execute(
                "INSERT INTO posts (title, content, summary, category, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    post.title,
                    post.content,
                    post.summary,
                    post.category.as_str(),
                    now,
                    now
                ],
            )?;

            Ok(PostRecord {
                id: tx.last_insert_rowid(),
                title: post.title.clone(),
                content: post.content.clone(),
                summary: post.summary.clone(),
                category: post.category,
                created_at: now.clone(),
                updated_at: now,
            })
        })?;

        info!("Created {}", record);
        Ok(record)
    }

    /// Get a post by ID
    pub fn get_post(&self, id: i64) -> Result<Option<PostRecord>, ModelError> {
        self.db.execute(|conn| Self::get_post_sync(conn, id))
    }

    fn get_post_sync(conn: &Connection, id: i64) -> Result<Option<PostRecord>, ModelError> {
        let sql = format!("SELECT {} FROM posts WHERE id = ?1", POST_COLUMNS);
        let result = conn.query_row(&sql, [id], post_from_row).optional()?;
        Ok(result)
    }

    /// List all posts ordered by ID, optionally restricted to one category
    pub fn list_posts(&self, category: Option<PostCategory>) -> Result<Vec<PostRecord>, ModelError> {
        self.db.execute(|conn| -> Result<Vec<PostRecord>, ModelError> {
            let posts = match category {
                Some(category) => {
                    let sql = format!(
                        "SELECT {} FROM posts WHERE category = ?1 ORDER BY id",
                        POST_COLUMNS
                    );
                    let mut stmt = conn.prepare(&sql)?;
                    let rows = stmt
                        .query_map([category.as_str()], post_from_row)?
                        .collect::<Result<Vec<_>, _>>()?;
                    rows
                }
                None => {
                    let sql = format!("SELECT {} FROM posts ORDER BY id", POST_COLUMNS);
                    let mut stmt = conn.prepare(&sql)?;
                    let rows = stmt
                        .query_map([], post_from_row)?
                        .collect::<Result<Vec<_>, _>>()?;
                    rows
                }
            };
            Ok(posts)
        })
    }

    /// Apply field changes to a post.
    ///
    /// Changed fields are validated in the order title, content, category,
    /// summary; the first failure aborts the whole update.
    pub fn update_post(&self, id: i64, changes: &PostChanges) -> Result<PostRecord, ModelError> {
        let validator = &self.post_validator;

        let result = self.db.transaction(|tx| -> Result<PostRecord, ModelError> {
            let mut post = Self::get_post_sync(tx, id)?
                .ok_or(ModelError::NotFound { entity: "Post", id })?;

            if changes.is_empty() {
                return Ok(post);
            }

            if let Some(title) = &changes.title {
                post.title = validator.validate_title(Some(title.as_str()))?.to_string();
            }
            if let Some(content) = &changes.content {
                post.content = validator.validate_content(Some(content.as_str()))?.to_string();
            }
            if let Some(category) = &changes.category {
                post.category = validator.validate_category(Some(category.as_str()))?;
            }
            if let Some(summary) = &changes.summary {
                post.summary = validator
                    .validate_summary(summary.as_deref())?
                    .map(str::to_string);
            }
            post.updated_at = now_timestamp();

            tx.execute(
                "UPDATE posts SET title = ?1, content = ?2, summary = ?3, category = ?4, updated_at = ?5
                 WHERE id = ?6",
                params![
                    post.title,
                    post.content,
                    post.summary,
                    post.category.as_str(),
                    post.updated_at,
                    id
                ],
            )?;

            Ok(post)
        });

        match &result {
            Ok(post) => info!("Updated {}", post),
            Err(e) => warn!("Rejected update of post {}: {}", id, e),
        }
        result
    }

    /// Set a post's title
    pub fn set_post_title(&self, id: i64, title: &str) -> Result<PostRecord, ModelError> {
        let changes = PostChanges {
            title: Some(title.to_string()),
            ..Default::default()
        };
        self.update_post(id, &changes)
    }

    /// Set a post's content
    pub fn set_post_content(&self, id: i64, content: &str) -> Result<PostRecord, ModelError> {
        let changes = PostChanges {
            content: Some(content.to_string()),
            ..Default::default()
        };
        self.update_post(id, &changes)
    }

    /// Set or clear a post's summary
    pub fn set_post_summary(&self, id: i64, summary: Option<&str>) -> Result<PostRecord, ModelError> {
        let changes = PostChanges {
            summary: Some(summary.map(str::to_string)),
            ..Default::default()
        };
        self.update_post(id, &changes)
    }

    /// Set a post's category
    pub fn set_post_category(&self, id: i64, category: &str) -> Result<PostRecord, ModelError> {
        let changes = PostChanges {
            category: Some(category.to_string()),
            ..Default::default()
        };
        self.update_post(id, &changes)
    }

    /// Delete a post. Returns whether a row was removed.
    pub fn delete_post(&self, id: i64) -> Result<bool, ModelError> {
        let deleted = self
            .db
            .execute(|conn| Ok::<_, ModelError>(conn.execute("DELETE FROM posts WHERE id = ?1", [id])?))?;

        debug!("Deleted {} post row(s) for id {}", deleted, id);
        Ok(deleted > 0)
    }
}

impl AuthorLookup for Repository {
    fn find_author_by_name(&self, name: &str) -> anyhow::Result<Option<AuthorRecord>> {
        self.db.execute(|conn| find_author_by_name_sync(conn, name))
    }
}

// Lets validators run on the connection (or transaction) that performs the write.
impl AuthorLookup for Connection {
    fn find_author_by_name(&self, name: &str) -> anyhow::Result<Option<AuthorRecord>> {
        find_author_by_name_sync(self, name)
    }
}

fn find_author_by_name_sync(conn: &Connection, name: &str) -> anyhow::Result<Option<AuthorRecord>> {
    debug!("Looking up author by name '{}'", name);

    let sql = format!("SELECT {} FROM authors WHERE name = ?1 LIMIT 1", AUTHOR_COLUMNS);
    let result = conn.query_row(&sql, [name], author_from_row).optional()?;
    Ok(result)
}

fn author_from_row(row: &Row<'_>) -> rusqlite::Result<AuthorRecord> {
    Ok(AuthorRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        phone_number: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<PostRecord> {
    let category: String = row.get(4)?;
    let category = category.parse::<PostCategory>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(PostRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        summary: row.get(3)?,
        category,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// Report a hit on the author name index as the uniqueness rule failing
fn map_unique_violation(error: rusqlite::Error) -> ModelError {
    if let rusqlite::Error::SqliteFailure(e, _) = &error {
        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
            return ValidationError::DuplicateName.into();
        }
    }
    error.into()
}

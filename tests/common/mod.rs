/*!
 * Common test utilities for the scribe test suite
 */

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use scribe::database::{DatabaseConnection, Repository};

/// Route library logging to the test harness output
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Path of a database file inside `dir`
pub fn database_path(dir: &TempDir) -> PathBuf {
    dir.path().join("data").join("scribe.db")
}

/// Repository over a fresh file-backed database in `dir`
pub fn create_file_repository(dir: &TempDir) -> Result<Repository> {
    init_logging();
    let db = DatabaseConnection::new(database_path(dir))?;
    Ok(Repository::new(db))
}

/// Post body that satisfies the content rule
pub fn valid_content() -> String {
    "It was a bright cold day in April, and the clocks were striking thirteen. ".repeat(4)
}

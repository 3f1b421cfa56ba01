/*!
 * Field rules for authors and posts.
 *
 * Every write path runs these before a value is accepted:
 * - `author`: name presence and uniqueness, phone number digit count
 * - `post`: content and summary length, category membership, title phrases
 *
 * The author name check reads the store through the `AuthorLookup` trait, so
 * any store (or a test double) can back it.
 */

pub mod author;
pub mod post;

// Re-export main types
pub use author::{AuthorLookup, AuthorValidator, validate_phone_number};
pub use post::{MAX_SUMMARY_CHARS, MIN_CONTENT_CHARS, PostRules, PostValidator};

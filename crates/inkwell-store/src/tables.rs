//! Redb table definitions for persistent post storage.

use redb::TableDefinition;

// Key: post title, Value: raw markdown
pub const POSTS: TableDefinition<&str, &str> = TableDefinition::new("posts");

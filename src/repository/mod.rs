use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::files::FileRecord;
use crate::model::error::store_errors::StoreError;
use crate::search::FileQuery;
use crate::tags::Tag;

pub mod metadata_repository;
mod sqlite_store;

#[cfg(test)]
mod tests;

pub use sqlite_store::SqliteStore;

/// the current schema version, stored in the Metadata table
pub static DATABASE_VERSION: &str = "1";

/// Everything the tag engine needs from durable storage.
///
/// Tag and file names are compared case-insensitively by every implementation. Lists of tags come back
/// ordered by name, ascending and case-insensitive.
pub trait TagStore {
    /// tags without a parent link
    fn fetch_root_tags(&self) -> Result<Vec<Tag>, StoreError>;

    fn fetch_child_tags(&self, parent_id: u32) -> Result<Vec<Tag>, StoreError>;

    fn count_children(&self, tag_id: u32) -> Result<u32, StoreError>;

    fn get_tag(&self, id: u32) -> Result<Option<Tag>, StoreError>;

    /// saves a new tag and returns its assigned id
    fn insert_tag(&self, name: &str) -> Result<u32, StoreError>;

    fn insert_tag_parent_link(&self, parent_id: u32, child_id: u32) -> Result<(), StoreError>;

    fn delete_tag_parent_link(&self, child_id: u32) -> Result<(), StoreError>;

    fn update_tag_parent_link(&self, child_id: u32, new_parent_id: u32) -> Result<(), StoreError>;

    fn tag_parent_link_exists(&self, child_id: u32) -> Result<bool, StoreError>;

    fn rename_tag(&self, id: u32, new_name: &str) -> Result<(), StoreError>;

    /// removes the tag along with its parent link and file links
    fn delete_tag(&self, id: u32) -> Result<(), StoreError>;

    /// ids from the root-level ancestor down to `id` itself; empty if the tag doesn't exist
    fn fetch_tag_lineage(&self, id: u32) -> Result<Vec<u32>, StoreError>;

    /// files whose only tag is `tag_id`
    fn files_uniquely_tagged_with(&self, tag_id: u32) -> Result<Vec<String>, StoreError>;

    fn files_tagged_with(&self, tag_id: u32) -> Result<Vec<String>, StoreError>;

    fn insert_file(&self, name: &str, created: i64) -> Result<u32, StoreError>;

    fn get_file(&self, name: &str) -> Result<Option<FileRecord>, StoreError>;

    fn fetch_file_tags(&self, file_name: &str) -> Result<Vec<u32>, StoreError>;

    fn add_file_tag(&self, file_name: &str, tag_id: u32) -> Result<(), StoreError>;

    fn remove_file_tag(&self, file_name: &str, tag_id: u32) -> Result<(), StoreError>;

    /// distinct names of every file matching the query, in the query's sort order
    fn query_files(&self, query: &FileQuery) -> Result<Vec<String>, StoreError>;

    fn delete_file(&self, file_name: &str) -> Result<(), StoreError>;

    fn rename_file(&self, old_name: &str, new_name: &str) -> Result<(), StoreError>;
}

/// opens a connection to the database file at `location`, creating it if needed
pub fn open_connection(location: &Path) -> Result<Connection, StoreError> {
    let con = Connection::open_with_flags(location, OpenFlags::default()).map_err(|e| {
        log::error!("Failed to get a connection to the database at {location:?}: {e}");
        StoreError::Connection(e.to_string())
    })?;
    enable_foreign_keys(&con)?;
    Ok(con)
}

/// opens a private in-memory database. Nothing written to it outlives the connection
pub fn open_memory_connection() -> Result<Connection, StoreError> {
    let con = Connection::open_in_memory().map_err(|e| {
        log::error!("Failed to open an in-memory database: {e}");
        StoreError::Connection(e.to_string())
    })?;
    enable_foreign_keys(&con)?;
    Ok(con)
}

/// deletes cascade through foreign keys, which sqlite leaves off unless asked per connection
fn enable_foreign_keys(con: &Connection) -> Result<(), StoreError> {
    con.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| StoreError::from_db("enable foreign keys", e))
}

/// runs init.sql on the database
fn create_db(con: &Connection) -> Result<(), StoreError> {
    let sql = include_str!("../assets/init.sql");
    con.execute_batch(sql)
        .map_err(|e| StoreError::from_db("create the database tables", e))?;
    metadata_repository::set_version(DATABASE_VERSION, con)
        .map_err(|e| StoreError::from_db("record the database version", e))
}

/// handles checking if the database exists and is up to the correct version.
/// If not, it creates the tables
pub fn initialize_db(con: &Connection) -> Result<(), StoreError> {
    match metadata_repository::get_version(con) {
        Ok(Some(version)) => {
            log::debug!("Database is at version {version}");
            Ok(())
        }
        // tables haven't been created yet, or creating them was interrupted
        Ok(None) | Err(_) => {
            log::info!("Creating database tables at version {DATABASE_VERSION}...");
            create_db(con)
        }
    }
}

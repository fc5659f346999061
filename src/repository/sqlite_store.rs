use std::path::Path;

use rusqlite::Connection;

use crate::files::repository as file_repository;
use crate::files::FileRecord;
use crate::model::error::store_errors::StoreError;
use crate::repository::{initialize_db, open_connection, open_memory_connection, TagStore};
use crate::search::FileQuery;
use crate::tags::repository as tag_repository;
use crate::tags::Tag;

/// [`TagStore`] backed by a single sqlite connection
pub struct SqliteStore {
    con: Connection,
}

impl SqliteStore {
    /// opens (and if necessary creates) the database file at `location`
    pub fn open(location: &Path) -> Result<Self, StoreError> {
        let con = open_connection(location)?;
        initialize_db(&con)?;
        Ok(Self { con })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let con = open_memory_connection()?;
        initialize_db(&con)?;
        Ok(Self { con })
    }

    /// the underlying connection, for callers that need a query the trait doesn't cover
    pub fn connection(&self) -> &Connection {
        &self.con
    }
}

impl TagStore for SqliteStore {
    fn fetch_root_tags(&self) -> Result<Vec<Tag>, StoreError> {
        tag_repository::get_root_tags(&self.con)
            .map_err(|e| StoreError::from_db("retrieve root tags", e))
    }

    fn fetch_child_tags(&self, parent_id: u32) -> Result<Vec<Tag>, StoreError> {
        tag_repository::get_child_tags(parent_id, &self.con)
            .map_err(|e| StoreError::from_db(&format!("retrieve children of tag {parent_id}"), e))
    }

    fn count_children(&self, tag_id: u32) -> Result<u32, StoreError> {
        tag_repository::count_children(tag_id, &self.con)
            .map_err(|e| StoreError::from_db(&format!("count children of tag {tag_id}"), e))
    }

    fn get_tag(&self, id: u32) -> Result<Option<Tag>, StoreError> {
        tag_repository::get_tag(id, &self.con)
            .map_err(|e| StoreError::from_db(&format!("retrieve tag {id}"), e))
    }

    fn insert_tag(&self, name: &str) -> Result<u32, StoreError> {
        tag_repository::create_tag(name, &self.con)
            .map_err(|e| StoreError::from_db(&format!("create tag {name}"), e))
    }

    fn insert_tag_parent_link(&self, parent_id: u32, child_id: u32) -> Result<(), StoreError> {
        tag_repository::add_parent_link(parent_id, child_id, &self.con).map_err(|e| {
            StoreError::from_db(&format!("link tag {child_id} under tag {parent_id}"), e)
        })
    }

    fn delete_tag_parent_link(&self, child_id: u32) -> Result<(), StoreError> {
        tag_repository::delete_parent_link(child_id, &self.con)
            .map_err(|e| StoreError::from_db(&format!("unlink tag {child_id} from its parent"), e))
    }

    fn update_tag_parent_link(&self, child_id: u32, new_parent_id: u32) -> Result<(), StoreError> {
        tag_repository::update_parent_link(child_id, new_parent_id, &self.con).map_err(|e| {
            StoreError::from_db(&format!("move tag {child_id} under tag {new_parent_id}"), e)
        })
    }

    fn tag_parent_link_exists(&self, child_id: u32) -> Result<bool, StoreError> {
        tag_repository::parent_link_exists(child_id, &self.con)
            .map_err(|e| StoreError::from_db(&format!("check the parent of tag {child_id}"), e))
    }

    fn rename_tag(&self, id: u32, new_name: &str) -> Result<(), StoreError> {
        tag_repository::rename_tag(id, new_name, &self.con)
            .map_err(|e| StoreError::from_db(&format!("rename tag {id} to {new_name}"), e))
    }

    fn delete_tag(&self, id: u32) -> Result<(), StoreError> {
        tag_repository::delete_tag(id, &self.con)
            .map_err(|e| StoreError::from_db(&format!("delete tag {id}"), e))
    }

    fn fetch_tag_lineage(&self, id: u32) -> Result<Vec<u32>, StoreError> {
        tag_repository::get_lineage(id, &self.con)
            .map_err(|e| StoreError::from_db(&format!("retrieve the lineage of tag {id}"), e))
    }

    fn files_uniquely_tagged_with(&self, tag_id: u32) -> Result<Vec<String>, StoreError> {
        file_repository::get_files_with_only_tag(tag_id, &self.con).map_err(|e| {
            StoreError::from_db(&format!("retrieve files tagged only with {tag_id}"), e)
        })
    }

    fn files_tagged_with(&self, tag_id: u32) -> Result<Vec<String>, StoreError> {
        file_repository::get_files_with_tag(tag_id, &self.con)
            .map_err(|e| StoreError::from_db(&format!("retrieve files tagged with {tag_id}"), e))
    }

    fn insert_file(&self, name: &str, created: i64) -> Result<u32, StoreError> {
        file_repository::create_file(name, created, &self.con)
            .map_err(|e| StoreError::from_db(&format!("create file {name}"), e))
    }

    fn get_file(&self, name: &str) -> Result<Option<FileRecord>, StoreError> {
        file_repository::get_file_by_name(name, &self.con)
            .map_err(|e| StoreError::from_db(&format!("retrieve file {name}"), e))
    }

    fn fetch_file_tags(&self, file_name: &str) -> Result<Vec<u32>, StoreError> {
        file_repository::get_tags_on_file(file_name, &self.con)
            .map_err(|e| StoreError::from_db(&format!("retrieve tags on file {file_name}"), e))
    }

    fn add_file_tag(&self, file_name: &str, tag_id: u32) -> Result<(), StoreError> {
        file_repository::add_tag_to_file(file_name, tag_id, &self.con)
            .map_err(|e| StoreError::from_db(&format!("add tag {tag_id} to {file_name}"), e))
    }

    fn remove_file_tag(&self, file_name: &str, tag_id: u32) -> Result<(), StoreError> {
        file_repository::remove_tag_from_file(file_name, tag_id, &self.con)
            .map_err(|e| StoreError::from_db(&format!("remove tag {tag_id} from {file_name}"), e))
    }

    fn query_files(&self, query: &FileQuery) -> Result<Vec<String>, StoreError> {
        file_repository::search_files(query, &self.con)
            .map_err(|e| StoreError::from_db("search files", e))
    }

    fn delete_file(&self, file_name: &str) -> Result<(), StoreError> {
        file_repository::delete_file(file_name, &self.con)
            .map_err(|e| StoreError::from_db(&format!("delete file {file_name}"), e))
    }

    fn rename_file(&self, old_name: &str, new_name: &str) -> Result<(), StoreError> {
        file_repository::rename_file(old_name, new_name, &self.con)
            .map_err(|e| StoreError::from_db(&format!("rename file {old_name} to {new_name}"), e))
    }
}

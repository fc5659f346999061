use crate::files::FileRecord;
use crate::model::error::file_errors::{
    DeleteFileError, FileTagError, ImportFileError, UpdateFileError,
};
use crate::model::file_types::FileTypes;
use crate::repository::TagStore;

/// adds a file in the managed folder to the database with the passed tags. Every file needs at least
/// one tag, and files may only carry leaf tags
pub fn import_file<S: TagStore + ?Sized>(
    store: &S,
    name: &str,
    created: i64,
    tags: &[u32],
) -> Result<FileRecord, ImportFileError> {
    if !is_valid_file_name(name) {
        log::warn!("Refusing to import a file with the invalid name {name:?}");
        return Err(ImportFileError::InvalidName);
    }
    let file_type = FileTypes::from_file_name(name);
    if !file_type.is_supported() {
        log::warn!("Refusing to import {name}, because its type isn't supported");
        return Err(ImportFileError::UnsupportedType);
    }
    if tags.is_empty() {
        log::warn!("Refusing to import {name} without any tags");
        return Err(ImportFileError::NoTags);
    }
    if store.get_file(name)?.is_some() {
        log::warn!("Cannot import {name}, because a file with that name already exists");
        return Err(ImportFileError::AlreadyExists);
    }
    for tag_id in tags {
        if store.get_tag(*tag_id)?.is_none() {
            log::warn!("Cannot import {name} with tag {tag_id}, because that tag does not exist");
            return Err(ImportFileError::TagNotFound);
        }
        if store.count_children(*tag_id)? > 0 {
            log::warn!("Cannot import {name} with tag {tag_id}, because that tag is not a leaf");
            return Err(ImportFileError::TagNotLeaf);
        }
    }
    let id = store.insert_file(name, created)?;
    for tag_id in tags {
        store.add_file_tag(name, *tag_id)?;
    }
    log::info!("Imported {file_type} file {name} with id {id}");
    Ok(FileRecord {
        id: Some(id),
        name: name.to_string(),
        created,
    })
}

/// renames a file. Changing only the case of the name is allowed
pub fn rename_file<S: TagStore + ?Sized>(
    store: &S,
    old_name: &str,
    new_name: &str,
) -> Result<(), UpdateFileError> {
    let Some(existing) = store.get_file(old_name)? else {
        log::warn!("Cannot rename {old_name}, because it does not exist");
        return Err(UpdateFileError::NotFound);
    };
    if !is_valid_file_name(new_name) {
        log::warn!("Refusing to rename {old_name} to the invalid name {new_name:?}");
        return Err(UpdateFileError::InvalidName);
    }
    if !FileTypes::from_file_name(new_name).is_supported() {
        log::warn!("Refusing to rename {old_name} to {new_name}, because that type isn't supported");
        return Err(UpdateFileError::UnsupportedType);
    }
    if let Some(other) = store.get_file(new_name)? {
        if other.id != existing.id {
            log::warn!("Cannot rename {old_name} to {new_name}, because that name is taken");
            return Err(UpdateFileError::AlreadyExists);
        }
    }
    store.rename_file(old_name, new_name)?;
    log::info!("Renamed file {old_name} to {new_name}");
    Ok(())
}

/// removes the file from the database along with all of its tags
pub fn delete_file<S: TagStore + ?Sized>(store: &S, name: &str) -> Result<(), DeleteFileError> {
    if store.get_file(name)?.is_none() {
        log::warn!("Cannot delete {name}, because it does not exist");
        return Err(DeleteFileError::NotFound);
    }
    store.delete_file(name)?;
    log::info!("Deleted file {name}");
    Ok(())
}

pub fn get_file_tags<S: TagStore + ?Sized>(
    store: &S,
    name: &str,
) -> Result<Vec<u32>, FileTagError> {
    if store.get_file(name)?.is_none() {
        return Err(FileTagError::FileNotFound);
    }
    Ok(store.fetch_file_tags(name)?)
}

/// tags the file with `tag_id`, which has to be a leaf. Adding a tag the file already has does nothing
pub fn add_tag_to_file<S: TagStore + ?Sized>(
    store: &S,
    name: &str,
    tag_id: u32,
) -> Result<(), FileTagError> {
    if store.get_file(name)?.is_none() {
        log::warn!("Cannot tag {name}, because it does not exist");
        return Err(FileTagError::FileNotFound);
    }
    if store.get_tag(tag_id)?.is_none() {
        log::warn!("Cannot tag {name} with {tag_id}, because that tag does not exist");
        return Err(FileTagError::TagNotFound);
    }
    if store.count_children(tag_id)? > 0 {
        log::warn!("Cannot tag {name} with {tag_id}, because that tag is not a leaf");
        return Err(FileTagError::TagNotLeaf);
    }
    store.add_file_tag(name, tag_id)?;
    Ok(())
}

/// takes `tag_id` off the file. A file's last tag can't be removed
pub fn remove_tag_from_file<S: TagStore + ?Sized>(
    store: &S,
    name: &str,
    tag_id: u32,
) -> Result<(), FileTagError> {
    let tags = get_file_tags(store, name)?;
    if !tags.contains(&tag_id) {
        return Ok(());
    }
    if tags.len() == 1 {
        log::warn!("Refusing to remove tag {tag_id} from {name}, because it is the file's last tag");
        return Err(FileTagError::LastTag);
    }
    store.remove_file_tag(name, tag_id)?;
    Ok(())
}

fn is_valid_file_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains(['/', '\\']) && !name.chars().any(char::is_control)
}

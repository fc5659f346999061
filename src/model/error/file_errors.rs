use crate::model::error::store_errors::StoreError;

#[derive(PartialEq, Debug)]
pub enum ImportFileError {
    /// generic database error
    DbError,
    /// the name is blank or contains a path separator
    InvalidName,
    /// the file's extension isn't one of the supported media types
    UnsupportedType,
    /// a file with that name (case-insensitive) is already in the managed folder
    AlreadyExists,
    /// files can't be imported without at least one tag
    NoTags,
    /// one of the requested tags does not exist
    TagNotFound,
    /// one of the requested tags has children, and files may only be tagged with leaf tags
    TagNotLeaf,
}

#[derive(PartialEq, Debug)]
pub enum UpdateFileError {
    /// generic database error
    DbError,
    /// file not found in the db
    NotFound,
    /// the new name is blank or contains a path separator
    InvalidName,
    /// the new extension isn't one of the supported media types
    UnsupportedType,
    /// another file already uses the new name
    AlreadyExists,
}

#[derive(PartialEq, Debug)]
pub enum DeleteFileError {
    /// couldn't remove the file reference from the repository
    DbError,
    /// file reference not found in repository
    NotFound,
}

#[derive(PartialEq, Debug)]
pub enum FileTagError {
    /// generic database error
    DbError,
    /// no file with the passed name was found
    FileNotFound,
    /// no tag with the passed id was found
    TagNotFound,
    /// the tag has children, and files may only be tagged with leaf tags
    TagNotLeaf,
    /// removing the tag would leave the file without any tags
    LastTag,
}

impl From<StoreError> for ImportFileError {
    fn from(_: StoreError) -> Self {
        Self::DbError
    }
}

impl From<StoreError> for UpdateFileError {
    fn from(_: StoreError) -> Self {
        Self::DbError
    }
}

impl From<StoreError> for DeleteFileError {
    fn from(_: StoreError) -> Self {
        Self::DbError
    }
}

impl From<StoreError> for FileTagError {
    fn from(_: StoreError) -> Self {
        Self::DbError
    }
}

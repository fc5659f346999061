use crate::model::error::store_errors::StoreError;

#[derive(PartialEq, Debug)]
pub enum CreateTagError {
    /// an error with the database
    DbError,
    /// the name is blank, too long, or contains a forbidden character
    InvalidName,
    /// a sibling already uses that name (case-insensitive)
    DuplicateName,
    /// the parent node is no longer part of the tree
    ParentNotFound,
    /// the user refused to move the parent's files onto the new tag
    Declined,
}

#[derive(PartialEq, Debug)]
pub enum RenameTagError {
    /// an error with the database
    DbError,
    /// the node has never been saved (the synthetic root is the only such node in a live tree)
    TagNotPersisted,
    /// the node is no longer part of the tree
    TagNotFound,
    /// the new name is blank, too long, or contains a forbidden character
    InvalidName,
    /// a sibling already uses the new name (case-insensitive)
    DuplicateName,
}

#[derive(PartialEq, Debug)]
pub enum ReparentTagError {
    /// an error with the database
    DbError,
    /// the node has never been saved
    TagNotPersisted,
    /// the node or the new parent is no longer part of the tree
    TagNotFound,
    /// the new parent is the node itself or one of its descendants
    InvalidParent,
    /// a child of the new parent already uses the node's name
    DuplicateName,
    /// the user refused to move the new parent's files onto the node
    Declined,
}

#[derive(PartialEq, Debug)]
pub enum DeleteTagError {
    /// an error with the database
    DbError,
    /// the node has never been saved
    TagNotPersisted,
    /// the node is no longer part of the tree
    TagNotFound,
    /// the replacement tag picked for orphaned files can't hold files
    InvalidReplacement,
    /// the user cancelled, which stops the whole cascade
    Declined,
}

#[derive(PartialEq, Debug)]
pub enum ReconcileError {
    /// an error with the database
    DbError,
    /// a selected tag could not be found anywhere in the tree, so the selection must be rebuilt
    Unreconciled { tag_id: u32 },
}

impl From<StoreError> for CreateTagError {
    fn from(_: StoreError) -> Self {
        Self::DbError
    }
}

impl From<StoreError> for RenameTagError {
    fn from(_: StoreError) -> Self {
        Self::DbError
    }
}

impl From<StoreError> for ReparentTagError {
    fn from(_: StoreError) -> Self {
        Self::DbError
    }
}

impl From<StoreError> for DeleteTagError {
    fn from(_: StoreError) -> Self {
        Self::DbError
    }
}

impl From<StoreError> for ReconcileError {
    fn from(_: StoreError) -> Self {
        Self::DbError
    }
}

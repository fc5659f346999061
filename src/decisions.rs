//! Questions the tag engine has to put to the user before it may change anything.
//!
//! Each call blocks until the user answers. Nothing is written to the store or the tree until the
//! answer is in, and a negative answer leaves both untouched.

/// what to do with files that would lose their last tag when a tag is deleted
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum OrphanResolution {
    /// keep the tag; this also stops any delete cascade in progress
    Cancel,
    /// delete the orphaned files along with the tag
    DeleteFiles,
    /// move the orphaned files onto a tag picked with [`Decisions::choose_replacement_tag`]
    Retag,
}

pub trait Decisions {
    /// `parent` is about to get its first child, `child`, but `files` are tagged with `parent`.
    /// Returning true moves those files onto `child`; false cancels the operation
    fn confirm_leaf_promotion(&mut self, parent: &str, child: &str, files: &[String]) -> bool;

    /// `files` are tagged only with `tag`, which is about to be deleted
    fn resolve_orphans(&mut self, tag: &str, files: &[String]) -> OrphanResolution;

    /// picks the tag orphaned `files` move to once `tag` is gone. `None` cancels the delete
    fn choose_replacement_tag(&mut self, tag: &str, files: &[String]) -> Option<u32>;
}

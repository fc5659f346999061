use crate::model::error::search_errors::SearchFileError;
use crate::repository::TagStore;
use crate::search::{FileQuery, SearchCriteria};
use crate::tags::{NodeId, TagTree};

/// names of every file matching `criteria`, distinct and in the criteria's sort order.
///
/// Each branch root in [`SearchCriteria::include_all`] is expanded to its full subtree here, and so is
/// every active or excluded node whose children weren't cached when the criteria were built. Either
/// may fetch children from the store
pub fn search_files<S: TagStore + ?Sized>(
    tree: &mut TagTree<'_, S>,
    criteria: &SearchCriteria,
) -> Result<Vec<String>, SearchFileError> {
    if criteria.is_empty() {
        return Ok(Vec::new());
    }
    let mut all_of = Vec::with_capacity(criteria.include_all().len());
    for root in criteria.include_all() {
        all_of.push(expand(tree, *root)?);
    }
    let mut any_of = criteria.include_any().clone();
    for branch in criteria.unfetched_any() {
        any_of.extend(expand(tree, *branch)?);
    }
    let mut excluded = criteria.exclude_ids().clone();
    for branch in criteria.unfetched_excluded() {
        excluded.extend(expand(tree, *branch)?);
    }
    let query = FileQuery {
        any_of: any_of.into_iter().collect(),
        all_of,
        excluded: excluded.into_iter().collect(),
        sort: criteria.sort_method(),
    };
    let files = tree.store().query_files(&query)?;
    log::debug!("Search for {query:?} matched {} files", files.len());
    Ok(files)
}

fn expand<S: TagStore + ?Sized>(
    tree: &mut TagTree<'_, S>,
    root: NodeId,
) -> Result<Vec<u32>, SearchFileError> {
    let ids = tree.subtree_ids(root).inspect_err(|e| {
        log::error!("Failed to expand the subtree of {root:?} for a search: {e:?}");
    })?;
    Ok(ids)
}

use std::collections::BTreeSet;

use crate::repository::TagStore;
use crate::search::{MatchMode, SearchOptions, SortMethod};
use crate::tags::{NodeId, TagTree};

/// A snapshot of what the user is searching for, read off the tree's weights.
///
/// Built fresh every time the search inputs change and never modified afterwards
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SearchCriteria {
    mode: MatchMode,
    include_any: BTreeSet<u32>,
    /// roots of the branches a file has to land in, one dimension each
    include_all: Vec<NodeId>,
    exclude_ids: BTreeSet<u32>,
    /// active (Any mode) or excluded nodes whose children aren't cached. Their descendants carry the
    /// same weight once fetched, so the search expands them
    unfetched_any: Vec<NodeId>,
    unfetched_excluded: Vec<NodeId>,
    sort_method: SortMethod,
}

impl SearchCriteria {
    /// walks `from` and every descendant whose parent has already fetched its children. A subtree that
    /// isn't cached is never loaded here; its root is recorded for [`crate::search::service::search_files`]
    /// to expand instead
    pub fn build<S: TagStore + ?Sized>(
        tree: &TagTree<'_, S>,
        from: NodeId,
        options: SearchOptions,
    ) -> Self {
        let mut criteria = Self {
            mode: options.mode,
            include_any: BTreeSet::new(),
            include_all: Vec::new(),
            exclude_ids: BTreeSet::new(),
            unfetched_any: Vec::new(),
            unfetched_excluded: Vec::new(),
            sort_method: options.sort,
        };
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let Some(node) = tree.node(id) else {
                continue;
            };
            let fetched = node.has_fetched_children();
            if let Some(tag_id) = node.id {
                if options.exclusion_enabled && node.is_excluded() {
                    criteria.exclude_ids.insert(tag_id);
                    if !fetched {
                        criteria.unfetched_excluded.push(id);
                    }
                } else if node.is_active() {
                    match options.mode {
                        MatchMode::Any => {
                            criteria.include_any.insert(tag_id);
                            if !fetched {
                                criteria.unfetched_any.push(id);
                            }
                        }
                        MatchMode::All if node.is_self_activated() => {
                            criteria.include_all.push(id);
                        }
                        MatchMode::All => {}
                    }
                }
            }
            if let Some(children) = tree.cached_children(id) {
                stack.extend(children.iter().rev());
            }
        }
        criteria
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn include_any(&self) -> &BTreeSet<u32> {
        &self.include_any
    }

    pub fn include_all(&self) -> &[NodeId] {
        &self.include_all
    }

    pub fn exclude_ids(&self) -> &BTreeSet<u32> {
        &self.exclude_ids
    }

    pub fn unfetched_any(&self) -> &[NodeId] {
        &self.unfetched_any
    }

    pub fn unfetched_excluded(&self) -> &[NodeId] {
        &self.unfetched_excluded
    }

    pub fn sort_method(&self) -> SortMethod {
        self.sort_method
    }

    /// no inclusion criteria at all, which matches no files regardless of exclusions
    pub fn is_empty(&self) -> bool {
        self.include_any.is_empty() && self.include_all.is_empty()
    }
}

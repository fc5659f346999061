//! Keeps a presentation layer's checked tags in step with the tree.
//!
//! Checked nodes are remembered by [`NodeId`]. When a checked node is thrown out of the tree (its tag
//! was deleted, or the cache holding it was invalidated because the hierarchy changed underneath),
//! the tracker queues its tag id and later finds the tag again by asking the store for its lineage.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use crate::model::error::tag_errors::ReconcileError;
use crate::repository::TagStore;
use crate::tags::{Facet, NodeId, TagTree, TreeEvent};


/// one transition in the set of checked tags, reported so dependent state (like a count of active
/// search terms) can follow along
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum SelectionChange {
    Selected { node: NodeId, tag_id: u32 },
    Deselected { node: NodeId, tag_id: u32 },
}

pub struct SelectionTracker {
    facet: Facet,
    selected: Vec<NodeId>,
    /// tag ids of checked nodes that left the tree, oldest first
    pending: VecDeque<(NodeId, u32)>,
    events: Receiver<TreeEvent>,
}

impl SelectionTracker {
    /// starts tracking checks in `facet` on `tree`. Nodes already checked in the tree are picked up
    pub fn new<S: TagStore + ?Sized>(tree: &mut TagTree<'_, S>, facet: Facet) -> Self {
        let events = tree.subscribe();
        Self {
            facet,
            selected: tree.checked_nodes(facet),
            pending: VecDeque::new(),
            events,
        }
    }

    pub fn facet(&self) -> Facet {
        self.facet
    }

    pub fn selected(&self) -> &[NodeId] {
        &self.selected
    }

    pub fn is_selected(&self, node: NodeId) -> bool {
        self.selected.contains(&node)
    }

    /// number of checked tags, which is the number of active search terms for this facet
    pub fn active_count(&self) -> usize {
        self.selected.len()
    }

    /// checks the node if it isn't checked, unchecks it if it is
    pub fn toggle<S: TagStore + ?Sized>(
        &mut self,
        tree: &mut TagTree<'_, S>,
        node: NodeId,
    ) -> Option<SelectionChange> {
        let Some(tag_id) = tree.tag_id(node) else {
            log::warn!("Ignoring a check on {node:?}, which is not a saved tag");
            return None;
        };
        if let Some(position) = self.selected.iter().position(|s| *s == node) {
            tree.toggle(node, self.facet, false);
            self.selected.remove(position);
            Some(SelectionChange::Deselected { node, tag_id })
        } else {
            tree.toggle(node, self.facet, true);
            self.selected.push(node);
            Some(SelectionChange::Selected { node, tag_id })
        }
    }

    /// processes every structural change since the last call and re-checks tags that were thrown out
    /// of the tree but still exist somewhere.
    ///
    /// If a checked tag can't be found anymore, the remaining queue is dropped and
    /// [`ReconcileError::Unreconciled`] is returned; the caller should then [`SelectionTracker::rebuild`]
    pub fn sync<S: TagStore + ?Sized>(
        &mut self,
        tree: &mut TagTree<'_, S>,
    ) -> Result<Vec<SelectionChange>, ReconcileError> {
        let events: Vec<TreeEvent> = self.events.try_iter().collect();
        for event in events {
            match event {
                TreeEvent::NodeDiscarded {
                    node,
                    tag_id: Some(tag_id),
                } => {
                    if let Some(position) = self.selected.iter().position(|s| *s == node) {
                        self.selected.remove(position);
                        self.pending.push_back((node, tag_id));
                    }
                }
                // removals of nodes that stay in the tree are moves, and the node keeps its check
                _ => {}
            }
        }

        let mut changes = Vec::new();
        while let Some((old_node, tag_id)) = self.pending.pop_front() {
            match tree.locate(tag_id)? {
                Some(new_node) => {
                    if !self.is_selected(new_node) {
                        tree.toggle(new_node, self.facet, true);
                        self.selected.push(new_node);
                    }
                    changes.push(SelectionChange::Deselected {
                        node: old_node,
                        tag_id,
                    });
                    changes.push(SelectionChange::Selected {
                        node: new_node,
                        tag_id,
                    });
                    log::debug!("Recovered checked tag {tag_id} at {:?}", tree.path(new_node));
                }
                None => {
                    log::warn!(
                        "Checked tag {tag_id} no longer exists; selection has to be rebuilt"
                    );
                    self.pending.clear();
                    return Err(ReconcileError::Unreconciled { tag_id });
                }
            }
        }
        Ok(changes)
    }

    /// throws away the incremental state and re-reads which nodes are checked in the tree
    pub fn rebuild<S: TagStore + ?Sized>(&mut self, tree: &TagTree<'_, S>) {
        // anything still queued is already reflected (or gone) in the tree
        self.events.try_iter().for_each(drop);
        self.pending.clear();
        self.selected = tree.checked_nodes(self.facet);
    }
}

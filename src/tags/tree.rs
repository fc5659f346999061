use std::sync::mpsc::{channel, Receiver, Sender};

use itertools::Itertools;

use crate::model::error::store_errors::StoreError;
use crate::repository::TagStore;
use crate::tags::{Facet, NodeId, Tag, TagNode, TreeEvent, Weight};

impl NodeId {
    /// the synthetic root every tree starts with. Root-level tags are its children
    pub const ROOT: NodeId = NodeId(0);
}

/// Lazily loaded, in-memory mirror of the tag forest.
///
/// Nodes live in an arena owned by the tree and refer to each other by [`NodeId`]. Children are
/// fetched from the store the first time they're asked for and cached until
/// [`TagTree::invalidate_children`] is called. Structural changes are broadcast to every receiver
/// handed out by [`TagTree::subscribe`].
pub struct TagTree<'s, S: TagStore + ?Sized> {
    store: &'s S,
    nodes: Vec<Option<TagNode>>,
    subscribers: Vec<Sender<TreeEvent>>,
}

impl<'s, S: TagStore + ?Sized> TagTree<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            nodes: vec![Some(TagNode::new(None, String::new(), None))],
            subscribers: Vec::new(),
        }
    }

    pub fn store(&self) -> &'s S {
        self.store
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// `None` if the node has been discarded
    pub fn node(&self, id: NodeId) -> Option<&TagNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut TagNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// true while the node is part of the tree
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn tag_id(&self, id: NodeId) -> Option<u32> {
        self.node(id).and_then(|n| n.id)
    }

    /// registers a new listener for structural changes
    pub fn subscribe(&mut self) -> Receiver<TreeEvent> {
        let (sender, receiver) = channel();
        self.subscribers.push(sender);
        receiver
    }

    fn emit(&mut self, event: TreeEvent) {
        // a dropped receiver means the listener is gone for good
        self.subscribers.retain(|s| s.send(event).is_ok());
    }

    /// returns the children of the node, fetching them from the store the first time.
    ///
    /// A discarded node has no children
    pub fn children(&mut self, id: NodeId) -> Result<Vec<NodeId>, StoreError> {
        let Some(node) = self.node(id) else {
            log::warn!("Asked for the children of discarded node {id:?}");
            return Ok(Vec::new());
        };
        if let Some(children) = &node.children {
            return Ok(children.clone());
        }
        let rows = match node.id {
            Some(tag_id) => self.store.fetch_child_tags(tag_id)?,
            None => self.store.fetch_root_tags()?,
        };
        // children fetched late still carry whatever their ancestors were toggled with
        let activation = Weight::inherited_from(node.activation);
        let exclusion = Weight::inherited_from(node.exclusion);
        let children: Vec<NodeId> = rows
            .into_iter()
            .map(|tag| {
                let mut child = TagNode::new(Some(tag.id), tag.name, Some(id));
                child.activation = activation;
                child.exclusion = exclusion;
                self.push_node(child)
            })
            .collect();
        if let Some(node) = self.node_mut(id) {
            node.children = Some(children.clone());
        }
        Ok(children)
    }

    /// the children of the node if they've been fetched, without touching the store
    pub fn cached_children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.node(id).and_then(|n| n.children.as_deref())
    }

    pub fn has_fetched_children(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(TagNode::has_fetched_children)
    }

    /// whether the node has no children. Unfetched nodes ask the store for a count instead of
    /// loading the children
    pub fn is_leaf(&self, id: NodeId) -> Result<bool, StoreError> {
        let Some(node) = self.node(id) else {
            return Ok(true);
        };
        match (&node.children, node.id) {
            (Some(children), _) => Ok(children.is_empty()),
            (None, Some(tag_id)) => Ok(self.store.count_children(tag_id)? == 0),
            (None, None) => Ok(self.store.fetch_root_tags()?.is_empty()),
        }
    }

    /// drops every cached descendant of the node so the next [`TagTree::children`] call refetches them.
    /// Each dropped node is announced with [`TreeEvent::NodeDiscarded`], parents before children
    pub fn invalidate_children(&mut self, id: NodeId) {
        let Some(children) = self.node_mut(id).and_then(|n| n.children.take()) else {
            return;
        };
        for child in children {
            self.discard_subtree(child);
        }
    }

    fn discard_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) else {
            return;
        };
        self.emit(TreeEvent::NodeDiscarded {
            node: id,
            tag_id: node.id,
        });
        for child in node.children.unwrap_or_default() {
            self.discard_subtree(child);
        }
    }

    /// toggles the node as a search-include target, along with its whole subtree
    pub fn activate_node(&mut self, id: NodeId, on: bool) {
        self.toggle(id, Facet::Include, on)
    }

    /// toggles the node as a search-exclude target, along with its whole subtree
    pub fn exclude_node(&mut self, id: NodeId, on: bool) {
        self.toggle(id, Facet::Exclude, on)
    }

    /// adjusts the node's own weight by ±1 and the inherited weight of every cached descendant by the
    /// same amount. Descendants that haven't been fetched pick the weight up from their parent when
    /// they are
    pub fn toggle(&mut self, id: NodeId, facet: Facet, on: bool) {
        if !self.contains(id) {
            log::warn!("Cannot toggle discarded node {id:?}");
            return;
        }
        let mut descendants = Vec::new();
        self.collect_cached_descendants(id, &mut descendants);
        let delta = if on { 1 } else { -1 };
        if let Some(node) = self.node_mut(id) {
            node.weight_mut(facet).total += delta;
        }
        for descendant in descendants {
            if let Some(node) = self.node_mut(descendant) {
                let weight = node.weight_mut(facet);
                weight.total += delta;
                weight.inherited += delta;
            }
        }
    }

    /// the id of the node's tag plus the ids of every tag beneath it, fetching as needed
    pub fn subtree_ids(&mut self, id: NodeId) -> Result<Vec<u32>, StoreError> {
        let mut nodes = vec![id];
        self.collect_descendants(id, &mut nodes)?;
        Ok(nodes
            .into_iter()
            .filter_map(|n| self.tag_id(n))
            .unique()
            .collect())
    }

    /// pre-order walk of every descendant, fetching children along the way
    fn collect_descendants(&mut self, id: NodeId, found: &mut Vec<NodeId>) -> Result<(), StoreError> {
        for child in self.children(id)? {
            found.push(child);
            self.collect_descendants(child, found)?;
        }
        Ok(())
    }

    /// descends from the root following `lineage` (root-level tag id first), matching by id at every
    /// step. `None` if any step can't be matched
    pub fn resolve_lineage(&mut self, lineage: &[u32]) -> Result<Option<NodeId>, StoreError> {
        if lineage.is_empty() {
            return Ok(None);
        }
        let mut current = NodeId::ROOT;
        for tag_id in lineage {
            let children = self.children(current)?;
            match children.into_iter().find(|c| self.tag_id(*c) == Some(*tag_id)) {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// finds the node for a tag by asking the store where the tag lives now
    pub fn locate(&mut self, tag_id: u32) -> Result<Option<NodeId>, StoreError> {
        let lineage = self.store.fetch_tag_lineage(tag_id)?;
        self.resolve_lineage(&lineage)
    }

    /// true if `ancestor` sits anywhere above `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.node(id).and_then(TagNode::parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.node(parent).and_then(TagNode::parent);
        }
        false
    }

    /// names from the root-level tag down to the node
    pub fn path(&self, id: NodeId) -> Vec<String> {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current.and_then(|c| self.node(c)) {
            if node.id.is_some() {
                names.push(node.name.clone());
            }
            current = node.parent;
        }
        names.reverse();
        names
    }

    /// every fetched node that was toggled directly in `facet`, in tree order
    pub fn checked_nodes(&self, facet: Facet) -> Vec<NodeId> {
        let mut checked = Vec::new();
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            if node.weight(facet).is_self_set() {
                checked.push(id);
            }
            if let Some(children) = &node.children {
                stack.extend(children.iter().rev());
            }
        }
        checked
    }

    /// adds a freshly saved tag under `parent`, fetching the parent's children first
    pub(crate) fn attach_new_child(&mut self, parent: NodeId, tag: Tag) -> Result<NodeId, StoreError> {
        let siblings = self.children(parent)?;
        // the fetch above may already have picked the new tag up from the store
        if let Some(existing) = siblings.into_iter().find(|s| self.tag_id(*s) == Some(tag.id)) {
            return Ok(existing);
        }
        let mut child = TagNode::new(Some(tag.id), tag.name, Some(parent));
        if let Some(parent_node) = self.node(parent) {
            child.activation = Weight::inherited_from(parent_node.activation);
            child.exclusion = Weight::inherited_from(parent_node.exclusion);
        }
        // a brand new tag can't have children yet
        child.children = Some(Vec::new());
        let child = self.push_node(child);
        self.insert_sorted(parent, child);
        self.emit(TreeEvent::ChildAdded { parent, child });
        Ok(child)
    }

    /// hangs an existing node under `new_parent` without removing it from its old parent's children.
    /// Inherited weights of the moved subtree are re-based onto the new ancestry
    pub(crate) fn attach_existing(&mut self, id: NodeId, new_parent: NodeId) -> Result<(), StoreError> {
        self.children(new_parent)?;
        let old_parent = self.node(id).and_then(TagNode::parent);
        let activation_delta = self.inherited_total(Some(new_parent), Facet::Include)
            - self.inherited_total(old_parent, Facet::Include);
        let exclusion_delta = self.inherited_total(Some(new_parent), Facet::Exclude)
            - self.inherited_total(old_parent, Facet::Exclude);
        let mut moved = vec![id];
        self.collect_cached_descendants(id, &mut moved);
        for moved_id in moved {
            if let Some(node) = self.node_mut(moved_id) {
                node.activation.total += activation_delta;
                node.activation.inherited += activation_delta;
                node.exclusion.total += exclusion_delta;
                node.exclusion.inherited += exclusion_delta;
            }
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = Some(new_parent);
        }
        self.insert_sorted(new_parent, id);
        self.emit(TreeEvent::ChildAdded {
            parent: new_parent,
            child: id,
        });
        Ok(())
    }

    /// removes `id` from `old_parent`'s children. The node itself stays alive
    pub(crate) fn detach_from(&mut self, old_parent: NodeId, id: NodeId) {
        let removed = self
            .node_mut(old_parent)
            .and_then(|p| p.children.as_mut())
            .and_then(|children| {
                let position = children.iter().position(|c| *c == id)?;
                Some(children.remove(position))
            });
        if removed.is_some() {
            self.emit(TreeEvent::ChildRemoved {
                parent: old_parent,
                child: id,
            });
        }
    }

    /// detaches the node from its parent and discards it along with its cached subtree
    pub(crate) fn remove_node(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).and_then(TagNode::parent) {
            self.detach_from(parent, id);
        }
        self.discard_subtree(id);
    }

    pub(crate) fn set_name(&mut self, id: NodeId, name: &str) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        node.name = name.to_string();
        let parent = node.parent;
        // keep the sibling list sorted
        if let Some(parent) = parent {
            if let Some(children) = self.node_mut(parent).and_then(|p| p.children.as_mut()) {
                children.retain(|c| *c != id);
            }
            self.insert_sorted(parent, id);
        }
    }

    /// the weight a child of `parent` inherits in `facet`
    fn inherited_total(&self, parent: Option<NodeId>, facet: Facet) -> i32 {
        parent
            .and_then(|p| self.node(p))
            .map(|p| p.weight(facet).total)
            .unwrap_or(0)
    }

    fn collect_cached_descendants(&self, id: NodeId, found: &mut Vec<NodeId>) {
        for child in self.cached_children(id).unwrap_or_default() {
            found.push(*child);
            self.collect_cached_descendants(*child, found);
        }
    }

    fn push_node(&mut self, node: TagNode) -> NodeId {
        self.nodes.push(Some(node));
        NodeId(self.nodes.len() - 1)
    }

    /// inserts `child` into `parent`'s fetched children, keeping case-insensitive name order
    fn insert_sorted(&mut self, parent: NodeId, child: NodeId) {
        let key = self
            .node(child)
            .map(|n| n.name.to_lowercase())
            .unwrap_or_default();
        let Some(siblings) = self.cached_children(parent) else {
            return;
        };
        if siblings.contains(&child) {
            return;
        }
        let position = siblings
            .iter()
            .position(|s| self.node(*s).is_some_and(|n| n.name.to_lowercase() > key))
            .unwrap_or(siblings.len());
        if let Some(children) = self.node_mut(parent).and_then(|p| p.children.as_mut()) {
            children.insert(position, child);
        }
    }
}

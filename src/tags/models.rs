/// represents a tag in the Tags table of the database. The tag's position in the hierarchy lives in
/// the TagParents table and is represented in memory by [`TagNode`]
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Tag {
    /// the id of the tag
    pub id: u32,
    /// the display name of the tag
    pub name: String,
}

/// index of a node inside a [`crate::tags::TagTree`]. Indexes are never reused, so a `NodeId` for a
/// discarded node stays dead instead of silently pointing at a different tag
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub struct NodeId(pub(crate) usize);

/// the two independent search facets a node can be toggled in
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Facet {
    /// "include in results" toggles, tracked by the activation weight
    Include,
    /// "exclude from results" toggles, tracked by the exclusion weight
    Exclude,
}

/// a toggle counter. `total` counts every toggle that reaches the node, `inherited` only the ones that
/// arrived through an ancestor's subtree toggle
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub struct Weight {
    pub total: i32,
    pub inherited: i32,
}

impl Weight {
    /// the weight a freshly created child of a node with this weight starts with
    pub(crate) fn inherited_from(parent: Weight) -> Self {
        Self {
            total: parent.total,
            inherited: parent.total,
        }
    }

    pub fn is_set(&self) -> bool {
        self.total > 0
    }

    /// true when the node was toggled directly, not merely because an ancestor was
    pub fn is_self_set(&self) -> bool {
        self.total > self.inherited
    }
}

/// in-memory mirror of a [`Tag`] plus its search-selection state
#[derive(Debug, Clone)]
pub struct TagNode {
    /// `None` until the tag is saved. The synthetic root never gets one
    pub id: Option<u32>,
    pub name: String,
    pub(crate) parent: Option<NodeId>,
    /// `None` until the children have been fetched from the store
    pub(crate) children: Option<Vec<NodeId>>,
    pub(crate) activation: Weight,
    pub(crate) exclusion: Weight,
}

impl TagNode {
    pub(crate) fn new(id: Option<u32>, name: String, parent: Option<NodeId>) -> Self {
        Self {
            id,
            name,
            parent,
            children: None,
            activation: Weight::default(),
            exclusion: Weight::default(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn has_fetched_children(&self) -> bool {
        self.children.is_some()
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn activation_weight(&self) -> i32 {
        self.activation.total
    }

    pub fn parent_activation_weight(&self) -> i32 {
        self.activation.inherited
    }

    pub fn exclusion_weight(&self) -> i32 {
        self.exclusion.total
    }

    pub fn parent_exclusion_weight(&self) -> i32 {
        self.exclusion.inherited
    }

    pub fn is_active(&self) -> bool {
        self.activation.is_set()
    }

    pub fn is_self_activated(&self) -> bool {
        self.activation.is_self_set()
    }

    pub fn is_excluded(&self) -> bool {
        self.exclusion.is_set()
    }

    pub fn is_self_excluded(&self) -> bool {
        self.exclusion.is_self_set()
    }

    pub(crate) fn weight(&self, facet: Facet) -> Weight {
        match facet {
            Facet::Include => self.activation,
            Facet::Exclude => self.exclusion,
        }
    }

    pub(crate) fn weight_mut(&mut self, facet: Facet) -> &mut Weight {
        match facet {
            Facet::Include => &mut self.activation,
            Facet::Exclude => &mut self.exclusion,
        }
    }
}

/// two nodes are the same tag if both have been saved with the same id. Before saving, only the
/// names can be compared
impl PartialEq for TagNode {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.name == other.name,
        }
    }
}

/// structural changes broadcast to everyone subscribed to a tree
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum TreeEvent {
    ChildAdded { parent: NodeId, child: NodeId },
    ChildRemoved { parent: NodeId, child: NodeId },
    /// the node left the arena for good (its tag was deleted or its parent's cache was invalidated)
    NodeDiscarded { node: NodeId, tag_id: Option<u32> },
}

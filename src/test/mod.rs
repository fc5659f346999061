use std::cell::Cell;
use std::collections::VecDeque;

use crate::decisions::{Decisions, OrphanResolution};
use crate::files::FileRecord;
use crate::model::error::store_errors::StoreError;
use crate::repository::{SqliteStore, TagStore};
use crate::search::FileQuery;
use crate::tags::{NodeId, Tag, TagTree};

/// a freshly initialized database that only lives as long as the store
pub fn open_test_store() -> SqliteStore {
    SqliteStore::open_in_memory().unwrap()
}

/// saves a tag directly in the store, bypassing the tree. `parent` of `None` makes a root-level tag
pub fn create_tag_db_entry(store: &SqliteStore, name: &str, parent: Option<u32>) -> u32 {
    let id = store.insert_tag(name).unwrap();
    if let Some(parent) = parent {
        store.insert_tag_parent_link(parent, id).unwrap();
    }
    id
}

/// ids of the sample hierarchy built by [`create_sample_tags`]
pub struct SampleTags {
    pub animals: u32,
    pub places: u32,
    pub cats: u32,
    pub dogs: u32,
}

/// builds
/// ```text
/// Animals
///   Cats
///   Dogs
/// Places
/// ```
pub fn create_sample_tags(store: &SqliteStore) -> SampleTags {
    let animals = create_tag_db_entry(store, "Animals", None);
    let places = create_tag_db_entry(store, "Places", None);
    let dogs = create_tag_db_entry(store, "Dogs", Some(animals));
    let cats = create_tag_db_entry(store, "Cats", Some(animals));
    SampleTags {
        animals,
        places,
        cats,
        dogs,
    }
}

/// saves a file directly in the store with the passed tags, skipping every import check
pub fn create_file_db_entry(store: &SqliteStore, name: &str, tags: &[u32]) {
    create_file_db_entry_at(store, name, 0, tags);
}

pub fn create_file_db_entry_at(store: &SqliteStore, name: &str, created: i64, tags: &[u32]) {
    store.insert_file(name, created).unwrap();
    for tag in tags {
        store.add_file_tag(name, *tag).unwrap();
    }
}

/// walks the tree by names from the root, fetching children as it goes. Panics if a name is missing
pub fn find_node<S: TagStore + ?Sized>(tree: &mut TagTree<'_, S>, path: &[&str]) -> NodeId {
    let mut current = tree.root();
    for name in path {
        current = tree
            .children(current)
            .unwrap()
            .into_iter()
            .find(|c| tree.node(*c).unwrap().name == *name)
            .unwrap_or_else(|| panic!("no tag named {name} under {:?}", tree.path(current)));
    }
    current
}

/// names of the fetched children of `node`, in order
pub fn child_names<S: TagStore + ?Sized>(tree: &mut TagTree<'_, S>, node: NodeId) -> Vec<String> {
    tree.children(node)
        .unwrap()
        .into_iter()
        .map(|c| tree.node(c).unwrap().name.clone())
        .collect()
}

/// A prompt that was put to [`ScriptedDecisions`]
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Prompt {
    LeafPromotion {
        parent: String,
        child: String,
        files: Vec<String>,
    },
    Orphans {
        tag: String,
        files: Vec<String>,
    },
    Replacement {
        tag: String,
        files: Vec<String>,
    },
}

/// Answers prompts from queues filled in by the test, and records every prompt it sees.
///
/// Running out of answers panics, so a test fails loudly when an unexpected prompt shows up
#[derive(Default)]
pub struct ScriptedDecisions {
    pub promotions: VecDeque<bool>,
    pub orphans: VecDeque<OrphanResolution>,
    pub replacements: VecDeque<Option<u32>>,
    pub prompts: Vec<Prompt>,
}

impl ScriptedDecisions {
    /// answers nothing; any prompt fails the test
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn promoting(answers: &[bool]) -> Self {
        Self {
            promotions: answers.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn resolving(answers: &[OrphanResolution]) -> Self {
        Self {
            orphans: answers.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn retagging(replacement: Option<u32>) -> Self {
        Self {
            orphans: VecDeque::from([OrphanResolution::Retag]),
            replacements: VecDeque::from([replacement]),
            ..Self::default()
        }
    }
}

impl Decisions for ScriptedDecisions {
    fn confirm_leaf_promotion(&mut self, parent: &str, child: &str, files: &[String]) -> bool {
        self.prompts.push(Prompt::LeafPromotion {
            parent: parent.to_string(),
            child: child.to_string(),
            files: files.to_vec(),
        });
        self.promotions
            .pop_front()
            .expect("unexpected leaf promotion prompt")
    }

    fn resolve_orphans(&mut self, tag: &str, files: &[String]) -> OrphanResolution {
        self.prompts.push(Prompt::Orphans {
            tag: tag.to_string(),
            files: files.to_vec(),
        });
        self.orphans.pop_front().expect("unexpected orphan prompt")
    }

    fn choose_replacement_tag(&mut self, tag: &str, files: &[String]) -> Option<u32> {
        self.prompts.push(Prompt::Replacement {
            tag: tag.to_string(),
            files: files.to_vec(),
        });
        self.replacements
            .pop_front()
            .expect("unexpected replacement prompt")
    }
}

/// [`TagStore`] over a fresh [`SqliteStore`] where one method can be made to fail on demand.
///
/// Fixtures are built through [`FailingStore::inner`], then [`FailingStore::fail`] picks the method
/// (by its trait name) that returns [`StoreError::Query`] from then on
pub struct FailingStore {
    pub inner: SqliteStore,
    failing: Cell<Option<&'static str>>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self {
            inner: open_test_store(),
            failing: Cell::new(None),
        }
    }

    pub fn fail(&self, method: &'static str) {
        self.failing.set(Some(method));
    }

    pub fn recover(&self) {
        self.failing.set(None);
    }

    fn check(&self, method: &str) -> Result<(), StoreError> {
        match self.failing.get() {
            Some(failing) if failing == method => {
                Err(StoreError::Query(format!("{method} failed on purpose")))
            }
            _ => Ok(()),
        }
    }
}

impl TagStore for FailingStore {
    fn fetch_root_tags(&self) -> Result<Vec<Tag>, StoreError> {
        self.check("fetch_root_tags")?;
        self.inner.fetch_root_tags()
    }

    fn fetch_child_tags(&self, parent_id: u32) -> Result<Vec<Tag>, StoreError> {
        self.check("fetch_child_tags")?;
        self.inner.fetch_child_tags(parent_id)
    }

    fn count_children(&self, tag_id: u32) -> Result<u32, StoreError> {
        self.check("count_children")?;
        self.inner.count_children(tag_id)
    }

    fn get_tag(&self, id: u32) -> Result<Option<Tag>, StoreError> {
        self.check("get_tag")?;
        self.inner.get_tag(id)
    }

    fn insert_tag(&self, name: &str) -> Result<u32, StoreError> {
        self.check("insert_tag")?;
        self.inner.insert_tag(name)
    }

    fn insert_tag_parent_link(&self, parent_id: u32, child_id: u32) -> Result<(), StoreError> {
        self.check("insert_tag_parent_link")?;
        self.inner.insert_tag_parent_link(parent_id, child_id)
    }

    fn delete_tag_parent_link(&self, child_id: u32) -> Result<(), StoreError> {
        self.check("delete_tag_parent_link")?;
        self.inner.delete_tag_parent_link(child_id)
    }

    fn update_tag_parent_link(&self, child_id: u32, new_parent_id: u32) -> Result<(), StoreError> {
        self.check("update_tag_parent_link")?;
        self.inner.update_tag_parent_link(child_id, new_parent_id)
    }

    fn tag_parent_link_exists(&self, child_id: u32) -> Result<bool, StoreError> {
        self.check("tag_parent_link_exists")?;
        self.inner.tag_parent_link_exists(child_id)
    }

    fn rename_tag(&self, id: u32, new_name: &str) -> Result<(), StoreError> {
        self.check("rename_tag")?;
        self.inner.rename_tag(id, new_name)
    }

    fn delete_tag(&self, id: u32) -> Result<(), StoreError> {
        self.check("delete_tag")?;
        self.inner.delete_tag(id)
    }

    fn fetch_tag_lineage(&self, id: u32) -> Result<Vec<u32>, StoreError> {
        self.check("fetch_tag_lineage")?;
        self.inner.fetch_tag_lineage(id)
    }

    fn files_uniquely_tagged_with(&self, tag_id: u32) -> Result<Vec<String>, StoreError> {
        self.check("files_uniquely_tagged_with")?;
        self.inner.files_uniquely_tagged_with(tag_id)
    }

    fn files_tagged_with(&self, tag_id: u32) -> Result<Vec<String>, StoreError> {
        self.check("files_tagged_with")?;
        self.inner.files_tagged_with(tag_id)
    }

    fn insert_file(&self, name: &str, created: i64) -> Result<u32, StoreError> {
        self.check("insert_file")?;
        self.inner.insert_file(name, created)
    }

    fn get_file(&self, name: &str) -> Result<Option<FileRecord>, StoreError> {
        self.check("get_file")?;
        self.inner.get_file(name)
    }

    fn fetch_file_tags(&self, file_name: &str) -> Result<Vec<u32>, StoreError> {
        self.check("fetch_file_tags")?;
        self.inner.fetch_file_tags(file_name)
    }

    fn add_file_tag(&self, file_name: &str, tag_id: u32) -> Result<(), StoreError> {
        self.check("add_file_tag")?;
        self.inner.add_file_tag(file_name, tag_id)
    }

    fn remove_file_tag(&self, file_name: &str, tag_id: u32) -> Result<(), StoreError> {
        self.check("remove_file_tag")?;
        self.inner.remove_file_tag(file_name, tag_id)
    }

    fn query_files(&self, query: &FileQuery) -> Result<Vec<String>, StoreError> {
        self.check("query_files")?;
        self.inner.query_files(query)
    }

    fn delete_file(&self, file_name: &str) -> Result<(), StoreError> {
        self.check("delete_file")?;
        self.inner.delete_file(file_name)
    }

    fn rename_file(&self, old_name: &str, new_name: &str) -> Result<(), StoreError> {
        self.check("rename_file")?;
        self.inner.rename_file(old_name, new_name)
    }
}

use crate::decisions::{Decisions, OrphanResolution};
use crate::model::error::store_errors::StoreError;
use crate::model::error::tag_errors::{
    CreateTagError, DeleteTagError, RenameTagError, ReparentTagError,
};
use crate::repository::TagStore;
use crate::tags::validation::{is_valid_tag_name, same_name};
use crate::tags::{NodeId, Tag, TagTree};

/// files that have to move off a leaf tag once it gets its first child
struct Promotion {
    parent_id: u32,
    files: Vec<String>,
}

enum PromotionCheck {
    NotNeeded,
    Accepted(Promotion),
    Declined,
}

/// creates a tag named `name` under `parent` (which may be the root) and returns its node.
///
/// If `parent` is a leaf with files on it, the user has to agree to move those files onto the new tag
/// first, since files may only carry leaf tags
pub fn create_tag<S: TagStore + ?Sized, D: Decisions>(
    tree: &mut TagTree<'_, S>,
    parent: NodeId,
    name: &str,
    decisions: &mut D,
) -> Result<NodeId, CreateTagError> {
    if !is_valid_tag_name(name) {
        log::warn!("Refusing to create a tag with the invalid name {name:?}");
        return Err(CreateTagError::InvalidName);
    }
    if !tree.contains(parent) {
        log::error!("Cannot create tag {name} under {parent:?}, because that node no longer exists");
        return Err(CreateTagError::ParentNotFound);
    }
    if find_sibling_named(tree, parent, name, None)?.is_some() {
        log::warn!(
            "Cannot create tag {name} under {:?}, because a sibling already has that name",
            tree.path(parent)
        );
        return Err(CreateTagError::DuplicateName);
    }
    let promotion = match check_leaf_promotion(tree, parent, name, decisions)? {
        PromotionCheck::NotNeeded => None,
        PromotionCheck::Accepted(promotion) => Some(promotion),
        PromotionCheck::Declined => return Err(CreateTagError::Declined),
    };
    let store = tree.store();
    let id = store.insert_tag(name)?;
    if let Some(parent_id) = tree.tag_id(parent) {
        if let Err(e) = store.insert_tag_parent_link(parent_id, id) {
            // an unlinked tag would show up at the root
            if store.delete_tag(id).is_err() {
                log::error!("Tag {id} was saved without its parent link and could not be removed");
            }
            return Err(e.into());
        }
    }
    let node = tree.attach_new_child(
        parent,
        Tag {
            id,
            name: name.to_string(),
        },
    )?;
    if let Some(promotion) = promotion {
        apply_promotion(store, &promotion, id)?;
    }
    log::info!("Created tag {:?} with id {id}", tree.path(node));
    Ok(node)
}

/// renames the tag behind `node`. Nothing moves in the hierarchy
pub fn rename_tag<S: TagStore + ?Sized>(
    tree: &mut TagTree<'_, S>,
    node: NodeId,
    name: &str,
) -> Result<(), RenameTagError> {
    let Some(current) = tree.node(node) else {
        log::error!("Cannot rename {node:?}, because that node no longer exists");
        return Err(RenameTagError::TagNotFound);
    };
    let Some(id) = current.id else {
        log::error!("Cannot rename a tag that has never been saved");
        return Err(RenameTagError::TagNotPersisted);
    };
    let parent = current.parent();
    if !is_valid_tag_name(name) {
        log::warn!("Refusing to rename tag {id} to the invalid name {name:?}");
        return Err(RenameTagError::InvalidName);
    }
    if let Some(parent) = parent {
        if find_sibling_named(tree, parent, name, Some(node))?.is_some() {
            log::warn!("Cannot rename tag {id} to {name}, because a sibling already has that name");
            return Err(RenameTagError::DuplicateName);
        }
    }
    tree.store().rename_tag(id, name)?;
    tree.set_name(node, name);
    log::info!("Renamed tag {id} to {name}");
    Ok(())
}

/// moves `node` (and everything under it) beneath `new_parent`.
///
/// The node is attached to its new parent before it is detached from the old one, so anyone listening
/// for the removal can already find it in its new place
pub fn reparent_tag<S: TagStore + ?Sized, D: Decisions>(
    tree: &mut TagTree<'_, S>,
    node: NodeId,
    new_parent: NodeId,
    decisions: &mut D,
) -> Result<(), ReparentTagError> {
    let Some(current) = tree.node(node) else {
        log::error!("Cannot move {node:?}, because that node no longer exists");
        return Err(ReparentTagError::TagNotFound);
    };
    let Some(id) = current.id else {
        log::error!("Cannot move a tag that has never been saved");
        return Err(ReparentTagError::TagNotPersisted);
    };
    let name = current.name.clone();
    let Some(old_parent) = current.parent() else {
        return Err(ReparentTagError::InvalidParent);
    };
    if !tree.contains(new_parent) {
        log::error!("Cannot move tag {id} under {new_parent:?}, because that node no longer exists");
        return Err(ReparentTagError::TagNotFound);
    }
    if new_parent == node || tree.is_ancestor(node, new_parent) {
        log::warn!("Cannot move tag {id} underneath itself");
        return Err(ReparentTagError::InvalidParent);
    }
    if new_parent == old_parent {
        return Ok(());
    }
    if find_sibling_named(tree, new_parent, &name, Some(node))?.is_some() {
        log::warn!(
            "Cannot move tag {name} under {:?}, because a tag with that name is already there",
            tree.path(new_parent)
        );
        return Err(ReparentTagError::DuplicateName);
    }
    let promotion = match check_leaf_promotion(tree, new_parent, &name, decisions)? {
        PromotionCheck::NotNeeded => None,
        PromotionCheck::Accepted(promotion) => Some(promotion),
        PromotionCheck::Declined => return Err(ReparentTagError::Declined),
    };

    tree.attach_existing(node, new_parent)?;
    let store = tree.store();
    match tree.tag_id(new_parent) {
        // root-level tags have no parent row at all
        None => store.delete_tag_parent_link(id)?,
        Some(parent_id) => {
            if store.tag_parent_link_exists(id)? {
                store.update_tag_parent_link(id, parent_id)?;
            } else {
                store.insert_tag_parent_link(parent_id, id)?;
            }
        }
    }
    if let Some(promotion) = promotion {
        apply_promotion(store, &promotion, id)?;
    }
    tree.detach_from(old_parent, node);
    log::info!("Moved tag {id} to {:?}", tree.path(node));
    Ok(())
}

/// deletes the tag behind `node` and everything under it.
///
/// Children go first, depth-first and last child first. The first child that can't be deleted stops
/// the cascade, and its error is returned. Before each tag is deleted, files that would be left without
/// any tag are resolved through `decisions`
pub fn delete_tag<S: TagStore + ?Sized, D: Decisions>(
    tree: &mut TagTree<'_, S>,
    node: NodeId,
    decisions: &mut D,
) -> Result<(), DeleteTagError> {
    let Some(current) = tree.node(node) else {
        log::error!("Cannot delete {node:?}, because that node no longer exists");
        return Err(DeleteTagError::TagNotFound);
    };
    let Some(id) = current.id else {
        log::error!("Cannot delete a tag that has never been saved");
        return Err(DeleteTagError::TagNotPersisted);
    };
    let name = current.name.clone();
    for child in tree.children(node)?.into_iter().rev() {
        if let Err(e) = delete_tag(tree, child, decisions) {
            log::info!("Stopped deleting tag {name}, because one of its children was not deleted ({e:?})");
            return Err(e);
        }
    }

    let store = tree.store();
    let orphans = store.files_uniquely_tagged_with(id)?;
    if !orphans.is_empty() {
        match decisions.resolve_orphans(&name, &orphans) {
            OrphanResolution::Cancel => {
                log::info!("User cancelled deleting tag {name}");
                return Err(DeleteTagError::Declined);
            }
            OrphanResolution::DeleteFiles => {
                for file in orphans.iter() {
                    store.delete_file(file)?;
                }
                log::info!("Deleted {} files only tagged with {name}", orphans.len());
            }
            OrphanResolution::Retag => {
                let Some(replacement) = decisions.choose_replacement_tag(&name, &orphans) else {
                    log::info!("User did not pick a replacement for tag {name}");
                    return Err(DeleteTagError::Declined);
                };
                check_replacement(store, id, replacement)?;
                for file in orphans.iter() {
                    store.add_file_tag(file, replacement)?;
                    store.remove_file_tag(file, id)?;
                }
                log::info!(
                    "Moved {} files from tag {name} to tag {replacement}",
                    orphans.len()
                );
            }
        }
    }
    store.delete_tag(id)?;
    tree.remove_node(node);
    log::info!("Deleted tag {name} ({id})");
    Ok(())
}

/// looks through the children of `parent` for one named `name`, case-insensitively, skipping `except`
fn find_sibling_named<S: TagStore + ?Sized>(
    tree: &mut TagTree<'_, S>,
    parent: NodeId,
    name: &str,
    except: Option<NodeId>,
) -> Result<Option<NodeId>, StoreError> {
    let siblings = tree.children(parent)?;
    Ok(siblings.into_iter().find(|sibling| {
        Some(*sibling) != except
            && tree
                .node(*sibling)
                .is_some_and(|n| same_name(&n.name, name))
    }))
}

/// decides whether `parent` getting its first child means files have to move, and if so asks the user
fn check_leaf_promotion<S: TagStore + ?Sized, D: Decisions>(
    tree: &TagTree<'_, S>,
    parent: NodeId,
    child_name: &str,
    decisions: &mut D,
) -> Result<PromotionCheck, StoreError> {
    // root-level tags don't put files on the root
    let Some(parent_id) = tree.tag_id(parent) else {
        return Ok(PromotionCheck::NotNeeded);
    };
    if !tree.is_leaf(parent)? {
        return Ok(PromotionCheck::NotNeeded);
    }
    let files = tree.store().files_tagged_with(parent_id)?;
    if files.is_empty() {
        return Ok(PromotionCheck::NotNeeded);
    }
    let parent_name = tree
        .node(parent)
        .map(|n| n.name.clone())
        .unwrap_or_default();
    if decisions.confirm_leaf_promotion(&parent_name, child_name, &files) {
        Ok(PromotionCheck::Accepted(Promotion { parent_id, files }))
    } else {
        log::info!("User declined moving {} files from {parent_name} to {child_name}", files.len());
        Ok(PromotionCheck::Declined)
    }
}

/// moves every promoted file onto the new child. The new tag goes on before the old one comes off so
/// a file is never left without tags in between
fn apply_promotion<S: TagStore + ?Sized>(
    store: &S,
    promotion: &Promotion,
    child_id: u32,
) -> Result<(), StoreError> {
    for file in promotion.files.iter() {
        store.add_file_tag(file, child_id)?;
        store.remove_file_tag(file, promotion.parent_id)?;
    }
    Ok(())
}

/// orphaned files may only move to a different, existing leaf tag
fn check_replacement<S: TagStore + ?Sized>(
    store: &S,
    deleted_id: u32,
    replacement: u32,
) -> Result<(), DeleteTagError> {
    if replacement == deleted_id {
        log::warn!("Tag {deleted_id} can't replace itself");
        return Err(DeleteTagError::InvalidReplacement);
    }
    if store.get_tag(replacement)?.is_none() {
        log::warn!("Replacement tag {replacement} does not exist");
        return Err(DeleteTagError::InvalidReplacement);
    }
    if store.count_children(replacement)? > 0 {
        log::warn!("Replacement tag {replacement} has children, and files may only be on leaf tags");
        return Err(DeleteTagError::InvalidReplacement);
    }
    Ok(())
}

use std::path::Path;
use std::process::ExitCode;

use media_tagger::config::MEDIA_TAGGER_CONFIG;
use media_tagger::logging::setup_logger;
use media_tagger::model::error::store_errors::StoreError;
use media_tagger::repository::{SqliteStore, TagStore};
use media_tagger::tags::{NodeId, TagTree};

fn main() -> ExitCode {
    if let Err(e) = setup_logger(&MEDIA_TAGGER_CONFIG.logging) {
        eprintln!("Failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }
    let location = Path::new(&MEDIA_TAGGER_CONFIG.database.location);
    let store = match SqliteStore::open(location) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to open the tag database at {location:?}: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut tree = TagTree::new(&store);
    let root = tree.root();
    match print_tags(&mut tree, root, 0) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Failed to read the tag hierarchy: {e}");
            ExitCode::FAILURE
        }
    }
}

/// prints every tag under `node`, indented by depth
fn print_tags<S: TagStore + ?Sized>(
    tree: &mut TagTree<'_, S>,
    node: NodeId,
    depth: usize,
) -> Result<(), StoreError> {
    for child in tree.children(node)? {
        if let Some(tag) = tree.node(child) {
            println!("{}{}", "  ".repeat(depth), tag.name);
        }
        print_tags(tree, child, depth + 1)?;
    }
    Ok(())
}

use rusqlite::{Connection, OptionalExtension};

use crate::tags::Tag;

/// retrieves every tag without a parent link, ordered case-insensitively by name
pub fn get_root_tags(con: &Connection) -> Result<Vec<Tag>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_root_tags.sql"))?;
    let rows = pst.query_map([], tag_mapper)?;
    rows.collect::<Result<Vec<Tag>, rusqlite::Error>>()
}

/// retrieves the direct children of the tag with the passed id, ordered case-insensitively by name
pub fn get_child_tags(parent_id: u32, con: &Connection) -> Result<Vec<Tag>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_child_tags.sql"))?;
    let rows = pst.query_map(rusqlite::params![parent_id], tag_mapper)?;
    rows.collect::<Result<Vec<Tag>, rusqlite::Error>>()
}

pub fn count_children(tag_id: u32, con: &Connection) -> Result<u32, rusqlite::Error> {
    con.query_row(
        include_str!("../assets/queries/tags/count_children.sql"),
        rusqlite::params![tag_id],
        |row| row.get(0),
    )
}

/// retrieves the tag with the passed `id`, or `None` if there isn't one
pub fn get_tag(id: u32, con: &Connection) -> Result<Option<Tag>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_by_id.sql"))?;
    pst.query_row(rusqlite::params![id], tag_mapper).optional()
}

/// creates a new tag in the database and returns its id. This does not check for sibling name
/// collisions, so the caller must check that themselves
pub fn create_tag(name: &str, con: &Connection) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/create_tag.sql"))?;
    let id = pst.insert(rusqlite::params![name])? as u32;
    Ok(id)
}

pub fn rename_tag(id: u32, name: &str, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/rename_tag.sql"))?;
    pst.execute(rusqlite::params![name, id])?;
    Ok(())
}

/// deletes the tag. Foreign keys take its parent link, child links and file links with it
pub fn delete_tag(id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/delete_tag.sql"))?;
    pst.execute(rusqlite::params![id])?;
    Ok(())
}

pub fn add_parent_link(parent_id: u32, child_id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/add_parent_link.sql"))?;
    pst.execute(rusqlite::params![parent_id, child_id])?;
    Ok(())
}

pub fn update_parent_link(
    child_id: u32,
    new_parent_id: u32,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/update_parent_link.sql"))?;
    pst.execute(rusqlite::params![child_id, new_parent_id])?;
    Ok(())
}

pub fn delete_parent_link(child_id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/delete_parent_link.sql"))?;
    pst.execute(rusqlite::params![child_id])?;
    Ok(())
}

pub fn parent_link_exists(child_id: u32, con: &Connection) -> Result<bool, rusqlite::Error> {
    con.query_row(
        include_str!("../assets/queries/tags/parent_link_exists.sql"),
        rusqlite::params![child_id],
        |row| row.get(0),
    )
}

/// walks the parent links up from `id` and returns the chain of ids starting at the root-level tag
/// and ending with `id` itself. Empty if the tag doesn't exist
pub fn get_lineage(id: u32, con: &Connection) -> Result<Vec<u32>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_lineage.sql"))?;
    let rows = pst.query_map(rusqlite::params![id], |row| row.get(0))?;
    rows.collect::<Result<Vec<u32>, rusqlite::Error>>()
}

/// maps a [`Tag`] from a database row
fn tag_mapper(row: &rusqlite::Row) -> Result<Tag, rusqlite::Error> {
    let id: u32 = row.get(0)?;
    let name: String = row.get(1)?;
    Ok(Tag { id, name })
}

use itertools::Itertools;
use rusqlite::{Connection, OptionalExtension};

use crate::files::FileRecord;
use crate::search::{FileQuery, SortMethod};

/// creates a new file record and returns its id. Name collisions are rejected by the unique index
pub fn create_file(name: &str, created: i64, con: &Connection) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/files/create_file.sql"))?;
    let id = pst.insert(rusqlite::params![name, created])? as u32;
    Ok(id)
}

/// searches for a file that case-insensitively matches the passed name.
///
/// if `None` is returned, that means there was no match
pub fn get_file_by_name(name: &str, con: &Connection) -> Result<Option<FileRecord>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/files/get_by_name.sql"))?;
    pst.query_row(rusqlite::params![name], file_mapper).optional()
}

/// removes the file. Its tag links go with it
pub fn delete_file(name: &str, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/files/delete_file.sql"))?;
    pst.execute(rusqlite::params![name])?;
    Ok(())
}

pub fn rename_file(old_name: &str, new_name: &str, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/files/rename_file.sql"))?;
    pst.execute(rusqlite::params![old_name, new_name])?;
    Ok(())
}

pub fn get_tags_on_file(name: &str, con: &Connection) -> Result<Vec<u32>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/files/get_tags_for_file.sql"))?;
    let rows = pst.query_map(rusqlite::params![name], |row| row.get(0))?;
    rows.collect::<Result<Vec<u32>, rusqlite::Error>>()
}

/// the caller of this function will need to make sure the tag exists. Adding a tag that's already on
/// the file, or adding to a file that doesn't exist, does nothing
pub fn add_tag_to_file(name: &str, tag_id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/files/add_tag_to_file.sql"))?;
    pst.execute(rusqlite::params![name, tag_id])?;
    Ok(())
}

pub fn remove_tag_from_file(name: &str, tag_id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/files/remove_tag_from_file.sql"
    ))?;
    pst.execute(rusqlite::params![name, tag_id])?;
    Ok(())
}

/// names of every file that has the tag with the passed id
pub fn get_files_with_tag(tag_id: u32, con: &Connection) -> Result<Vec<String>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/files/get_files_for_tag.sql"))?;
    let rows = pst.query_map(rusqlite::params![tag_id], |row| row.get(0))?;
    rows.collect::<Result<Vec<String>, rusqlite::Error>>()
}

/// names of every file whose _only_ tag is the one with the passed id
pub fn get_files_with_only_tag(tag_id: u32, con: &Connection) -> Result<Vec<String>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/files/get_files_only_for_tag.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![tag_id], |row| row.get(0))?;
    rows.collect::<Result<Vec<String>, rusqlite::Error>>()
}

/// runs the passed query. Every id list becomes an `in` clause; ids are integers so they can be
/// formatted straight into the statement
pub fn search_files(query: &FileQuery, con: &Connection) -> Result<Vec<String>, rusqlite::Error> {
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let mut conditions: Vec<String> = Vec::new();
    if !query.excluded.is_empty() {
        conditions.push(format!(
            "not exists (select 1 from FileTags ft where ft.fileId = f.id and ft.tagId in ({}))",
            in_clause(&query.excluded)
        ));
    }
    if !query.any_of.is_empty() {
        conditions.push(has_tag_in(&query.any_of));
    }
    for dimension in query.all_of.iter() {
        conditions.push(has_tag_in(dimension));
    }
    let order = match query.sort {
        SortMethod::Name => "f.name asc",
        SortMethod::Age => "f.created asc, f.id asc",
        SortMethod::ImportOrder => "f.id asc",
        SortMethod::Random => "random()",
    };
    let sql = format!(
        "{}where {}\norder by {order}",
        include_str!("../assets/queries/files/search_files.sql"),
        conditions.join("\n  and ")
    );
    let mut pst = con.prepare(&sql)?;
    let rows = pst.query_map([], |row| row.get(0))?;
    rows.collect::<Result<Vec<String>, rusqlite::Error>>()
}

fn has_tag_in(ids: &[u32]) -> String {
    // an empty dimension can't be satisfied by anything
    if ids.is_empty() {
        return "0 = 1".to_string();
    }
    format!(
        "exists (select 1 from FileTags ft where ft.fileId = f.id and ft.tagId in ({}))",
        in_clause(ids)
    )
}

fn in_clause(ids: &[u32]) -> String {
    ids.iter().unique().join(",")
}

/// 1. id
/// 2. name
/// 3. created
fn file_mapper(row: &rusqlite::Row) -> Result<FileRecord, rusqlite::Error> {
    let id: u32 = row.get(0)?;
    let name: String = row.get(1)?;
    let created: i64 = row.get(2)?;
    Ok(FileRecord {
        id: Some(id),
        name,
        created,
    })
}

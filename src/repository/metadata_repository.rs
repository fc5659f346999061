use rusqlite::{Connection, OptionalExtension};

/// the schema version recorded in the Metadata table. `None` if the row was never written; fails if the
/// table itself is missing
pub fn get_version(con: &Connection) -> Result<Option<String>, rusqlite::Error> {
    con.query_row(
        include_str!("../assets/queries/metadata/get_database_version.sql"),
        [],
        |row| row.get(0),
    )
    .optional()
}

/// records `version`, replacing whatever was there
pub fn set_version(version: &str, con: &Connection) -> Result<(), rusqlite::Error> {
    con.execute(
        include_str!("../assets/queries/metadata/set_database_version.sql"),
        rusqlite::params![version],
    )?;
    Ok(())
}

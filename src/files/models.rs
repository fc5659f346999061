/// represents a file in the Files table of the database. Only the database side of the managed
/// folder is tracked here; the bytes on disk are handled elsewhere
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FileRecord {
    /// `None` until the file has been imported
    pub id: Option<u32>,
    /// unique (case-insensitive) within the managed folder
    pub name: String,
    /// creation time in seconds since the unix epoch
    pub created: i64,
}

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Deserialize;

/// how a search result is ordered
#[derive(Deserialize, Debug, Eq, PartialEq, Hash, Copy, Clone, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortMethod {
    /// lexicographic by file name
    #[default]
    Name,
    /// oldest creation time first
    Age,
    /// the order the files were imported in
    ImportOrder,
    /// no particular order
    Random,
}

impl FromStr for SortMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "name" => Ok(Self::Name),
            "age" => Ok(Self::Age),
            "import_order" => Ok(Self::ImportOrder),
            "random" => Ok(Self::Random),
            other => Err(format!("{other} is not a sort method")),
        }
    }
}

impl Display for SortMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::ImportOrder => "import_order",
            Self::Random => "random",
        };
        f.write_str(name)
    }
}

/// whether a file has to match any selected tag, or every selected branch
#[derive(Deserialize, Debug, Eq, PartialEq, Hash, Copy, Clone, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    Any,
    All,
}

/// the user's current search inputs, apart from the tag selection itself
#[derive(Deserialize, Debug, Eq, PartialEq, Copy, Clone)]
pub struct SearchOptions {
    pub mode: MatchMode,
    pub exclusion_enabled: bool,
    pub sort: SortMethod,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            mode: MatchMode::Any,
            exclusion_enabled: true,
            sort: SortMethod::Name,
        }
    }
}

/// a store-level file lookup: tag ids only, with every subtree already expanded
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct FileQuery {
    /// a file matches if it has at least one of these tags. Ignored when empty
    pub any_of: Vec<u32>,
    /// a file matches only if it has at least one tag inside _each_ of these sets
    pub all_of: Vec<Vec<u32>>,
    /// a file with any of these tags never matches
    pub excluded: Vec<u32>,
    pub sort: SortMethod,
}

impl FileQuery {
    /// true if the query has no inclusion criteria, which matches nothing
    pub fn is_empty(&self) -> bool {
        self.any_of.is_empty() && self.all_of.is_empty()
    }
}

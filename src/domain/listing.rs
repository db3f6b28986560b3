//! Column vocabulary shared by the paginated list views.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ordering direction of a sorted column.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// A column of a list view that can be addressed from the query string.
///
/// Implementors map query-string keys to the typed column the repository
/// knows how to filter and order by. Keys that do not resolve are ignored by
/// the list gateway.
pub trait ListColumn: Copy + Eq + std::fmt::Debug + Send + Sync + 'static {
    /// Every column in display order.
    const ALL: &'static [Self];

    /// Query-string key of the column.
    fn key(self) -> &'static str;

    /// Whether the column accepts a prefix filter.
    fn is_filterable(self) -> bool;

    /// Whether the column can be used for ordering.
    fn is_sortable(self) -> bool {
        true
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|column| column.key() == key)
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Default page size used by the original app.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Pagination bookkeeping for one browsing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Number of raw items consumed from the remote source so far.
    pub offset: u32,
    pub limit: u32,
    pub total_count: u32,
}

impl PageWindow {
    pub fn new(limit: u32) -> Self {
        Self {
            offset: 0,
            limit: limit.max(1),
            total_count: 0,
        }
    }

    pub fn reset(&mut self) {
        self.offset = 0;
        self.total_count = 0;
    }

    pub fn has_more(&self) -> bool {
        self.offset < self.total_count
    }
}

/// Client-side view filter. Never affects what has been fetched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub selected_types: BTreeSet<String>,
    #[serde(default)]
    pub favorites_only: bool,
}

impl FilterCriteria {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            ..Self::default()
        }
    }

    pub fn types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected_types: types.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn favorites() -> Self {
        Self {
            favorites_only: true,
            ..Self::default()
        }
    }

    /// Search text with surrounding whitespace removed.
    pub fn query(&self) -> &str {
        self.search_text.trim()
    }

    /// True when any criterion narrows the view.
    pub fn is_active(&self) -> bool {
        !self.query().is_empty() || !self.selected_types.is_empty() || self.favorites_only
    }
}

/// Ordering applied to the rendered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    ById,
    ByNameAscending,
    ByNameDescending,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById => write!(f, "id"),
            Self::ByNameAscending => write!(f, "name"),
            Self::ByNameDescending => write!(f, "name-desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" | "by_id" => Ok(Self::ById),
            "name" | "name-asc" | "by_name_ascending" => Ok(Self::ByNameAscending),
            "name-desc" | "by_name_descending" => Ok(Self::ByNameDescending),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// How `selected_types` is intersected with an item's type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeMatch {
    /// Keep items carrying at least one selected type.
    #[default]
    Any,
    /// Keep items carrying every selected type.
    All,
}

impl fmt::Display for TypeMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::All => write!(f, "all"),
        }
    }
}

impl FromStr for TypeMatch {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "all" => Ok(Self::All),
            other => Err(format!("unknown type match mode: {other}")),
        }
    }
}

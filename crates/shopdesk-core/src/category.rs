use serde::{Deserialize, Serialize};

pub type CategoryId = u64;

/// A category as the backend returns it: flat, with an optional pointer to
/// its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: CategoryId,
    /// `None` marks a root. A parent id missing from the dataset is also
    /// rendered as a root.
    #[serde(default, alias = "parent_id")]
    pub parent_id: Option<CategoryId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

impl CategoryRecord {
    /// Returns `true` if `name` or `slug` contains `needle`.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.slug.to_lowercase().contains(needle)
    }
}

/// A category placed in the forest, owning its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub record: CategoryRecord,
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    #[must_use]
    pub fn new(record: CategoryRecord) -> Self {
        Self {
            record,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// One row of a depth-first walk over a forest, e.g. an indented option in a
/// parent-category picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatCategory {
    pub id: CategoryId,
    pub parent_id: Option<CategoryId>,
    pub name: String,
    pub slug: String,
    /// Zero for roots.
    pub depth: usize,
}

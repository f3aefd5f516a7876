//! University Record
//!
//! One row of the catalog. Immutable after load.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Separator inside the `tags` field.
pub const TAG_SEPARATOR: char = ';';

/// A university in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    name: String,
    current_rank: u32,
    highest_rank: u32,
    state: String,
    tags: String,
    website: String,
}

impl University {
    /// Create a university record. Ranks are expected to be positive.
    pub fn new(
        name: impl Into<String>,
        current_rank: u32,
        highest_rank: u32,
        state: impl Into<String>,
        tags: impl Into<String>,
        website: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            current_rank,
            highest_rank,
            state: state.into(),
            tags: tags.into(),
            website: website.into(),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current ranking position.
    pub fn current_rank(&self) -> u32 {
        self.current_rank
    }

    /// Best ranking position ever held.
    pub fn highest_rank(&self) -> u32 {
        self.highest_rank
    }

    /// State or region.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Raw `;`-delimited tag field.
    pub fn tags_raw(&self) -> &str {
        &self.tags
    }

    /// Official website URL.
    pub fn website(&self) -> &str {
        &self.website
    }

    /// Tags in original order and casing, trimmed, empty tokens dropped.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .split(TAG_SEPARATOR)
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Lowercased tag set for membership tests.
    pub fn tag_set(&self) -> BTreeSet<String> {
        self.tags().map(str::to_lowercase).collect()
    }

    /// Case-insensitive full-name equality.
    pub fn same_name(&self, other: &University) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }

    /// Whether the lowercased name contains an already-normalized fragment.
    pub fn name_contains(&self, normalized: &str) -> bool {
        self.name.to_lowercase().contains(normalized)
    }
}

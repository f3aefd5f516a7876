//! University Catalog
//!
//! Loaded once at startup, shuffled once, then read-only for the life of
//! the process. Rounds share it through an `Arc`.

pub mod loader;
pub mod university;

use std::io::BufRead;
use std::path::Path;

use tracing::info;

use crate::core::rng::DeterministicRng;

pub use loader::CatalogError;
pub use university::University;

/// Ordered list of universities.
#[derive(Clone, Debug)]
pub struct Catalog {
    universities: Vec<University>,
}

impl Catalog {
    /// Build from an already-parsed list. Fails if the list is empty.
    pub fn new(universities: Vec<University>) -> Result<Self, CatalogError> {
        if universities.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { universities })
    }

    /// Load from a CSV file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let universities = loader::read_file(path)?;
        info!("Loaded {} universities from {}", universities.len(), path.display());
        Ok(Self { universities })
    }

    /// Load from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, CatalogError> {
        Ok(Self {
            universities: loader::read_universities(reader)?,
        })
    }

    /// Load from CSV text.
    pub fn parse_str(source: &str) -> Result<Self, CatalogError> {
        Self::from_reader(source.as_bytes())
    }

    /// Uniformly permute the catalog.
    pub fn shuffle(&mut self, rng: &mut DeterministicRng) {
        rng.shuffle(&mut self.universities);
    }

    /// Number of universities.
    pub fn len(&self) -> usize {
        self.universities.len()
    }

    /// Whether the catalog holds no universities.
    pub fn is_empty(&self) -> bool {
        self.universities.is_empty()
    }

    /// University at `index`.
    pub fn get(&self, index: usize) -> Option<&University> {
        self.universities.get(index)
    }

    /// All universities in catalog order.
    pub fn as_slice(&self) -> &[University] {
        &self.universities
    }

    /// Iterate in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &University> {
        self.universities.iter()
    }

    /// Index of the first university whose name contains `fragment`,
    /// compared trimmed and case-insensitively.
    ///
    /// Substring, not equality: partial names are accepted on purpose.
    pub fn find_by_fragment(&self, fragment: &str) -> Option<usize> {
        let normalized = normalize_guess(fragment);
        self.universities
            .iter()
            .position(|u| u.name_contains(&normalized))
    }

    /// First university whose name contains `fragment`. Same matching
    /// rules as [`Catalog::find_by_fragment`].
    pub fn lookup(&self, fragment: &str) -> Option<&University> {
        self.find_by_fragment(fragment).map(|idx| &self.universities[idx])
    }
}

/// Trim and lowercase guess text.
pub fn normalize_guess(raw: &str) -> String {
    raw.trim().to_lowercase()
}

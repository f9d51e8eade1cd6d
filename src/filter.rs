//! Listing entry eligibility.
//!
//! Directories are never linked, and neither are support files (images,
//! stylesheets, scripts) whose suffix appears in the configured exclusion
//! set. Suffix matching is a case-insensitive `ends_with` on the bare name,
//! so `IMG.PNG` is excluded by `.png` and a multi-part suffix like `.min.js`
//! works as expected.

use crate::types::ListingEntry;

/// Case-insensitive set of file-name suffixes that hide an entry.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    suffixes: Vec<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            suffixes: suffixes
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// True if `name` ends with any excluded suffix, ignoring case.
    pub fn is_excluded(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.suffixes.iter().any(|ext| lower.ends_with(ext.as_str()))
    }

    /// An entry is shown iff it is a file and its name is not excluded.
    pub fn is_eligible(&self, entry: &ListingEntry) -> bool {
        !entry.is_container && !self.is_excluded(&entry.name)
    }
}

//! Category derived metadata lookups
//!
//! The bulletin formatter derives a locator and a subject from the first
//! ANPA category of an item. Both lookups are owned by the surrounding
//! system; the traits here are the seams, with table driven defaults.

use std::collections::HashMap;

use crate::article::{Article, Category};

/// Maps an ANPA category code to a locator code
pub trait LocatorMapping: Send + Sync {
    /// Locator for `category` (upper-cased qcode), if any
    fn map(&self, article: &Article, category: &str) -> Option<String>;
}

/// Derives the subject code matching a category
pub trait SubjectDerivation: Send + Sync {
    /// Subject qcode for `category` within `article`, if any
    fn derive(&self, category: &Category, article: &Article) -> Option<String>;
}

/// Locator lookup from a fixed table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLocatorMap {
    locators: HashMap<String, String>,
}

impl StaticLocatorMap {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a category code to a locator, replacing any previous mapping
    pub fn insert(&mut self, category: impl Into<String>, locator: impl Into<String>) {
        self.locators
            .insert(category.into().to_uppercase(), locator.into());
    }

    /// Number of mapped categories
    pub fn len(&self) -> usize {
        self.locators.len()
    }

    /// Check if no category is mapped
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }
}

impl<C, L> FromIterator<(C, L)> for StaticLocatorMap
where
    C: Into<String>,
    L: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, L)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (category, locator) in iter {
            map.insert(category, locator);
        }
        map
    }
}

impl LocatorMapping for StaticLocatorMap {
    fn map(&self, _article: &Article, category: &str) -> Option<String> {
        self.locators.get(&category.to_uppercase()).cloned()
    }
}

/// Subject derivation from a category vocabulary
///
/// Each category may name a reference subject code. The derived subject is
/// the first article subject in the same IPTC top-level group (same two
/// leading digits) as that reference; failing that, the first article
/// subject. Items without subjects derive nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySubjectDerivation {
    category_subjects: HashMap<String, String>,
}

impl CategorySubjectDerivation {
    /// Create a derivation with an empty vocabulary
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a category with a reference subject code
    pub fn insert(&mut self, category: impl Into<String>, subject: impl Into<String>) {
        self.category_subjects
            .insert(category.into().to_uppercase(), subject.into());
    }
}

impl<C, S> FromIterator<(C, S)> for CategorySubjectDerivation
where
    C: Into<String>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, S)>>(iter: I) -> Self {
        let mut derivation = Self::new();
        for (category, subject) in iter {
            derivation.insert(category, subject);
        }
        derivation
    }
}

impl SubjectDerivation for CategorySubjectDerivation {
    fn derive(&self, category: &Category, article: &Article) -> Option<String> {
        let fallback = article.subject.first()?;
        let group = self
            .category_subjects
            .get(&category.qcode.to_uppercase())
            .and_then(|reference| reference.get(..2));

        let derived = group
            .and_then(|group| {
                article
                    .subject
                    .iter()
                    .find(|subject| subject.qcode.starts_with(group))
            })
            .unwrap_or(fallback);
        Some(derived.qcode.clone())
    }
}

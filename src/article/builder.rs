//! Article builder for constructing content items
//!
//! This module provides the ArticleBuilder for creating articles in code,
//! mostly for tests and tooling that feed the formatters.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::types::{Article, BodyFormat, Category, Flags, ItemId, ItemType, Subject};
use crate::{Error, Result};

#[must_use]
#[derive(Debug, Clone, Default)]
pub struct ArticleBuilder {
    id: Option<ItemId>,
    version: Option<i64>,
    item_type: ItemType,
    package_type: Option<String>,
    headline: Option<String>,
    slugline: Option<String>,
    body_html: Option<String>,
    description_text: Option<String>,
    body_footer: Option<String>,
    format: BodyFormat,
    flags: Flags,
    anpa_category: Vec<Category>,
    subject: Vec<Subject>,
    firstcreated: Option<DateTime<Utc>>,
    versioncreated: Option<DateTime<Utc>>,
    extra: Map<String, Value>,
}

impl ArticleBuilder {
    /// Create a new ArticleBuilder for a text item
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the item identifier (auto-generated if not provided)
    pub fn id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the version number
    pub fn version(mut self, version: i64) -> Self {
        self.version = Some(version);
        self
    }

    /// Set the content type
    pub fn item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = item_type;
        self
    }

    /// Set the package type
    pub fn package_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = Some(package_type.into());
        self
    }

    /// Set the headline
    pub fn headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = Some(headline.into());
        self
    }

    /// Set the slugline
    pub fn slugline(mut self, slugline: impl Into<String>) -> Self {
        self.slugline = Some(slugline.into());
        self
    }

    /// Set the HTML body
    pub fn body_html(mut self, body_html: impl Into<String>) -> Self {
        self.body_html = Some(body_html.into());
        self
    }

    /// Set the media caption
    pub fn description_text(mut self, description: impl Into<String>) -> Self {
        self.description_text = Some(description.into());
        self
    }

    /// Set the body footer
    pub fn body_footer(mut self, footer: impl Into<String>) -> Self {
        self.body_footer = Some(footer.into());
        self
    }

    /// Set the body format
    pub fn format(mut self, format: BodyFormat) -> Self {
        self.format = format;
        self
    }

    /// Flag the item for legal review
    pub fn marked_for_legal(mut self, marked: bool) -> Self {
        self.flags.marked_for_legal = marked;
        self
    }

    /// Add an ANPA category
    pub fn category(mut self, qcode: impl Into<String>, name: impl Into<String>) -> Self {
        self.anpa_category.push(Category::new(qcode, name));
        self
    }

    /// Add a subject code
    pub fn subject(mut self, qcode: impl Into<String>, name: impl Into<String>) -> Self {
        self.subject.push(Subject::new(qcode, name));
        self
    }

    /// Set the creation time
    pub fn firstcreated(mut self, at: DateTime<Utc>) -> Self {
        self.firstcreated = Some(at);
        self
    }

    /// Set the last version creation time
    pub fn versioncreated(mut self, at: DateTime<Utc>) -> Self {
        self.versioncreated = Some(at);
        self
    }

    /// Add a field not modelled by [`Article`]
    pub fn extra_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    /// Build the article, validating fields and generating defaults
    ///
    /// Returns an error if the identifier is empty or the item was versioned
    /// before it was created. Auto-generates the identifier if not provided.
    pub fn build(self) -> Result<Article> {
        let id = match self.id {
            Some(id) if id.as_str().trim().is_empty() => {
                return Err(Error::InvalidArticle("identifier must not be empty".to_string()));
            }
            Some(id) => id,
            None => ItemId::generate(),
        };

        if let (Some(created), Some(versioned)) = (self.firstcreated, self.versioncreated) {
            if versioned < created {
                return Err(Error::InvalidArticle(
                    "versioncreated precedes firstcreated".to_string(),
                ));
            }
        }

        Ok(Article {
            id,
            version: self.version,
            item_type: self.item_type,
            package_type: self.package_type,
            headline: self.headline,
            slugline: self.slugline,
            body_html: self.body_html,
            description_text: self.description_text,
            body_footer: self.body_footer,
            format: self.format,
            flags: self.flags,
            anpa_category: self.anpa_category,
            subject: self.subject,
            place: None,
            firstcreated: self.firstcreated,
            versioncreated: self.versioncreated,
            body_text: None,
            first_category: None,
            first_subject: None,
            extra: self.extra,
        })
    }
}

//! Article type definitions
//!
//! This module contains the data structures for representing newsroom
//! content items as the publishing pipeline sees them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::datetime;

/// Prefix of generated item identifiers
pub const ITEM_ID_PREFIX: &str = "urn:newsdesk:";

/// Content item document
///
/// Field names follow the stored document layout, so a serialized article can
/// be read back by any consumer of the content store. Fields this crate does
/// not model are kept in `extra` and serialized unchanged.
///
/// # Examples
///
/// ```
/// use newsdesk::article::{ArticleBuilder, ItemType};
///
/// let article = ArticleBuilder::new()
///     .headline("Storm hits coast")
///     .slugline("Storm")
///     .body_html("<p>Heavy rain.</p>")
///     .category("A", "Australian General News")
///     .build()
///     .unwrap();
///
/// assert_eq!(article.item_type, ItemType::Text);
/// assert!(article.id.as_str().starts_with("urn:newsdesk:"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Item identifier
    #[serde(rename = "_id")]
    pub id: ItemId,

    /// Current version number
    #[serde(rename = "_current_version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    /// Content type
    #[serde(rename = "type", default)]
    pub item_type: ItemType,

    /// Package type for composite items (e.g. "takes")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,

    /// Headline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,

    /// Slugline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slugline: Option<String>,

    /// HTML body of text items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,

    /// Caption of media items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_text: Option<String>,

    /// Footer appended to the body on output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_footer: Option<String>,

    /// Body format
    #[serde(default)]
    pub format: BodyFormat,

    /// Editorial flags
    #[serde(default)]
    pub flags: Flags,

    /// ANPA categories, most significant first
    #[serde(default)]
    pub anpa_category: Vec<Category>,

    /// IPTC subject codes
    #[serde(default)]
    pub subject: Vec<Subject>,

    /// Locator of the story
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<Vec<Place>>,

    /// Creation time
    #[serde(
        default,
        with = "datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub firstcreated: Option<DateTime<Utc>>,

    /// Last version creation time
    #[serde(
        default,
        with = "datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub versioncreated: Option<DateTime<Utc>>,

    /// Plain text body derived on output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_text: Option<String>,

    /// First ANPA category, derived on output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_category: Option<Category>,

    /// Subject code matching the first category, derived on output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_subject: Option<String>,

    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Content item identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh `urn:newsdesk:<uuid>` identifier
    pub fn generate() -> Self {
        Self(format!("{ITEM_ID_PREFIX}{}", Uuid::new_v4()))
    }

    /// Identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Content type of an item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Text story
    #[default]
    Text,
    /// Preformatted text
    Preformatted,
    /// Still image
    Picture,
    /// Audio clip
    Audio,
    /// Video clip
    Video,
    /// Infographic
    Graphic,
    /// Package of other items
    Composite,
}

impl ItemType {
    /// Item carries its body in `body_html`
    pub fn is_textual(self) -> bool {
        matches!(self, Self::Text | Self::Preformatted)
    }

    /// Item carries its body in `description_text`
    pub fn is_media(self) -> bool {
        matches!(self, Self::Picture | Self::Audio | Self::Video | Self::Graphic)
    }

    /// Stored name of the type
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Preformatted => "preformatted",
            Self::Picture => "picture",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Graphic => "graphic",
            Self::Composite => "composite",
        }
    }
}

/// How the body markup is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyFormat {
    /// Regular HTML
    #[default]
    #[serde(rename = "HTML")]
    Html,
    /// Whitespace and line breaks are significant
    #[serde(rename = "preserved")]
    Preserved,
}

/// Editorial flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    /// Story needs legal review before publication
    #[serde(default)]
    pub marked_for_legal: bool,
    /// Story must not be published
    #[serde(default)]
    pub marked_for_not_publication: bool,
}

/// ANPA category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category code, e.g. "A"
    pub qcode: String,
    /// Category name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Category {
    /// Create a named category
    pub fn new(qcode: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            qcode: qcode.into(),
            name: Some(name.into()),
        }
    }
}

/// IPTC subject code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Eight digit subject code, e.g. "15000000"
    pub qcode: String,
    /// Subject name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Parent subject code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl Subject {
    /// Create a named subject
    pub fn new(qcode: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            qcode: qcode.into(),
            name: Some(name.into()),
            parent: None,
        }
    }
}

/// Locator of a story
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Locator code
    pub qcode: String,
    /// Locator name
    pub name: String,
}

//! Output formatters
//!
//! A formatter turns an article into the records a subscriber's destination
//! consumes. Formatters declare which output format names they handle; the
//! [`FormatterRegistry`] picks the first one that accepts a request.
//!
//! This module is organized into:
//! - `bulletin`: the bulletin builder formatter
//! - `mapping`: locator and subject lookups used by formatters
//! - `text`: HTML body flattening

mod bulletin;
mod mapping;
mod text;

pub use self::bulletin::BulletinBuilderFormatter;
pub use self::mapping::{
    CategorySubjectDerivation, LocatorMapping, StaticLocatorMap, SubjectDerivation,
};
pub use self::text::{collapse_spaces, flatten_body, plain_text, PARAGRAPH_BREAK};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::article::{Article, BodyFormat, ItemId, ItemType};
use crate::config::BulletinConfig;
use crate::subscriber::Subscriber;
use crate::taxonomy::{FormatterError, PublishQueueError, PublishQueueKind};

/// Flat record for ODBC style destinations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdbcRecord {
    /// Item identifier
    pub id: ItemId,
    /// Item version
    pub version: Option<i64>,
    /// Content type
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Package type, empty for plain items
    pub package_type: String,
    /// Headline, empty when missing
    pub headline: String,
    /// Output slugline, empty when missing
    pub slugline: String,
    /// JSON serialization of the whole article
    pub data: String,
}

/// Publish sequence number paired with the record sent under it
pub type FormattedItem = (i64, OdbcRecord);

/// Converts articles into destination records
pub trait Formatter: Send + Sync {
    /// Format `article` for `subscriber`
    ///
    /// Formatters may annotate the article with derived fields.
    fn format(
        &self,
        article: &mut Article,
        subscriber: &Subscriber,
    ) -> Result<Vec<FormattedItem>, FormatterError>;

    /// Check if this formatter handles `format_type`
    fn can_format(&self, format_type: &str, article: &Article) -> bool;
}

/// Ordered list of formatters
#[derive(Default, Clone)]
pub struct FormatterRegistry {
    formatters: Vec<Arc<dyn Formatter>>,
}

impl FormatterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a formatter; earlier registrations win
    pub fn register(&mut self, formatter: Arc<dyn Formatter>) {
        self.formatters.push(formatter);
        debug!(count = self.formatters.len(), "registered formatter");
    }

    /// First formatter accepting `format_type`
    ///
    /// Returns an unknown format error when none does.
    pub fn formatter_for(
        &self,
        format_type: &str,
        article: &Article,
    ) -> Result<Arc<dyn Formatter>, PublishQueueError> {
        self.formatters
            .iter()
            .find(|formatter| formatter.can_format(format_type, article))
            .cloned()
            .ok_or_else(|| {
                debug!(format_type, item = %article.id, "no formatter for format");
                PublishQueueError::record(PublishQueueKind::UnknownFormat, None)
                    .with_description(format!("format {format_type}"))
            })
    }

    /// Number of registered formatters
    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    /// Check if no formatter is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }
}

impl std::fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("len", &self.formatters.len())
            .finish()
    }
}

/// Output slugline of an article
///
/// Items marked for legal review get `"<prefix>: "` in front of the slugline
/// and the result is cut to `slugline_max_len` characters; other items keep
/// their slugline unchanged.
pub fn append_legal(article: &Article, config: &BulletinConfig) -> String {
    let slugline = article.slugline.as_deref().unwrap_or_default();
    if !article.flags.marked_for_legal {
        return slugline.to_string();
    }
    format!("{}: {}", config.legal_prefix, slugline)
        .chars()
        .take(config.slugline_max_len)
        .collect()
}

/// Article body with its footer appended
///
/// Text items use `body_html`, media items their caption. Preserved format
/// bodies get CRLF line endings and a plain text footer on its own line.
pub fn append_body_footer(article: &Article) -> String {
    let body = if article.item_type.is_textual() {
        article.body_html.as_deref().unwrap_or_default()
    } else if article.item_type.is_media() {
        article.description_text.as_deref().unwrap_or_default()
    } else {
        ""
    };
    if body.is_empty() {
        return String::new();
    }

    let preserved = article.format == BodyFormat::Preserved;
    let mut body = if preserved {
        body.replace("\r\n", "\n").replace('\n', "\r\n")
    } else {
        body.to_string()
    };

    if let Some(footer) = article.body_footer.as_deref().filter(|f| !f.is_empty()) {
        if preserved {
            body.push_str("\r\n");
            body.push_str(&plain_text(footer));
        } else {
            body.push_str(footer);
        }
    }
    body
}

#![doc = include_str!("../README.md")]

/// Newsroom content items
pub mod article;
mod config;
mod error;
/// Output formatters and the bulletin builder
pub mod formatter;
/// Error notification side channel
pub mod notify;
/// Publish destinations and sequence numbers
pub mod subscriber;
/// Coded ingest, publish and API errors
pub mod taxonomy;

pub use article::{Article, ArticleBuilder, Category, ItemId, ItemType, Subject};
pub use config::{BulletinConfig, BULLETIN_BUILDER_FORMAT};
pub use error::{Error, Result};
pub use formatter::{
    BulletinBuilderFormatter, FormattedItem, Formatter, FormatterRegistry, OdbcRecord,
};
pub use notify::{ErrorEvent, Notifier, Notifiers};
pub use subscriber::{InMemorySequenceNumbers, SequenceNumbers, Subscriber};
pub use taxonomy::{ApiError, Cause, ErrorKind};

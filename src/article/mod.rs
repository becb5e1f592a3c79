//! Newsroom content items
//!
//! Provides structures for representing the content items handed to
//! formatters, and their stored JSON encoding.
//!
//! This module is organized into:
//! - `types`: Core article data structures (Article, Category, Subject, Place)
//! - `datetime`: Datetime encoding used in serialized documents
//! - `builder`: ArticleBuilder for constructing articles

mod builder;
pub mod datetime;
mod types;

pub use self::builder::ArticleBuilder;
pub use self::types::{
    Article, BodyFormat, Category, Flags, ItemId, ItemType, Place, Subject, ITEM_ID_PREFIX,
};

//! Crate error types

use thiserror::Error;

use crate::taxonomy::{
    ApiError, FeedParserError, FormatterError, HttpPushError, IngestApiError, IngestEmailError,
    IngestFileError, IngestFtpError, ParserError, ProviderError, PublishEmailError,
    PublishFileError, PublishFtpError, PublishOdbcError, PublishQueueError, SubscriberError,
};

/// Any failure raised by the newsroom publishing components
#[derive(Error, Debug)]
pub enum Error {
    /// Feed parser lookup failure
    #[error(transparent)]
    FeedParser(#[from] FeedParserError),

    /// Ingest parsing failure
    #[error(transparent)]
    Parser(#[from] ParserError),

    /// Ingest provider failure
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Local file ingest failure
    #[error(transparent)]
    IngestFile(#[from] IngestFileError),

    /// HTTP API ingest failure
    #[error(transparent)]
    IngestApi(#[from] IngestApiError),

    /// FTP ingest failure
    #[error(transparent)]
    IngestFtp(#[from] IngestFtpError),

    /// Email ingest failure
    #[error(transparent)]
    IngestEmail(#[from] IngestEmailError),

    /// Output formatting failure
    #[error(transparent)]
    Formatter(#[from] FormatterError),

    /// Subscriber state failure
    #[error(transparent)]
    Subscriber(#[from] SubscriberError),

    /// Publish queue failure
    #[error(transparent)]
    PublishQueue(#[from] PublishQueueError),

    /// FTP publish failure
    #[error(transparent)]
    PublishFtp(#[from] PublishFtpError),

    /// Email publish failure
    #[error(transparent)]
    PublishEmail(#[from] PublishEmailError),

    /// ODBC publish failure
    #[error(transparent)]
    PublishOdbc(#[from] PublishOdbcError),

    /// File publish failure
    #[error(transparent)]
    PublishFile(#[from] PublishFileError),

    /// HTTP push publish failure
    #[error(transparent)]
    HttpPush(#[from] HttpPushError),

    /// Error surfaced to API clients
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Unsupported file type received
    #[error("Invalid file type {0}")]
    InvalidFileType(String),

    /// Bulk index operation failed
    #[error("Failed to bulk index resource {resource} errors: {errors}")]
    BulkIndex {
        /// Resource being indexed
        resource: String,
        /// Errors reported by the index
        errors: String,
    },

    /// Entity already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Unknown privilege name
    #[error("Invalid privilege name: {0}")]
    PrivilegeName(String),

    /// Article fails validation
    #[error("Invalid article: {0}")]
    InvalidArticle(String),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Numeric code of taxonomy errors
    pub fn code(&self) -> Option<u32> {
        match self {
            Self::FeedParser(e) => Some(e.code()),
            Self::Parser(e) => Some(e.code()),
            Self::Provider(e) => Some(e.code()),
            Self::IngestFile(e) => Some(e.code()),
            Self::IngestApi(e) => Some(e.code()),
            Self::IngestFtp(e) => Some(e.code()),
            Self::IngestEmail(e) => Some(e.code()),
            Self::Formatter(e) => Some(e.code()),
            Self::Subscriber(e) => Some(e.code()),
            Self::PublishQueue(e) => Some(e.code()),
            Self::PublishFtp(e) => Some(e.code()),
            Self::PublishEmail(e) => Some(e.code()),
            Self::PublishOdbc(e) => Some(e.code()),
            Self::PublishFile(e) => Some(e.code()),
            Self::HttpPush(e) => Some(e.code()),
            _ => None,
        }
    }

    /// Fixed message of taxonomy errors
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::FeedParser(e) => Some(e.message()),
            Self::Parser(e) => Some(e.message()),
            Self::Provider(e) => Some(e.message()),
            Self::IngestFile(e) => Some(e.message()),
            Self::IngestApi(e) => Some(e.message()),
            Self::IngestFtp(e) => Some(e.message()),
            Self::IngestEmail(e) => Some(e.message()),
            Self::Formatter(e) => Some(e.message()),
            Self::Subscriber(e) => Some(e.message()),
            Self::PublishQueue(e) => Some(e.message()),
            Self::PublishFtp(e) => Some(e.message()),
            Self::PublishEmail(e) => Some(e.message()),
            Self::PublishOdbc(e) => Some(e.message()),
            Self::PublishFile(e) => Some(e.message()),
            Self::HttpPush(e) => Some(e.message()),
            _ => None,
        }
    }

    /// HTTP status of API errors
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.status_code()),
            _ => None,
        }
    }
}

/// Result type alias using Error
pub type Result<T> = std::result::Result<T, Error>;

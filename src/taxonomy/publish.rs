//! Publish failure families

use std::fmt;

use super::{log_failure, tail_chars, write_family_error, Cause, ErrorKind, NOTIFY_MESSAGE_LIMIT};
use crate::notify::{ErrorEvent, Notifiers};
use crate::subscriber::Subscriber;

/// Name reported when a failure has no destination attached
pub const UNKNOWN_DESTINATION: &str = "Unknown destination";

/// Resource tag attached to publish notifications
pub const SUBSCRIBERS_RESOURCE: &str = "subscribers";

error_kinds! {
    /// Output format conversion failures
    pub enum FormatterKind: "FormatterError" {
        Nitf = 7001 => "Article couldn't be converted to NITF format",
        AapIpNews = 7002 => "Article couldn't be converted to AAP IPNews format",
        Anpa = 7003 => "Article couldn't be converted to ANPA",
        Ninjs = 7004 => "Article couldn't be converted to NinJS",
        NewsMl12 = 7005 => "Article couldn't be converted to NewsML 1.2 format",
        NewsMlG2 = 7006 => "Article couldn't be converted to NewsML G2 format",
        BulletinBuilder = 7007 => "Article couldn't be converted to AAP Bulletin Builder format",
        AapSms = 7008 => "Article couldn't be converted to AAP SMS format",
        AapNewscentre = 7009 => "Article couldn't be converted to AAP Newscentre",
        Email = 7010 => "Article couldn't be converted to Email",
    }
}

error_kinds! {
    /// Subscriber state failures
    pub enum SubscriberKind: "SubscriberError" {
        /// Publishing to a closed subscriber
        Inactive = 8001 => "Subscriber is closed",
    }
}

error_kinds! {
    /// Publish queue failures
    pub enum PublishQueueKind: "PublishQueueError" {
        ItemUpdate = 9001 => "Item could not be updated in the queue",
        UnknownFormat = 9002 => "Item format could not be recognized",
        BadSchedule = 9004 => "Schedule information could not be processed",
        ContentUpdate = 9005 => "State of the content item could not be updated",
        PreviousTakeNotPublished = 9007 => "Previous take is either not published or killed",
        PostPublishExists = 9008 => "A post-publish action has happened on item",
        ItemNotQueued = 9009 => "Item could not be queued",
        ArticleNotFound = 9010 => "Article could not be found",
    }
}

error_kinds! {
    /// FTP transmission failures
    pub enum PublishFtpKind: "PublishFtpError" {
        Ftp = 10000 => "FTP publish error",
    }
}

error_kinds! {
    /// Email transmission failures
    pub enum PublishEmailKind: "PublishEmailError" {
        Email = 11000 => "Email publish error",
        RecipientNotFound = 11001 => "Recipient could not be found for destination",
    }
}

error_kinds! {
    /// ODBC transmission failures
    pub enum PublishOdbcKind: "PublishODBCError" {
        Odbc = 12000 => "ODBC publish error",
    }
}

error_kinds! {
    /// File transmission failures
    pub enum PublishFileKind: "PublishFileError" {
        FileSave = 13000 => "File publish error",
    }
}

error_kinds! {
    /// HTTP push transmission failures
    pub enum HttpPushKind: "PublishHTTPPushError" {
        /// Any HTTP push failure
        Push = 14000 => "HTTP push publish error",
        /// Remote end answered with a 4xx status
        Client = 14001 => "HTTP push publish client error",
        /// Remote end answered with a 5xx status
        Server = 14002 => "HTTP push publish server error",
    }
}

impl HttpPushKind {
    /// Pick the kind matching an HTTP response status
    pub fn from_status(status: u16) -> Self {
        match status {
            400..=499 => Self::Client,
            500..=599 => Self::Server,
            _ => Self::Push,
        }
    }
}

/// Formatter error (codes 7001-7010)
pub type FormatterError = PublishError<FormatterKind>;
/// Subscriber error (code 8001)
pub type SubscriberError = PublishError<SubscriberKind>;
/// Publish queue error (codes 9001-9010)
pub type PublishQueueError = PublishError<PublishQueueKind>;
/// FTP publish error (code 10000)
pub type PublishFtpError = PublishError<PublishFtpKind>;
/// Email publish error (codes 11000-11001)
pub type PublishEmailError = PublishError<PublishEmailKind>;
/// ODBC publish error (code 12000)
pub type PublishOdbcError = PublishError<PublishOdbcKind>;
/// File publish error (code 13000)
pub type PublishFileError = PublishError<PublishFileKind>;
/// HTTP push publish error (codes 14000-14002)
pub type HttpPushError = PublishError<HttpPushKind>;

/// A publish failure of family `K`
#[derive(Debug)]
pub struct PublishError<K: ErrorKind> {
    kind: K,
    description: Option<String>,
    destination_name: String,
    cause: Option<Cause>,
}

impl<K: ErrorKind> PublishError<K> {
    /// Record an error without reporting it
    pub fn record(kind: K, destination: Option<&Subscriber>) -> Self {
        Self {
            kind,
            description: None,
            destination_name: destination
                .map(|d| d.name.as_str())
                .filter(|name| !name.is_empty())
                .unwrap_or(UNKNOWN_DESTINATION)
                .to_string(),
            cause: None,
        }
    }

    /// Record an error and report its cause
    ///
    /// When a cause is given, the last [`NOTIFY_MESSAGE_LIMIT`] characters
    /// of its message are sent to every notifier and the failure is logged.
    pub fn raise(
        notifiers: &Notifiers,
        kind: K,
        cause: Option<Cause>,
        destination: Option<&Subscriber>,
    ) -> Self {
        let mut error = Self::record(kind, destination);
        let Some(cause) = cause else {
            return error;
        };

        let detail = cause.to_string();
        notifiers.notify(&ErrorEvent::error(
            format!(
                "Error [{}] on a Subscriber's destination {{{{name}}}}: {}",
                kind.code(),
                tail_chars(&detail, NOTIFY_MESSAGE_LIMIT)
            ),
            destination.map(|_| SUBSCRIBERS_RESOURCE),
            error.destination_name.clone(),
            destination.map(|d| d.id.clone()).unwrap_or_default(),
        ));

        let channel = destination.map(|_| ("destination", error.destination_name.as_str()));
        log_failure(&error, kind.code(), &cause, channel);
        error.cause = Some(cause);
        error
    }

    /// Attach a detailed description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Error kind
    pub fn kind(&self) -> K {
        self.kind
    }

    /// Numeric error code
    pub fn code(&self) -> u32 {
        self.kind.code()
    }

    /// Fixed error message
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }

    /// Optional detailed description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// `(code, message)` pair
    pub fn error_description(&self) -> (u32, &'static str) {
        (self.kind.code(), self.kind.message())
    }

    /// Name of the destination the failure happened on
    pub fn destination_name(&self) -> &str {
        &self.destination_name
    }

    /// Original failure, if any
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }
}

impl<K: ErrorKind> fmt::Display for PublishError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_family_error(f, self.kind, self.description.as_deref())
    }
}

impl<K: ErrorKind> std::error::Error for PublishError<K> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl SubscriberError {
    /// Publishing was attempted on a closed subscriber
    pub fn subscriber_inactive(
        notifiers: &Notifiers,
        cause: Option<Cause>,
        destination: Option<&Subscriber>,
    ) -> Self {
        Self::raise(notifiers, SubscriberKind::Inactive, cause, destination)
    }
}

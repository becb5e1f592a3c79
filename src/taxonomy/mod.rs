//! Error taxonomy for ingest and publish failures
//!
//! Every subsystem defines a closed family of error kinds. A kind carries a
//! stable numeric code and a fixed human readable message; code ranges never
//! overlap between families.
//!
//! This module is organized into:
//! - `ingest`: parser, provider, file, API, FTP and email ingest failures
//! - `publish`: formatter, subscriber, queue and transport failures
//! - `api`: HTTP status coded errors rendered as response payloads
//!
//! Constructing a family error through `raise` reports it: the cause is
//! forwarded to the registered [`Notifiers`](crate::notify::Notifiers) and
//! logged through `tracing`.

use std::collections::BTreeMap;
use std::fmt;

use tracing::error;

/// Declares a closed enum of error kinds together with its code table
macro_rules! error_kinds {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $family:literal {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $code:literal => $message:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $crate::taxonomy::ErrorKind for $name {
            const FAMILY: &'static str = $family;
            const ALL: &'static [Self] = &[$(Self::$variant,)+];

            fn code(self) -> u32 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            fn message(self) -> &'static str {
                match self {
                    $(Self::$variant => $message,)+
                }
            }
        }
    };
}

mod api;
mod ingest;
mod publish;

pub use self::api::{status, ApiError, ApiErrorBuilder, ApiErrorResponse};
pub use self::ingest::{
    FeedParserError, FeedParserKind, IngestApiError, IngestApiKind, IngestEmailError,
    IngestEmailKind, IngestError, IngestFileError, IngestFileKind, IngestFtpError, IngestFtpKind,
    IngestProvider, ParserError, ParserKind, ProviderError, ProviderKind, ProviderNotifications,
    INGEST_PROVIDERS_RESOURCE, UNKNOWN_PROVIDER,
};
pub use self::publish::{
    FormatterError, FormatterKind, HttpPushError, HttpPushKind, PublishEmailError,
    PublishEmailKind, PublishError, PublishFileError, PublishFileKind, PublishFtpError,
    PublishFtpKind, PublishOdbcError, PublishOdbcKind, PublishQueueError, PublishQueueKind,
    SubscriberError, SubscriberKind, SUBSCRIBERS_RESOURCE, UNKNOWN_DESTINATION,
};

/// Original failure carried by a family error
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Maximum number of characters of a cause forwarded to notifiers
pub const NOTIFY_MESSAGE_LIMIT: usize = 200;

/// Message reported for codes missing from a family table
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// A closed set of error codes belonging to one family
pub trait ErrorKind: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Family name used in `Display` output and log lines
    const FAMILY: &'static str;

    /// Every kind of the family, in code order
    const ALL: &'static [Self];

    /// Stable numeric code
    fn code(self) -> u32;

    /// Fixed human readable message
    fn message(self) -> &'static str;

    /// Look up a kind by its numeric code
    fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.code() == code)
    }

    /// Message for a code, or [`UNKNOWN_ERROR`] when the family has no such code
    fn message_for(code: u32) -> &'static str {
        Self::from_code(code).map_or(UNKNOWN_ERROR, Self::message)
    }
}

/// `(code, message)` pairs of a family, in code order
pub fn code_table<K: ErrorKind>() -> Vec<(u32, &'static str)> {
    K::ALL.iter().map(|kind| (kind.code(), kind.message())).collect()
}

/// Code tables of the families exposed to API clients, keyed by family name
pub fn registered_errors() -> BTreeMap<&'static str, Vec<(u32, &'static str)>> {
    BTreeMap::from([
        (IngestApiKind::FAMILY, code_table::<IngestApiKind>()),
        (IngestFtpKind::FAMILY, code_table::<IngestFtpKind>()),
        (IngestFileKind::FAMILY, code_table::<IngestFileKind>()),
    ])
}

/// Keep at most the last `limit` characters of `text`
///
/// Failure messages tend to end with the most specific detail, so the
/// head of an overlong message is dropped.
pub fn tail_chars(text: &str, limit: usize) -> &str {
    let count = text.chars().count();
    if count <= limit {
        return text;
    }
    let start = text
        .char_indices()
        .nth(count - limit)
        .map_or(text.len(), |(index, _)| index);
    &text[start..]
}

/// Shared `Display` body of family errors
fn write_family_error<K: ErrorKind>(
    f: &mut fmt::Formatter<'_>,
    kind: K,
    description: Option<&str>,
) -> fmt::Result {
    write!(f, "{} Error {} - {}", K::FAMILY, kind.code(), kind.message())?;
    if let Some(description) = description.filter(|d| !d.is_empty()) {
        write!(f, " Details: {description}")?;
    }
    Ok(())
}

/// Log a raised error together with its cause
///
/// `channel` names the provider or destination the failure happened on.
fn log_failure(
    error: &dyn fmt::Display,
    code: u32,
    cause: &Cause,
    channel: Option<(&'static str, &str)>,
) {
    match channel {
        Some((label, name)) => error!(
            code,
            cause = ?cause,
            "{error}: {cause} on {label} {name}"
        ),
        None => error!(code, cause = ?cause, "{error}: {cause}"),
    }
}

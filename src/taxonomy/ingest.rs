//! Ingest failure families

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::error;

use super::{log_failure, tail_chars, write_family_error, Cause, ErrorKind, NOTIFY_MESSAGE_LIMIT};
use crate::notify::{ErrorEvent, Notifiers};

/// Name reported when a failure has no provider attached
pub const UNKNOWN_PROVIDER: &str = "Unknown provider";

/// Resource tag attached to ingest notifications
pub const INGEST_PROVIDERS_RESOURCE: &str = "ingest_providers";

/// Ingest provider configuration, as far as error reporting needs it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestProvider {
    /// Provider identifier
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Notification preferences
    #[serde(default)]
    pub notifications: ProviderNotifications,
}

impl IngestProvider {
    /// Create a provider record that notifies on errors
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            notifications: ProviderNotifications::default(),
        }
    }
}

/// Notification preferences of an ingest provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderNotifications {
    /// Notify listeners when ingest fails
    #[serde(default = "default_on_error")]
    pub on_error: bool,
}

fn default_on_error() -> bool {
    true
}

impl Default for ProviderNotifications {
    fn default() -> Self {
        Self { on_error: true }
    }
}

error_kinds! {
    /// Feed parser lookup failures
    pub enum FeedParserKind: "IngestError" {
        /// Configured feed parser missing
        ParserNotFound = 2000 => "Configured Feed Parser either not found or not registered with the application",
    }
}

error_kinds! {
    /// Ingest provider failures
    pub enum ProviderKind: "ProviderError" {
        ProviderAdd = 2001 => "Provider could not be saved",
        ExpiredContent = 2002 => "Expired content could not be removed",
        Rule = 2003 => "Rule could not be applied",
        Ingest = 2004 => "Ingest error",
        Anpa = 2005 => "Anpa category error",
        FilterExpiredContent = 2006 => "Expired content could not be filtered",
        Iptc = 2007 => "IPTC processing error",
        ExternalProvider = 2008 => "External source no suitable resolution found",
    }
}

error_kinds! {
    /// Ingest parsing failures
    pub enum ParserKind: "ParserError" {
        ParseMessage = 1001 => "Message could not be parsed",
        ParseFile = 1002 => "Ingest file could not be parsed",
        AnpaParseFile = 1003 => "ANPA file could not be parsed",
        NewsmlOne = 1004 => "NewsML1 input could not be processed",
        NewsmlTwo = 1005 => "NewsML2 input could not be processed",
        Nitf = 1006 => "NITF input could not be processed",
        Wenn = 1007 => "WENN input could not be processed",
        Iptc7901 = 1008 => "IPTC7901 input could not be processed",
    }
}

error_kinds! {
    /// Local file ingest failures
    pub enum IngestFileKind: "IngestFileError" {
        FolderCreate = 3001 => "Destination folder could not be created",
        FileMove = 3002 => "Ingest file could not be copied",
    }
}

error_kinds! {
    /// HTTP API ingest failures
    pub enum IngestApiKind: "IngestApiError" {
        General = 4000 => "Unknown API ingest error",
        Timeout = 4001 => "API ingest connection has timed out.",
        Redirect = 4002 => "API ingest has too many redirects",
        Request = 4003 => "API ingest has request error",
        Unicode = 4004 => "API ingest Unicode Encode Error",
        Parse = 4005 => "API ingest xml parse error",
        NotFound = 4006 => "API service not found(404) error",
        Auth = 4007 => "API authorization error",
        AuthUrlMissing = 4008 => "Authentication URL is missing from Ingest Provider configuraion",
    }
}

error_kinds! {
    /// FTP ingest failures
    pub enum IngestFtpKind: "IngestFtpError" {
        Ftp = 5000 => "FTP ingest error",
        UnknownParser = 5001 => "FTP parser could not be found",
    }
}

error_kinds! {
    /// Email ingest failures
    pub enum IngestEmailKind: "IngestEmailError" {
        Login = 6000 => "Email authentication failure",
        Parse = 6001 => "Email parse error",
        Email = 6002 => "Email ingest error",
    }
}

/// Feed parser lookup error (code 2000)
pub type FeedParserError = IngestError<FeedParserKind>;
/// Provider error (codes 2001-2008)
pub type ProviderError = IngestError<ProviderKind>;
/// Parser error (codes 1001-1008)
pub type ParserError = IngestError<ParserKind>;
/// File ingest error (codes 3001-3002)
pub type IngestFileError = IngestError<IngestFileKind>;
/// API ingest error (codes 4000-4008)
pub type IngestApiError = IngestError<IngestApiKind>;
/// FTP ingest error (codes 5000-5001)
pub type IngestFtpError = IngestError<IngestFtpKind>;
/// Email ingest error (codes 6000-6002)
pub type IngestEmailError = IngestError<IngestEmailKind>;

/// An ingest failure of family `K`
#[derive(Debug)]
pub struct IngestError<K: ErrorKind> {
    kind: K,
    description: Option<String>,
    provider_name: String,
    cause: Option<Cause>,
}

impl<K: ErrorKind> IngestError<K> {
    /// Record an error without reporting it
    pub fn record(kind: K, provider: Option<&IngestProvider>) -> Self {
        Self {
            kind,
            description: None,
            provider_name: provider
                .map(|p| p.name.as_str())
                .filter(|name| !name.is_empty())
                .unwrap_or(UNKNOWN_PROVIDER)
                .to_string(),
            cause: None,
        }
    }

    /// Record an error and report its cause
    ///
    /// When a cause is given, the last [`NOTIFY_MESSAGE_LIMIT`] characters
    /// of its message are sent to every notifier (unless the provider opted
    /// out with `notifications.on_error = false`) and the failure is logged.
    pub fn raise(
        notifiers: &Notifiers,
        kind: K,
        cause: Option<Cause>,
        provider: Option<&IngestProvider>,
    ) -> Self {
        let mut error = Self::record(kind, provider);
        let Some(cause) = cause else {
            return error;
        };

        if provider.is_none_or(|p| p.notifications.on_error) {
            let detail = cause.to_string();
            notifiers.notify(&ErrorEvent::error(
                format!(
                    "Error [{}] on ingest provider {{{{name}}}}: {}",
                    kind.code(),
                    tail_chars(&detail, NOTIFY_MESSAGE_LIMIT)
                ),
                provider.map(|_| INGEST_PROVIDERS_RESOURCE),
                error.provider_name.clone(),
                provider.map(|p| p.id.clone()).unwrap_or_default(),
            ));
        }

        let channel = provider.map(|_| ("channel", error.provider_name.as_str()));
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

    /// Name of the provider the failure happened on
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// Original failure, if any
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }
}

impl<K: ErrorKind> fmt::Display for IngestError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_family_error(f, self.kind, self.description.as_deref())
    }
}

impl<K: ErrorKind> std::error::Error for IngestError<K> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl ParserError {
    /// Ingest file parsing failure, logging the source type and file name
    pub fn parse_file_error(
        notifiers: &Notifiers,
        source: Option<&str>,
        filename: Option<&str>,
        cause: Option<Cause>,
        provider: Option<&IngestProvider>,
    ) -> Self {
        if let (Some(source), Some(filename)) = (source, filename) {
            error!(source, filename, "Source Type: {source} - File: {filename} could not be processed");
        }
        Self::raise(notifiers, ParserKind::ParseFile, cause, provider)
    }

    /// ANPA file parsing failure, logging the file name
    pub fn anpa_parse_file_error(
        notifiers: &Notifiers,
        filename: Option<&str>,
        cause: Option<Cause>,
    ) -> Self {
        if let Some(filename) = filename {
            error!(filename, "File: {filename} could not be processed");
        }
        Self::raise(notifiers, ParserKind::AnpaParseFile, cause, None)
    }
}

impl IngestFtpError {
    /// FTP file with no matching feed parser
    pub fn unknown_parser_error(
        notifiers: &Notifiers,
        cause: Option<Cause>,
        provider: Option<&IngestProvider>,
        filename: Option<&str>,
    ) -> Self {
        if let Some(provider) = provider {
            error!(
                provider = %provider.name,
                filename,
                "Provider: {} - File: {} unknown file format. FeedParser couldn't be found.",
                provider.name,
                filename.unwrap_or("None")
            );
        }
        Self::raise(notifiers, IngestFtpKind::UnknownParser, cause, provider)
    }
}

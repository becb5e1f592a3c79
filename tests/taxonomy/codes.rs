//! Code tables and error rendering

use std::collections::HashSet;

use newsdesk::taxonomy::{
    code_table, registered_errors, FeedParserKind, FormatterError, FormatterKind, HttpPushKind,
    IngestApiKind, IngestEmailKind, IngestFileKind, IngestFtpKind, ParserError, ParserKind,
    ProviderKind, PublishEmailKind, PublishFileKind, PublishFtpKind, PublishOdbcKind,
    PublishQueueError, PublishQueueKind, SubscriberKind, UNKNOWN_ERROR,
};
use newsdesk::{Error, ErrorKind};

fn all_codes() -> Vec<(&'static str, u32)> {
    fn family<K: ErrorKind>() -> impl Iterator<Item = (&'static str, u32)> {
        code_table::<K>().into_iter().map(|(code, _)| (K::FAMILY, code))
    }
    family::<ParserKind>()
        .chain(family::<FeedParserKind>())
        .chain(family::<ProviderKind>())
        .chain(family::<IngestFileKind>())
        .chain(family::<IngestApiKind>())
        .chain(family::<IngestFtpKind>())
        .chain(family::<IngestEmailKind>())
        .chain(family::<FormatterKind>())
        .chain(family::<SubscriberKind>())
        .chain(family::<PublishQueueKind>())
        .chain(family::<PublishFtpKind>())
        .chain(family::<PublishEmailKind>())
        .chain(family::<PublishOdbcKind>())
        .chain(family::<PublishFileKind>())
        .chain(family::<HttpPushKind>())
        .collect()
}

#[test]
fn test_codes_are_unique_across_families() {
    let codes = all_codes();
    let unique: HashSet<u32> = codes.iter().map(|(_, code)| *code).collect();
    assert_eq!(unique.len(), codes.len());
}

#[test]
fn test_family_code_ranges() {
    for (family, code) in all_codes() {
        let range = match family {
            "ParserError" => 1001..=1008,
            "IngestError" => 2000..=2000,
            "ProviderError" => 2001..=2008,
            "IngestFileError" => 3001..=3002,
            "IngestApiError" => 4000..=4008,
            "IngestFtpError" => 5000..=5001,
            "IngestEmailError" => 6000..=6002,
            "FormatterError" => 7001..=7010,
            "SubscriberError" => 8001..=8001,
            "PublishQueueError" => 9001..=9010,
            "PublishFtpError" => 10000..=10000,
            "PublishEmailError" => 11000..=11001,
            "PublishODBCError" => 12000..=12000,
            "PublishFileError" => 13000..=13000,
            "PublishHTTPPushError" => 14000..=14002,
            other => panic!("unexpected family {other}"),
        };
        assert!(range.contains(&code), "{family} code {code} out of range");
    }
}

#[test]
fn test_message_lookup() {
    assert_eq!(ParserKind::message_for(1002), "Ingest file could not be parsed");
    assert_eq!(IngestApiKind::message_for(4001), "API ingest connection has timed out.");
    assert_eq!(SubscriberKind::message_for(8001), "Subscriber is closed");
    assert_eq!(
        FormatterKind::message_for(7007),
        "Article couldn't be converted to AAP Bulletin Builder format"
    );
    assert_eq!(PublishQueueKind::message_for(9010), "Article could not be found");
}

#[test]
fn test_unknown_code_message() {
    assert_eq!(ParserKind::message_for(9999), UNKNOWN_ERROR);
    assert_eq!(FormatterKind::message_for(8001), UNKNOWN_ERROR);
    assert_eq!(PublishQueueKind::from_code(9003), None);
}

#[test]
fn test_registered_errors_tables() {
    let registered = registered_errors();
    let families: Vec<_> = registered.keys().copied().collect();
    assert_eq!(families, ["IngestApiError", "IngestFileError", "IngestFtpError"]);
    assert_eq!(registered["IngestApiError"].len(), 9);
    assert_eq!(registered["IngestFtpError"][1], (5001, "FTP parser could not be found"));
    assert_eq!(
        registered["IngestFileError"][0],
        (3001, "Destination folder could not be created")
    );
}

#[test]
fn test_display_with_and_without_description() {
    let plain = ParserError::record(ParserKind::ParseMessage, None);
    assert_eq!(plain.to_string(), "ParserError Error 1001 - Message could not be parsed");

    let detailed = PublishQueueError::record(PublishQueueKind::UnknownFormat, None)
        .with_description("format TELEX");
    assert_eq!(
        detailed.to_string(),
        "PublishQueueError Error 9002 - Item format could not be recognized Details: format TELEX"
    );
}

#[test]
fn test_http_push_kind_from_status() {
    assert_eq!(HttpPushKind::from_status(404).code(), 14001);
    assert_eq!(HttpPushKind::from_status(503).code(), 14002);
    assert_eq!(HttpPushKind::from_status(302).code(), 14000);
}

#[test]
fn test_top_level_error_exposes_code() {
    let error: Error = FormatterError::record(FormatterKind::Ninjs, None).into();
    assert_eq!(error.code(), Some(7004));
    assert_eq!(error.message(), Some("Article couldn't be converted to NinJS"));
    assert_eq!(error.status_code(), None);
    assert_eq!(
        error.to_string(),
        "FormatterError Error 7004 - Article couldn't be converted to NinJS"
    );

    let error = Error::InvalidFileType("exe".to_string());
    assert_eq!(error.code(), None);
    assert_eq!(error.to_string(), "Invalid file type exe");
}

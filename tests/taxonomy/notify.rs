//! Notification on raised errors

use std::io;
use std::sync::{Arc, Mutex};

use newsdesk::notify::{ErrorEvent, Notifier, Notifiers};
use newsdesk::taxonomy::{
    IngestApiError, IngestApiKind, IngestFtpError, IngestFtpKind, IngestProvider, ParserError,
    ParserKind, PublishFtpError, PublishFtpKind, SubscriberError, SubscriberKind,
    INGEST_PROVIDERS_RESOURCE, SUBSCRIBERS_RESOURCE, UNKNOWN_DESTINATION, UNKNOWN_PROVIDER,
};
use newsdesk::{Cause, Subscriber};

use crate::init_logging;

fn recording_notifiers() -> (Notifiers, Arc<Mutex<Vec<ErrorEvent>>>) {
    init_logging();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let notifier: Arc<dyn Notifier> = Arc::new(move |event: &ErrorEvent| {
        sink.lock().unwrap().push(event.clone());
    });
    let notifiers = Notifiers::new();
    notifiers.add(notifier);
    (notifiers, events)
}

fn cause(message: &str) -> Option<Cause> {
    let cause: Cause = Box::new(io::Error::other(message.to_string()));
    Some(cause)
}

#[test]
fn test_ingest_raise_notifies_with_provider() {
    let (notifiers, events) = recording_notifiers();
    let provider = IngestProvider::new("p1", "Reuters");

    let error = IngestApiError::raise(
        &notifiers,
        IngestApiKind::Timeout,
        cause("connection timed out"),
        Some(&provider),
    );
    assert_eq!(error.code(), 4001);
    assert_eq!(error.provider_name(), "Reuters");
    assert!(error.cause().is_some());

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.level, "error");
    assert_eq!(
        event.message,
        "Error [4001] on ingest provider {{name}}: connection timed out"
    );
    assert_eq!(event.resource, Some("ingest_providers"));
    assert_eq!(event.name, "Reuters");
    assert_eq!(event.source_id, "p1");
}

#[test]
fn test_ingest_raise_respects_opt_out() {
    let (notifiers, events) = recording_notifiers();
    let mut provider = IngestProvider::new("p1", "Quiet feed");
    provider.notifications.on_error = false;

    let error = ParserError::raise(&notifiers, ParserKind::Nitf, cause("bad xml"), Some(&provider));
    assert_eq!(error.code(), 1006);
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn test_raise_without_cause_is_silent() {
    let (notifiers, events) = recording_notifiers();
    let provider = IngestProvider::new("p1", "Reuters");

    let error = IngestFtpError::raise(&notifiers, IngestFtpKind::Ftp, None, Some(&provider));
    assert!(error.cause().is_none());
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn test_raise_without_provider_uses_unknown() {
    let (notifiers, events) = recording_notifiers();

    let error = ParserError::anpa_parse_file_error(&notifiers, Some("story.tst"), cause("truncated"));
    assert_eq!(error.code(), 1003);
    assert_eq!(error.provider_name(), UNKNOWN_PROVIDER);

    let events = events.lock().unwrap();
    assert_eq!(events[0].resource, None);
    assert_eq!(events[0].source_id, "");
    assert_eq!(events[0].name, UNKNOWN_PROVIDER);
}

#[test]
fn test_notification_keeps_last_200_characters() {
    let (notifiers, events) = recording_notifiers();
    let detail = format!("{}{}", "x".repeat(50), "y".repeat(200));

    PublishFtpError::raise(&notifiers, PublishFtpKind::Ftp, cause(&detail), None);

    let events = events.lock().unwrap();
    let tail = events[0]
        .message
        .rsplit_once(": ")
        .map(|(_, tail)| tail)
        .unwrap();
    assert_eq!(tail, "y".repeat(200));
}

#[test]
fn test_publish_raise_notifies_with_destination() {
    let (notifiers, events) = recording_notifiers();
    let subscriber = Subscriber::new("s1", "Wire desk");

    let error = SubscriberError::subscriber_inactive(&notifiers, cause("closed"), Some(&subscriber));
    assert_eq!(error.kind(), SubscriberKind::Inactive);
    assert_eq!(error.destination_name(), "Wire desk");

    let events = events.lock().unwrap();
    assert_eq!(
        events[0].message,
        "Error [8001] on a Subscriber's destination {{name}}: closed"
    );
    assert_eq!(events[0].resource, Some("subscribers"));
    assert_eq!(events[0].source_id, "s1");
}

#[test]
fn test_notifiers_run_in_registration_order() {
    init_logging();
    let order = Arc::new(Mutex::new(Vec::new()));
    let notifiers = Notifiers::new();
    for label in ["first", "second", "third"] {
        let order = Arc::clone(&order);
        notifiers.add(Arc::new(move |_: &ErrorEvent| order.lock().unwrap().push(label)));
    }

    PublishFtpError::raise(&notifiers, PublishFtpKind::Ftp, cause("refused"), None);
    assert_eq!(*order.lock().unwrap(), ["first", "second", "third"]);
}

#[test]
fn test_duplicate_notifier_is_called_once() {
    let (notifiers, events) = recording_notifiers();
    let extra: Arc<dyn Notifier> = Arc::new(|_: &ErrorEvent| {});
    assert!(notifiers.add(Arc::clone(&extra)));
    assert!(!notifiers.add(extra));
    assert_eq!(notifiers.len(), 2);

    PublishFtpError::raise(&notifiers, PublishFtpKind::Ftp, cause("refused"), None);
    assert_eq!(events.lock().unwrap().len(), 1);
}

#[test]
fn test_source_tags_and_fallback_names() {
    let (notifiers, events) = recording_notifiers();
    let provider = IngestProvider::new("p9", "");
    let subscriber = Subscriber::new("s9", "");

    let ingest = IngestApiError::raise(&notifiers, IngestApiKind::Parse, cause("bad"), Some(&provider));
    let publish = PublishFtpError::raise(&notifiers, PublishFtpKind::Ftp, cause("bad"), Some(&subscriber));
    assert_eq!(ingest.provider_name(), UNKNOWN_PROVIDER);
    assert_eq!(publish.destination_name(), UNKNOWN_DESTINATION);

    let events = events.lock().unwrap();
    assert_eq!(events[0].resource, Some(INGEST_PROVIDERS_RESOURCE));
    assert_eq!(events[0].name, UNKNOWN_PROVIDER);
    assert_eq!(events[1].resource, Some(SUBSCRIBERS_RESOURCE));
    assert_eq!(events[1].name, UNKNOWN_DESTINATION);
}

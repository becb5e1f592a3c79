//! Formatting a single article

use chrono::{TimeZone, Utc};
use newsdesk::article::BodyFormat;
use newsdesk::formatter::StaticLocatorMap;
use newsdesk::subscriber::SequenceSettings;
use newsdesk::{ArticleBuilder, Formatter, ItemType, Subscriber};
use serde_json::Value;

use crate::Harness;

fn subscriber() -> Subscriber {
    Subscriber::new("sub-1", "Bulletin desk")
}

#[test]
fn test_paragraph_body() {
    let harness = Harness::new();
    let mut article = ArticleBuilder::new()
        .body_html("<p>Hello  world</p><p>  </p><p>Bye</p>")
        .build()
        .unwrap();

    harness.formatter.format(&mut article, &subscriber()).unwrap();
    assert_eq!(article.body_text.as_deref(), Some("Hello world\r\n\r\nBye\r\n\r\n"));
}

#[test]
fn test_whitespace_paragraphs_vanish() {
    let harness = Harness::new();
    let mut article = ArticleBuilder::new()
        .body_html("<p> </p><p>One</p><p>\t</p><p>Two</p><p></p>")
        .build()
        .unwrap();

    harness.formatter.format(&mut article, &subscriber()).unwrap();
    assert_eq!(article.body_text.as_deref(), Some("One\r\n\r\nTwo\r\n\r\n"));
}

#[test]
fn test_no_double_spaces_in_output() {
    let harness = Harness::new();
    let mut article = ArticleBuilder::new()
        .body_html("Start   of<br>   the<br>story    ends")
        .build()
        .unwrap();

    harness.formatter.format(&mut article, &subscriber()).unwrap();
    let text = article.body_text.unwrap();
    assert!(!text.contains("  "), "{text:?}");
    assert_eq!(text, "Start of the story ends");
}

#[test]
fn test_footer_is_appended() {
    let harness = Harness::new();
    let mut article = ArticleBuilder::new()
        .body_html("<p>Story</p>")
        .body_footer("<p>AAP  footer</p>")
        .build()
        .unwrap();

    harness.formatter.format(&mut article, &subscriber()).unwrap();
    assert_eq!(article.body_text.as_deref(), Some("Story\r\n\r\nAAP footer\r\n\r\n"));
}

#[test]
fn test_preserved_body_keeps_lines() {
    let harness = Harness::new();
    let mut article = ArticleBuilder::new()
        .body_html("Table row one\nTable row two\n")
        .body_footer("<i>footer</i>")
        .format(BodyFormat::Preserved)
        .build()
        .unwrap();

    let items = harness.formatter.format(&mut article, &subscriber()).unwrap();
    assert_eq!(
        article.body_text.as_deref(),
        Some("Table row one\r\nTable row two\r\n\r\nfooter")
    );

    let record: Value = serde_json::from_str(&items[0].1.data).unwrap();
    assert_eq!(record["body_text"], "Table row one\r\nTable row two\r\n\r\nfooter");
}

#[test]
fn test_picture_uses_caption() {
    let harness = Harness::new();
    let mut article = ArticleBuilder::new()
        .item_type(ItemType::Picture)
        .description_text("Crowd at the <b>final</b>")
        .build()
        .unwrap();

    let items = harness.formatter.format(&mut article, &subscriber()).unwrap();
    assert_eq!(article.body_text.as_deref(), Some("Crowd at the final"));
    assert_eq!(items[0].1.item_type, ItemType::Picture);
}

#[test]
fn test_legal_slugline() {
    let harness = Harness::new();
    let mut article = ArticleBuilder::new()
        .slugline("Supreme court ruling on appeal")
        .marked_for_legal(true)
        .build()
        .unwrap();

    let items = harness.formatter.format(&mut article, &subscriber()).unwrap();
    assert_eq!(items[0].1.slugline, "Legal: Supreme court rul");
    assert_eq!(article.slugline.as_deref(), Some("Legal: Supreme court rul"));
}

#[test]
fn test_locator_and_subject_derivation() {
    let harness = Harness::new();
    let mut article = ArticleBuilder::new()
        .category("s", "Sport")
        .category("a", "Australian General News")
        .subject("04000000", "economy")
        .subject("15054000", "soccer")
        .build()
        .unwrap();

    harness.formatter.format(&mut article, &subscriber()).unwrap();

    let place = article.place.as_ref().unwrap();
    assert_eq!(place.len(), 1);
    assert_eq!(place[0].qcode, "SPO");
    assert_eq!(place[0].name, "SPO");
    assert_eq!(article.first_category.as_ref().unwrap().qcode, "s");
    assert_eq!(article.first_subject.as_deref(), Some("15054000"));
}

#[test]
fn test_unmapped_category_leaves_place_unset() {
    let harness = Harness::with_locators(StaticLocatorMap::new());
    let mut article = ArticleBuilder::new()
        .category("f", "Finance")
        .subject("04000000", "economy")
        .build()
        .unwrap();

    harness.formatter.format(&mut article, &subscriber()).unwrap();
    assert!(article.place.is_none());
    assert_eq!(article.first_category.as_ref().unwrap().qcode, "f");
    assert_eq!(article.first_subject.as_deref(), Some("04000000"));
}

#[test]
fn test_record_payload() {
    let harness = Harness::new();
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let mut article = ArticleBuilder::new()
        .id("urn:story:1")
        .version(2)
        .package_type("takes")
        .headline("Markets close higher")
        .slugline("Markets")
        .body_html("<p>Shares rose.</p>")
        .category("f", "Finance")
        .firstcreated(created)
        .versioncreated(created)
        .build()
        .unwrap();

    let items = harness.formatter.format(&mut article, &subscriber()).unwrap();
    assert_eq!(items.len(), 1);
    let (sequence, record) = &items[0];
    assert_eq!(*sequence, 1);
    assert_eq!(record.id.as_str(), "urn:story:1");
    assert_eq!(record.version, Some(2));
    assert_eq!(record.item_type, ItemType::Text);
    assert_eq!(record.package_type, "takes");
    assert_eq!(record.headline, "Markets close higher");
    assert_eq!(record.slugline, "Markets");

    let data: Value = serde_json::from_str(&record.data).unwrap();
    assert_eq!(data["_id"], "urn:story:1");
    assert_eq!(data["body_text"], "Shares rose.\r\n\r\n");
    assert_eq!(data["first_category"]["qcode"], "f");
    assert_eq!(data["firstcreated"], "2024-03-01T10:00:00+0000");
}

#[test]
fn test_sequence_numbers_per_subscriber() {
    let harness = Harness::new();
    let first = Subscriber::new("sub-1", "First");
    let second = Subscriber::new("sub-2", "Second");

    let mut sequences = Vec::new();
    for subscriber in [&first, &first, &second, &first] {
        let mut article = ArticleBuilder::new().build().unwrap();
        let items = harness.formatter.format(&mut article, subscriber).unwrap();
        sequences.push(items[0].0);
    }
    assert_eq!(sequences, [1, 2, 1, 3]);
    assert_eq!(harness.sequences.last_issued(&first), Some(3));
}

#[test]
fn test_sequence_numbers_wrap() {
    let harness = Harness::new();
    let mut subscriber = subscriber();
    subscriber.sequence_num_settings = SequenceSettings { min: 5, max: 6 };

    let mut sequences = Vec::new();
    for _ in 0..3 {
        let mut article = ArticleBuilder::new().build().unwrap();
        let items = harness.formatter.format(&mut article, &subscriber).unwrap();
        sequences.push(items[0].0);
    }
    assert_eq!(sequences, [5, 6, 5]);
}

#[test]
fn test_closed_subscriber_raises_formatter_error() {
    let harness = Harness::new();
    let mut subscriber = subscriber();
    subscriber.is_active = false;
    let mut article = ArticleBuilder::new().build().unwrap();

    let error = harness.formatter.format(&mut article, &subscriber).unwrap_err();
    assert_eq!(error.code(), 7007);
    assert_eq!(error.destination_name(), "Bulletin desk");
    let source = std::error::Error::source(&error).unwrap();
    assert!(source.to_string().contains("8001"));

    let notified = harness.notified.lock().unwrap();
    assert_eq!(notified.len(), 1);
    assert!(notified[0].starts_with("Error [7007] on a Subscriber's destination {{name}}: "));
}

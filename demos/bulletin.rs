//! Format a story for a bulletin destination and print the record
//!
//! Run with: cargo run --example bulletin

use std::sync::Arc;

use newsdesk::formatter::{CategorySubjectDerivation, StaticLocatorMap};
use newsdesk::{
    ArticleBuilder, BULLETIN_BUILDER_FORMAT, BulletinBuilderFormatter, BulletinConfig,
    ErrorEvent, FormatterRegistry, InMemorySequenceNumbers, Notifiers, Subscriber,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let notifiers = Arc::new(Notifiers::new());
    notifiers.add(Arc::new(|event: &ErrorEvent| {
        eprintln!("notification: {} ({})", event.message, event.name);
    }));

    let mut registry = FormatterRegistry::new();
    registry.register(Arc::new(BulletinBuilderFormatter::new(
        BulletinConfig::default(),
        Arc::new(InMemorySequenceNumbers::new(Arc::clone(&notifiers))),
        Arc::new(StaticLocatorMap::from_iter([("A", "VIC"), ("S", "SPO")])),
        Arc::new(CategorySubjectDerivation::from_iter([("S", "15000000")])),
        Arc::clone(&notifiers),
    )));

    let mut article = ArticleBuilder::new()
        .headline("Storm lashes Melbourne")
        .slugline("Weather Storm")
        .body_html("<p>Heavy  rain fell across the city.</p><p> </p><p>More to come.</p>")
        .body_footer("<p>AAP</p>")
        .category("A", "Australian General News")
        .subject("17000000", "weather")
        .build()?;
    let subscriber = Subscriber::new("bulletin-1", "Bulletin desk");

    let formatter = registry.formatter_for(BULLETIN_BUILDER_FORMAT, &article)?;
    for (sequence, record) in formatter.format(&mut article, &subscriber)? {
        println!("Sequence: {sequence}");
        println!("Slugline: {}", record.slugline);
        println!("Data:     {}", record.data);
    }

    // A closed subscriber is reported through the notifiers
    let mut closed = subscriber.clone();
    closed.is_active = false;
    if let Err(e) = formatter.format(&mut article, &closed) {
        println!("Failed: {e}");
    }

    Ok(())
}

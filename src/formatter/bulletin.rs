//! Bulletin builder formatter
//!
//! Produces one flat record per article: identifying fields, the output
//! slugline and the JSON encoded article with a plain text body and derived
//! place, category and subject fields.

use std::sync::Arc;

use tracing::{debug, info};

use super::mapping::{LocatorMapping, SubjectDerivation};
use super::text::flatten_body;
use super::{append_body_footer, append_legal, FormattedItem, Formatter, OdbcRecord};
use crate::article::{Article, Place};
use crate::config::BulletinConfig;
use crate::notify::Notifiers;
use crate::subscriber::{SequenceNumbers, Subscriber};
use crate::taxonomy::{Cause, FormatterError, FormatterKind};

/// Formatter for bulletin builder destinations
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use newsdesk::article::ArticleBuilder;
/// use newsdesk::formatter::{
///     BulletinBuilderFormatter, CategorySubjectDerivation, Formatter, StaticLocatorMap,
/// };
/// use newsdesk::notify::Notifiers;
/// use newsdesk::subscriber::{InMemorySequenceNumbers, Subscriber};
/// use newsdesk::BulletinConfig;
///
/// let notifiers = Arc::new(Notifiers::new());
/// let formatter = BulletinBuilderFormatter::new(
///     BulletinConfig::default(),
///     Arc::new(InMemorySequenceNumbers::new(Arc::clone(&notifiers))),
///     Arc::new(StaticLocatorMap::from_iter([("A", "VIC")])),
///     Arc::new(CategorySubjectDerivation::new()),
///     notifiers,
/// );
///
/// let mut article = ArticleBuilder::new()
///     .headline("Storm")
///     .body_html("<p>Heavy rain.</p>")
///     .category("a", "Australian General News")
///     .build()
///     .unwrap();
/// let subscriber = Subscriber::new("sub-1", "Bulletin");
///
/// assert!(formatter.can_format("AAP BULLETIN BUILDER", &article));
/// let items = formatter.format(&mut article, &subscriber).unwrap();
/// assert_eq!(items[0].0, 1);
/// assert_eq!(article.body_text.as_deref(), Some("Heavy rain.\r\n\r\n"));
/// assert_eq!(article.place.as_ref().unwrap()[0].qcode, "VIC");
/// ```
pub struct BulletinBuilderFormatter {
    config: BulletinConfig,
    sequence_numbers: Arc<dyn SequenceNumbers>,
    locators: Arc<dyn LocatorMapping>,
    subjects: Arc<dyn SubjectDerivation>,
    notifiers: Arc<Notifiers>,
}

impl BulletinBuilderFormatter {
    /// Create a formatter from its collaborators
    pub fn new(
        config: BulletinConfig,
        sequence_numbers: Arc<dyn SequenceNumbers>,
        locators: Arc<dyn LocatorMapping>,
        subjects: Arc<dyn SubjectDerivation>,
        notifiers: Arc<Notifiers>,
    ) -> Self {
        Self {
            config,
            sequence_numbers,
            locators,
            subjects,
            notifiers,
        }
    }

    /// Formatter configuration
    pub fn config(&self) -> &BulletinConfig {
        &self.config
    }

    fn build_record(
        &self,
        article: &mut Article,
        subscriber: &Subscriber,
    ) -> Result<FormattedItem, Cause> {
        article.slugline = Some(append_legal(article, &self.config));
        let sequence = self.sequence_numbers.generate_sequence_number(subscriber)?;

        let body = append_body_footer(article);
        let body = body.trim_matches(['\r', '\n']);
        article.body_text = Some(flatten_body(body));

        if let Some(category) = article.anpa_category.first().cloned() {
            let locator = self.locators.map(article, &category.qcode.to_uppercase());
            if let Some(locator) = locator {
                debug!(category = %category.qcode, locator = %locator, "derived place");
                article.place = Some(vec![Place {
                    qcode: locator.clone(),
                    name: locator,
                }]);
            }
            article.first_subject = self.subjects.derive(&category, article);
            article.first_category = Some(category);
        }

        let data = serde_json::to_string(article)?;
        let record = OdbcRecord {
            id: article.id.clone(),
            version: article.version,
            item_type: article.item_type,
            package_type: article.package_type.clone().unwrap_or_default(),
            headline: article.headline.clone().unwrap_or_default(),
            slugline: article.slugline.clone().unwrap_or_default(),
            data,
        };
        Ok((sequence, record))
    }
}

impl Formatter for BulletinBuilderFormatter {
    fn format(
        &self,
        article: &mut Article,
        subscriber: &Subscriber,
    ) -> Result<Vec<FormattedItem>, FormatterError> {
        match self.build_record(article, subscriber) {
            Ok((sequence, record)) => {
                info!(
                    item = %record.id,
                    subscriber = %subscriber.id,
                    sequence,
                    "formatted bulletin"
                );
                Ok(vec![(sequence, record)])
            }
            Err(cause) => Err(FormatterError::raise(
                &self.notifiers,
                FormatterKind::BulletinBuilder,
                Some(cause),
                Some(subscriber),
            )),
        }
    }

    fn can_format(&self, format_type: &str, _article: &Article) -> bool {
        format_type == self.config.format_type
    }
}

impl std::fmt::Debug for BulletinBuilderFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulletinBuilderFormatter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

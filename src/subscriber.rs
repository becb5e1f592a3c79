//! Publish destinations and their sequence numbers

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::notify::Notifiers;
use crate::taxonomy::SubscriberError;
use crate::Result;

/// A publish destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    /// Subscriber identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Closed subscribers receive nothing
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    /// Range of publish sequence numbers
    #[serde(default)]
    pub sequence_num_settings: SequenceSettings,
}

fn default_is_active() -> bool {
    true
}

impl Subscriber {
    /// Create an active subscriber with the default sequence range
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_active: true,
            sequence_num_settings: SequenceSettings::default(),
        }
    }
}

/// Inclusive range publish sequence numbers cycle through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceSettings {
    /// First number issued, and the number issued after `max`
    pub min: i64,
    /// Last number issued before wrapping
    pub max: i64,
}

impl Default for SequenceSettings {
    fn default() -> Self {
        Self { min: 1, max: 9999 }
    }
}

/// Source of per-subscriber publish sequence numbers
pub trait SequenceNumbers: Send + Sync {
    /// Issue the next sequence number for a subscriber
    fn generate_sequence_number(&self, subscriber: &Subscriber) -> Result<i64>;
}

/// Sequence numbers kept in process memory
///
/// Each subscriber starts at its `min` and wraps back to `min` after `max`.
#[derive(Debug)]
pub struct InMemorySequenceNumbers {
    last_issued: Mutex<HashMap<String, i64>>,
    notifiers: Arc<Notifiers>,
}

impl InMemorySequenceNumbers {
    /// Create an empty sequence store reporting errors to `notifiers`
    pub fn new(notifiers: Arc<Notifiers>) -> Self {
        Self {
            last_issued: Mutex::new(HashMap::new()),
            notifiers,
        }
    }

    /// Last number issued to a subscriber
    pub fn last_issued(&self, subscriber: &Subscriber) -> Option<i64> {
        self.last_issued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&subscriber.id)
            .copied()
    }
}

impl SequenceNumbers for InMemorySequenceNumbers {
    fn generate_sequence_number(&self, subscriber: &Subscriber) -> Result<i64> {
        if !subscriber.is_active {
            warn!(subscriber = %subscriber.id, "sequence number requested for closed subscriber");
            return Err(
                SubscriberError::subscriber_inactive(&self.notifiers, None, Some(subscriber)).into(),
            );
        }

        let SequenceSettings { min, max } = subscriber.sequence_num_settings;
        let mut last_issued = self.last_issued.lock().unwrap_or_else(PoisonError::into_inner);
        let next = match last_issued.get(&subscriber.id) {
            Some(&last) if last >= min && last < max => last + 1,
            _ => min,
        };
        last_issued.insert(subscriber.id.clone(), next);
        debug!(subscriber = %subscriber.id, sequence = next, "issued sequence number");
        Ok(next)
    }
}

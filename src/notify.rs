//! Error notification side channel
//!
//! Family errors raised with a cause broadcast an [`ErrorEvent`] to every
//! registered [`Notifier`]. The registry is an ordinary value owned by the
//! application context and handed to whoever raises errors, typically behind
//! an `Arc`.
//!
//! # Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use newsdesk::notify::{ErrorEvent, Notifier, Notifiers};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let notifier: Arc<dyn Notifier> = Arc::new(move |event: &ErrorEvent| {
//!     sink.lock().unwrap().push(event.message.clone());
//! });
//!
//! let notifiers = Notifiers::new();
//! assert!(notifiers.add(Arc::clone(&notifier)));
//! assert!(!notifiers.add(notifier)); // already registered
//!
//! notifiers.notify(&ErrorEvent::error("boom", None, "feed", ""));
//! assert_eq!(seen.lock().unwrap().as_slice(), ["boom"]);
//! ```

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, trace};

/// Severity attached to error notifications
pub const ERROR_LEVEL: &str = "error";

/// A reported failure, as seen by notifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEvent {
    /// Severity, always [`ERROR_LEVEL`] for raised errors
    pub level: &'static str,
    /// Notification text; contains a `{{name}}` placeholder for the source name
    pub message: String,
    /// Kind of entity the failure is attached to (`ingest_providers`, `subscribers`)
    pub resource: Option<&'static str>,
    /// Name of the provider or destination
    pub name: String,
    /// Identifier of the provider or destination, empty when unknown
    pub source_id: String,
}

impl ErrorEvent {
    /// Create an error level event
    pub fn error(
        message: impl Into<String>,
        resource: Option<&'static str>,
        name: impl Into<String>,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            level: ERROR_LEVEL,
            message: message.into(),
            resource,
            name: name.into(),
            source_id: source_id.into(),
        }
    }
}

/// Receives error events
pub trait Notifier: Send + Sync {
    /// Handle one event
    fn notify(&self, event: &ErrorEvent);
}

impl<F> Notifier for F
where
    F: Fn(&ErrorEvent) + Send + Sync,
{
    fn notify(&self, event: &ErrorEvent) {
        self(event)
    }
}

/// Ordered set of registered notifiers
#[derive(Default)]
pub struct Notifiers {
    notifiers: RwLock<Vec<Arc<dyn Notifier>>>,
}

impl Notifiers {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a notifier
    ///
    /// Returns `false` when the same notifier instance is already registered,
    /// in which case the registry is unchanged.
    pub fn add(&self, notifier: Arc<dyn Notifier>) -> bool {
        let mut notifiers = self.notifiers.write().unwrap_or_else(PoisonError::into_inner);
        if notifiers.iter().any(|existing| same_notifier(existing, &notifier)) {
            trace!("notifier already registered");
            return false;
        }
        notifiers.push(notifier);
        debug!(count = notifiers.len(), "registered notifier");
        true
    }

    /// Deliver an event to every notifier, in registration order
    ///
    /// Panics raised by a notifier propagate to the caller.
    pub fn notify(&self, event: &ErrorEvent) {
        // Snapshot so a notifier may register others without deadlocking.
        let notifiers = self
            .notifiers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        trace!(count = notifiers.len(), resource = event.resource, "dispatching error event");
        for notifier in &notifiers {
            notifier.notify(event);
        }
    }

    /// Number of registered notifiers
    pub fn len(&self) -> usize {
        self.notifiers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if no notifier is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Notifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifiers").field("len", &self.len()).finish()
    }
}

fn same_notifier(a: &Arc<dyn Notifier>, b: &Arc<dyn Notifier>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

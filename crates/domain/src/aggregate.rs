//! Event-applying state.

use common::Version;
use serde::Serialize;

/// A fact recorded against an aggregate, named in the past tense.
pub trait DomainEvent: Serialize + Send + Sync + Clone {
    /// Name used as the `event` label on metrics and in logs.
    fn event_type(&self) -> &'static str;
}

/// State that only changes by applying its own events.
///
/// Requests are decided by inherent methods that return either the events to
/// apply or a rejection; nothing changes until the owner calls [`apply`].
///
/// [`apply`]: Aggregate::apply
pub trait Aggregate: Default + Send + Sync + Sized {
    type Event: DomainEvent;

    /// Why a request was turned down.
    type Error: std::error::Error + Send + Sync;

    fn aggregate_type() -> &'static str;

    /// Number of events applied so far.
    fn version(&self) -> Version;

    /// Set by the owner after each applied event.
    fn set_version(&mut self, version: Version);

    /// Folds one event into the state. Must not fail and must not touch
    /// anything outside `self`.
    fn apply(&mut self, event: Self::Event);

    fn apply_events(&mut self, events: impl IntoIterator<Item = Self::Event>) {
        for event in events {
            self.apply(event);
        }
    }
}

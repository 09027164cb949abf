//! The seam between the local store and external calendar providers.

use async_trait::async_trait;

use crate::error::AgendaResult;
use crate::event::Event;

/// A one-way sync target for newly created events.
///
/// Implementations should fail with `AgendaError::Auth` when they cannot
/// authenticate and `AgendaError::Publish` when the provider rejects the event.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Short provider name used in logs (e.g. "google")
    fn name(&self) -> &str;

    /// Push the event to the provider, returning a link to the remote copy.
    async fn publish(&self, event: &Event) -> AgendaResult<String>;
}

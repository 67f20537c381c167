//! Event publisher that only writes to the diagnostic log.

use condo_application::ports::events::{GovernanceEvent, GovernanceEventPublisher};
use std::sync::Arc;
use tracing::info;

/// Logs every event with `tracing::info!`, then forwards it to an optional
/// inner publisher.
pub struct TracingEventPublisher {
    inner: Option<Arc<dyn GovernanceEventPublisher>>,
}

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self { inner: None }
    }

    pub fn forwarding_to(inner: Arc<dyn GovernanceEventPublisher>) -> Self {
        Self { inner: Some(inner) }
    }
}

impl Default for TracingEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl GovernanceEventPublisher for TracingEventPublisher {
    fn publish(&self, event: GovernanceEvent) {
        info!(event = event.event_type(), payload = %event.payload(), "governance event");
        if let Some(inner) = &self.inner {
            inner.publish(event);
        }
    }
}

//! Logging infrastructure: governance event publishing.
//!
//! - [`JsonlEventLog`]: appends events to a JSONL file
//! - [`TracingEventPublisher`]: emits events as `tracing` records
//!
//! Both implement the
//! [`GovernanceEventPublisher`](condo_application::GovernanceEventPublisher) port.

mod jsonl_event_log;
mod tracing_publisher;

pub use jsonl_event_log::{EventLogError, JsonlEventLog};
pub use tracing_publisher::TracingEventPublisher;

//! Queue registry for queuestack
//!
//! Holds the runtime queue records produced by the topology bootstrap:
//! derived identifiers, defaulted attributes, duplicate-detection stores,
//! and resolved dead-letter links.

pub mod redrive;
pub mod storage;

pub use redrive::{parse_redrive_policy, ParsedRedrivePolicy};
pub use storage::{Queue, QueueStore, RedrivePolicy};

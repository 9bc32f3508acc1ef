//! Topic registry for queuestack
//!
//! Holds the runtime topic records produced by the topology bootstrap, each
//! with its subscriptions in declaration order, bound either to a queue or
//! to an HTTP callback endpoint.

pub mod filter;
pub mod storage;

pub use filter::FilterPolicy;
pub use storage::{is_http_protocol, Subscription, Topic, TopicStore, SQS_PROTOCOL};

//! queuestack - local SQS/SNS topology emulator
//!
//! Loads a declarative YAML environment description and bootstraps a fully
//! wired in-memory topology of queues, topics, and subscriptions before any
//! traffic is served. The binary is a thin wrapper over these modules.

pub mod config;
pub mod router;
pub mod state;
pub mod topology;

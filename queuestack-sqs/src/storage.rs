//! In-memory queue registry

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tracing::info;

/// Redrive link from a source queue to its dead-letter queue.
///
/// Both fields live in one optional value: a queue either has a dead-letter
/// target and a positive receive threshold, or neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedrivePolicy {
    /// Name of the registered dead-letter queue.
    pub dead_letter_queue: String,
    /// Receive attempts after which a message moves to the dead-letter queue.
    pub max_receive_count: u32,
}

/// Runtime queue record.
#[derive(Debug, Clone, Serialize)]
pub struct Queue {
    pub name: String,
    pub arn: String,
    pub url: String,
    pub visibility_timeout: u32,
    pub receive_wait_time_seconds: u32,
    pub maximum_message_size: u32,
    pub is_fifo: bool,
    pub enable_duplicates: bool,
    /// Deduplication id to first-seen timestamp, seeded empty at creation.
    #[serde(skip)]
    pub duplicates: HashMap<String, DateTime<Utc>>,
    pub redrive_policy: Option<RedrivePolicy>,
}

impl Queue {
    /// Receive threshold of the redrive link; 0 means no redrive.
    pub fn max_receive_count(&self) -> u32 {
        self.redrive_policy
            .as_ref()
            .map_or(0, |policy| policy.max_receive_count)
    }

    /// Name of the linked dead-letter queue, if any.
    pub fn dead_letter_queue(&self) -> Option<&str> {
        self.redrive_policy
            .as_ref()
            .map(|policy| policy.dead_letter_queue.as_str())
    }
}

/// Name-keyed queue registry.
#[derive(Debug, Default)]
pub struct QueueStore {
    queues: DashMap<String, Queue>,
}

impl QueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a queue under its name.
    ///
    /// Re-registering an existing name replaces the previous record.
    pub fn register(&self, queue: Queue) {
        info!(name = %queue.name, url = %queue.url, "Registering queue");
        self.queues.insert(queue.name.clone(), queue);
    }

    pub fn get(&self, name: &str) -> Option<Queue> {
        self.queues.get(name).map(|q| q.value().clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.queues.contains_key(name)
    }

    /// Attach a resolved redrive link to an already registered queue.
    ///
    /// Returns false when no queue of that name is registered.
    pub fn set_redrive_policy(&self, name: &str, policy: RedrivePolicy) -> bool {
        match self.queues.get_mut(name) {
            Some(mut queue) => {
                queue.redrive_policy = Some(policy);
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.queues.iter().map(|q| q.key().clone()).collect()
    }

    /// Snapshot of all registered queues, ordered by name.
    pub fn all(&self) -> Vec<Queue> {
        let mut queues: Vec<Queue> = self.queues.iter().map(|q| q.value().clone()).collect();
        queues.sort_by(|a, b| a.name.cmp(&b.name));
        queues
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}

//! In-memory topic registry

use dashmap::DashMap;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::filter::FilterPolicy;

/// Protocol marker for queue-backed delivery.
pub const SQS_PROTOCOL: &str = "sqs";

/// Whether a declared protocol belongs to the HTTP callback family.
pub fn is_http_protocol(protocol: &str) -> bool {
    protocol.contains("http")
}

/// Runtime subscription record.
#[derive(Debug, Clone, Serialize)]
pub struct Subscription {
    /// Topic ARN plus a fresh unique suffix.
    pub arn: String,
    pub protocol: String,
    /// Queue ARN for queue-backed delivery, callback URL otherwise.
    pub endpoint: String,
    pub raw: bool,
    pub filter_policy: Option<FilterPolicy>,
}

impl Subscription {
    pub fn new(
        topic_arn: &str,
        protocol: impl Into<String>,
        endpoint: impl Into<String>,
        raw: bool,
    ) -> Self {
        Self {
            arn: format!("{}:{}", topic_arn, Uuid::new_v4()),
            protocol: protocol.into(),
            endpoint: endpoint.into(),
            raw,
            filter_policy: None,
        }
    }

    pub fn with_filter_policy(mut self, policy: FilterPolicy) -> Self {
        self.filter_policy = Some(policy);
        self
    }
}

/// Runtime topic record. Subscriptions keep declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct Topic {
    pub name: String,
    pub arn: String,
    pub subscriptions: Vec<Subscription>,
}

impl Topic {
    pub fn new(name: impl Into<String>, arn: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arn: arn.into(),
            subscriptions: Vec::new(),
        }
    }
}

/// Name-keyed topic registry.
#[derive(Debug, Default)]
pub struct TopicStore {
    topics: DashMap<String, Topic>,
}

impl TopicStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a topic under its name.
    ///
    /// Re-registering an existing name replaces the previous record.
    pub fn register(&self, topic: Topic) {
        info!(
            name = %topic.name,
            arn = %topic.arn,
            subscriptions = topic.subscriptions.len(),
            "Registering topic"
        );
        self.topics.insert(topic.name.clone(), topic);
    }

    pub fn get(&self, name: &str) -> Option<Topic> {
        self.topics.get(name).map(|t| t.value().clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.topics.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.topics.iter().map(|t| t.key().clone()).collect()
    }

    /// Snapshot of all registered topics, ordered by name.
    pub fn all(&self) -> Vec<Topic> {
        let mut topics: Vec<Topic> = self.topics.iter().map(|t| t.value().clone()).collect();
        topics.sort_by(|a, b| a.name.cmp(&b.name));
        topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

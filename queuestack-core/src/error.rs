//! Bootstrap error taxonomy

use thiserror::Error;

/// Errors raised while resolving an environment description into a runtime
/// topology.
///
/// Every variant aborts the bootstrap: the input is static configuration,
/// so retrying would reproduce the identical failure. A caller receiving
/// any of these must not serve traffic on the partially resolved graph.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The raw redrive policy matched neither the integer-typed nor the
    /// string-typed `maxReceiveCount` schema. Both parse failures are kept
    /// for diagnostics.
    #[error(
        "queue {queue}: redrive policy matches no schema (as integer count: {int_schema}; as string count: {string_schema})"
    )]
    InvalidRedrivePolicyJson {
        queue: String,
        int_schema: serde_json::Error,
        string_schema: serde_json::Error,
    },

    /// `deadLetterTargetArn` and a non-zero `maxReceiveCount` must be
    /// present together or absent together.
    #[error("queue {queue}: redrive policy must set both deadLetterTargetArn and maxReceiveCount")]
    InvalidRedrivePolicyValues { queue: String },

    /// The redrive target names a queue that is not registered anywhere in
    /// the environment.
    #[error("queue {queue}: dead letter queue '{target}' not found")]
    DeadLetterQueueNotFound { queue: String, target: String },

    /// A subscription carried a filter policy that is not a JSON object
    /// mapping attribute names to arrays of accepted values.
    #[error("topic {topic}: invalid filter policy on subscription to '{endpoint}'")]
    InvalidFilterPolicyJson {
        topic: String,
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

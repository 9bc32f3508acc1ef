//! Environment configuration
//!
//! A configuration file is a YAML map from environment name to environment
//! body. Exactly one environment is active per process: selection falls back
//! to the built-in `Local` name, and to an all-defaults environment when the
//! requested name matches nothing. Unset values use the zero sentinel and
//! are filled by the defaulting cascade before bootstrap.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

/// Name of the environment used when none is requested.
pub const DEFAULT_ENVIRONMENT: &str = "Local";

/// Fallback listen port, also applied when an environment omits its host.
pub const DEFAULT_PORT: u16 = 4100;

const DEFAULT_VISIBILITY_TIMEOUT: u32 = 30;
const DEFAULT_MAXIMUM_MESSAGE_SIZE: u32 = 262_144; // 256K
const DEFAULT_ACCOUNT_ID: &str = "queue";
const DEFAULT_HOST: &str = "localhost";

/// All environments declared in a configuration file, keyed by name.
pub type Environments = HashMap<String, Environment>;

/// Environment-wide queue attribute defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueueAttributeDefaults {
    pub visibility_timeout: u32,
    pub receive_message_wait_time_seconds: u32,
    pub maximum_message_size: u32,
}

/// One declared queue.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueueDefinition {
    pub name: String,
    pub receive_message_wait_time_seconds: u32,
    pub maximum_message_size: u32,
    /// Raw redrive policy JSON; parsed and validated during bootstrap.
    pub redrive_policy: String,
}

/// One declared subscription.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubscriptionDefinition {
    pub protocol: String,
    /// Callback URL for the HTTP family, queue name otherwise.
    pub endpoint: String,
    pub raw: bool,
    /// Raw filter policy JSON; parsed during bootstrap.
    pub filter_policy: String,
}

/// One declared topic.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TopicDefinition {
    pub name: String,
    pub subscriptions: Vec<SubscriptionDefinition>,
}

/// One runnable environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub region: String,
    pub account_id: String,
    pub host: String,
    pub port: u16,
    pub sqs_port: u16,
    pub sns_port: u16,
    pub enable_duplicates: bool,
    pub queue_attribute_defaults: QueueAttributeDefaults,
    pub queues: Vec<QueueDefinition>,
    pub topics: Vec<TopicDefinition>,
}

impl Environment {
    /// Fill unset values with their built-in defaults.
    ///
    /// Runs once per activation, after port resolution and before any queue
    /// is registered; the queue registrar consumes the filled values
    /// directly.
    pub fn apply_defaults(&mut self) {
        if self.queue_attribute_defaults.visibility_timeout == 0 {
            self.queue_attribute_defaults.visibility_timeout = DEFAULT_VISIBILITY_TIMEOUT;
        }
        if self.queue_attribute_defaults.maximum_message_size == 0 {
            self.queue_attribute_defaults.maximum_message_size = DEFAULT_MAXIMUM_MESSAGE_SIZE;
        }
        if self.account_id.is_empty() {
            self.account_id = DEFAULT_ACCOUNT_ID.to_string();
        }
        if self.host.is_empty() {
            self.host = DEFAULT_HOST.to_string();
            self.port = DEFAULT_PORT;
        }
    }

    /// Listen ports for this environment: the single declared port, else the
    /// split sqs/sns pair, else the built-in default.
    ///
    /// With a split pair the environment's effective port (used in queue
    /// URLs) becomes the sqs one.
    pub fn resolve_ports(&mut self) -> Vec<u16> {
        if self.port != 0 {
            vec![self.port]
        } else if self.sqs_port != 0 && self.sns_port != 0 {
            self.port = self.sqs_port;
            vec![self.sqs_port, self.sns_port]
        } else {
            vec![DEFAULT_PORT]
        }
    }
}

/// Load a YAML configuration file mapping environment names to environments.
pub fn load_environments(path: &Path) -> anyhow::Result<Environments> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;

    serde_yaml::from_str(&contents)
        .with_context(|| format!("parsing config file {}", path.display()))
}

/// Select the active environment by name.
///
/// No name selects `Local`; a name with no matching entry yields an
/// all-defaults environment.
pub fn select_environment(environments: &Environments, name: Option<&str>) -> Environment {
    let name = name.unwrap_or(DEFAULT_ENVIRONMENT);
    match environments.get(name) {
        Some(environment) => environment.clone(),
        None => {
            warn!(environment = %name, "Environment not in config file, using built-in defaults");
            Environment::default()
        }
    }
}

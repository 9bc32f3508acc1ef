//! Topology bootstrap
//!
//! Resolves a flat environment description into the runtime graph the
//! request layer reads: queues with derived identifiers and dead-letter
//! links, topics with bound subscriptions. Construction is pure in-memory
//! work; on any error the partially built graph is dropped, never published.

use std::collections::HashMap;

use tracing::{debug, info};

use queuestack_core::{ident, BootstrapError};
use queuestack_sns::{
    is_http_protocol, FilterPolicy, Subscription, Topic, TopicStore, SQS_PROTOCOL,
};
use queuestack_sqs::{parse_redrive_policy, Queue, QueueStore, RedrivePolicy};

use crate::config::{Environment, QueueDefinition};

/// The fully wired runtime graph of one environment.
#[derive(Debug, Default)]
pub struct Topology {
    queues: QueueStore,
    topics: TopicStore,
}

impl Topology {
    /// Resolve an environment into a finished topology.
    ///
    /// The environment must already have its defaults applied. Queues are
    /// materialized first; dead-letter links resolve in a second pass over
    /// the definitions, so a dead-letter queue may be declared after the
    /// queue that references it. Topics and subscriptions come last and may
    /// auto-create queues.
    pub fn bootstrap(env: &Environment) -> Result<Self, BootstrapError> {
        let topology = Topology::default();

        for def in &env.queues {
            topology.queues.register(queue_from_definition(env, def));
        }

        for def in &env.queues {
            if def.redrive_policy.is_empty() {
                continue;
            }
            let parsed = parse_redrive_policy(&def.name, &def.redrive_policy)?;
            let target = parsed.dead_letter_queue_name();
            if !topology.queues.contains(target) {
                return Err(BootstrapError::DeadLetterQueueNotFound {
                    queue: def.name.clone(),
                    target: target.to_string(),
                });
            }
            topology.queues.set_redrive_policy(
                &def.name,
                RedrivePolicy {
                    dead_letter_queue: target.to_string(),
                    max_receive_count: parsed.max_receive_count,
                },
            );
        }

        for def in &env.topics {
            let topic_arn = ident::topic_arn(&env.region, &env.account_id, &def.name);
            let mut topic = Topic::new(&def.name, &topic_arn);

            for sub in &def.subscriptions {
                let subscription = if is_http_protocol(&sub.protocol) {
                    Subscription::new(&topic_arn, &sub.protocol, &sub.endpoint, sub.raw)
                } else {
                    let queue_arn = topology.ensure_queue(env, &sub.endpoint);
                    Subscription::new(&topic_arn, SQS_PROTOCOL, queue_arn, sub.raw)
                };

                let subscription = if sub.filter_policy.is_empty() {
                    subscription
                } else {
                    let policy =
                        FilterPolicy::parse(&def.name, &sub.endpoint, &sub.filter_policy)?;
                    subscription.with_filter_policy(policy)
                };

                topic.subscriptions.push(subscription);
            }

            topology.topics.register(topic);
        }

        info!(
            queues = topology.queues.len(),
            topics = topology.topics.len(),
            "Topology resolved"
        );
        Ok(topology)
    }

    /// ARN of the named queue, registering it with environment defaults when
    /// no queue of that name exists yet. This is the one path where a queue
    /// comes into being without an explicit definition.
    fn ensure_queue(&self, env: &Environment, name: &str) -> String {
        match self.queues.get(name) {
            Some(queue) => queue.arn,
            None => {
                debug!(queue = %name, "Auto-creating queue for subscription");
                let queue = new_queue(
                    env,
                    name,
                    env.queue_attribute_defaults.receive_message_wait_time_seconds,
                    env.queue_attribute_defaults.maximum_message_size,
                );
                let arn = queue.arn.clone();
                self.queues.register(queue);
                arn
            }
        }
    }

    pub fn queues(&self) -> &QueueStore {
        &self.queues
    }

    pub fn topics(&self) -> &TopicStore {
        &self.topics
    }
}

/// Build the record for a declared queue, falling back to the environment
/// defaults for values the definition leaves unset.
fn queue_from_definition(env: &Environment, def: &QueueDefinition) -> Queue {
    let defaults = &env.queue_attribute_defaults;

    let receive_wait_time_seconds = if def.receive_message_wait_time_seconds == 0 {
        defaults.receive_message_wait_time_seconds
    } else {
        def.receive_message_wait_time_seconds
    };
    let maximum_message_size = if def.maximum_message_size == 0 {
        defaults.maximum_message_size
    } else {
        def.maximum_message_size
    };

    new_queue(env, &def.name, receive_wait_time_seconds, maximum_message_size)
}

fn new_queue(
    env: &Environment,
    name: &str,
    receive_wait_time_seconds: u32,
    maximum_message_size: u32,
) -> Queue {
    Queue {
        name: name.to_string(),
        arn: ident::queue_arn(&env.region, &env.account_id, name),
        url: ident::queue_url(&env.host, env.port, &env.region, &env.account_id, name),
        visibility_timeout: env.queue_attribute_defaults.visibility_timeout,
        receive_wait_time_seconds,
        maximum_message_size,
        is_fifo: ident::is_fifo_name(name),
        enable_duplicates: env.enable_duplicates,
        duplicates: HashMap::new(),
        redrive_policy: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QueueAttributeDefaults;

    fn environment() -> Environment {
        let mut env = Environment {
            region: "local".to_string(),
            queue_attribute_defaults: QueueAttributeDefaults {
                receive_message_wait_time_seconds: 5,
                ..QueueAttributeDefaults::default()
            },
            ..Environment::default()
        };
        env.apply_defaults();
        env
    }

    #[test]
    fn test_declared_queue_inherits_environment_attributes() {
        let mut env = environment();
        env.queues.push(QueueDefinition {
            name: "orders".to_string(),
            ..QueueDefinition::default()
        });

        let topology = Topology::bootstrap(&env).unwrap();
        let queue = topology.queues().get("orders").unwrap();

        assert_eq!(queue.visibility_timeout, 30);
        assert_eq!(queue.receive_wait_time_seconds, 5);
        assert_eq!(queue.maximum_message_size, 262_144);
        assert_eq!(queue.arn, "arn:aws:sqs:local:queue:orders");
        assert_eq!(queue.url, "http://local.localhost:4100/queue/orders");
        assert!(!queue.is_fifo);
    }

    #[test]
    fn test_declared_values_override_environment_defaults() {
        let mut env = environment();
        env.queues.push(QueueDefinition {
            name: "bulk".to_string(),
            receive_message_wait_time_seconds: 20,
            maximum_message_size: 1024,
            ..QueueDefinition::default()
        });

        let topology = Topology::bootstrap(&env).unwrap();
        let queue = topology.queues().get("bulk").unwrap();

        assert_eq!(queue.receive_wait_time_seconds, 20);
        assert_eq!(queue.maximum_message_size, 1024);
    }

    #[test]
    fn test_fifo_flag_from_name_suffix() {
        let mut env = environment();
        for name in ["orders.fifo", "orders", "ordersfifo"] {
            env.queues.push(QueueDefinition {
                name: name.to_string(),
                ..QueueDefinition::default()
            });
        }

        let topology = Topology::bootstrap(&env).unwrap();

        assert!(topology.queues().get("orders.fifo").unwrap().is_fifo);
        assert!(!topology.queues().get("orders").unwrap().is_fifo);
        assert!(!topology.queues().get("ordersfifo").unwrap().is_fifo);
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let mut env = environment();
        env.queues.push(QueueDefinition {
            name: "orders".to_string(),
            maximum_message_size: 1024,
            ..QueueDefinition::default()
        });
        env.queues.push(QueueDefinition {
            name: "orders".to_string(),
            maximum_message_size: 2048,
            ..QueueDefinition::default()
        });

        let topology = Topology::bootstrap(&env).unwrap();

        assert_eq!(topology.queues().len(), 1);
        assert_eq!(
            topology.queues().get("orders").unwrap().maximum_message_size,
            2048
        );
    }
}

//! Subscription filter policies

use std::collections::HashMap;

use queuestack_core::BootstrapError;
use serde::Serialize;

/// Predicate over message attributes restricting which published messages a
/// subscription receives.
///
/// Wire format: a JSON object mapping an attribute name to the array of
/// values it may carry, e.g. `{"store": ["example_corp"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterPolicy(HashMap<String, Vec<String>>);

impl FilterPolicy {
    /// Parse the raw wire form. `topic` and `endpoint` label the error.
    pub fn parse(topic: &str, endpoint: &str, raw: &str) -> Result<Self, BootstrapError> {
        let entries =
            serde_json::from_str(raw).map_err(|source| BootstrapError::InvalidFilterPolicyJson {
                topic: topic.to_string(),
                endpoint: endpoint.to_string(),
                source,
            })?;

        Ok(FilterPolicy(entries))
    }

    /// Accepted values for one attribute.
    pub fn accepted_values(&self, attribute: &str) -> Option<&[String]> {
        self.0.get(attribute).map(Vec::as_slice)
    }

    /// True when the message attributes satisfy every policy entry: each
    /// policy attribute must be present with one of its accepted values.
    pub fn allows(&self, attributes: &HashMap<String, String>) -> bool {
        self.0.iter().all(|(name, accepted)| {
            attributes
                .get(name)
                .map_or(false, |value| accepted.iter().any(|a| a == value))
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

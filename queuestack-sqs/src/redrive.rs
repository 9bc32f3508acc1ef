//! Redrive policy wire format
//!
//! Clients disagree on the numeric type of `maxReceiveCount`: SDKs send a
//! JSON number, the console and some tooling send a numeric string. Both
//! encodings are accepted by trying the integer schema first and the string
//! schema second; when neither fits, both failure reasons are reported.

use queuestack_core::BootstrapError;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct IntegerCount {
    max_receive_count: u32,
    dead_letter_target_arn: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StringCount {
    max_receive_count: String,
    dead_letter_target_arn: String,
}

/// A parsed and value-checked redrive declaration, not yet resolved against
/// the queue registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRedrivePolicy {
    pub max_receive_count: u32,
    pub dead_letter_target_arn: String,
}

impl ParsedRedrivePolicy {
    /// Short name of the dead-letter queue: the last colon-delimited
    /// segment of the target ARN.
    pub fn dead_letter_queue_name(&self) -> &str {
        self.dead_letter_target_arn.rsplit(':').next().unwrap_or("")
    }
}

/// Parse and validate a raw redrive policy string.
///
/// `queue` labels errors only; resolving the dead-letter name against the
/// registry is the caller's second pass. The target ARN and a non-zero
/// count must be present together or absent together.
pub fn parse_redrive_policy(
    queue: &str,
    raw: &str,
) -> Result<ParsedRedrivePolicy, BootstrapError> {
    let (max_receive_count, dead_letter_target_arn) =
        match serde_json::from_str::<IntegerCount>(raw) {
            Ok(policy) => (policy.max_receive_count, policy.dead_letter_target_arn),
            Err(int_schema) => match serde_json::from_str::<StringCount>(raw) {
                // A count string that is not a number counts as zero.
                Ok(policy) => (
                    policy.max_receive_count.parse().unwrap_or(0),
                    policy.dead_letter_target_arn,
                ),
                Err(string_schema) => {
                    return Err(BootstrapError::InvalidRedrivePolicyJson {
                        queue: queue.to_string(),
                        int_schema,
                        string_schema,
                    });
                }
            },
        };

    if dead_letter_target_arn.is_empty() != (max_receive_count == 0) {
        return Err(BootstrapError::InvalidRedrivePolicyValues {
            queue: queue.to_string(),
        });
    }

    Ok(ParsedRedrivePolicy {
        max_receive_count,
        dead_letter_target_arn,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_count_schema() {
        let policy = parse_redrive_policy(
            "orders",
            r#"{"maxReceiveCount": 3, "deadLetterTargetArn": "arn:aws:sqs:::orders-dead"}"#,
        )
        .unwrap();

        assert_eq!(policy.max_receive_count, 3);
        assert_eq!(policy.dead_letter_target_arn, "arn:aws:sqs:::orders-dead");
    }

    #[test]
    fn test_string_count_parses_like_integer() {
        let integer = parse_redrive_policy(
            "orders",
            r#"{"maxReceiveCount": 3, "deadLetterTargetArn": "arn:aws:sqs:::orders-dead"}"#,
        )
        .unwrap();
        let string = parse_redrive_policy(
            "orders",
            r#"{"maxReceiveCount": "3", "deadLetterTargetArn": "arn:aws:sqs:::orders-dead"}"#,
        )
        .unwrap();

        assert_eq!(integer, string);
    }

    #[test]
    fn test_count_without_target_is_rejected() {
        let err = parse_redrive_policy("orders", r#"{"maxReceiveCount": 5}"#).unwrap_err();

        assert!(matches!(
            err,
            BootstrapError::InvalidRedrivePolicyValues { queue } if queue == "orders"
        ));
    }

    #[test]
    fn test_target_without_count_is_rejected() {
        let err = parse_redrive_policy(
            "orders",
            r#"{"deadLetterTargetArn": "arn:aws:sqs:::orders-dead"}"#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            BootstrapError::InvalidRedrivePolicyValues { .. }
        ));
    }

    #[test]
    fn test_non_numeric_string_count_counts_as_zero() {
        let err = parse_redrive_policy(
            "orders",
            r#"{"maxReceiveCount": "many", "deadLetterTargetArn": "arn:aws:sqs:::orders-dead"}"#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            BootstrapError::InvalidRedrivePolicyValues { .. }
        ));
    }

    #[test]
    fn test_unparsable_policy_reports_both_schemas() {
        let err = parse_redrive_policy("orders", "not json at all").unwrap_err();

        match err {
            BootstrapError::InvalidRedrivePolicyJson { queue, .. } => {
                assert_eq!(queue, "orders");
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_object_passes_value_check() {
        // Both fields absent is consistent; the dead-letter lookup of the
        // empty short name fails later, during resolution.
        let policy = parse_redrive_policy("orders", "{}").unwrap();

        assert_eq!(policy.max_receive_count, 0);
        assert_eq!(policy.dead_letter_queue_name(), "");
    }

    #[test]
    fn test_dead_letter_queue_name_is_last_arn_segment() {
        let policy = parse_redrive_policy(
            "orders",
            r#"{"maxReceiveCount": 1, "deadLetterTargetArn": "arn:aws:sqs:us-east-1:queue:orders-dead"}"#,
        )
        .unwrap();

        assert_eq!(policy.dead_letter_queue_name(), "orders-dead");
    }
}

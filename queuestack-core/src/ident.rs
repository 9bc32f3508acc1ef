//! Resource identifier derivation
//!
//! Pure functions computing the URL and ARN forms used to cross-reference
//! queues and topics. These never fail; every input combination produces a
//! well-formed identifier.

/// Derive the HTTP URL for a queue.
///
/// A non-empty region is joined onto the host as a `{region}.` prefix. An
/// empty region omits the prefix entirely rather than leaving an empty
/// segment.
pub fn queue_url(
    host: &str,
    port: u16,
    region: &str,
    account_id: &str,
    queue_name: &str,
) -> String {
    if region.is_empty() {
        format!("http://{}:{}/{}/{}", host, port, account_id, queue_name)
    } else {
        format!(
            "http://{}.{}:{}/{}/{}",
            region, host, port, account_id, queue_name
        )
    }
}

/// Derive the ARN for a queue.
pub fn queue_arn(region: &str, account_id: &str, queue_name: &str) -> String {
    format!("arn:aws:sqs:{}:{}:{}", region, account_id, queue_name)
}

/// Derive the ARN for a topic.
pub fn topic_arn(region: &str, account_id: &str, topic_name: &str) -> String {
    format!("arn:aws:sns:{}:{}:{}", region, account_id, topic_name)
}

/// FIFO queues are identified purely by the `.fifo` name suffix.
///
/// The match is case-sensitive and requires the dot: `orders.fifo` is FIFO,
/// `ordersfifo` is not.
pub fn is_fifo_name(name: &str) -> bool {
    name.ends_with(".fifo")
}

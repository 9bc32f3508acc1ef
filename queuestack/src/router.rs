//! Diagnostic HTTP router
//!
//! Read-only introspection over the installed topology. The SQS/SNS
//! operation API is not served here.

use std::sync::Arc;

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the diagnostic router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/topology", get(get_topology))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, r#"{"status": "running"}"#)
}

async fn get_topology(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let topology = state.topology();

    Json(serde_json::json!({
        "queues": topology.queues().all(),
        "topics": topology.topics().all(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Environment, QueueDefinition};
    use crate::topology::Topology;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn send(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    fn state_with_queue(name: &str) -> Arc<AppState> {
        let mut env = Environment::default();
        env.apply_defaults();
        env.queues.push(QueueDefinition {
            name: name.to_string(),
            ..QueueDefinition::default()
        });
        Arc::new(AppState::new(Topology::bootstrap(&env).unwrap()))
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = send(create_router(state_with_queue("orders")), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("running"));
    }

    #[tokio::test]
    async fn test_topology_dump_lists_queues() {
        let (status, body) = send(create_router(state_with_queue("orders")), "/topology").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""name":"orders""#));
        assert!(body.contains("arn:aws:sqs"));
    }
}

//! Domain submission endpoint
//!
//! A thin validate-and-enqueue adapter in front of the crawl pipeline:
//! clients POST a JSON array of raw domain strings to `/crawl`, entries
//! failing the domain-syntax check are logged and skipped, and the valid
//! remainder is produced onto the inbound queue. Partial validation
//! failures never fail the whole batch; only a queue transport failure
//! does.

use crate::queue::DomainQueue;
use crate::url::is_valid_domain;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared state handed to submission handlers
#[derive(Clone)]
pub struct AppState {
    /// The inbound queue valid domains are produced onto
    pub queue: Arc<dyn DomainQueue>,
}

/// Builds the submission router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/crawl", post(submit_domains))
        .with_state(state)
}

/// Accepts a batch of raw domain strings and enqueues the valid ones
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `domains` - The submitted batch
///
/// # Returns
///
/// * `200` with `{"status": "success"}` once every valid entry is enqueued
/// * `500` when the queue rejects a message
pub async fn submit_domains(
    State(state): State<AppState>,
    Json(domains): Json<Vec<String>>,
) -> (StatusCode, Json<Value>) {
    for domain in &domains {
        if !is_valid_domain(domain) {
            tracing::warn!("skipping invalid domain: {}", domain);
            continue;
        }

        if let Err(e) = state.queue.produce(domain).await {
            tracing::error!("failed to enqueue domain {}: {}", domain, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "failed to enqueue domain"})),
            );
        }

        tracing::debug!("enqueued domain {}", domain);
    }

    (StatusCode::OK, Json(json!({"status": "success"})))
}

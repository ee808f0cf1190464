//! HTTP transport: the `POST /execute` route and its middleware stack.
//!
//! Grounded in `other_examples`' axum-based judge services and the `hox`
//! workspace's axum dependency: a thin router, one `TraceLayer` for request
//! logging (matching the teacher's `tracing`-based ambient logging
//! elsewhere), and a session-gate layer in front of the one route that
//! needs it.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;
use axum::{Router, middleware};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::executor::Executor;
use crate::request::ExecuteRequest;
use crate::result::ExecutionResult;
use crate::session::{SessionGate, require_session};

/// Shared state handed to every request handler.
pub struct AppState {
    pub executor: Executor,
}

/// Builds the full router: `POST /execute` behind the session gate, wrapped
/// in request tracing and a generous upper-bound timeout as defense in
/// depth against a handler that hangs despite the executor's own deadline.
pub fn build_router(state: Arc<AppState>, session_gate: Arc<SessionGate>) -> Router {
    let execute_route = Router::new()
        .route("/execute", post(execute_handler))
        .route_layer(middleware::from_fn_with_state(session_gate, require_session))
        .with_state(state);

    Router::new()
        .merge(execute_route)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::INTERNAL_SERVER_ERROR,
            Duration::from_secs(60),
        ))
        .layer(TraceLayer::new_for_http())
}

async fn execute_handler(
    State(state): State<Arc<AppState>>,
    body: axum::body::Bytes,
) -> Response {
    let request: ExecuteRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, format!("invalid request body: {e}")).into_response();
        }
    };

    if let Err(message) = request.validate() {
        return (StatusCode::BAD_REQUEST, message).into_response();
    }

    let result = std::panic::AssertUnwindSafe(state.executor.execute(&request));
    let result: ExecutionResult = match futures::FutureExt::catch_unwind(result).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!("executor panicked while handling a request");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ExecutionResult::execution_error("internal error")),
            )
                .into_response();
        }
    };

    let status =
        StatusCode::from_u16(result.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(result)).into_response()
}

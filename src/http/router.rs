//! Route table and middleware stack

use axum::{
    http::{header, HeaderName, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
};

use crate::http::error::handle_panic;
use crate::http::handlers::health_handler;
use crate::http::middleware::log_request;
use crate::http::sse::{messages_handler, sse_handler, MESSAGES_PATH};
use crate::http::state::AppState;
use crate::http::streamable;
use crate::http::SESSION_ID_HEADER;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let session_header = HeaderName::from_static(SESSION_ID_HEADER);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, session_header.clone()])
        .expose_headers([session_header]);

    Router::new()
        .route("/health", get(health_handler))
        // Streamable HTTP transport
        .route(
            "/mcp",
            post(streamable::post_handler)
                .get(streamable::get_handler)
                .delete(streamable::delete_handler),
        )
        // Legacy HTTP+SSE transport
        .route("/sse", get(sse_handler))
        .route(MESSAGES_PATH, post(messages_handler))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(log_request))
        .layer(cors)
        .with_state(state)
}

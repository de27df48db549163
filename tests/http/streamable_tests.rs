//! Streamable HTTP (`/mcp`) endpoint tests

#[cfg(test)]
mod tests {
    use crate::common::{body_json, create_test_app, initialize_body};
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use futures::StreamExt;
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt as TowerServiceExt;
    use wikisearch::http::SESSION_ID_HEADER;
    use wikisearch::mcp::TransportKind;

    fn post_mcp(body: impl Into<String>, session: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/mcp")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json, text/event-stream");
        if let Some(session) = session {
            builder = builder.header(SESSION_ID_HEADER, session);
        }
        builder.body(Body::from(body.into())).unwrap()
    }

    fn bare_request(method: Method, session: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri("/mcp");
        if let Some(session) = session {
            builder = builder.header(SESSION_ID_HEADER, session);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 100_000)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Run initialize and return the new session id
    async fn initialize(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(post_mcp(initialize_body(1), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        response
            .headers()
            .get(SESSION_ID_HEADER)
            .expect("session header")
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _state, _backend) = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_initialize_creates_session() {
        let (app, state, _backend) = create_test_app();

        let response = app
            .clone()
            .oneshot(post_mcp(initialize_body(1), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let session_id = response
            .headers()
            .get(SESSION_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        let body = body_json(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["result"]["protocolVersion"], "2025-03-26");
        assert_eq!(body["result"]["serverInfo"]["name"], "search-server");

        assert!(state
            .sessions
            .get(Some(&session_id), TransportKind::Streamable)
            .is_some());
        assert_eq!(state.sessions.len(TransportKind::Sse), 0);
    }

    #[tokio::test]
    async fn test_each_initialize_gets_distinct_session() {
        let (app, state, _backend) = create_test_app();

        let first = initialize(&app).await;
        let second = initialize(&app).await;

        assert_ne!(first, second);
        assert_eq!(state.sessions.len(TransportKind::Streamable), 2);
    }

    #[tokio::test]
    async fn test_post_without_session_rejected() {
        let (app, state, _backend) = create_test_app();

        let body = json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}).to_string();
        let response = app.oneshot(post_mcp(body, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["error"]["code"], -32000);
        assert_eq!(
            body["error"]["message"],
            "Bad Request: No valid session ID provided or not an initialization request."
        );
        assert_eq!(body["id"], Value::Null);
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_non_jsonrpc_body_without_session_rejected() {
        let (app, state, _backend) = create_test_app();

        for body in [json!({"foo": 1}), json!([{"jsonrpc": "2.0", "id": 1, "method": "ping"}])] {
            let response = app
                .clone()
                .oneshot(post_mcp(body.to_string(), None))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = body_json(response).await;
            assert_eq!(body["error"]["code"], -32000);
            assert_eq!(body["id"], Value::Null);
        }
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_non_jsonrpc_body_in_session_is_invalid_request() {
        let (app, _state, _backend) = create_test_app();
        let session_id = initialize(&app).await;

        let response = app
            .oneshot(post_mcp(json!({"foo": 1}).to_string(), Some(&session_id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], -32600);
    }

    #[tokio::test]
    async fn test_post_with_unknown_session_rejected() {
        let (app, _state, _backend) = create_test_app();

        let body = json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}).to_string();
        let response = app
            .oneshot(post_mcp(body, Some("not-a-session")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], -32000);
    }

    #[tokio::test]
    async fn test_initialize_with_stale_session_creates_new_one() {
        let (app, state, _backend) = create_test_app();

        let response = app
            .oneshot(post_mcp(initialize_body(1), Some("stale-session")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let session_id = response.headers().get(SESSION_ID_HEADER).unwrap();
        assert_ne!(session_id, "stale-session");
        assert_eq!(state.sessions.len(TransportKind::Streamable), 1);
    }

    #[tokio::test]
    async fn test_invalid_initialize_params() {
        let (app, state, _backend) = create_test_app();

        let body = json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}})
            .to_string();
        let response = app.oneshot(post_mcp(body, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(SESSION_ID_HEADER).is_none());
        assert_eq!(body_json(response).await["error"]["code"], -32602);
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let (app, _state, _backend) = create_test_app();

        let response = app.oneshot(post_mcp("{not json", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], -32700);
        assert_eq!(body["id"], Value::Null);
    }

    #[tokio::test]
    async fn test_tools_call_search_in_session() {
        let (app, _state, backend) = create_test_app();
        let session_id = initialize(&app).await;

        let body = json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/call",
            "params": {"name": "search", "arguments": {"query": "free tier"}}
        })
        .to_string();
        let response = app
            .oneshot(post_mcp(body, Some(&session_id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], 2);
        let text = body["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Found 2 results for \"free tier\":"));
        assert!(text.contains("1. **Pricing**"));
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_notification_returns_accepted() {
        let (app, state, _backend) = create_test_app();
        let session_id = initialize(&app).await;

        let body = json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string();
        let response = app
            .oneshot(post_mcp(body, Some(&session_id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let transport = state
            .sessions
            .get(Some(&session_id), TransportKind::Streamable)
            .unwrap();
        assert!(transport.is_initialized());
    }

    #[tokio::test]
    async fn test_get_without_session_is_plain_text() {
        let (app, _state, _backend) = create_test_app();

        let response = app.oneshot(bare_request(Method::GET, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Invalid or missing session ID");
    }

    #[tokio::test]
    async fn test_get_opens_event_stream_until_delete() {
        let (app, _state, _backend) = create_test_app();
        let session_id = initialize(&app).await;

        let response = app
            .clone()
            .oneshot(bare_request(Method::GET, Some(&session_id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/event-stream"
        );

        let delete = app
            .oneshot(bare_request(Method::DELETE, Some(&session_id)))
            .await
            .unwrap();
        assert_eq!(delete.status(), StatusCode::OK);

        // Closing the session ends the stream
        let mut stream = response.into_body().into_data_stream();
        let next = tokio::time::timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("stream should end after delete");
        assert!(next.is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_session() {
        let (app, state, _backend) = create_test_app();
        let session_id = initialize(&app).await;

        let response = app
            .clone()
            .oneshot(bare_request(Method::DELETE, Some(&session_id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(state
            .sessions
            .get(Some(&session_id), TransportKind::Streamable)
            .is_none());

        // The deleted id is no longer usable
        let body = json!({"jsonrpc": "2.0", "id": 3, "method": "ping"}).to_string();
        let response = app
            .oneshot(post_mcp(body, Some(&session_id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_unknown_session() {
        let (app, _state, _backend) = create_test_app();

        let response = app
            .oneshot(bare_request(Method::DELETE, Some("missing")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Invalid or missing session ID");
    }

    #[tokio::test]
    async fn test_cors_exposes_session_header() {
        let (app, _state, _backend) = create_test_app();

        let mut request = post_mcp(initialize_body(1), None);
        request
            .headers_mut()
            .insert(header::ORIGIN, "http://localhost:3000".parse().unwrap());
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
        let exposed = response
            .headers()
            .get(header::ACCESS_CONTROL_EXPOSE_HEADERS)
            .unwrap()
            .to_str()
            .unwrap()
            .to_ascii_lowercase();
        assert!(exposed.contains(SESSION_ID_HEADER));
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let (app, _state, _backend) = create_test_app();

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/mcp")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, SESSION_ID_HEADER)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let allowed = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .unwrap()
            .to_str()
            .unwrap()
            .to_ascii_lowercase();
        assert!(allowed.contains(SESSION_ID_HEADER));
    }
}

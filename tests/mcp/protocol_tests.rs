//! MCP protocol unit tests

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wikisearch::mcp::protocol::*;

    #[test]
    fn test_parse_initialize_request() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2025-03-26",
                "capabilities": {},
                "clientInfo": {
                    "name": "test",
                    "version": "1.0"
                }
            }
        }"#;

        let message: JsonRpcMessage = serde_json::from_str(json).unwrap();
        let JsonRpcMessage::Request(req) = message else {
            panic!("expected a request");
        };
        assert!(req.is_initialize());
        assert_eq!(req.method, "initialize");
        assert_eq!(req.jsonrpc, "2.0");
        assert_eq!(req.id, Some(json!(1)));
    }

    #[test]
    fn test_parse_notification() {
        let json = r#"{"jsonrpc": "2.0", "method": "notifications/initialized"}"#;

        let message: JsonRpcMessage = serde_json::from_str(json).unwrap();
        let JsonRpcMessage::Request(req) = message else {
            panic!("expected a notification");
        };
        assert!(req.is_notification());
        assert!(!req.is_initialize());
    }

    #[test]
    fn test_initialize_without_id_is_not_initialize_request() {
        let req = JsonRpcRequest::new(None, "initialize", None);
        assert!(!req.is_initialize());
    }

    #[test]
    fn test_parse_client_response() {
        let json = r#"{"jsonrpc": "2.0", "id": "srv-1", "result": {}}"#;

        let message: JsonRpcMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(message, JsonRpcMessage::Response(_)));
    }

    #[test]
    fn test_string_ids_are_preserved() {
        let json = r#"{"jsonrpc": "2.0", "id": "abc", "method": "ping"}"#;

        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        let response = JsonRpcResponse::success(req.id, json!({}));
        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized["id"], "abc");
    }

    #[test]
    fn test_error_response_without_id_serializes_null() {
        let response = JsonRpcResponse::error(None, SERVER_ERROR, "no session");
        let serialized = serde_json::to_value(&response).unwrap();

        assert_eq!(serialized["jsonrpc"], "2.0");
        assert!(serialized["id"].is_null());
        assert_eq!(serialized["error"]["code"], -32000);
        assert!(serialized.get("result").is_none());
    }

    #[test]
    fn test_tool_result_serialization() {
        let result = ToolResult {
            content: vec![ContentBlock::Text {
                text: "hello".to_string(),
            }],
        };
        let serialized = serde_json::to_value(&result).unwrap();
        assert_eq!(
            serialized,
            json!({"content": [{"type": "text", "text": "hello"}]})
        );
    }

    #[test]
    fn test_tool_schema_uses_camel_case() {
        let schema = ToolSchema {
            name: "search".to_string(),
            title: None,
            description: "d".to_string(),
            input_schema: json!({"type": "object"}),
        };
        let serialized = serde_json::to_value(&schema).unwrap();
        assert!(serialized.get("inputSchema").is_some());
        assert!(serialized.get("title").is_none());
    }

    #[test]
    fn test_supported_versions_include_latest() {
        assert!(SUPPORTED_PROTOCOL_VERSIONS.contains(&LATEST_PROTOCOL_VERSION));
    }
}

//! MCP protocol dispatch over the sample catalog.

mod common;

use bsl_context::mcp::handlers::ProtocolHandlers;
use bsl_context::mcp::protocol::{
    JsonRpcRequest, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, NOT_FOUND,
};
use common::fixtures::sample_services;
use serde_json::{json, Value};

fn request(method: &str, params: Value) -> JsonRpcRequest {
    serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    }))
    .unwrap()
}

fn handlers() -> ProtocolHandlers {
    ProtocolHandlers::new(sample_services())
}

#[tokio::test]
async fn initialize_reports_server_info() {
    let handlers = handlers();
    let response = handlers
        .dispatch(request("initialize", json!({"protocolVersion": "2024-11-05"})))
        .await
        .unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["serverInfo"]["name"], "bsl-context");
    assert_eq!(result["protocolVersion"], "2024-11-05");
}

#[tokio::test]
async fn malformed_initialize_params_are_rejected() {
    let handlers = handlers();
    let response = handlers
        .dispatch(request("initialize", json!({"protocolVersion": 42})))
        .await
        .unwrap();

    let error = response.error.unwrap();
    assert_eq!(error.code, INVALID_PARAMS);
    assert!(error.message.contains("initialize params"));
}

#[tokio::test]
async fn initialized_notification_yields_no_response() {
    let handlers = handlers();
    assert!(handlers
        .dispatch(request("initialized", json!({})))
        .await
        .is_none());
    assert!(handlers
        .dispatch(request("notifications/initialized", json!({})))
        .await
        .is_none());
}

#[tokio::test]
async fn unknown_method_gets_method_not_found() {
    let handlers = handlers();
    let response = handlers
        .dispatch(request("resources/list", json!({})))
        .await
        .unwrap();

    let error = response.error.unwrap();
    assert_eq!(error.code, METHOD_NOT_FOUND);
    assert!(error.message.contains("resources/list"));
}

#[tokio::test]
async fn tools_list_exposes_all_five_tools() {
    let handlers = handlers();
    let response = handlers
        .dispatch(request("tools/list", json!({})))
        .await
        .unwrap();

    let tools = response.result.unwrap()["tools"].clone();
    let names: Vec<&str> = tools
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();

    assert_eq!(
        names,
        vec!["get_constructors", "get_member", "get_members", "info", "search"]
    );
    for tool in tools.as_array().unwrap() {
        assert!(tool.get("inputSchema").is_some());
        assert!(!tool["description"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn tools_call_search_returns_json_records() {
    let handlers = handlers();
    let response = handlers
        .dispatch(request(
            "tools/call",
            json!({"name": "search", "arguments": {"query": "Справочник Объект"}}),
        ))
        .await
        .unwrap();

    assert!(response.error.is_none());
    let content = &response.result.unwrap()["content"][0];
    assert_eq!(content["type"], "text");

    let record: Value = serde_json::from_str(content["text"].as_str().unwrap()).unwrap();
    assert_eq!(record["results"][0]["name_ru"], "СправочникОбъект");
}

#[tokio::test]
async fn tools_call_unknown_tool_is_invalid_request() {
    let handlers = handlers();
    let response = handlers
        .dispatch(request(
            "tools/call",
            json!({"name": "no_such_tool", "arguments": {}}),
        ))
        .await
        .unwrap();

    assert!(response.result.is_none());
    assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
}

#[tokio::test]
async fn tools_call_not_found_maps_to_domain_code() {
    let handlers = handlers();
    let response = handlers
        .dispatch(request(
            "tools/call",
            json!({"name": "info", "arguments": {"name": "НетТакого", "kind": "type"}}),
        ))
        .await
        .unwrap();

    let error = response.error.unwrap();
    assert_eq!(error.code, NOT_FOUND);
    assert!(error.message.contains("НетТакого"));
}

#[tokio::test]
async fn ping_answers_empty_object() {
    let handlers = handlers();
    let response = handlers.dispatch(request("ping", json!({}))).await.unwrap();
    assert_eq!(response.result.unwrap(), json!({}));
}

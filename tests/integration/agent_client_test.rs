//! Agent Client Integration Tests
//!
//! The HTTP agent client driven by the full pipeline against a mock agent
//! deployment, plus response parsing edge cases.

use std::sync::Arc;

use crimeboard::services::analysis::{CaseAnalysisService, RegisterEvidence};
use crimeboard::storage::board_store::InMemoryBoardStore;
use crimeboard_core::CaseStatus;
use crimeboard_llm::{parse_agent_json, AgentEndpointConfig, GradientAgentClient};
use serde_json::json;

const COMPLETIONS: &str = "/api/v1/chat/completions";

fn completion(content: &str) -> String {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] }).to_string()
}

async fn analyze_with(client: GradientAgentClient) -> crimeboard::BoardAnalysis {
    let service = CaseAnalysisService::new(Arc::new(InMemoryBoardStore::new()), Arc::new(client));
    let case = service.create_case("Harbour arson").await.unwrap();
    for (file, mime) in [("warehouse_scene.jpg", "image/jpeg"), ("guard.txt", "text/plain")] {
        service
            .register_evidence(&case.id, RegisterEvidence::new(file, Some(mime)))
            .await
            .unwrap();
    }
    let analysis = service.analyze_case(&case.id).await.unwrap();
    assert_eq!(
        service.get_case(&case.id).await.unwrap().status,
        CaseStatus::Analyzed
    );
    analysis
}

#[tokio::test]
async fn test_pipeline_over_http() {
    let mut server = mockito::Server::new_async().await;
    let reply = json!({
        "suspects": [{ "suspect_id": "SUS-01", "display_name": "Night Guard", "guilt_probability": 45 }],
        "nodes": [{ "id": "EVID-01", "type": "PHOTO", "title": "warehouse_scene.jpg" }],
        "edges": [{ "source_id": "SUS-01", "target_id": "EVID-01", "label": "on shift" }]
    })
    .to_string();
    let mock = server
        .mock("POST", COMPLETIONS)
        .match_header("authorization", "Bearer harbour-key")
        .with_status(200)
        .with_body(completion(&format!("```json\n{}\n```", reply)))
        .expect(7)
        .create_async()
        .await;

    let client = GradientAgentClient::new(AgentEndpointConfig::new(server.url(), "harbour-key"));
    let analysis = analyze_with(client).await;
    mock.assert_async().await;

    let ids: Vec<&str> = analysis.evidence_nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["EVID-01", "SUS-01", "EVID-02"]);
    assert_eq!(analysis.suspects[0].display_name, "Night Guard");
    assert_eq!(analysis.connections.len(), 1);
    assert_eq!(analysis.connections[0].confidence, 0.5);
}

#[tokio::test]
async fn test_rejected_key_degrades_to_evidence_board() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS)
        .with_status(401)
        .with_body(r#"{"error": "invalid key"}"#)
        .expect(7)
        .create_async()
        .await;

    let client = GradientAgentClient::new(AgentEndpointConfig::new(server.url(), "wrong"));
    let analysis = analyze_with(client).await;
    mock.assert_async().await;

    assert_eq!(analysis.evidence_nodes.len(), 2);
    assert!(analysis.suspects.is_empty());
    assert!(analysis.connections.is_empty());
}

#[tokio::test]
async fn test_unconfigured_client_never_calls_out() {
    let analysis = analyze_with(GradientAgentClient::new(AgentEndpointConfig::default())).await;
    assert_eq!(analysis.case_title, "Harbour arson");
    assert_eq!(analysis.evidence_nodes.len(), 2);
}

#[test]
fn test_parser_extracts_embedded_object() {
    let parsed = parse_agent_json("some text {\"a\":1} trailing");
    assert_eq!(serde_json::Value::Object(parsed), json!({ "a": 1 }));

    assert!(parse_agent_json("not json").is_empty());
    assert!(parse_agent_json("").is_empty());
    assert!(parse_agent_json("[1, 2, 3]").is_empty());
}

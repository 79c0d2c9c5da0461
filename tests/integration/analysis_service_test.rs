//! Analysis Service Integration Tests
//!
//! Case lifecycle through `CaseAnalysisService` with an in-memory store and
//! scripted agents.

use std::sync::Arc;

use crimeboard::services::analysis::{CaseAnalysisService, RegisterEvidence};
use crimeboard::services::layout::needs_layout;
use crimeboard::services::orchestrator::AgentStage;
use crimeboard::storage::board_store::{BoardStore, InMemoryBoardStore};
use crimeboard::utils::error::AppError;
use crimeboard_core::{CaseStatus, NodeKind};

use crate::common::ScriptedAgent;

// ============================================================================
// Helpers
// ============================================================================

const MAPPER_REPLY: &str = r#"{
    "nodes": [
        {"id": "EVID-01", "type": "PHOTO", "title": "alley_scene.jpg", "position": {"x": 0, "y": 0}},
        {"id": "SUS-01", "kind": "suspect", "title": "Hooded Male (20%)"}
    ],
    "edges": [
        {"source_id": "SUS-01", "target_id": "EVID-01", "label": "seen at scene", "confidence": 0.7},
        {"source_id": "SUS-01", "target_id": "SUS-04", "label": "brother of"}
    ]
}"#;

const RANKER_REPLY: &str = r#"{"suspects": [
    {"suspect_id": "SUS-01", "display_name": "Hooded Male", "guilt_probability": 20},
    {"suspect_id": "SUS-02", "display_name": "Bartender", "guilt_probability": 5}
]}"#;

async fn service_with(
    agent: ScriptedAgent,
) -> (CaseAnalysisService, Arc<InMemoryBoardStore>, String) {
    let store = Arc::new(InMemoryBoardStore::new());
    let service = CaseAnalysisService::new(store.clone(), Arc::new(agent));

    let case = service.create_case("Alley stabbing").await.unwrap();
    service
        .register_evidence(
            &case.id,
            RegisterEvidence::new("alley_scene.jpg", Some("image/jpeg")),
        )
        .await
        .unwrap();
    let mut statement = RegisterEvidence::new("witness_1.txt", Some("text/plain"));
    statement.extracted_text = Some(serde_json::json!({ "text": "Grey hoodie, ran east" }));
    service.register_evidence(&case.id, statement).await.unwrap();

    (service, store, case.id)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_analysis_persists_a_laid_out_board() {
    let agent = ScriptedAgent::new()
        .reply(AgentStage::SuspectRanker, RANKER_REPLY)
        .reply(AgentStage::ConnectionMapper, MAPPER_REPLY);
    let (service, store, case_id) = service_with(agent).await;

    let analysis = service.analyze_case(&case_id).await.unwrap();

    let ids: Vec<&str> = analysis.evidence_nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["EVID-01", "SUS-01", "SUS-02", "EVID-02"]);
    assert_eq!(analysis.suspect_node_count(), 2);
    assert!(!needs_layout(&analysis.evidence_nodes));

    // Suspects sit below every evidence node
    let lowest_evidence = analysis
        .evidence_nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Evidence)
        .map(|n| n.position.unwrap().y)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(analysis
        .evidence_nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Suspect)
        .all(|n| n.position.unwrap().y > lowest_evidence));

    // The edge to a suspect nobody placed is gone
    assert_eq!(analysis.connections.len(), 1);
    assert_eq!(analysis.connections[0].confidence, 0.7);

    let board = store.board(&case_id).await.unwrap();
    assert_eq!(board.nodes, analysis.evidence_nodes);
    assert_eq!(board.edges, analysis.connections);

    let case = service.get_case(&case_id).await.unwrap();
    assert_eq!(case.status, CaseStatus::Analyzed);
    let stored = case.analysis.unwrap();
    assert_eq!(stored["case_title"], "Alley stabbing");
    assert_eq!(stored["suspects"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_evidence_text_reaches_the_first_stage() {
    let agent = Arc::new(ScriptedAgent::new());
    let store = Arc::new(InMemoryBoardStore::new());
    let service = CaseAnalysisService::new(store, agent.clone());

    let case = service.create_case("Alley stabbing").await.unwrap();
    let mut statement = RegisterEvidence::new("witness_1.txt", None);
    statement.extracted_text = Some(serde_json::json!({ "text": "Grey hoodie, ran east" }));
    service.register_evidence(&case.id, statement).await.unwrap();
    service.analyze_case(&case.id).await.unwrap();

    let prompt = agent.prompt_for(AgentStage::ForensicTagger).unwrap();
    assert!(prompt.starts_with("CASE TITLE: Alley stabbing\nCASE ID: "));
    assert!(prompt.contains("EVID-01: statement - \"witness_1.txt\""));
    assert!(prompt.contains("Grey hoodie, ran east"));
}

#[tokio::test]
async fn test_case_can_be_reanalyzed() {
    let (service, store, case_id) = service_with(ScriptedAgent::new()).await;

    let first = service.analyze_case(&case_id).await.unwrap();
    let second = service.analyze_case(&case_id).await.unwrap();
    assert_eq!(first.evidence_nodes, second.evidence_nodes);

    // The board is replaced, not appended to
    let board = store.board(&case_id).await.unwrap();
    assert_eq!(board.nodes.len(), 2);
}

#[tokio::test]
async fn test_case_without_evidence_is_rejected() {
    let agent = Arc::new(ScriptedAgent::new());
    let service = CaseAnalysisService::new(Arc::new(InMemoryBoardStore::new()), agent.clone());
    let case = service.create_case("Empty case").await.unwrap();

    let err = service.analyze_case(&case.id).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg == "No evidence to analyze"));
    assert!(agent.called_stages().is_empty());
    assert_eq!(
        service.get_case(&case.id).await.unwrap().status,
        CaseStatus::Open
    );
}

#[tokio::test]
async fn test_independent_cases_analyze_concurrently() {
    let store = Arc::new(InMemoryBoardStore::new());
    let service = Arc::new(CaseAnalysisService::new(
        store.clone(),
        Arc::new(ScriptedAgent::new()),
    ));

    let mut case_ids = Vec::new();
    for (title, file) in [("Case A", "a.jpg"), ("Case B", "b.txt")] {
        let case = service.create_case(title).await.unwrap();
        service
            .register_evidence(&case.id, RegisterEvidence::new(file, None))
            .await
            .unwrap();
        case_ids.push(case.id);
    }

    let (a, b) = tokio::join!(
        service.analyze_case(&case_ids[0]),
        service.analyze_case(&case_ids[1])
    );
    assert_eq!(a.unwrap().case_title, "Case A");
    assert_eq!(b.unwrap().case_title, "Case B");
    assert_eq!(store.case_count().await, 2);
}

#[tokio::test]
async fn test_agent_positions_kept_and_missing_nodes_placed() {
    let mapper = r#"{"nodes": [
        {"id": "EVID-01", "type": "PHOTO", "title": "alley_scene.jpg", "position": {"x": 100, "y": 80}},
        {"id": "SUS-01", "kind": "suspect", "title": "Hooded Male (20%)", "position": {"x": 450, "y": 520}}
    ]}"#;
    let ranker = r#"{"suspects": [{"suspect_id": "SUS-01", "display_name": "Hooded Male"}]}"#;
    let agent = ScriptedAgent::new()
        .reply(AgentStage::SuspectRanker, ranker)
        .reply(AgentStage::ConnectionMapper, mapper);
    let (service, store, case_id) = service_with(agent).await;

    let analysis = service.analyze_case(&case_id).await.unwrap();

    let ids: Vec<&str> = analysis.evidence_nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["EVID-01", "SUS-01", "EVID-02"]);
    assert_eq!(
        analysis.evidence_nodes[0].position.map(|p| (p.x, p.y)),
        Some((100.0, 80.0))
    );
    assert_eq!(
        analysis.evidence_nodes[1].position.map(|p| (p.x, p.y)),
        Some((450.0, 520.0))
    );
    // The statement the agents skipped lands in the witness lane
    assert_eq!(
        analysis.evidence_nodes[2].position.map(|p| (p.x, p.y)),
        Some((450.0, 80.0))
    );

    let board = store.board(&case_id).await.unwrap();
    assert!(board.nodes.iter().all(|n| n.position.is_some()));
}

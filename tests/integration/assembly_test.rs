//! Assembly Integration Tests
//!
//! Merging stage outputs into a board and reconciling it with the case
//! evidence.

use crimeboard::models::analysis::OrchestrationResult;
use crimeboard::models::stages::{ConnectionMap, MergedAnalysis, SuspectRanking};
use crimeboard::services::orchestrator::{build_final_output, complete_board};
use crimeboard_core::{evidence_board_id, BoardNode, Connection, NodeKind, NodeType, Suspect};

use crate::common::two_item_evidence;

fn result_with(
    suspects: Option<Vec<Suspect>>,
    nodes: Option<Vec<BoardNode>>,
    edges: Option<Vec<Connection>>,
) -> OrchestrationResult {
    OrchestrationResult {
        suspects: SuspectRanking { suspects },
        connection_map: ConnectionMap { nodes, edges },
        ..OrchestrationResult::default()
    }
}

#[test]
fn test_every_evidence_item_gets_a_node() {
    let evidence = two_item_evidence();
    // The mapper only placed a free-form note and one of the two items
    let nodes = vec![
        BoardNode::evidence("EVID-02", NodeType::Statement, "witness_1.txt"),
        BoardNode::evidence("NOTE-1", NodeType::Note, "Hoodie fibres"),
    ];
    let result = result_with(None, Some(nodes), None);

    let analysis = complete_board(build_final_output(&result, "Alley"), &evidence);
    for index in 0..evidence.len() {
        let id = evidence_board_id(index);
        assert_eq!(
            analysis.evidence_nodes.iter().filter(|n| n.id == id).count(),
            1,
            "expected exactly one node for {}",
            id
        );
    }
    let ids: Vec<&str> = analysis.evidence_nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["EVID-02", "NOTE-1", "EVID-01"]);
}

#[test]
fn test_suspect_without_node_gets_exactly_one() {
    let suspects = vec![
        Suspect::new("SUS-01", "Unknown Male #1", 20),
        Suspect::new("SUS-02", "Courier", 55),
    ];
    // SUS-02 is already on the board
    let nodes = vec![BoardNode::suspect("SUS-02", "Courier (55%)").with_position(450.0, 500.0)];
    let result = result_with(Some(suspects), Some(nodes), None);

    let analysis = build_final_output(&result, "Alley");
    assert_eq!(analysis.evidence_nodes.len(), 2);

    let added: Vec<&BoardNode> = analysis
        .evidence_nodes
        .iter()
        .filter(|n| n.id == "SUS-01")
        .collect();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].node_type, NodeType::Suspect);
    assert_eq!(added[0].kind, NodeKind::Suspect);
    assert_eq!(added[0].title, "Unknown Male #1 (20%)");
    assert_eq!(added[0].data.guilt_probability, Some(20));
    // Second column of the placeholder grid
    let position = added[0].position.unwrap();
    assert_eq!((position.x, position.y), (250.0, 300.0));
}

#[test]
fn test_ranked_suspect_is_added_when_mapper_has_no_suspect_node() {
    let result = result_with(
        Some(vec![Suspect::new("SUS-01", "Hooded Male", 20)]),
        Some(vec![BoardNode::evidence("EVID-01", NodeType::Photo, "alley_scene.jpg")]),
        None,
    );
    let analysis = build_final_output(&result, "Alley");
    let node = analysis
        .evidence_nodes
        .iter()
        .find(|n| n.id == "SUS-01")
        .unwrap();
    assert_eq!(node.node_type, NodeType::Suspect);
    assert!(node.title.contains("20%"));
}

#[test]
fn test_empty_ranking_wins_over_merge_suspects() {
    let mut result = result_with(Some(Vec::new()), None, None);
    result.final_analysis = MergedAnalysis {
        suspects: Some(vec![Suspect::new("SUS-09", "Merged Only", 40)]),
        ..MergedAnalysis::default()
    };
    assert!(build_final_output(&result, "Alley").suspects.is_empty());

    // Without a ranking at all the merge stage's list is used
    result.suspects = SuspectRanking::default();
    let analysis = build_final_output(&result, "Alley");
    assert_eq!(analysis.suspects.len(), 1);
    assert_eq!(analysis.suspects[0].suspect_id, "SUS-09");
}

#[test]
fn test_merge_stage_board_used_when_mapper_returns_nothing() {
    let result = OrchestrationResult {
        final_analysis: MergedAnalysis {
            evidence_nodes: Some(vec![BoardNode::evidence(
                "EVID-01",
                NodeType::Photo,
                "alley_scene.jpg",
            )]),
            connections: Some(vec![Connection::new("EVID-01", "EVID-02", "same timeframe")]),
            ..MergedAnalysis::default()
        },
        ..OrchestrationResult::default()
    };

    let analysis = build_final_output(&result, "Alley");
    assert_eq!(analysis.evidence_nodes.len(), 1);
    assert_eq!(analysis.connections.len(), 1);
}

#[test]
fn test_dangling_edges_are_dropped() {
    let evidence = two_item_evidence();
    let nodes = vec![
        BoardNode::evidence("EVID-01", NodeType::Photo, "alley_scene.jpg"),
        BoardNode::suspect("SUS-01", "Hooded Male (20%)"),
    ];
    let edges = vec![
        Connection::new("SUS-01", "EVID-01", "seen at scene"),
        // EVID-02 is only added during completion, so this edge survives
        Connection::new("EVID-02", "SUS-01", "describes"),
        Connection::new("SUS-01", "SUS-07", "knows"),
        Connection::new("GHOST", "EVID-01", "unknown"),
    ];
    let result = result_with(None, Some(nodes), Some(edges));

    let analysis = complete_board(build_final_output(&result, "Alley"), &evidence);
    let kept: Vec<(&str, &str)> = analysis
        .connections
        .iter()
        .map(|c| (c.source_id.as_str(), c.target_id.as_str()))
        .collect();
    assert_eq!(kept, vec![("SUS-01", "EVID-01"), ("EVID-02", "SUS-01")]);
}

#[test]
fn test_duplicate_node_ids_collapse_to_first() {
    let nodes = vec![
        BoardNode::evidence("EVID-01", NodeType::Photo, "first"),
        BoardNode::evidence("EVID-01", NodeType::Note, "second"),
    ];
    let result = result_with(None, Some(nodes), None);
    let analysis = complete_board(build_final_output(&result, "Alley"), &[]);
    assert_eq!(analysis.evidence_nodes.len(), 1);
    assert_eq!(analysis.evidence_nodes[0].title, "first");
}

#[test]
fn test_case_title_falls_back_to_the_case() {
    let analysis = build_final_output(&OrchestrationResult::default(), "Alley stabbing");
    assert_eq!(analysis.case_title, "Alley stabbing");
    assert_eq!(analysis.ui.theme.bg, "#0B0B12");
    assert!(analysis.is_empty());
}

#[test]
fn test_lower_case_agent_ids_match_generated_ids() {
    let evidence = two_item_evidence();
    let nodes: Vec<BoardNode> = serde_json::from_str(
        r#"[{"id": "evid-01", "type": "PHOTO", "title": "alley_scene.jpg"},
            {"id": "Evid-02", "type": "STATEMENT", "title": "witness_1.txt"}]"#,
    )
    .unwrap();
    let edges: Vec<Connection> =
        serde_json::from_str(r#"[{"source": "evid-02", "target": "EVID-01", "label": "relates"}]"#)
            .unwrap();
    let result = result_with(None, Some(nodes), Some(edges));

    let analysis = complete_board(build_final_output(&result, "Alley"), &evidence);
    let ids: Vec<&str> = analysis.evidence_nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["EVID-01", "EVID-02"]);
    assert_eq!(analysis.connections.len(), 1);
    assert_eq!(analysis.connections[0].source_id, "EVID-02");
}

#[test]
fn test_blank_suspect_id_does_not_steal_a_given_id() {
    let suspects = vec![Suspect::new("", "Anon", 15), Suspect::new("SUS-01", "Driver", 60)];
    let result = result_with(Some(suspects), Some(Vec::new()), None);

    let analysis = build_final_output(&result, "Alley");
    let ids: Vec<&str> = analysis.suspects.iter().map(|s| s.suspect_id.as_str()).collect();
    assert_eq!(ids, vec!["SUS-02", "SUS-01"]);

    let titles: Vec<&str> = analysis
        .evidence_nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Suspect)
        .map(|n| n.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Anon (15%)", "Driver (60%)"]);
}

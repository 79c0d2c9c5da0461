//! Layout Integration Tests
//!
//! Properties of the lane layout over mixed boards.

use std::collections::HashSet;

use crimeboard::services::layout::{assign_layout, classify_node, needs_layout, Lane};
use crimeboard_core::{BoardNode, EvidenceItem, EvidenceKind, NodeType};

fn mixed_board() -> (Vec<BoardNode>, Vec<EvidenceItem>) {
    let evidence = vec![
        EvidenceItem::new("a1", EvidenceKind::Photo, "kitchen_scene.jpg"),
        EvidenceItem::new("b2", EvidenceKind::Statement, "neighbour_statement.txt"),
        EvidenceItem::new("c3", EvidenceKind::Document, "phone_bill.pdf"),
        EvidenceItem::new("d4", EvidenceKind::Photo, "knife.jpg"),
        EvidenceItem::new("e5", EvidenceKind::Statement, "taxi_driver.txt"),
    ];
    let mut nodes: Vec<BoardNode> = vec![
        BoardNode::evidence("EVID-01", NodeType::Photo, "kitchen_scene.jpg"),
        BoardNode::evidence("EVID-02", NodeType::Statement, "neighbour_statement.txt"),
        BoardNode::evidence("EVID-03", NodeType::Pdf, "phone_bill.pdf"),
        BoardNode::evidence("EVID-04", NodeType::Photo, "knife.jpg"),
        BoardNode::evidence("EVID-05", NodeType::Statement, "taxi_driver.txt"),
        BoardNode::evidence("NOTE-1", NodeType::Note, "Back door unlocked"),
    ];
    for i in 1..=4 {
        nodes.push(BoardNode::suspect(format!("SUS-{:02}", i), format!("Person {} (30%)", i)));
    }
    (nodes, evidence)
}

#[test]
fn test_fresh_layout_does_not_need_another() {
    let (nodes, evidence) = mixed_board();
    assert!(needs_layout(&nodes));

    let laid_out = assign_layout(nodes, &evidence);
    assert!(!needs_layout(&laid_out));

    // A second pass over an already laid out board is stable
    let again = assign_layout(laid_out.clone(), &evidence);
    assert_eq!(again, laid_out);
}

#[test]
fn test_layout_keeps_every_node_once() {
    let (nodes, evidence) = mixed_board();
    let input_ids: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();

    let laid_out = assign_layout(nodes, &evidence);
    let output_ids: Vec<String> = laid_out.iter().map(|n| n.id.clone()).collect();
    assert_eq!(output_ids, input_ids);
    assert!(laid_out.iter().all(|n| n.position.is_some()));
}

#[test]
fn test_suspects_sit_below_all_evidence() {
    let (nodes, evidence) = mixed_board();
    let laid_out = assign_layout(nodes, &evidence);

    let mut lowest_evidence = f64::NEG_INFINITY;
    let mut highest_suspect = f64::INFINITY;
    for node in &laid_out {
        let y = node.position.unwrap().y;
        if classify_node(node, &evidence) == Lane::Suspect {
            highest_suspect = highest_suspect.min(y);
        } else {
            lowest_evidence = lowest_evidence.max(y);
        }
    }
    assert!(highest_suspect > lowest_evidence);
}

#[test]
fn test_lanes_follow_evidence_kind() {
    let (nodes, evidence) = mixed_board();
    let laid_out = assign_layout(nodes, &evidence);

    let x_of = |id: &str| {
        laid_out
            .iter()
            .find(|n| n.id == id)
            .and_then(|n| n.position)
            .map(|p| p.x)
            .unwrap()
    };
    assert_eq!(x_of("EVID-01"), Lane::Scene.x());
    assert_eq!(x_of("EVID-04"), Lane::Scene.x());
    assert_eq!(x_of("EVID-02"), Lane::Witness.x());
    assert_eq!(x_of("EVID-05"), Lane::Witness.x());
    assert_eq!(x_of("EVID-03"), Lane::Other.x());
    assert_eq!(x_of("NOTE-1"), Lane::Other.x());
}

#[test]
fn test_stacked_origin_nodes_are_spread_out() {
    let nodes: Vec<BoardNode> = (1..=7)
        .map(|i| {
            BoardNode::evidence(format!("EVID-{:02}", i), NodeType::Note, format!("Item {}", i))
                .with_position(0.0, 0.0)
        })
        .collect();
    assert!(needs_layout(&nodes));

    let laid_out = assign_layout(nodes, &[]);
    let distinct: HashSet<(i64, i64)> = laid_out
        .iter()
        .map(|n| n.position.unwrap().pixel_key())
        .collect();
    assert_eq!(distinct.len(), 7);
}

#[test]
fn test_layout_is_deterministic() {
    let (nodes, evidence) = mixed_board();
    let first = assign_layout(nodes.clone(), &evidence);
    let second = assign_layout(nodes, &evidence);
    assert_eq!(first, second);
}

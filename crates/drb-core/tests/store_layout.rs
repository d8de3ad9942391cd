//! Integration tests: building a diagram by hand with the store, the id
//! scheme, the layout policy and the answer counter (drb-core).

use drb_core::*;
use pretty_assertions::assert_eq;

/// Append `kind` under `source` the way the editor does: next layout slot,
/// then the inbound edge.
fn branch(d: &mut Diagram, layout: &LayoutConfig, source: NodeId, id: NodeId, kind: NodeKind) {
    let position = layout.position_for(d.len());
    d.append_node(QuestionNode::new(id, kind, position)).unwrap();
    d.append_edge(Edge::between(source, id)).unwrap();
}

#[test]
fn hand_built_questionnaire_is_a_cascading_tree() {
    let layout = LayoutConfig::default();
    let mut answers = AnswerCounter::new();
    let mut d = Diagram::new();

    let root = NodeId::root();
    d.append_node(QuestionNode::new(root, NodeKind::DrugReview, layout.position_for(0)))
        .unwrap();
    let fu = NodeId::follow_up(root);
    branch(&mut d, &layout, root, fu, NodeKind::FollowUp { trigger: root });
    for seq in answers.next_sequence(fu, 2) {
        branch(&mut d, &layout, fu, NodeId::answer(fu, seq), NodeKind::Answer { source: fu, seq });
    }

    let (nodes, edges) = d.all();
    let placed: Vec<(&str, f32, f32)> = nodes
        .iter()
        .map(|n| (n.id.as_str(), n.position.x, n.position.y))
        .collect();
    assert_eq!(
        placed,
        [
            ("node-1", 250.0, 0.0),
            ("followUp-node-1", 300.0, 300.0),
            ("answer-followUp-node-1-1", 300.0, 400.0),
            ("answer-followUp-node-1-2", 300.0, 500.0),
        ]
    );
    let edge_ids: Vec<&str> = edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        edge_ids,
        [
            "enode-1-followUp-node-1",
            "efollowUp-node-1-answer-followUp-node-1-1",
            "efollowUp-node-1-answer-followUp-node-1-2",
        ]
    );
    assert!(d.is_rooted_tree());
    assert_eq!(answers.get(fu), Some(3));
}

#[test]
fn failed_edge_leaves_store_untouched() {
    let mut d = Diagram::new();
    d.append_node(QuestionNode::new(
        NodeId::root(),
        NodeKind::DrugReview,
        Position::default(),
    ))
    .unwrap();

    let err = d
        .append_edges([
            Edge::between(NodeId::root(), NodeId::intern("nowhere")),
        ])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "edge `enode-1-nowhere` references missing node `nowhere`"
    );
    assert_eq!(d.edge_count(), 0);
    assert_eq!(d.len(), 1);
}

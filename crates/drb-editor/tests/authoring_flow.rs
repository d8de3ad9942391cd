//! Integration tests: authoring a questionnaire end to end (drb-editor).
//!
//! Drives `DiagramState` and `Session` the way the front end does and checks
//! the diagram-wide invariants after every step.

use drb_core::id::NodeId;
use drb_core::model::*;
use drb_editor::affordance::{Action, available_actions};
use drb_editor::input::UiEvent;
use drb_editor::machine::{DiagramState, Transition};
use drb_editor::session::Session;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_invariants(state: &DiagramState) {
    let d = state.diagram();

    let node_ids: HashSet<NodeId> = d.nodes().map(|n| n.id).collect();
    assert_eq!(node_ids.len(), d.len(), "duplicate node id");
    let edge_ids: HashSet<_> = d.edges().map(|e| e.id).collect();
    assert_eq!(edge_ids.len(), d.edge_count(), "duplicate edge id");

    let root = d.root().expect("diagram has a root");
    assert_eq!(root.kind, NodeKind::DrugReview);
    assert_eq!(
        d.nodes()
            .filter(|n| n.node_type() == NodeType::DrugReview)
            .count(),
        1
    );
    assert!(d.is_rooted_tree(), "not a tree:\n{}", drb_core::emit_outline(d));
}

// ─── Scenario ────────────────────────────────────────────────────────────

#[test]
fn ibuprofen_answers_then_one_more() {
    init_logging();
    let follow_up = NodeId::follow_up(NodeId::root());

    let state = DiagramState::default();
    assert_eq!(state.diagram().len(), 1);

    let state = state.on_submit(NodeId::root(), "Ibuprofen");
    let state = state.on_add_answers(follow_up).unwrap();
    let last_answer = state.diagram().last().unwrap().id;
    let state = state.on_add_more_answers(last_answer).unwrap();

    let d = state.diagram();
    assert_eq!(d.len(), 5);
    assert_eq!(d.edge_count(), 4);
    assert_eq!(state.answers().get(follow_up), Some(4));

    let types: Vec<NodeType> = d.nodes().map(|n| n.node_type()).collect();
    assert_eq!(
        types,
        [
            NodeType::DrugReview,
            NodeType::FollowUp,
            NodeType::Answer,
            NodeType::Answer,
            NodeType::Answer,
        ]
    );
    assert_invariants(&state);
}

#[test]
fn outline_of_authored_questionnaire() {
    let mut session = Session::default();
    let root = NodeId::root();
    session.handle(&UiEvent::typed(root, "Ibuprofen"));
    session.handle(&UiEvent::key(root, "Enter", "Ibuprofen"));
    session.handle(&UiEvent::ButtonClicked(Action::AddQuestion));
    let q = session.state().active_source().unwrap();
    session.handle(&UiEvent::typed(q, "Taken with food?"));
    session.handle(&UiEvent::ButtonClicked(Action::AddMoreAnswers));
    session.handle(&UiEvent::ButtonClicked(Action::AddMoreAnswers));

    let expected = "\
What is the drug you are reviewing? \"Ibuprofen\" @node-1
  Follow-up Questions: \"\" @followUp-node-1
    Question: \"Taken with food?\" @node-3
      Answer: \"\" @answer-node-3-1
      Answer: \"\" @answer-node-3-2
";
    assert_eq!(session.outline(), expected);
    assert_invariants(session.state());
}

// ─── Pairing ─────────────────────────────────────────────────────────────

#[test]
fn answer_sequences_never_repeat_per_source() {
    let follow_up = NodeId::follow_up(NodeId::root());
    let mut state = DiagramState::default().on_submit(NodeId::root(), "Aspirin");
    state = state.on_add_answers(follow_up).unwrap();
    state = state.on_add_more_answers(follow_up).unwrap();
    state = state.on_add_answers(follow_up).unwrap();
    state = state.on_add_more_answers(follow_up).unwrap();

    let mut seqs: Vec<u32> = state
        .diagram()
        .nodes()
        .filter_map(|n| match n.kind {
            NodeKind::Answer { source, seq } if source == follow_up => Some(seq),
            _ => None,
        })
        .collect();
    seqs.sort();
    assert_eq!(seqs, [1, 2, 3, 4, 5, 6]);
    assert_eq!(state.answers().get(follow_up), Some(7));
    assert_invariants(&state);
}

// ─── Affordances ─────────────────────────────────────────────────────────

#[test]
fn question_last_hides_toolbox_regardless_of_history() {
    let follow_up = NodeId::follow_up(NodeId::root());
    let base = DiagramState::default().on_submit(NodeId::root(), "Aspirin");

    let histories = [
        base.on_add_question(follow_up).unwrap(),
        base.on_add_answers(follow_up)
            .unwrap()
            .on_add_question(follow_up)
            .unwrap(),
        base.on_add_prompt(follow_up)
            .unwrap()
            .on_add_question(NodeId::root())
            .unwrap(),
    ];
    for state in &histories {
        assert_eq!(state.last_added(), Some(NodeType::Question));
        let actions = available_actions(state);
        assert!(!actions.toolbox_visible());
        assert!(actions.contains(Action::AddMoreAnswers));
    }
}

// ─── Exhaustive action sequences ─────────────────────────────────────────

/// Apply every sequence of up to `depth` transitions (each action from each
/// existing node) and check the invariants on every reachable state.
fn explore(state: &DiagramState, depth: usize, visited: &mut usize) {
    assert_invariants(state);
    *visited += 1;
    if depth == 0 {
        return;
    }
    let sources: Vec<NodeId> = state.diagram().nodes().map(|n| n.id).collect();
    for source in sources {
        for action in Action::ALL {
            let next = state
                .apply(&action.transition(source))
                .expect("existing source is accepted");
            explore(&next, depth - 1, visited);
        }
    }
}

#[test]
fn every_short_history_keeps_ids_unique_and_tree_shaped() {
    init_logging();
    let start = DiagramState::default().on_submit(NodeId::root(), "Aspirin");
    let mut visited = 0;
    explore(&start, 3, &mut visited);
    assert!(visited > 100);
}

#[test]
fn edits_never_change_shape() {
    let mut state = DiagramState::default().on_submit(NodeId::root(), "Aspirin");
    state = state
        .apply(&Transition::AddAnswers {
            source: NodeId::follow_up(NodeId::root()),
        })
        .unwrap();
    let before: Vec<(NodeId, Position)> =
        state.diagram().nodes().map(|n| (n.id, n.position)).collect();

    for node in before.iter().map(|(id, _)| *id) {
        state = state.on_value_change(node, "edited");
    }
    let after: Vec<(NodeId, Position)> =
        state.diagram().nodes().map(|n| (n.id, n.position)).collect();
    assert_eq!(before, after);
    assert!(state.diagram().nodes().all(|n| n.value == "edited"));
    assert_eq!(state.drug_name(), "edited");
}

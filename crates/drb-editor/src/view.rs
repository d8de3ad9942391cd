//! Render projections handed to the presentation layer.

use crate::machine::DiagramState;
use drb_core::id::{EdgeId, NodeId};
use drb_core::model::{NodeType, Position, QuestionNode};
use serde::Serialize;

/// Everything a renderer needs to draw one node: its kind tag, the prompt
/// label, and the editable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: &'static str,
    pub label: &'static str,
    pub value: String,
    pub position: Position,
    /// Enter in this node's field can spawn a branch.
    pub submits: bool,
}

impl NodeView {
    fn of(node: &QuestionNode) -> Self {
        let node_type = node.node_type();
        Self {
            id: node.id,
            node_type: node_type.as_str(),
            label: node_type.label(),
            value: node.value.clone(),
            position: node.position,
            submits: node_type == NodeType::DrugReview,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeView {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}

/// Node views in insertion order.
pub fn node_views(state: &DiagramState) -> Vec<NodeView> {
    state.diagram().nodes().map(NodeView::of).collect()
}

pub fn edge_views(state: &DiagramState) -> Vec<EdgeView> {
    state
        .diagram()
        .edges()
        .map(|e| EdgeView {
            id: e.id,
            source: e.source,
            target: e.target,
        })
        .collect()
}

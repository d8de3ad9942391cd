//! Questionnaire diagram data model.
//!
//! The diagram is a tree: the DrugReview node is the root and every other
//! node has exactly one inbound edge, appended together with the node.
//! Nothing is ever removed, so insertion order is also display order.

use crate::id::{EdgeId, NodeId};
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;
use thiserror::Error;

// ─── Node kinds ──────────────────────────────────────────────────────────

/// What a node asks or records, with the data each kind needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// The root: "what drug are you reviewing?".
    DrugReview,
    /// Spawned by submitting the drug name on `trigger`.
    FollowUp { trigger: NodeId },
    Question,
    /// The `seq`-th answer attached to `source`.
    Answer { source: NodeId, seq: u32 },
    /// Free-text prompt.
    Prompt,
}

/// Field-less tag of a `NodeKind`, used where only the kind matters
/// (last-added tracking, renderer dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    DrugReview,
    FollowUp,
    Question,
    Answer,
    Prompt,
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::DrugReview => NodeType::DrugReview,
            NodeKind::FollowUp { .. } => NodeType::FollowUp,
            NodeKind::Question => NodeType::Question,
            NodeKind::Answer { .. } => NodeType::Answer,
            NodeKind::Prompt => NodeType::Prompt,
        }
    }
}

impl NodeType {
    /// The prompt text shown above the node's input field.
    pub fn label(&self) -> &'static str {
        match self {
            NodeType::DrugReview => "What is the drug you are reviewing?",
            NodeType::FollowUp => "Follow-up Questions:",
            NodeType::Question => "Question:",
            NodeType::Answer => "Answer:",
            NodeType::Prompt => "Prompt:",
        }
    }

    /// Renderer type tag (matches the web front end's node registry).
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::DrugReview => "drugReviewNode",
            NodeType::FollowUp => "followUpNode",
            NodeType::Question => "questionNode",
            NodeType::Answer => "answerNode",
            NodeType::Prompt => "promptNode",
        }
    }
}

// ─── Nodes & edges ───────────────────────────────────────────────────────

/// Absolute diagram position, assigned once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A single node in the questionnaire diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Author text bound to the node's input field.
    pub value: String,
    pub position: Position,
}

impl QuestionNode {
    pub fn new(id: NodeId, kind: NodeKind, position: Position) -> Self {
        Self {
            id,
            kind,
            value: String::new(),
            position,
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }
}

/// A directed connection from a node to one of its branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn between(source: NodeId, target: NodeId) -> Self {
        Self {
            id: EdgeId::between(source, target),
            source,
            target,
        }
    }
}

// ─── Store ───────────────────────────────────────────────────────────────

/// Rejected store mutations. Each one would break id uniqueness or leave
/// an edge dangling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("node `{0}` already exists")]
    DuplicateNode(NodeId),
    #[error("edge `{0}` already exists")]
    DuplicateEdge(EdgeId),
    #[error("edge `{edge}` references missing node `{node}`")]
    MissingEndpoint { edge: EdgeId, node: NodeId },
}

/// The append-only node/edge store.
///
/// Backed by a `StableDiGraph`; since nothing is removed, node and edge
/// indices are handed out in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    graph: StableDiGraph<QuestionNode, Edge>,
    /// Index from NodeId → NodeIndex for fast lookup.
    id_index: HashMap<NodeId, NodeIndex>,
}

impl Diagram {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A diagram holding only `root`.
    #[must_use]
    pub fn with_root(root: QuestionNode) -> Self {
        let mut graph = StableDiGraph::new();
        let id = root.id;
        let idx = graph.add_node(root);

        let mut id_index = HashMap::new();
        id_index.insert(id, idx);

        Self { graph, id_index }
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Append a node. Ids must be unique for the lifetime of the diagram.
    pub fn append_node(&mut self, node: QuestionNode) -> Result<NodeIndex, StoreError> {
        if self.id_index.contains_key(&node.id) {
            return Err(StoreError::DuplicateNode(node.id));
        }
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.id_index.insert(id, idx);
        log::trace!("APPEND node @{id}");
        Ok(idx)
    }

    /// Append several nodes in order, stopping at the first rejection.
    pub fn append_nodes(
        &mut self,
        nodes: impl IntoIterator<Item = QuestionNode>,
    ) -> Result<(), StoreError> {
        for node in nodes {
            self.append_node(node)?;
        }
        Ok(())
    }

    /// Append an edge. Both endpoints must already exist and the id must
    /// be new.
    pub fn append_edge(&mut self, edge: Edge) -> Result<(), StoreError> {
        let source = self.endpoint(&edge, edge.source)?;
        let target = self.endpoint(&edge, edge.target)?;
        if self.graph.find_edge(source, target).is_some()
            || self.edges().any(|e| e.id == edge.id)
        {
            return Err(StoreError::DuplicateEdge(edge.id));
        }
        self.graph.add_edge(source, target, edge);
        log::trace!("APPEND edge @{}", edge.id);
        Ok(())
    }

    pub fn append_edges(&mut self, edges: impl IntoIterator<Item = Edge>) -> Result<(), StoreError> {
        for edge in edges {
            self.append_edge(edge)?;
        }
        Ok(())
    }

    fn endpoint(&self, edge: &Edge, node: NodeId) -> Result<NodeIndex, StoreError> {
        self.index_of(node).ok_or(StoreError::MissingEndpoint {
            edge: edge.id,
            node,
        })
    }

    /// Replace the value of `id`, leaving identity, kind and position alone.
    /// Returns `false` (and changes nothing) when the node does not exist.
    pub fn update_node_value(&mut self, id: NodeId, value: &str) -> bool {
        match self.get_by_id_mut(id) {
            Some(node) => {
                if node.value != value {
                    node.value = value.to_string();
                }
                true
            }
            None => false,
        }
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &QuestionNode> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_indices().map(|idx| &self.graph[idx])
    }

    /// Snapshot of both collections, in insertion order.
    pub fn all(&self) -> (Vec<&QuestionNode>, Vec<&Edge>) {
        (self.nodes().collect(), self.edges().collect())
    }

    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.id_index.contains_key(&id)
    }

    pub fn get_by_id(&self, id: NodeId) -> Option<&QuestionNode> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    fn get_by_id_mut(&mut self, id: NodeId) -> Option<&mut QuestionNode> {
        self.index_of(id).map(|idx| &mut self.graph[idx])
    }

    /// The first node ever appended.
    pub fn root(&self) -> Option<&QuestionNode> {
        self.nodes().next()
    }

    /// The most recently appended node.
    pub fn last(&self) -> Option<&QuestionNode> {
        self.graph.node_indices().last().map(|idx| &self.graph[idx])
    }

    /// True if any node of `node_type` exists anywhere in the diagram.
    pub fn has_type(&self, node_type: NodeType) -> bool {
        self.nodes().any(|n| n.node_type() == node_type)
    }

    /// The node with an edge into `id`, if any.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.index_of(id)?;
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
            .map(|p| self.graph[p].id)
    }

    /// Direct branches of `id` in insertion order.
    pub fn children(&self, id: NodeId) -> SmallVec<[NodeId; 4]> {
        let Some(idx) = self.index_of(id) else {
            return SmallVec::new();
        };
        let mut children: SmallVec<[NodeIndex; 4]> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        // petgraph yields neighbours newest-first
        children.sort();
        children.into_iter().map(|c| self.graph[c].id).collect()
    }

    pub fn in_degree(&self, id: NodeId) -> usize {
        self.index_of(id)
            .map(|idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .count()
            })
            .unwrap_or(0)
    }

    /// True if the edges form a tree rooted at the first node: the root has
    /// no parent, every other node has exactly one, and every node is
    /// reachable from the root.
    pub fn is_rooted_tree(&self) -> bool {
        let Some(root) = self.root() else {
            return self.edge_count() == 0;
        };
        if self.in_degree(root.id) != 0 {
            return false;
        }
        if self.nodes().skip(1).any(|n| self.in_degree(n.id) != 1) {
            return false;
        }
        let mut seen = 0usize;
        let mut stack = vec![root.id];
        while let Some(id) = stack.pop() {
            seen += 1;
            stack.extend(self.children(id));
        }
        seen == self.len()
    }
}

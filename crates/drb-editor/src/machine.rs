//! Branching state machine.
//!
//! `DiagramState` is an explicit value: every transition takes the current
//! state by reference and returns the next one, leaving the input untouched.
//! A rejected transition therefore never leaves a half-applied diagram
//! behind.
//!
//! | Transition       | Appends                                  | Last added |
//! |------------------|------------------------------------------|------------|
//! | initialize       | DrugReview root                          | DrugReview |
//! | submit drug name | FollowUp + edge from root                | FollowUp   |
//! | add question     | Question + edge from source              | Question   |
//! | add prompt       | Prompt + edge from source                | Prompt     |
//! | add answers      | two Answers, each with an edge           | Answer     |
//! | add more answers | one Answer + edge                        | Answer     |

use drb_core::counter::AnswerCounter;
use drb_core::id::NodeId;
use drb_core::layout::LayoutConfig;
use drb_core::model::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Why a transition was refused. The state it was applied to is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("source node `{0}` does not exist")]
    UnknownSource(NodeId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One authored change to the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Transition {
    /// Text typed into a node's field.
    EditValue { node: NodeId, value: String },
    /// Enter pressed in a node's field.
    Submit { node: NodeId, value: String },
    AddQuestion { source: NodeId },
    AddPrompt { source: NodeId },
    AddAnswers { source: NodeId },
    AddMoreAnswers { source: NodeId },
}

/// The whole authoring state of one session.
#[derive(Debug, Clone)]
pub struct DiagramState {
    diagram: Diagram,
    answers: AnswerCounter,
    /// Kind of the most recently appended node. Drives the toolbox.
    last_added: Option<NodeType>,
    /// Node new branches hang off by default: the most recently appended one.
    active_source: Option<NodeId>,
    /// Mirror of the root's value.
    drug_name: String,
    layout: LayoutConfig,
    /// Bumped on every effective change.
    revision: u64,
}

impl Default for DiagramState {
    fn default() -> Self {
        Self::initialize(LayoutConfig::default())
    }
}

impl DiagramState {
    /// A fresh diagram holding only the DrugReview root.
    pub fn initialize(layout: LayoutConfig) -> Self {
        let root = QuestionNode::new(NodeId::root(), NodeKind::DrugReview, layout.position_for(0));
        Self {
            diagram: Diagram::with_root(root),
            answers: AnswerCounter::new(),
            last_added: Some(NodeType::DrugReview),
            active_source: Some(NodeId::root()),
            drug_name: String::new(),
            layout,
            revision: 0,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn answers(&self) -> &AnswerCounter {
        &self.answers
    }

    pub fn last_added(&self) -> Option<NodeType> {
        self.last_added
    }

    pub fn active_source(&self) -> Option<NodeId> {
        self.active_source
    }

    pub fn drug_name(&self) -> &str {
        &self.drug_name
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ─── Transitions ─────────────────────────────────────────────────────

    /// Apply any transition.
    pub fn apply(&self, transition: &Transition) -> Result<Self, TransitionError> {
        match transition {
            Transition::EditValue { node, value } => Ok(self.on_value_change(*node, value)),
            Transition::Submit { node, value } => Ok(self.on_submit(*node, value)),
            Transition::AddQuestion { source } => self.on_add_question(*source),
            Transition::AddPrompt { source } => self.on_add_prompt(*source),
            Transition::AddAnswers { source } => self.on_add_answers(*source),
            Transition::AddMoreAnswers { source } => self.on_add_more_answers(*source),
        }
    }

    /// Replace a node's text. Unknown ids and identical text are ignored.
    pub fn on_value_change(&self, node: NodeId, value: &str) -> Self {
        match self.diagram.get_by_id(node) {
            None => {
                log::debug!("value change for unknown node @{node} ignored");
                return self.clone();
            }
            Some(current) if current.value == value => return self.clone(),
            Some(_) => {}
        }
        let mut next = self.clone();
        next.diagram.update_node_value(node, value);
        if node == NodeId::root() {
            next.drug_name = value.to_string();
        }
        next.revision += 1;
        next
    }

    /// Enter on the root with a non-blank drug name spawns the follow-up.
    /// Anything else (blank text, another node, follow-up already there)
    /// is ignored.
    pub fn on_submit(&self, node: NodeId, value: &str) -> Self {
        let is_root = self.diagram.root().is_some_and(|r| r.id == node);
        if !is_root || self.last_added != Some(NodeType::DrugReview) || value.trim().is_empty() {
            log::debug!("submit on @{node} ignored");
            return self.clone();
        }

        let mut next = self.on_value_change(node, value);
        let follow_up = NodeId::follow_up(node);
        match next.append_branch(node, follow_up, NodeKind::FollowUp { trigger: node }) {
            Ok(()) => {
                log::debug!("drug {:?} submitted, follow-up @{follow_up}", value.trim());
                next
            }
            Err(e) => {
                log::debug!("submit on @{node} rejected: {e}");
                self.clone()
            }
        }
    }

    pub fn on_add_question(&self, source: NodeId) -> Result<Self, TransitionError> {
        self.add_single(source, NodeKind::Question)
    }

    pub fn on_add_prompt(&self, source: NodeId) -> Result<Self, TransitionError> {
        self.add_single(source, NodeKind::Prompt)
    }

    /// Attach a yes/no style pair of answers to `source`.
    pub fn on_add_answers(&self, source: NodeId) -> Result<Self, TransitionError> {
        self.add_answers(source, 2)
    }

    /// Attach one more answer. When `source` is itself an answer, the new
    /// answer joins its siblings under the node they answer, so one source
    /// keeps a single sequence: answers then one more leaves the follow-up's
    /// counter at 4.
    pub fn on_add_more_answers(&self, source: NodeId) -> Result<Self, TransitionError> {
        let node = self
            .diagram
            .get_by_id(source)
            .ok_or(TransitionError::UnknownSource(source))?;
        let owner = match node.kind {
            NodeKind::Answer { source: owner, .. } => owner,
            _ => source,
        };
        self.add_answers(owner, 1)
    }

    /// The ids a transition appended, oldest first.
    pub fn appended_since(&self, earlier: &DiagramState) -> SmallVec<[NodeId; 2]> {
        self.diagram
            .nodes()
            .skip(earlier.diagram.len())
            .map(|n| n.id)
            .collect()
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn require_source(&self, source: NodeId) -> Result<(), TransitionError> {
        if self.diagram.contains(source) {
            Ok(())
        } else {
            Err(TransitionError::UnknownSource(source))
        }
    }

    fn add_single(&self, source: NodeId, kind: NodeKind) -> Result<Self, TransitionError> {
        self.require_source(source)?;
        let mut next = self.clone();
        let id = NodeId::sequential(next.diagram.len());
        next.append_branch(source, id, kind)?;
        log::debug!("{} @{id} added under @{source}", kind.node_type().as_str());
        Ok(next)
    }

    fn add_answers(&self, source: NodeId, how_many: u32) -> Result<Self, TransitionError> {
        self.require_source(source)?;
        let mut next = self.clone();
        for seq in next.answers.next_sequence(source, how_many) {
            let id = NodeId::answer(source, seq);
            next.append_branch(source, id, NodeKind::Answer { source, seq })?;
        }
        log::debug!("{how_many} answer(s) added under @{source}");
        Ok(next)
    }

    /// Append a node at the next layout slot plus its inbound edge.
    fn append_branch(
        &mut self,
        source: NodeId,
        id: NodeId,
        kind: NodeKind,
    ) -> Result<(), TransitionError> {
        self.append_node(id, kind)?;
        self.diagram.append_edge(Edge::between(source, id))?;
        Ok(())
    }

    fn append_node(&mut self, id: NodeId, kind: NodeKind) -> Result<(), TransitionError> {
        let position = self.layout.position_for(self.diagram.len());
        self.diagram
            .append_node(QuestionNode::new(id, kind, position))?;
        self.last_added = Some(kind.node_type());
        self.active_source = Some(id);
        self.revision += 1;
        Ok(())
    }
}

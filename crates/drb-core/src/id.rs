//! Interned identifiers for diagram nodes and edges.
//!
//! Every id is derived from context (parent id, node count, answer sequence)
//! so the same authoring history always yields the same ids. Nodes are never
//! deleted, which is what makes count-based ids collision-free.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner shared by node and edge ids.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Id of the DrugReview root node.
pub const ROOT_ID: &str = "node-1";

/// A lightweight, interned identifier for a questionnaire node.
/// Internally a `Spur` index — 4 bytes, Copy, Eq, Hash in O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Spur);

impl NodeId {
    /// Intern a string as a NodeId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        NodeId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// The fixed id of the DrugReview root.
    pub fn root() -> Self {
        Self::intern(ROOT_ID)
    }

    /// Follow-up id for the node whose submission triggered it.
    /// At most one follow-up can ever exist per trigger.
    pub fn follow_up(trigger: NodeId) -> Self {
        Self::intern(&format!("followUp-{}", trigger.as_str()))
    }

    /// Id for a Question or Prompt, from the node count before the append.
    pub fn sequential(existing: usize) -> Self {
        Self::intern(&format!("node-{}", existing + 1))
    }

    /// Id for the `seq`-th answer attached to `source`.
    pub fn answer(source: NodeId, seq: u32) -> Self {
        Self::intern(&format!("answer-{}-{seq}", source.as_str()))
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NodeId::intern(&s))
    }
}

/// Interned identifier for an edge, `e{source}-{target}`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(Spur);

impl EdgeId {
    pub fn between(source: NodeId, target: NodeId) -> Self {
        EdgeId(INTERNER.get_or_intern(format!("e{}-{}", source.as_str(), target.as_str())))
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EdgeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EdgeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(EdgeId(INTERNER.get_or_intern(s)))
    }
}

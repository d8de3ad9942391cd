pub mod counter;
pub mod emitter;
pub mod id;
pub mod layout;
pub mod model;

pub use counter::AnswerCounter;
pub use emitter::emit_outline;
pub use id::{EdgeId, NodeId};
pub use layout::LayoutConfig;
pub use model::*;

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;

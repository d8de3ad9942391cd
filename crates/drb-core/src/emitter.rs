//! Emitter: Diagram → indented text outline.
//!
//! A read-only view of the questionnaire tree for logs, previews and tests.
//! It is not a storage format and there is no parser for it.

use crate::id::NodeId;
use crate::model::*;
use std::collections::HashSet;
use std::fmt::Write;

/// Emit the diagram as an outline, one node per line, children indented
/// under their source in insertion order.
///
/// ```text
/// What is the drug you are reviewing? "Ibuprofen" @node-1
///   Follow-up Questions: "" @followUp-node-1
///     Answer: "Yes" @answer-followUp-node-1-1
/// ```
#[must_use]
pub fn emit_outline(diagram: &Diagram) -> String {
    let mut out = String::with_capacity(64 * diagram.len());
    let mut seen = HashSet::new();

    if let Some(root) = diagram.root() {
        emit_node(&mut out, diagram, root.id, 0, &mut seen);
    }

    // Anything the walk did not reach has no path from the root.
    for node in diagram.nodes() {
        if !seen.contains(&node.id) {
            emit_line(&mut out, node, 0);
            out.pop();
            out.push_str(" (detached)\n");
        }
    }

    out
}

fn emit_node(
    out: &mut String,
    diagram: &Diagram,
    id: NodeId,
    depth: usize,
    seen: &mut HashSet<NodeId>,
) {
    if !seen.insert(id) {
        return;
    }
    let Some(node) = diagram.get_by_id(id) else {
        return;
    };
    emit_line(out, node, depth);
    for child in diagram.children(id) {
        emit_node(out, diagram, child, depth + 1, seen);
    }
}

fn emit_line(out: &mut String, node: &QuestionNode, depth: usize) {
    indent(out, depth);
    let _ = writeln!(
        out,
        "{} {:?} @{}",
        node.node_type().label(),
        node.value,
        node.id.as_str()
    );
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

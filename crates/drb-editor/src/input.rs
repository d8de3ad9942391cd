//! Input abstraction layer.
//!
//! Normalizes what the front end reports (typing, key presses, button
//! clicks) into `UiEvent`s, and resolves those into state transitions.

use crate::affordance::{Action, available_actions};
use crate::machine::{DiagramState, Transition};
use drb_core::id::NodeId;

/// The only key that submits a node's text.
pub const SUBMIT_KEY: &str = "Enter";

/// A normalized event from the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The text in a node's field changed.
    ValueChanged { node: NodeId, value: String },

    /// A key was pressed in a node's field. `value` is the field's text at
    /// the time of the press.
    KeyPressed {
        node: NodeId,
        key: String,
        value: String,
    },

    /// An authoring button was clicked.
    ButtonClicked(Action),
}

impl UiEvent {
    pub fn key(node: NodeId, key: &str, value: &str) -> Self {
        UiEvent::KeyPressed {
            node,
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub fn typed(node: NodeId, value: &str) -> Self {
        UiEvent::ValueChanged {
            node,
            value: value.to_string(),
        }
    }
}

/// Resolve an event against the current state.
///
/// Returns `None` when the event has no effect: a non-submit key, or a
/// button that is not currently offered. Buttons act on the state's active
/// source node.
pub fn resolve(event: &UiEvent, state: &DiagramState) -> Option<Transition> {
    match event {
        UiEvent::ValueChanged { node, value } => Some(Transition::EditValue {
            node: *node,
            value: value.clone(),
        }),
        UiEvent::KeyPressed { node, key, value } => {
            (key == SUBMIT_KEY).then(|| Transition::Submit {
                node: *node,
                value: value.clone(),
            })
        }
        UiEvent::ButtonClicked(action) => {
            if !available_actions(state).contains(*action) {
                log::debug!("{} not offered, click ignored", action.as_str());
                return None;
            }
            let source = state.active_source()?;
            Some(action.transition(source))
        }
    }
}

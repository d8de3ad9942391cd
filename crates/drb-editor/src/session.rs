//! Authoring session: the single owner of the current `DiagramState`.
//!
//! Each event is resolved and applied to completion before the next one is
//! accepted. A rejected transition leaves the current state in place.

use crate::affordance::{ActionSet, available_actions};
use crate::input::{UiEvent, resolve};
use crate::machine::{DiagramState, Transition, TransitionError};
use crate::view::{EdgeView, NodeView, edge_views, node_views};
use drb_core::emitter::emit_outline;
use drb_core::layout::LayoutConfig;

pub struct Session {
    state: DiagramState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl Session {
    /// Start a session with a freshly initialized diagram.
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            state: DiagramState::initialize(layout),
        }
    }

    pub fn state(&self) -> &DiagramState {
        &self.state
    }

    /// Handle one front-end event. Returns `true` if the diagram changed.
    pub fn handle(&mut self, event: &UiEvent) -> bool {
        let Some(transition) = resolve(event, &self.state) else {
            return false;
        };
        match self.apply(&transition) {
            Ok(changed) => changed,
            Err(e) => {
                log::debug!("event {event:?} rejected: {e}");
                false
            }
        }
    }

    /// Apply a transition directly, bypassing affordance checks.
    /// Returns whether the state changed.
    pub fn apply(&mut self, transition: &Transition) -> Result<bool, TransitionError> {
        let next = self.state.apply(transition)?;
        let changed = next.revision() != self.state.revision();
        debug_assert!(next.diagram().is_rooted_tree());
        self.state = next;
        Ok(changed)
    }

    pub fn available_actions(&self) -> ActionSet {
        available_actions(&self.state)
    }

    pub fn node_views(&self) -> Vec<NodeView> {
        node_views(&self.state)
    }

    pub fn edge_views(&self) -> Vec<EdgeView> {
        edge_views(&self.state)
    }

    /// Text outline of the current diagram.
    pub fn outline(&self) -> String {
        emit_outline(self.state.diagram())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affordance::Action;
    use drb_core::id::NodeId;

    #[test]
    fn rejected_transition_keeps_state() {
        let mut session = Session::default();
        let err = session
            .apply(&Transition::AddQuestion {
                source: NodeId::intern("missing"),
            })
            .unwrap_err();
        assert_eq!(err, TransitionError::UnknownSource(NodeId::intern("missing")));
        assert_eq!(session.state().diagram().len(), 1);
    }

    #[test]
    fn ignored_events_report_no_change() {
        let mut session = Session::default();
        assert!(!session.handle(&UiEvent::key(NodeId::root(), "Enter", "  ")));
        assert!(!session.handle(&UiEvent::ButtonClicked(Action::AddAnswers)));
        assert!(session.handle(&UiEvent::typed(NodeId::root(), "Aspirin")));
        assert!(session.handle(&UiEvent::key(NodeId::root(), "Enter", "Aspirin")));
        assert_eq!(session.state().diagram().len(), 2);
    }

    #[test]
    fn retyping_the_same_text_reports_no_change() {
        let mut session = Session::default();
        assert!(session.handle(&UiEvent::typed(NodeId::root(), "A")));
        assert!(!session.handle(&UiEvent::typed(NodeId::root(), "A")));
        assert!(session.handle(&UiEvent::typed(NodeId::root(), "AB")));
    }
}

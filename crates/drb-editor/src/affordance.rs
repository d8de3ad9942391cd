//! Toolbox affordances.
//!
//! Which authoring buttons are offered is a pure projection of the current
//! `DiagramState`; nothing here is stored between renders.

use crate::machine::{DiagramState, Transition};
use drb_core::id::NodeId;
use drb_core::model::NodeType;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// An authoring button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    AddQuestion,
    AddAnswers,
    AddPrompt,
    AddMoreAnswers,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::AddQuestion,
        Action::AddAnswers,
        Action::AddPrompt,
        Action::AddMoreAnswers,
    ];

    /// Button caption.
    pub fn label(&self) -> &'static str {
        match self {
            Action::AddQuestion => "Question",
            Action::AddAnswers => "Answers",
            Action::AddPrompt => "Prompts",
            Action::AddMoreAnswers => "Add More Answers",
        }
    }

    /// Stable name used across the WASM bridge.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::AddQuestion => "addQuestion",
            Action::AddAnswers => "addAnswers",
            Action::AddPrompt => "addPrompt",
            Action::AddMoreAnswers => "addMoreAnswers",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }

    /// Part of the three-button toolbox (as opposed to the standalone
    /// "Add More Answers" button).
    pub fn in_toolbox(&self) -> bool {
        !matches!(self, Action::AddMoreAnswers)
    }

    /// The transition this button performs from `source`.
    pub fn transition(&self, source: NodeId) -> Transition {
        match self {
            Action::AddQuestion => Transition::AddQuestion { source },
            Action::AddAnswers => Transition::AddAnswers { source },
            Action::AddPrompt => Transition::AddPrompt { source },
            Action::AddMoreAnswers => Transition::AddMoreAnswers { source },
        }
    }
}

/// The set of currently offered actions, in `Action` order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionSet(SmallVec<[Action; 4]>);

impl ActionSet {
    pub fn contains(&self, action: Action) -> bool {
        self.0.contains(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.0.iter().copied()
    }

    /// True if the three-button toolbox should be drawn.
    pub fn toolbox_visible(&self) -> bool {
        self.iter().any(|a| a.in_toolbox())
    }

    fn insert(&mut self, action: Action) {
        if let Err(pos) = self.0.binary_search(&action) {
            self.0.insert(pos, action);
        }
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = ActionSet::default();
        for action in iter {
            set.insert(action);
        }
        set
    }
}

/// Actions the author may take in `state`.
///
/// - The toolbox (question, answers, prompt) is offered only right after
///   the follow-up was added.
/// - "Add More Answers" is offered as soon as any follow-up exists.
pub fn available_actions(state: &DiagramState) -> ActionSet {
    let diagram = state.diagram();
    let mut actions = ActionSet::default();

    if !diagram.is_empty() && state.last_added() == Some(NodeType::FollowUp) {
        actions.insert(Action::AddQuestion);
        actions.insert(Action::AddAnswers);
        actions.insert(Action::AddPrompt);
    }
    if diagram.has_type(NodeType::FollowUp) {
        actions.insert(Action::AddMoreAnswers);
    }
    actions
}

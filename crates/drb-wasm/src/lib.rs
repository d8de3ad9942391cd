//! WASM bridge for the Drug Review Builder — exposes the authoring session
//! to the web front end.
//!
//! Compiled via `wasm-pack build --target web`. The front end owns the
//! diagram widget; it forwards typing, key presses and button clicks here
//! and redraws from the JSON this returns.

use drb_core::id::NodeId;
use drb_core::layout::LayoutConfig;
use drb_editor::affordance::Action;
use drb_editor::input::UiEvent;
use drb_editor::session::Session;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The main WASM-facing controller. All interaction from the page goes
/// through this struct.
#[wasm_bindgen]
pub struct QuestionnaireCanvas {
    session: Session,
}

#[wasm_bindgen]
impl QuestionnaireCanvas {
    /// Create a controller holding a freshly initialized diagram.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        Self {
            session: Session::new(LayoutConfig::default()),
        }
    }

    /// Create a controller with custom column spacing.
    pub fn with_layout(column_x: f32, base_offset: f32, row_height: f32) -> Self {
        console_error_panic_hook_setup();
        let layout = LayoutConfig {
            column_x,
            base_offset,
            row_height,
            ..LayoutConfig::default()
        };
        Self {
            session: Session::new(layout),
        }
    }

    /// A node's input text changed. Returns `true` if the diagram changed.
    pub fn set_value(&mut self, node_id: &str, value: &str) -> bool {
        self.session
            .handle(&UiEvent::typed(NodeId::intern(node_id), value))
    }

    /// A key was pressed in a node's input. Returns `true` if the diagram
    /// changed (Enter on the drug name spawns the follow-up).
    pub fn key_press(&mut self, node_id: &str, key: &str, value: &str) -> bool {
        self.session
            .handle(&UiEvent::key(NodeId::intern(node_id), key, value))
    }

    /// An authoring button was clicked (`addQuestion`, `addAnswers`,
    /// `addPrompt`, `addMoreAnswers`). Unknown names and buttons that are
    /// not currently offered return `false`.
    pub fn click(&mut self, action: &str) -> bool {
        match Action::parse(action) {
            Some(action) => self.session.handle(&UiEvent::ButtonClicked(action)),
            None => {
                log::debug!("unknown action {action:?}");
                false
            }
        }
    }

    /// Nodes as a JSON array of `{id, type, label, value, position, submits}`.
    pub fn nodes_json(&self) -> String {
        to_json(&self.session.node_views())
    }

    /// Edges as a JSON array of `{id, source, target}`.
    pub fn edges_json(&self) -> String {
        to_json(&self.session.edge_views())
    }

    /// Offered actions as a JSON array of `{action, label}`.
    pub fn actions_json(&self) -> String {
        let actions: Vec<ActionButton> = self
            .session
            .available_actions()
            .iter()
            .map(ActionButton::from)
            .collect();
        to_json(&actions)
    }

    /// Whether the three-button toolbox should be drawn.
    pub fn toolbox_visible(&self) -> bool {
        self.session.available_actions().toolbox_visible()
    }

    /// Id of the node new branches attach to, or empty string.
    pub fn active_source(&self) -> String {
        self.session
            .state()
            .active_source()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn drug_name(&self) -> String {
        self.session.state().drug_name().to_string()
    }

    /// Indented text outline of the diagram.
    pub fn outline(&self) -> String {
        self.session.outline()
    }
}

impl Default for QuestionnaireCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ActionButton {
    action: &'static str,
    label: &'static str,
}

impl From<Action> for ActionButton {
    fn from(action: Action) -> Self {
        Self {
            action: action.as_str(),
            label: action.label(),
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("DRB WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

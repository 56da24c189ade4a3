//! Button labels and enable states derived from the session.

use serde::Serialize;

use super::{Session, SessionState};

/// What the clip toggle button does when pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipToggle {
    Enable,
    Disable,
}

impl ClipToggle {
    pub fn label(&self) -> &'static str {
        match self {
            ClipToggle::Enable => "Enable Clipping",
            ClipToggle::Disable => "Disable Clipping",
        }
    }
}

/// What the apply/undo button does when pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyAction {
    Apply,
    Undo,
}

impl ApplyAction {
    pub fn label(&self) -> &'static str {
        match self {
            ApplyAction::Apply => "Apply Clipping",
            ApplyAction::Undo => "Undo Clipping",
        }
    }
}

/// Toolbar state for one frame.
///
/// Load and export stay enabled in every state: export with nothing loaded
/// reports the problem through a warning instead of a greyed-out button, and
/// so does enabling the clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlStates {
    pub load_enabled: bool,
    pub clip_toggle: ClipToggle,
    pub clip_toggle_enabled: bool,
    pub apply: ApplyAction,
    pub apply_enabled: bool,
    pub export_enabled: bool,
    pub reset_plane_enabled: bool,
}

impl ControlStates {
    pub fn for_session(session: &Session) -> Self {
        let state = session.state();
        let (clip_toggle, apply, apply_enabled) = match state {
            SessionState::Empty | SessionState::Loaded => {
                (ClipToggle::Enable, ApplyAction::Apply, false)
            }
            SessionState::Clipping => (
                ClipToggle::Disable,
                ApplyAction::Apply,
                session.derived().is_some(),
            ),
            SessionState::Committed => (ClipToggle::Enable, ApplyAction::Undo, true),
        };

        Self {
            load_enabled: true,
            clip_toggle,
            clip_toggle_enabled: true,
            apply,
            apply_enabled,
            export_enabled: true,
            reset_plane_enabled: state == SessionState::Clipping,
        }
    }
}

//! JSON command protocol for scripted sessions (`--batch`).

use std::path::PathBuf;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use stlclip_mesh::Plane;

use crate::fixtures::Shape;
use crate::harness::TestHarness;
use crate::state::session::Outcome;

fn default_size() -> f32 {
    1.0
}

/// A command a script can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Load an STL file
    Load { path: PathBuf },
    /// Load a built-in shape instead of a file
    LoadPrimitive {
        shape: Shape,
        #[serde(default = "default_size")]
        size: f32,
    },
    EnableClip,
    DisableClip,
    /// Move the cutting plane and clip
    MovePlane { origin: Vec3, normal: Vec3 },
    /// Push the cutting plane along its normal
    PushPlane { distance: f32 },
    ResetPlane,
    /// Commit the current clip preview
    Apply,
    /// Undo the last applied clip
    Undo,
    /// Write the working mesh to a file
    Export { path: PathBuf },
    /// Describe the session
    Inspect,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }

    fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Applied(_) => Self::ok(),
            Outcome::Rejected(rejection) => Self::err(rejection.to_string()),
        }
    }

    fn from_result(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(e) => Self::err(e),
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    tracing::debug!(?cmd, "execute command");
    match cmd {
        AgentCommand::Load { path } => CommandResponse::from_result(harness.load_file(&path)),

        AgentCommand::LoadPrimitive { shape, size } => {
            if !(size.is_finite() && size > 0.0) {
                return CommandResponse::err(format!("invalid size {size}"));
            }
            harness.load_shape(shape, size);
            CommandResponse::ok()
        }

        AgentCommand::EnableClip => CommandResponse::from_outcome(harness.enable_clip()),

        AgentCommand::DisableClip => CommandResponse::from_outcome(harness.disable_clip()),

        AgentCommand::MovePlane { origin, normal } => {
            if normal.length_squared() == 0.0 {
                return CommandResponse::err("normal must not be zero");
            }
            let outcome = harness.move_plane(Plane::new(origin, normal));
            match outcome {
                Outcome::Applied(_) => CommandResponse::ok_with_data(serde_json::json!({
                    "plane": harness.plane(),
                    "faces": harness.derived_mesh().map(|m| m.face_count()),
                })),
                rejected => CommandResponse::from_outcome(rejected),
            }
        }

        AgentCommand::PushPlane { distance } => {
            CommandResponse::from_outcome(harness.push_plane(distance))
        }

        AgentCommand::ResetPlane => CommandResponse::from_outcome(harness.reset_plane()),

        AgentCommand::Apply => CommandResponse::from_outcome(harness.apply()),

        AgentCommand::Undo => CommandResponse::from_outcome(harness.undo()),

        AgentCommand::Export { path } => CommandResponse::from_result(harness.export(&path)),

        AgentCommand::Inspect => CommandResponse::ok_with_data(harness.inspect()),
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

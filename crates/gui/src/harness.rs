//! Headless test harness: drives the clip editor without a window.

use std::path::Path;
use std::sync::Arc;

use stlclip_mesh::{Plane, TriMesh};

use crate::adapter::{Editor, HeadlessToolkit};
use crate::fixtures::Shape;
use crate::state::session::{ControlStates, Outcome, SessionFlags, SessionState};
use crate::state::settings::ClipSettings;
use crate::validation::MeshValidator;
use crate::viewport::plane_widget::PlaneWidget;

/// Headless test harness: an editor over a [`HeadlessToolkit`]
pub struct TestHarness {
    pub editor: Editor<HeadlessToolkit>,
}

impl TestHarness {
    /// Create a new empty harness with default clip settings.
    pub fn new() -> Self {
        Self::with_settings(&ClipSettings::default())
    }

    pub fn with_settings(settings: &ClipSettings) -> Self {
        let widget = PlaneWidget::new(settings.place_factor, settings.default_axis);
        let mut editor = Editor::new(HeadlessToolkit::new(widget));
        editor.export = settings.export_options();
        Self { editor }
    }

    // ── Commands ──────────────────────────────────────────────

    /// Load an STL file
    pub fn load_file(&mut self, path: &Path) -> Result<(), String> {
        self.editor
            .load_file(path)
            .map_err(|e| e.to_string())
            .and_then(accepted)
    }

    /// Load a built-in shape
    pub fn load_shape(&mut self, shape: Shape, size: f32) {
        let _ = self.editor.load_mesh(shape.build(size), shape.name());
    }

    pub fn load_mesh(&mut self, mesh: TriMesh, name: &str) -> Outcome {
        self.editor.load_mesh(mesh, name)
    }

    pub fn enable_clip(&mut self) -> Outcome {
        self.editor.enable_clipping()
    }

    pub fn disable_clip(&mut self) -> Outcome {
        self.editor.disable_clipping()
    }

    pub fn toggle_clip(&mut self) -> Outcome {
        self.editor.toggle_clipping()
    }

    /// Put the plane widget at `plane` and clip, as a drag would.
    pub fn move_plane(&mut self, plane: Plane) -> Outcome {
        let widget = &mut self.editor.toolkit_mut().widget;
        widget.set_origin(plane.origin);
        let plane = widget.set_normal(plane.normal);
        self.editor.move_plane(plane)
    }

    /// Push the plane widget along its normal and clip.
    pub fn push_plane(&mut self, distance: f32) -> Outcome {
        let plane = self.editor.toolkit_mut().widget.push(distance);
        self.editor.move_plane(plane)
    }

    pub fn reset_plane(&mut self) -> Outcome {
        self.editor.reset_plane()
    }

    pub fn apply(&mut self) -> Outcome {
        self.editor.apply()
    }

    pub fn undo(&mut self) -> Outcome {
        self.editor.undo_apply()
    }

    /// Export the working mesh to `path`.
    pub fn export(&mut self, path: &Path) -> Result<(), String> {
        self.editor
            .export_to(path)
            .map_err(|e| e.to_string())
            .and_then(accepted)
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.editor.session().state()
    }

    pub fn flags(&self) -> SessionFlags {
        self.editor.session().flags()
    }

    pub fn controls(&self) -> ControlStates {
        self.editor.session().controls()
    }

    pub fn working_mesh(&self) -> Option<&Arc<TriMesh>> {
        self.editor.session().working()
    }

    pub fn derived_mesh(&self) -> Option<&Arc<TriMesh>> {
        self.editor.session().derived()
    }

    /// Mesh the toolkit was last asked to display
    pub fn displayed_mesh(&self) -> Option<&Arc<TriMesh>> {
        self.editor.toolkit().displayed.as_ref()
    }

    pub fn plane(&self) -> Option<Plane> {
        self.editor.session().plane()
    }

    pub fn commit_count(&self) -> usize {
        self.editor.session().commit_count()
    }

    pub fn warnings(&self) -> &[String] {
        &self.editor.toolkit().warnings
    }

    pub fn notices(&self) -> &[String] {
        &self.editor.toolkit().notices
    }

    pub fn infos(&self) -> &[String] {
        &self.editor.toolkit().infos
    }

    /// Create a validator for the working mesh
    pub fn validate_working(&self) -> Option<MeshValidator<'_>> {
        self.working_mesh().map(|m| MeshValidator::new(m))
    }

    /// Create a validator for the clip preview
    pub fn validate_derived(&self) -> Option<MeshValidator<'_>> {
        self.derived_mesh().map(|m| MeshValidator::new(m))
    }

    /// Session summary as JSON.
    pub fn inspect(&self) -> serde_json::Value {
        let session = self.editor.session();
        let describe = |mesh: Option<&Arc<TriMesh>>| {
            mesh.map(|m| {
                let bounds = m.bounds();
                serde_json::json!({
                    "vertices": m.vertex_count(),
                    "faces": m.face_count(),
                    "min": bounds.map(|b| b.min.to_array()),
                    "max": bounds.map(|b| b.max.to_array()),
                })
            })
        };
        serde_json::json!({
            "state": session.state(),
            "flags": session.flags(),
            "controls": session.controls(),
            "source": session.source_name(),
            "commits": session.commit_count(),
            "plane": session.plane(),
            "working": describe(session.working()),
            "derived": describe(session.derived()),
        })
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a session rejection to an error message.
fn accepted(outcome: Outcome) -> Result<(), String> {
    match outcome {
        Outcome::Applied(_) => Ok(()),
        Outcome::Rejected(rejection) => Err(rejection.to_string()),
    }
}

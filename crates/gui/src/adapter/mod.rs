//! Glue between the session state machine and whatever shows the mesh.
//!
//! [`Toolkit`] is the boundary to the outside world: files, dialogs, the plane
//! widget and the viewport. [`Editor`] turns user commands into session
//! events and carries out the resulting effects on a toolkit. The desktop app
//! and the headless harness run the same editor with different toolkits.

pub mod headless;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use stlclip_mesh::{clip_mesh, Bounds, MeshIoError, MeshIoResult, Plane, StlFormat, TriMesh};
use thiserror::Error;

use crate::state::session::{Effect, Event, Outcome, Rejection, Session};

pub use headless::{HeadlessToolkit, ToolkitCall};

pub const NO_MESH_LOADED: &str = "No STL file loaded.";
pub const NO_MESH_TO_EXPORT: &str = "No STL file loaded or edited.";
pub const EXPORT_SUCCEEDED: &str = "STL file exported successfully.";
pub const EMPTY_MESH: &str = "The STL file contains no triangles.";
pub const EMPTY_CLIP: &str = "Clip would remove the whole model; keeping the previous result.";

/// Everything the editor needs from the outside world.
pub trait Toolkit {
    fn read_mesh(&mut self, path: &Path) -> MeshIoResult<TriMesh>;

    fn write_mesh(&mut self, mesh: &TriMesh, path: &Path, options: &ExportOptions)
        -> MeshIoResult<()>;

    /// Clip `mesh` by `plane`, keeping the side the normal points into.
    fn clip(&mut self, mesh: &TriMesh, plane: &Plane) -> TriMesh {
        clip_mesh(mesh, plane)
    }

    /// Show the plane widget around `bounds` and return its starting plane.
    fn place_plane_widget(&mut self, bounds: Bounds) -> Plane;

    fn hide_plane_widget(&mut self);

    fn display(&mut self, mesh: Arc<TriMesh>);

    fn reset_camera(&mut self, bounds: Bounds);

    fn pick_open_path(&mut self) -> Option<PathBuf>;

    fn pick_save_path(&mut self, suggested_name: &str) -> Option<PathBuf>;

    /// Blocking warning dialog
    fn warn(&mut self, message: &str);

    /// Blocking information dialog
    fn inform(&mut self, message: &str);

    /// Non-blocking status message
    fn notice(&mut self, _message: &str) {}
}

/// How exported files are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: StlFormat,
    pub solid_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: StlFormat::Ascii,
            solid_name: "stlclip".to_string(),
        }
    }
}

/// Failures of editor operations that go beyond a session rejection.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("cancelled by user")]
    Cancelled,
    #[error(transparent)]
    Io(#[from] MeshIoError),
}

pub type EditorResult = Result<Outcome, EditorError>;

/// Drives a [`Session`] with a [`Toolkit`].
pub struct Editor<T: Toolkit> {
    session: Session,
    toolkit: T,
    pub export: ExportOptions,
    source_path: Option<PathBuf>,
}

impl<T: Toolkit> Editor<T> {
    pub fn new(toolkit: T) -> Self {
        Self {
            session: Session::new(),
            toolkit,
            export: ExportOptions::default(),
            source_path: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }

    /// File the current model was read from
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    // ── Loading ───────────────────────────────────────────────

    /// Ask for a file and load it.
    pub fn load(&mut self) -> EditorResult {
        let path = self.toolkit.pick_open_path().ok_or(EditorError::Cancelled)?;
        self.load_file(&path)
    }

    pub fn load_file(&mut self, path: &Path) -> EditorResult {
        let mesh = match self.toolkit.read_mesh(path) {
            Ok(mesh) => mesh,
            Err(e) => {
                tracing::error!("Failed to load {}: {e}", path.display());
                self.toolkit
                    .warn(&format!("Failed to load {}: {e}", path.display()));
                return Err(e.into());
            }
        };

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());
        let outcome = self.load_mesh(mesh, &name);
        if outcome.is_applied() {
            self.source_path = Some(path.to_path_buf());
        }
        Ok(outcome)
    }

    /// Load an in-memory mesh, replacing the current session.
    pub fn load_mesh(&mut self, mesh: TriMesh, name: &str) -> Outcome {
        let outcome = self.run(Event::Load {
            mesh: Arc::new(mesh),
            name: name.to_string(),
        });
        match outcome.rejection() {
            Some(Rejection::EmptyMesh) => self.toolkit.warn(EMPTY_MESH),
            Some(_) => {}
            None => self.source_path = None,
        }
        outcome
    }

    // ── Clipping ──────────────────────────────────────────────

    /// Clip button: enable when off, disable when on.
    pub fn toggle_clipping(&mut self) -> Outcome {
        if self.session.flags().clip_widget_active {
            self.disable_clipping()
        } else {
            self.enable_clipping()
        }
    }

    pub fn enable_clipping(&mut self) -> Outcome {
        let outcome = self.run(Event::EnableClip);
        if outcome.rejection() == Some(Rejection::NoMeshLoaded) {
            self.toolkit.warn(NO_MESH_LOADED);
        }
        outcome
    }

    pub fn disable_clipping(&mut self) -> Outcome {
        self.run(Event::DisableClip)
    }

    /// Clip the working mesh with `plane` and show the result.
    pub fn move_plane(&mut self, plane: Plane) -> Outcome {
        let derived = if self.session.flags().clip_widget_active {
            self.session
                .working()
                .cloned()
                .map(|working| self.toolkit.clip(&working, &plane))
        } else {
            None
        };

        let outcome = self.run(Event::PlaneMoved {
            plane,
            derived: Arc::new(derived.unwrap_or_default()),
        });
        if outcome.rejection() == Some(Rejection::EmptyClip) {
            self.toolkit.notice(EMPTY_CLIP);
        }
        outcome
    }

    /// Put the plane back where it was placed and re-clip.
    pub fn reset_plane(&mut self) -> Outcome {
        self.run(Event::ResetPlane)
    }

    /// Apply/undo button: undo when the last action was a commit, apply otherwise.
    pub fn apply_or_undo(&mut self) -> Outcome {
        if self.session.can_undo_apply() {
            self.undo_apply()
        } else {
            self.apply()
        }
    }

    pub fn apply(&mut self) -> Outcome {
        let outcome = self.run(Event::Apply);
        if outcome.rejection() == Some(Rejection::NoMeshLoaded) {
            self.toolkit.warn(NO_MESH_LOADED);
        }
        outcome
    }

    pub fn undo_apply(&mut self) -> Outcome {
        self.run(Event::UndoApply)
    }

    // ── Export ────────────────────────────────────────────────

    /// Ask for a target file and write the working mesh to it.
    pub fn export(&mut self) -> EditorResult {
        if !self.session.flags().mesh_loaded {
            self.toolkit.warn(NO_MESH_TO_EXPORT);
            return Ok(Outcome::Rejected(Rejection::NoMeshLoaded));
        }
        let suggested = self.suggested_export_name();
        let path = self
            .toolkit
            .pick_save_path(&suggested)
            .ok_or(EditorError::Cancelled)?;
        self.export_to(&path)
    }

    pub fn export_to(&mut self, path: &Path) -> EditorResult {
        let outcome = self.session.dispatch(Event::Export {
            path: path.to_path_buf(),
        });
        if outcome.rejection() == Some(Rejection::NoMeshLoaded) {
            self.toolkit.warn(NO_MESH_TO_EXPORT);
            return Ok(outcome);
        }

        if let Err(e) = self.perform(outcome.effects()) {
            tracing::error!("Failed to export {}: {e}", path.display());
            self.toolkit
                .warn(&format!("Failed to export {}: {e}", path.display()));
            return Err(e.into());
        }

        tracing::info!(path = %path.display(), format = ?self.export.format, "exported");
        self.toolkit.inform(EXPORT_SUCCEEDED);
        Ok(outcome)
    }

    /// `<model>_clipped.stl`, or `<model>.stl` when nothing was applied.
    pub fn suggested_export_name(&self) -> String {
        let name = match self.session.source_name() {
            "" => "model",
            name => name,
        };
        if self.session.flags().clip_committed {
            format!("{name}_clipped.stl")
        } else {
            format!("{name}.stl")
        }
    }

    // ── Effects ───────────────────────────────────────────────

    fn run(&mut self, event: Event) -> Outcome {
        let outcome = self.session.dispatch(event);

        match self.perform(outcome.effects()) {
            Ok(Some(plane)) => {
                // A freshly placed widget clips right away.
                let _ = self.move_plane(plane);
            }
            Ok(None) => {}
            Err(e) => tracing::error!("toolkit effect failed: {e}"),
        }
        outcome
    }

    /// Carry out `effects`. Returns the plane of a newly placed widget.
    fn perform(&mut self, effects: &[Effect]) -> MeshIoResult<Option<Plane>> {
        let mut placed = None;
        for effect in effects {
            match effect {
                Effect::PlacePlaneWidget { bounds } => {
                    placed = Some(self.toolkit.place_plane_widget(*bounds));
                }
                Effect::HidePlaneWidget => self.toolkit.hide_plane_widget(),
                Effect::Display(mesh) => self.toolkit.display(Arc::clone(mesh)),
                Effect::ResetCamera(bounds) => self.toolkit.reset_camera(*bounds),
                Effect::WriteMesh { mesh, path } => {
                    self.toolkit.write_mesh(mesh, path, &self.export)?;
                }
            }
        }
        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::session::SessionState;
    use stlclip_mesh::primitives;

    fn editor() -> Editor<HeadlessToolkit> {
        Editor::new(HeadlessToolkit::default())
    }

    fn loaded() -> Editor<HeadlessToolkit> {
        let mut e = editor();
        let _ = e.load_mesh(primitives::cube(2.0), "cube");
        e
    }

    #[test]
    fn test_enable_without_mesh_warns() {
        let mut e = editor();
        let outcome = e.enable_clipping();
        assert_eq!(outcome.rejection(), Some(Rejection::NoMeshLoaded));
        assert_eq!(e.toolkit().warnings, vec![NO_MESH_LOADED.to_string()]);
        assert_eq!(e.session().state(), SessionState::Empty);
    }

    #[test]
    fn test_enable_places_widget_and_clips() {
        let mut e = loaded();
        let outcome = e.enable_clipping();
        assert!(outcome.is_applied());
        assert!(e.toolkit().widget.is_visible());

        // Default plane through the center along +X keeps half the cube.
        let derived = e.session().derived().unwrap();
        let b = derived.bounds().unwrap();
        assert!(b.min.x.abs() < 1e-5);
        assert!(Arc::ptr_eq(e.toolkit().displayed.as_ref().unwrap(), derived));
    }

    #[test]
    fn test_toggle_twice_restores_original() {
        let mut e = loaded();
        let _ = e.toggle_clipping();
        let _ = e.toggle_clipping();
        assert_eq!(e.session().state(), SessionState::Loaded);
        assert!(!e.toolkit().widget.is_visible());
        assert!(Arc::ptr_eq(
            e.toolkit().displayed.as_ref().unwrap(),
            e.session().original().unwrap()
        ));
    }

    #[test]
    fn test_empty_clip_posts_notice() {
        let mut e = loaded();
        let _ = e.enable_clipping();
        let before = Arc::clone(e.session().derived().unwrap());

        let plane = Plane::new(glam::Vec3::new(50.0, 0.0, 0.0), glam::Vec3::X);
        let outcome = e.move_plane(plane);
        assert_eq!(outcome.rejection(), Some(Rejection::EmptyClip));
        assert_eq!(e.toolkit().notices, vec![EMPTY_CLIP.to_string()]);
        assert!(Arc::ptr_eq(e.session().derived().unwrap(), &before));
        assert!(e.toolkit().warnings.is_empty());
    }

    #[test]
    fn test_apply_or_undo_follows_state() {
        let mut e = loaded();
        let _ = e.enable_clipping();
        let _ = e.apply_or_undo();
        assert_eq!(e.session().state(), SessionState::Committed);

        let _ = e.apply_or_undo();
        assert_eq!(e.session().state(), SessionState::Loaded);
    }

    #[test]
    fn test_apply_without_mesh_warns() {
        let mut e = editor();
        let _ = e.apply();
        assert_eq!(e.toolkit().warnings, vec![NO_MESH_LOADED.to_string()]);
    }

    #[test]
    fn test_reset_plane_reclips_from_placement() {
        let mut e = loaded();
        let _ = e.enable_clipping();
        let first = e.session().derived().unwrap().as_ref().clone();

        let _ = e.move_plane(Plane::new(glam::Vec3::new(0.7, 0.0, 0.0), glam::Vec3::X));
        assert_ne!(e.session().derived().unwrap().as_ref(), &first);

        let _ = e.reset_plane();
        assert_eq!(e.session().derived().unwrap().as_ref(), &first);
    }

    #[test]
    fn test_export_without_mesh_warns_and_skips_dialog() {
        let mut e = editor();
        let outcome = e.export().unwrap();
        assert_eq!(outcome.rejection(), Some(Rejection::NoMeshLoaded));
        assert_eq!(e.toolkit().warnings, vec![NO_MESH_TO_EXPORT.to_string()]);
        assert!(!e.toolkit().calls.contains(&ToolkitCall::PickSavePath));
    }

    #[test]
    fn test_export_cancelled() {
        let mut e = loaded();
        assert!(matches!(e.export(), Err(EditorError::Cancelled)));
        assert!(e.toolkit().infos.is_empty());
    }

    #[test]
    fn test_load_cancelled() {
        let mut e = editor();
        assert!(matches!(e.load(), Err(EditorError::Cancelled)));
        assert_eq!(e.session().state(), SessionState::Empty);
    }

    #[test]
    fn test_load_missing_file_warns() {
        let mut e = loaded();
        let result = e.load_file(Path::new("/no/such/file.stl"));
        assert!(matches!(result, Err(EditorError::Io(MeshIoError::FileNotFound { .. }))));
        assert_eq!(e.toolkit().warnings.len(), 1);
        assert_eq!(e.session().state(), SessionState::Loaded);
        assert_eq!(e.session().source_name(), "cube");
    }

    #[test]
    fn test_load_empty_mesh_warns() {
        let mut e = editor();
        let _ = e.load_mesh(TriMesh::default(), "nothing");
        assert_eq!(e.toolkit().warnings, vec![EMPTY_MESH.to_string()]);
    }

    #[test]
    fn test_suggested_export_name() {
        let mut e = loaded();
        assert_eq!(e.suggested_export_name(), "cube.stl");
        let _ = e.enable_clipping();
        let _ = e.apply();
        assert_eq!(e.suggested_export_name(), "cube_clipped.stl");
        assert_eq!(editor().suggested_export_name(), "model.stl");
    }
}

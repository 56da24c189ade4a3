//! Editing session: which mesh is loaded, whether the clipping plane is
//! active, and which clips have been committed.
//!
//! The session is a pure state machine. [`Session::dispatch`] takes an
//! [`Event`], updates the state and answers with the [`Effect`]s the
//! toolkit has to carry out (show/hide the plane widget, display a mesh,
//! write a file). It never touches files, widgets or the renderer itself, so
//! every transition can be checked without a window.

mod controls;
mod history;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use stlclip_mesh::{Bounds, Plane, TriMesh};
use thiserror::Error;

pub use controls::{ApplyAction, ClipToggle, ControlStates};

/// Coarse state derived from the session flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Nothing loaded yet
    Empty,
    /// A mesh is shown, no plane, nothing committed
    Loaded,
    /// The plane widget is on and previews clip results
    Clipping,
    /// At least one clip has been applied, plane widget off
    Committed,
}

/// The three booleans the controls are derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionFlags {
    pub mesh_loaded: bool,
    pub clip_widget_active: bool,
    pub clip_committed: bool,
}

/// Input to the state machine.
#[derive(Debug, Clone)]
pub enum Event {
    /// A new mesh replaces whatever was loaded
    Load { mesh: Arc<TriMesh>, name: String },
    EnableClip,
    /// The plane widget moved; `derived` is the working mesh clipped by `plane`
    PlaneMoved { plane: Plane, derived: Arc<TriMesh> },
    DisableClip,
    /// Commit the current preview
    Apply,
    /// Drop the most recent commit
    UndoApply,
    /// Put the plane back to its initial placement
    ResetPlane,
    /// Write the working mesh to `path`
    Export { path: PathBuf },
}

/// Work the toolkit must perform after an accepted transition.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Show the plane widget around `bounds`; the toolkit answers with the placed plane
    PlacePlaneWidget { bounds: Bounds },
    HidePlaneWidget,
    Display(Arc<TriMesh>),
    ResetCamera(Bounds),
    WriteMesh { mesh: Arc<TriMesh>, path: PathBuf },
}

/// Why an event was refused. The session is unchanged after a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no mesh loaded")]
    NoMeshLoaded,
    #[error("mesh has no triangles")]
    EmptyMesh,
    #[error("clipping is not active")]
    ClippingInactive,
    #[error("clipping is already active")]
    ClippingActive,
    #[error("clip would remove the whole mesh")]
    EmptyClip,
    #[error("no clip result to apply")]
    NoClipResult,
    #[error("nothing has been applied")]
    NothingCommitted,
}

/// Result of [`Session::dispatch`]
#[derive(Debug, Clone)]
#[must_use]
pub enum Outcome {
    Applied(Vec<Effect>),
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Outcome::Rejected(r) => Some(*r),
            Outcome::Applied(_) => None,
        }
    }

    pub fn effects(&self) -> &[Effect] {
        match self {
            Outcome::Applied(effects) => effects,
            Outcome::Rejected(_) => &[],
        }
    }
}

/// Session state machine
#[derive(Debug, Default)]
pub struct Session {
    original: Option<Arc<TriMesh>>,
    source_name: String,
    /// Applied clips, oldest first. The last one is the working mesh.
    commits: Vec<Arc<TriMesh>>,
    /// Last accepted (non-empty) clip preview while the widget is active
    derived: Option<Arc<TriMesh>>,
    plane: Option<Plane>,
    clip_widget_active: bool,
    /// Bumped on every accepted transition
    version: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flags(&self) -> SessionFlags {
        SessionFlags {
            mesh_loaded: self.original.is_some(),
            clip_widget_active: self.clip_widget_active,
            clip_committed: !self.commits.is_empty(),
        }
    }

    pub fn state(&self) -> SessionState {
        let flags = self.flags();
        if !flags.mesh_loaded {
            SessionState::Empty
        } else if flags.clip_widget_active {
            SessionState::Clipping
        } else if flags.clip_committed {
            SessionState::Committed
        } else {
            SessionState::Loaded
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Name of the loaded model (file stem or primitive name)
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn original(&self) -> Option<&Arc<TriMesh>> {
        self.original.as_ref()
    }

    /// Mesh that clips start from and exports write: last commit or the original.
    pub fn working(&self) -> Option<&Arc<TriMesh>> {
        self.commits.last().or(self.original.as_ref())
    }

    /// Last accepted clip preview, only while clipping.
    pub fn derived(&self) -> Option<&Arc<TriMesh>> {
        self.derived.as_ref()
    }

    /// Mesh currently on screen.
    pub fn displayed(&self) -> Option<&Arc<TriMesh>> {
        if self.clip_widget_active {
            self.derived.as_ref().or_else(|| self.working())
        } else {
            self.working()
        }
    }

    /// Plane that produced the current preview
    pub fn plane(&self) -> Option<Plane> {
        self.plane
    }

    pub fn controls(&self) -> ControlStates {
        ControlStates::for_session(self)
    }

    /// Feed one event through the state machine.
    pub fn dispatch(&mut self, event: Event) -> Outcome {
        let result = match event {
            Event::Load { mesh, name } => self.on_load(mesh, name),
            Event::EnableClip => self.on_enable_clip(),
            Event::PlaneMoved { plane, derived } => self.on_plane_moved(plane, derived),
            Event::DisableClip => self.on_disable_clip(),
            Event::Apply => self.on_apply(),
            Event::UndoApply => self.on_undo_apply(),
            Event::ResetPlane => self.on_reset_plane(),
            Event::Export { path } => self.on_export(path),
        };

        match result {
            Ok(effects) => Outcome::Applied(effects),
            Err(rejection) => {
                tracing::debug!(%rejection, state = ?self.state(), "event rejected");
                Outcome::Rejected(rejection)
            }
        }
    }

    fn on_load(&mut self, mesh: Arc<TriMesh>, name: String) -> Result<Vec<Effect>, Rejection> {
        let bounds = mesh.bounds().filter(|_| !mesh.is_empty()).ok_or(Rejection::EmptyMesh)?;

        tracing::info!(
            name = %name,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "mesh loaded"
        );
        self.original = Some(Arc::clone(&mesh));
        self.source_name = name;
        self.commits.clear();
        self.derived = None;
        self.plane = None;
        self.clip_widget_active = false;
        self.version += 1;

        Ok(vec![
            Effect::HidePlaneWidget,
            Effect::Display(mesh),
            Effect::ResetCamera(bounds),
        ])
    }

    fn on_enable_clip(&mut self) -> Result<Vec<Effect>, Rejection> {
        let bounds = self.working_bounds()?;
        if self.clip_widget_active {
            return Err(Rejection::ClippingActive);
        }

        self.clip_widget_active = true;
        self.derived = None;
        self.plane = None;
        self.version += 1;

        Ok(vec![Effect::PlacePlaneWidget { bounds }])
    }

    fn on_plane_moved(
        &mut self,
        plane: Plane,
        derived: Arc<TriMesh>,
    ) -> Result<Vec<Effect>, Rejection> {
        if !self.clip_widget_active {
            return Err(Rejection::ClippingInactive);
        }
        if derived.is_empty() {
            return Err(Rejection::EmptyClip);
        }

        self.plane = Some(plane);
        self.derived = Some(Arc::clone(&derived));
        self.version += 1;

        Ok(vec![Effect::Display(derived)])
    }

    fn on_disable_clip(&mut self) -> Result<Vec<Effect>, Rejection> {
        if !self.clip_widget_active {
            return Err(Rejection::ClippingInactive);
        }

        self.clip_widget_active = false;
        self.derived = None;
        self.plane = None;
        self.version += 1;

        let mut effects = vec![Effect::HidePlaneWidget];
        effects.extend(self.working().cloned().map(Effect::Display));
        Ok(effects)
    }

    fn on_reset_plane(&mut self) -> Result<Vec<Effect>, Rejection> {
        if !self.clip_widget_active {
            return Err(Rejection::ClippingInactive);
        }
        let bounds = self.working_bounds()?;

        self.derived = None;
        self.plane = None;
        self.version += 1;

        Ok(vec![Effect::PlacePlaneWidget { bounds }])
    }

    fn on_export(&mut self, path: PathBuf) -> Result<Vec<Effect>, Rejection> {
        let mesh = self.working().cloned().ok_or(Rejection::NoMeshLoaded)?;
        Ok(vec![Effect::WriteMesh { mesh, path }])
    }

    fn working_bounds(&self) -> Result<Bounds, Rejection> {
        self.working()
            .ok_or(Rejection::NoMeshLoaded)?
            .bounds()
            .ok_or(Rejection::EmptyMesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use stlclip_mesh::{clip_mesh, primitives, Axis};

    fn cube() -> Arc<TriMesh> {
        Arc::new(primitives::cube(2.0))
    }

    fn loaded() -> Session {
        let mut s = Session::new();
        let _ = s.dispatch(Event::Load {
            mesh: cube(),
            name: "cube".into(),
        });
        s
    }

    fn moved(s: &Session, x: f32) -> Event {
        let plane = Plane::from_axis(Vec3::new(x, 0.0, 0.0), Axis::X);
        let derived = Arc::new(clip_mesh(s.working().unwrap(), &plane));
        Event::PlaneMoved { plane, derived }
    }

    #[test]
    fn test_starts_empty() {
        let s = Session::new();
        assert_eq!(s.state(), SessionState::Empty);
        assert_eq!(s.flags(), SessionFlags::default());
        assert!(s.working().is_none());
    }

    #[test]
    fn test_load_resets_flags() {
        let s = loaded();
        assert_eq!(
            s.flags(),
            SessionFlags {
                mesh_loaded: true,
                clip_widget_active: false,
                clip_committed: false,
            }
        );
        assert_eq!(s.state(), SessionState::Loaded);
        assert_eq!(s.source_name(), "cube");
    }

    #[test]
    fn test_load_effects() {
        let mut s = Session::new();
        let outcome = s.dispatch(Event::Load {
            mesh: cube(),
            name: "cube".into(),
        });
        let effects = outcome.effects();
        assert!(matches!(effects[0], Effect::HidePlaneWidget));
        assert!(matches!(effects[1], Effect::Display(_)));
        assert!(matches!(effects[2], Effect::ResetCamera(_)));
    }

    #[test]
    fn test_load_empty_mesh_is_rejected() {
        let mut s = Session::new();
        let outcome = s.dispatch(Event::Load {
            mesh: Arc::new(TriMesh::default()),
            name: "empty".into(),
        });
        assert_eq!(outcome.rejection(), Some(Rejection::EmptyMesh));
        assert_eq!(s.state(), SessionState::Empty);
    }

    #[test]
    fn test_enable_without_mesh() {
        let mut s = Session::new();
        let outcome = s.dispatch(Event::EnableClip);
        assert_eq!(outcome.rejection(), Some(Rejection::NoMeshLoaded));
        assert_eq!(s.flags(), SessionFlags::default());
        assert_eq!(s.version(), 0);
    }

    #[test]
    fn test_enable_places_widget_at_working_bounds() {
        let mut s = loaded();
        let outcome = s.dispatch(Event::EnableClip);
        match outcome.effects() {
            [Effect::PlacePlaneWidget { bounds }] => {
                assert_eq!(*bounds, s.working().unwrap().bounds().unwrap());
            }
            other => panic!("unexpected effects {other:?}"),
        }
        assert_eq!(s.state(), SessionState::Clipping);
        assert!(s.derived().is_none());
    }

    #[test]
    fn test_enable_twice_is_rejected() {
        let mut s = loaded();
        let _ = s.dispatch(Event::EnableClip);
        let v = s.version();
        let outcome = s.dispatch(Event::EnableClip);
        assert_eq!(outcome.rejection(), Some(Rejection::ClippingActive));
        assert_eq!(s.version(), v);
    }

    #[test]
    fn test_plane_moved_updates_derived() {
        let mut s = loaded();
        let _ = s.dispatch(Event::EnableClip);
        let event = moved(&s, 0.0);
        let outcome = s.dispatch(event);
        assert!(matches!(outcome.effects(), [Effect::Display(_)]));
        let derived = s.derived().unwrap();
        assert!(derived.face_count() > 0);
        assert!(Arc::ptr_eq(s.displayed().unwrap(), derived));
        assert_eq!(s.plane().unwrap().origin, Vec3::ZERO);
    }

    #[test]
    fn test_plane_moved_while_inactive() {
        let mut s = loaded();
        let event = moved(&s, 0.0);
        let outcome = s.dispatch(event);
        assert_eq!(outcome.rejection(), Some(Rejection::ClippingInactive));
        assert!(s.derived().is_none());
    }

    #[test]
    fn test_empty_clip_keeps_previous_derived() {
        let mut s = loaded();
        let _ = s.dispatch(Event::EnableClip);
        let event = moved(&s, 0.5);
        let _ = s.dispatch(event);
        let before = Arc::clone(s.derived().unwrap());
        let version = s.version();

        let event = moved(&s, 10.0);
        let outcome = s.dispatch(event);
        assert_eq!(outcome.rejection(), Some(Rejection::EmptyClip));
        assert!(outcome.effects().is_empty());
        assert!(Arc::ptr_eq(s.derived().unwrap(), &before));
        assert_eq!(s.version(), version);
    }

    #[test]
    fn test_disable_returns_to_loaded() {
        let mut s = loaded();
        let _ = s.dispatch(Event::EnableClip);
        let event = moved(&s, 0.0);
        let _ = s.dispatch(event);

        let outcome = s.dispatch(Event::DisableClip);
        assert!(matches!(
            outcome.effects(),
            [Effect::HidePlaneWidget, Effect::Display(_)]
        ));
        assert_eq!(s.state(), SessionState::Loaded);
        assert!(s.derived().is_none());
        assert!(Arc::ptr_eq(s.displayed().unwrap(), s.original().unwrap()));
    }

    #[test]
    fn test_disable_while_inactive() {
        let mut s = loaded();
        let outcome = s.dispatch(Event::DisableClip);
        assert_eq!(outcome.rejection(), Some(Rejection::ClippingInactive));
    }

    #[test]
    fn test_reset_plane_clears_preview() {
        let mut s = loaded();
        let _ = s.dispatch(Event::EnableClip);
        let event = moved(&s, 0.3);
        let _ = s.dispatch(event);

        let outcome = s.dispatch(Event::ResetPlane);
        assert!(matches!(outcome.effects(), [Effect::PlacePlaneWidget { .. }]));
        assert!(s.derived().is_none());
        assert_eq!(s.state(), SessionState::Clipping);
    }

    #[test]
    fn test_export_without_mesh() {
        let mut s = Session::new();
        let outcome = s.dispatch(Event::Export {
            path: PathBuf::from("out.stl"),
        });
        assert_eq!(outcome.rejection(), Some(Rejection::NoMeshLoaded));
    }

    #[test]
    fn test_export_writes_working_mesh_not_preview() {
        let mut s = loaded();
        let _ = s.dispatch(Event::EnableClip);
        let event = moved(&s, 0.0);
        let _ = s.dispatch(event);

        let outcome = s.dispatch(Event::Export {
            path: PathBuf::from("out.stl"),
        });
        match outcome.effects() {
            [Effect::WriteMesh { mesh, path }] => {
                assert!(Arc::ptr_eq(mesh, s.original().unwrap()));
                assert_eq!(path, &PathBuf::from("out.stl"));
            }
            other => panic!("unexpected effects {other:?}"),
        }
        assert_eq!(s.state(), SessionState::Clipping);
    }

    #[test]
    fn test_reload_discards_commits() {
        let mut s = loaded();
        let _ = s.dispatch(Event::EnableClip);
        let event = moved(&s, 0.0);
        let _ = s.dispatch(event);
        let _ = s.dispatch(Event::Apply);
        assert_eq!(s.state(), SessionState::Committed);

        let _ = s.dispatch(Event::Load {
            mesh: cube(),
            name: "again".into(),
        });
        assert_eq!(s.state(), SessionState::Loaded);
        assert!(!s.flags().clip_committed);
    }
}

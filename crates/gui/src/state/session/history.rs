//! Applying and undoing clips

use super::{Effect, Rejection, Session};

impl Session {
    /// Commit the current preview as the new working mesh.
    pub(super) fn on_apply(&mut self) -> Result<Vec<Effect>, Rejection> {
        if self.original.is_none() {
            return Err(Rejection::NoMeshLoaded);
        }
        if !self.clip_widget_active {
            return Err(Rejection::ClippingInactive);
        }
        let derived = self.derived.take().ok_or(Rejection::NoClipResult)?;

        self.commits.push(derived.clone());
        self.clip_widget_active = false;
        self.plane = None;
        self.version += 1;
        tracing::info!(
            faces = derived.face_count(),
            commits = self.commits.len(),
            "clip applied"
        );

        Ok(vec![Effect::HidePlaneWidget, Effect::Display(derived)])
    }

    /// Drop the most recent commit, going back to the mesh before it.
    pub(super) fn on_undo_apply(&mut self) -> Result<Vec<Effect>, Rejection> {
        if self.original.is_none() {
            return Err(Rejection::NoMeshLoaded);
        }
        if self.clip_widget_active {
            return Err(Rejection::ClippingActive);
        }
        self.commits.pop().ok_or(Rejection::NothingCommitted)?;
        self.version += 1;
        tracing::info!(commits = self.commits.len(), "clip undone");

        Ok(self.working().cloned().map(Effect::Display).into_iter().collect())
    }

    /// Number of applied clips
    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }

    pub fn can_undo_apply(&self) -> bool {
        !self.clip_widget_active && !self.commits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec3;
    use stlclip_mesh::{clip_mesh, primitives, Axis, Plane};

    use super::super::{Event, SessionState};
    use super::*;

    fn clip_at(s: &mut Session, x: f32) {
        let plane = Plane::from_axis(Vec3::new(x, 0.0, 0.0), Axis::X);
        let derived = Arc::new(clip_mesh(s.working().unwrap(), &plane));
        let _ = s.dispatch(Event::PlaneMoved { plane, derived });
    }

    fn loaded() -> Session {
        let mut s = Session::new();
        let _ = s.dispatch(Event::Load {
            mesh: Arc::new(primitives::cube(2.0)),
            name: "cube".into(),
        });
        s
    }

    #[test]
    fn test_apply_commits_last_derived() {
        let mut s = loaded();
        let _ = s.dispatch(Event::EnableClip);
        clip_at(&mut s, 0.0);
        clip_at(&mut s, 0.5);
        let preview = Arc::clone(s.derived().unwrap());

        let outcome = s.dispatch(Event::Apply);
        assert!(outcome.is_applied());
        assert_eq!(s.state(), SessionState::Committed);
        assert!(Arc::ptr_eq(s.working().unwrap(), &preview));
        assert!(s.derived().is_none());
        assert_eq!(s.commit_count(), 1);
    }

    #[test]
    fn test_apply_after_rejected_move_uses_last_accepted() {
        let mut s = loaded();
        let _ = s.dispatch(Event::EnableClip);
        clip_at(&mut s, 0.25);
        let accepted = Arc::clone(s.derived().unwrap());
        clip_at(&mut s, 50.0);

        let _ = s.dispatch(Event::Apply);
        assert!(Arc::ptr_eq(s.working().unwrap(), &accepted));
    }

    #[test]
    fn test_apply_without_preview() {
        let mut s = loaded();
        let _ = s.dispatch(Event::EnableClip);
        let outcome = s.dispatch(Event::Apply);
        assert_eq!(outcome.rejection(), Some(Rejection::NoClipResult));
        assert_eq!(s.state(), SessionState::Clipping);
    }

    #[test]
    fn test_apply_while_not_clipping() {
        let mut s = loaded();
        assert_eq!(
            s.dispatch(Event::Apply).rejection(),
            Some(Rejection::ClippingInactive)
        );
        assert_eq!(
            Session::new().dispatch(Event::Apply).rejection(),
            Some(Rejection::NoMeshLoaded)
        );
    }

    #[test]
    fn test_reenable_starts_from_committed_mesh() {
        let mut s = loaded();
        let _ = s.dispatch(Event::EnableClip);
        clip_at(&mut s, 0.0);
        let _ = s.dispatch(Event::Apply);
        let committed_bounds = s.working().unwrap().bounds().unwrap();

        let outcome = s.dispatch(Event::EnableClip);
        match outcome.effects() {
            [Effect::PlacePlaneWidget { bounds }] => assert_eq!(*bounds, committed_bounds),
            other => panic!("unexpected effects {other:?}"),
        }
        assert!(s.derived().is_none());
    }

    #[test]
    fn test_undo_restores_previous_working_mesh() {
        let mut s = loaded();
        let original = Arc::clone(s.original().unwrap());

        let _ = s.dispatch(Event::EnableClip);
        clip_at(&mut s, 0.0);
        let _ = s.dispatch(Event::Apply);
        let first = Arc::clone(s.working().unwrap());

        let _ = s.dispatch(Event::EnableClip);
        clip_at(&mut s, 0.5);
        let _ = s.dispatch(Event::Apply);
        assert_eq!(s.commit_count(), 2);

        let _ = s.dispatch(Event::UndoApply);
        assert!(Arc::ptr_eq(s.working().unwrap(), &first));
        assert_eq!(s.state(), SessionState::Committed);

        let outcome = s.dispatch(Event::UndoApply);
        assert!(matches!(outcome.effects(), [Effect::Display(m)] if Arc::ptr_eq(m, &original)));
        assert_eq!(s.state(), SessionState::Loaded);

        assert_eq!(
            s.dispatch(Event::UndoApply).rejection(),
            Some(Rejection::NothingCommitted)
        );
    }

    #[test]
    fn test_undo_while_clipping_is_rejected() {
        let mut s = loaded();
        let _ = s.dispatch(Event::EnableClip);
        clip_at(&mut s, 0.0);
        let _ = s.dispatch(Event::Apply);
        let _ = s.dispatch(Event::EnableClip);

        assert!(!s.can_undo_apply());
        assert_eq!(
            s.dispatch(Event::UndoApply).rejection(),
            Some(Rejection::ClippingActive)
        );
        assert_eq!(s.commit_count(), 1);
    }
}

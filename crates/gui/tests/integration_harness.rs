//! Integration tests for the clip session, driven through TestHarness.
//!
//! Each test runs the editor over the headless toolkit and checks the
//! session flags, meshes and user messages that result.

use std::sync::Arc;

use stlclip_gui_lib::adapter::{NO_MESH_LOADED, NO_MESH_TO_EXPORT};
use stlclip_gui_lib::fixtures::{self, Shape};
use stlclip_gui_lib::harness::TestHarness;
use stlclip_gui_lib::state::session::{ApplyAction, ClipToggle, SessionFlags};
use stlclip_gui_lib::state::SessionState;

fn cleared() -> SessionFlags {
    SessionFlags {
        mesh_loaded: true,
        clip_widget_active: false,
        clip_committed: false,
    }
}

#[test]
fn test_load_resets_flags_from_every_state() {
    // Loaded
    let mut h = TestHarness::new();
    h.load_shape(Shape::Cube, 2.0);
    h.load_shape(Shape::Sphere, 2.0);
    assert_eq!(h.flags(), cleared());

    // Clipping
    let _ = h.enable_clip();
    assert!(h.flags().clip_widget_active);
    h.load_shape(Shape::Cube, 2.0);
    assert_eq!(h.flags(), cleared());
    assert!(h.derived_mesh().is_none());

    // Committed
    let _ = h.enable_clip();
    assert!(h.apply().is_applied());
    assert!(h.flags().clip_committed);
    h.load_shape(Shape::Cube, 2.0);
    assert_eq!(h.flags(), cleared());
    assert_eq!(h.commit_count(), 0);
    assert_eq!(h.working_mesh().unwrap().face_count(), 12);
}

#[test]
fn test_empty_clip_keeps_working_and_preview() {
    let mut h = TestHarness::new();
    h.load_shape(Shape::Cube, 2.0);
    let _ = h.enable_clip();

    let working_before = Arc::clone(h.working_mesh().unwrap());
    let derived_before = Arc::clone(h.derived_mesh().unwrap());
    let plane_before = h.plane();

    // Everything lies behind this plane (clamped to the widget volume).
    let outcome = h.move_plane(fixtures::plane_x(40.0));
    assert!(!outcome.is_applied());

    assert!(Arc::ptr_eq(h.working_mesh().unwrap(), &working_before));
    assert!(Arc::ptr_eq(h.derived_mesh().unwrap(), &derived_before));
    assert_eq!(h.plane(), plane_before);
    assert_eq!(h.state(), SessionState::Clipping);
    assert_eq!(h.notices().len(), 1);

    // Rejecting twice changes nothing either
    let _ = h.move_plane(fixtures::plane_x(40.0));
    assert!(Arc::ptr_eq(h.working_mesh().unwrap(), &working_before));
}

#[test]
fn test_apply_commits_last_accepted_preview() {
    let mut h = TestHarness::new();
    h.load_shape(Shape::Cube, 2.0);
    let _ = h.enable_clip();

    assert!(h.move_plane(fixtures::plane_x(0.25)).is_applied());
    let accepted = Arc::clone(h.derived_mesh().unwrap());
    // Rejected: should not replace the accepted preview
    let _ = h.move_plane(fixtures::plane_x(40.0));

    assert!(h.apply().is_applied());
    assert_eq!(h.state(), SessionState::Committed);
    assert!(Arc::ptr_eq(h.working_mesh().unwrap(), &accepted));
    assert!(Arc::ptr_eq(h.displayed_mesh().unwrap(), &accepted));

    let v = h.validate_working().unwrap();
    assert!(v.validate_all().is_empty(), "{:?}", v.validate_all());
    assert!(v.assert_dimensions_approx([0.75, 2.0, 2.0], 1e-4));
}

#[test]
fn test_reenable_starts_from_committed_mesh() {
    let mut h = TestHarness::new();
    h.load_shape(Shape::Cube, 2.0);

    let _ = h.enable_clip();
    let _ = h.apply();
    let committed = Arc::clone(h.working_mesh().unwrap());

    // Move to a different preview, then abandon it
    let _ = h.enable_clip();
    let _ = h.move_plane(fixtures::plane_x(0.5));
    assert!(h.disable_clip().is_applied());
    assert_eq!(h.state(), SessionState::Committed);
    assert!(Arc::ptr_eq(h.displayed_mesh().unwrap(), &committed));

    let _ = h.enable_clip();
    let bounds = h.derived_mesh().unwrap().bounds().unwrap();
    let committed_bounds = committed.bounds().unwrap();
    // The new widget is centered on the committed half, not the original cube
    assert!((h.plane().unwrap().origin.x - committed_bounds.center().x).abs() < 1e-5);
    assert!(bounds.min.x >= committed_bounds.min.x - 1e-5);
}

#[test]
fn test_reenable_without_commit_starts_from_original() {
    let mut h = TestHarness::new();
    h.load_shape(Shape::Cube, 2.0);
    let _ = h.enable_clip();
    let _ = h.push_plane(0.5);
    let _ = h.disable_clip();

    assert_eq!(h.state(), SessionState::Loaded);
    assert_eq!(h.displayed_mesh().unwrap().face_count(), 12);

    let _ = h.enable_clip();
    assert_eq!(h.plane().unwrap().origin, glam::Vec3::ZERO);
}

#[test]
fn test_no_mesh_loaded_warnings() {
    let mut h = TestHarness::new();

    assert!(!h.enable_clip().is_applied());
    assert_eq!(h.state(), SessionState::Empty);
    assert_eq!(h.warnings(), [NO_MESH_LOADED]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.stl");
    assert!(h.export(&path).is_err());
    assert!(!path.exists());
    assert_eq!(h.warnings(), [NO_MESH_LOADED, NO_MESH_TO_EXPORT]);

    assert_eq!(h.flags(), SessionFlags::default());
    assert!(h.working_mesh().is_none());
}

#[test]
fn test_undo_apply_chain() {
    let mut h = TestHarness::new();
    h.load_shape(Shape::Cube, 2.0);

    let _ = h.enable_clip();
    let _ = h.apply();
    let _ = h.enable_clip();
    let _ = h.move_plane(fixtures::plane_y(0.0));
    let _ = h.apply();
    assert_eq!(h.commit_count(), 2);

    // Undo is refused while clipping
    let _ = h.enable_clip();
    assert!(!h.undo().is_applied());
    let _ = h.disable_clip();

    assert!(h.undo().is_applied());
    assert_eq!(h.commit_count(), 1);
    assert_eq!(h.state(), SessionState::Committed);

    assert!(h.undo().is_applied());
    assert_eq!(h.state(), SessionState::Loaded);
    assert_eq!(h.working_mesh().unwrap().face_count(), 12);

    assert!(!h.undo().is_applied());
}

#[test]
fn test_controls_follow_state() {
    let mut h = TestHarness::new();
    let c = h.controls();
    assert!(c.load_enabled);
    assert!(!c.apply_enabled);
    assert!(!c.reset_plane_enabled);

    h.load_shape(Shape::Cube, 2.0);
    let _ = h.toggle_clip();
    let c = h.controls();
    assert_eq!(c.clip_toggle, ClipToggle::Disable);
    assert_eq!(c.apply, ApplyAction::Apply);
    assert!(c.apply_enabled);
    assert!(c.reset_plane_enabled);

    let _ = h.apply();
    let c = h.controls();
    assert_eq!(c.clip_toggle, ClipToggle::Enable);
    assert_eq!(c.apply, ApplyAction::Undo);
    assert!(c.apply_enabled);
    assert!(!c.reset_plane_enabled);
}

#[test]
fn test_reset_plane_restores_placement() {
    let mut h = TestHarness::new();
    h.load_shape(Shape::Sphere, 2.0);
    let _ = h.enable_clip();
    let placed = h.plane().unwrap();
    let faces = h.derived_mesh().unwrap().face_count();

    let _ = h.move_plane(fixtures::plane_z(0.3));
    assert_ne!(h.plane().unwrap(), placed);

    assert!(h.reset_plane().is_applied());
    assert_eq!(h.plane().unwrap(), placed);
    assert_eq!(h.derived_mesh().unwrap().face_count(), faces);
}

#[test]
fn test_clipped_sphere_is_valid() {
    let mut h = TestHarness::new();
    h.load_shape(Shape::Sphere, 2.0);
    let _ = h.enable_clip();
    let _ = h.move_plane(fixtures::plane_y(-0.3));

    let v = h.validate_derived().unwrap();
    assert!(v.validate_all().is_empty(), "{:?}", v.validate_all());
    assert!(v.is_on_kept_side(&fixtures::plane_y(-0.3), 1e-4));
}

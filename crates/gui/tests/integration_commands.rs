//! Integration tests for the AgentCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use stlclip_gui_lib::command::{execute_json, execute_json_batch};
use stlclip_gui_lib::harness::TestHarness;
use stlclip_gui_lib::state::SessionState;

#[test]
fn test_command_load_primitive() {
    let mut h = TestHarness::new();

    let resp = execute_json(&mut h, r#"{"command": "load_primitive", "shape": "cube", "size": 2.0}"#)
        .unwrap();
    assert!(resp.success);
    assert_eq!(h.state(), SessionState::Loaded);
    assert_eq!(h.working_mesh().unwrap().face_count(), 12);
}

#[test]
fn test_command_load_primitive_invalid_size() {
    let mut h = TestHarness::new();

    let resp = execute_json(&mut h, r#"{"command": "load_primitive", "shape": "sphere", "size": -1}"#)
        .unwrap();
    assert!(!resp.success);
    assert!(resp.error.unwrap().contains("invalid size"));
    assert_eq!(h.state(), SessionState::Empty);
}

#[test]
fn test_command_move_plane_reports_faces() {
    let mut h = TestHarness::new();
    execute_json(&mut h, r#"{"command": "load_primitive", "shape": "cube", "size": 2.0}"#).unwrap();
    execute_json(&mut h, r#"{"command": "enable_clip"}"#).unwrap();

    let resp = execute_json(
        &mut h,
        r#"{"command": "move_plane", "origin": [0.5, 0, 0], "normal": [1, 0, 0]}"#,
    )
    .unwrap();
    assert!(resp.success);
    let data = resp.data.unwrap();
    assert!(data["faces"].as_u64().unwrap() > 0);
    assert_eq!(data["plane"]["origin"][0], 0.5);
}

#[test]
fn test_command_move_plane_zero_normal() {
    let mut h = TestHarness::new();
    execute_json(&mut h, r#"{"command": "load_primitive", "shape": "cube"}"#).unwrap();
    execute_json(&mut h, r#"{"command": "enable_clip"}"#).unwrap();

    let resp = execute_json(
        &mut h,
        r#"{"command": "move_plane", "origin": [0, 0, 0], "normal": [0, 0, 0]}"#,
    )
    .unwrap();
    assert!(!resp.success);
}

#[test]
fn test_command_empty_clip_is_rejected() {
    let mut h = TestHarness::new();
    execute_json(&mut h, r#"{"command": "load_primitive", "shape": "cube", "size": 2.0}"#).unwrap();
    execute_json(&mut h, r#"{"command": "enable_clip"}"#).unwrap();

    let resp = execute_json(&mut h, r#"{"command": "push_plane", "distance": 100.0}"#).unwrap();
    assert!(!resp.success);
    assert_eq!(resp.error.as_deref(), Some("clip would remove the whole mesh"));
    assert_eq!(h.state(), SessionState::Clipping);
}

#[test]
fn test_command_enable_without_mesh() {
    let mut h = TestHarness::new();
    let resp = execute_json(&mut h, r#"{"command": "enable_clip"}"#).unwrap();
    assert!(!resp.success);
    assert_eq!(resp.error.as_deref(), Some("no mesh loaded"));
}

#[test]
fn test_command_inspect() {
    let mut h = TestHarness::new();
    execute_json(&mut h, r#"{"command": "load_primitive", "shape": "cube"}"#).unwrap();

    let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
    assert!(resp.success);
    let data = resp.data.unwrap();
    assert_eq!(data["state"], "loaded");
    assert_eq!(data["source"], "cube");
    assert_eq!(data["commits"], 0);
    assert_eq!(data["working"]["faces"], 12);
    assert!(data["derived"].is_null());
}

#[test]
fn test_command_batch_clip_session() {
    let mut h = TestHarness::new();
    let json = r#"[
        {"command": "load_primitive", "shape": "sphere", "size": 2.0},
        {"command": "enable_clip"},
        {"command": "push_plane", "distance": 0.2},
        {"command": "apply"},
        {"command": "inspect"}
    ]"#;

    let responses = execute_json_batch(&mut h, json).unwrap();
    assert_eq!(responses.len(), 5);
    assert!(responses.iter().all(|r| r.success));

    let data = responses[4].data.as_ref().unwrap();
    assert_eq!(data["state"], "committed");
    assert_eq!(data["commits"], 1);
    assert!(data["working"]["min"][0].as_f64().unwrap() > 0.19);
}

#[test]
fn test_command_batch_reports_each_failure() {
    let mut h = TestHarness::new();
    let json = r#"[
        {"command": "apply"},
        {"command": "load_primitive", "shape": "cube"},
        {"command": "undo"}
    ]"#;

    let responses = execute_json_batch(&mut h, json).unwrap();
    assert!(!responses[0].success);
    assert!(responses[1].success);
    assert_eq!(responses[2].error.as_deref(), Some("nothing has been applied"));
}

#[test]
fn test_command_export_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("half.stl");
    let path_json = serde_json::to_string(&path).unwrap();

    let mut h = TestHarness::new();
    let json = format!(
        r#"[
            {{"command": "load_primitive", "shape": "cube", "size": 2.0}},
            {{"command": "enable_clip"}},
            {{"command": "apply"}},
            {{"command": "export", "path": {path_json}}},
            {{"command": "load", "path": {path_json}}},
            {{"command": "inspect"}}
        ]"#
    );

    let responses = execute_json_batch(&mut h, &json).unwrap();
    assert!(responses.iter().all(|r| r.success), "{responses:?}");

    let data = responses[5].data.as_ref().unwrap();
    assert_eq!(data["state"], "loaded");
    assert_eq!(data["source"], "half");
    assert!(data["working"]["min"][0].as_f64().unwrap().abs() < 1e-6);
}

#[test]
fn test_command_invalid_json() {
    let mut h = TestHarness::new();
    assert!(execute_json(&mut h, "not json").is_err());
    assert!(execute_json(&mut h, r#"{"command": "explode"}"#).is_err());
}

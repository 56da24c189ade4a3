// Library crate: exposes the session, the editor and headless tooling for
// integration tests and `--batch` mode.
// GUI-specific modules (app, ui, viewport rendering) remain in the binary crate.

pub mod adapter;
pub mod command;
pub mod fixtures;
pub mod harness;
pub mod state;
pub mod validation;

/// Subset of viewport types that run without a GL context (render data,
/// picking, the plane widget). Camera and renderer stay in the binary crate.
pub mod viewport {
    pub mod mesh;
    pub mod picking;
    pub mod plane_widget;
}

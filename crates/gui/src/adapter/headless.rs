//! Toolkit without a window: real file I/O, scripted dialogs, recorded calls.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use stlclip_mesh::{read_stl, write_stl, Bounds, MeshIoResult, Plane, TriMesh};

use super::{ExportOptions, Toolkit};
use crate::viewport::plane_widget::PlaneWidget;

/// One call made by the editor, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolkitCall {
    ReadMesh(PathBuf),
    WriteMesh(PathBuf),
    Clip,
    PlacePlaneWidget,
    HidePlaneWidget,
    Display { faces: usize },
    ResetCamera,
    PickOpenPath,
    PickSavePath,
    Warn(String),
    Inform(String),
    Notice(String),
}

#[derive(Debug, Default)]
pub struct HeadlessToolkit {
    pub widget: PlaneWidget,
    pub calls: Vec<ToolkitCall>,
    /// Answers for the next open dialogs; an empty queue means "cancelled"
    pub open_paths: VecDeque<PathBuf>,
    /// Answers for the next save dialogs
    pub save_paths: VecDeque<PathBuf>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub notices: Vec<String>,
    pub displayed: Option<Arc<TriMesh>>,
    pub camera: Option<Bounds>,
}

impl HeadlessToolkit {
    pub fn new(widget: PlaneWidget) -> Self {
        Self {
            widget,
            ..Self::default()
        }
    }

    pub fn queue_open(&mut self, path: impl Into<PathBuf>) {
        self.open_paths.push_back(path.into());
    }

    pub fn queue_save(&mut self, path: impl Into<PathBuf>) {
        self.save_paths.push_back(path.into());
    }

    /// Forget recorded calls and messages.
    pub fn clear_log(&mut self) {
        self.calls.clear();
        self.warnings.clear();
        self.infos.clear();
        self.notices.clear();
    }
}

impl Toolkit for HeadlessToolkit {
    fn read_mesh(&mut self, path: &Path) -> MeshIoResult<TriMesh> {
        self.calls.push(ToolkitCall::ReadMesh(path.to_path_buf()));
        read_stl(path)
    }

    fn write_mesh(
        &mut self,
        mesh: &TriMesh,
        path: &Path,
        options: &ExportOptions,
    ) -> MeshIoResult<()> {
        self.calls.push(ToolkitCall::WriteMesh(path.to_path_buf()));
        write_stl(mesh, path, options.format, &options.solid_name)
    }

    fn clip(&mut self, mesh: &TriMesh, plane: &Plane) -> TriMesh {
        self.calls.push(ToolkitCall::Clip);
        stlclip_mesh::clip_mesh(mesh, plane)
    }

    fn place_plane_widget(&mut self, bounds: Bounds) -> Plane {
        self.calls.push(ToolkitCall::PlacePlaneWidget);
        self.widget.place(bounds)
    }

    fn hide_plane_widget(&mut self) {
        self.calls.push(ToolkitCall::HidePlaneWidget);
        self.widget.hide();
    }

    fn display(&mut self, mesh: Arc<TriMesh>) {
        self.calls.push(ToolkitCall::Display {
            faces: mesh.face_count(),
        });
        self.displayed = Some(mesh);
    }

    fn reset_camera(&mut self, bounds: Bounds) {
        self.calls.push(ToolkitCall::ResetCamera);
        self.camera = Some(bounds);
    }

    fn pick_open_path(&mut self) -> Option<PathBuf> {
        self.calls.push(ToolkitCall::PickOpenPath);
        self.open_paths.pop_front()
    }

    fn pick_save_path(&mut self, _suggested_name: &str) -> Option<PathBuf> {
        self.calls.push(ToolkitCall::PickSavePath);
        self.save_paths.pop_front()
    }

    fn warn(&mut self, message: &str) {
        tracing::warn!("{message}");
        self.calls.push(ToolkitCall::Warn(message.to_string()));
        self.warnings.push(message.to_string());
    }

    fn inform(&mut self, message: &str) {
        self.calls.push(ToolkitCall::Inform(message.to_string()));
        self.infos.push(message.to_string());
    }

    fn notice(&mut self, message: &str) {
        self.calls.push(ToolkitCall::Notice(message.to_string()));
        self.notices.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{Editor, EXPORT_SUCCEEDED};
    use stlclip_mesh::{primitives, read_stl, Axis, StlFormat};

    #[test]
    fn test_load_effect_order() {
        let mut e = Editor::new(HeadlessToolkit::default());
        let _ = e.load_mesh(primitives::cube(1.0), "cube");
        assert_eq!(
            e.toolkit().calls,
            vec![
                ToolkitCall::HidePlaneWidget,
                ToolkitCall::Display { faces: 12 },
                ToolkitCall::ResetCamera,
            ]
        );
    }

    #[test]
    fn test_enable_effect_order() {
        let mut e = Editor::new(HeadlessToolkit::default());
        let _ = e.load_mesh(primitives::cube(1.0), "cube");
        e.toolkit_mut().clear_log();

        let _ = e.enable_clipping();
        let calls = &e.toolkit().calls;
        assert_eq!(calls[0], ToolkitCall::PlacePlaneWidget);
        assert_eq!(calls[1], ToolkitCall::Clip);
        assert!(matches!(calls[2], ToolkitCall::Display { .. }));
    }

    #[test]
    fn test_widget_axis_is_configurable() {
        let mut e = Editor::new(HeadlessToolkit::new(PlaneWidget::new(1.25, Axis::Y)));
        let _ = e.load_mesh(primitives::cube(2.0), "cube");
        let _ = e.enable_clipping();
        assert_eq!(e.session().plane().unwrap().normal, glam::Vec3::Y);
        let b = e.session().derived().unwrap().bounds().unwrap();
        assert!(b.min.y.abs() < 1e-5);
    }

    #[test]
    fn test_dialog_driven_load_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.stl");
        let output = dir.path().join("out.stl");
        stlclip_mesh::write_stl(&primitives::cube(2.0), &input, StlFormat::Binary, "in").unwrap();

        let mut e = Editor::new(HeadlessToolkit::default());
        e.toolkit_mut().queue_open(&input);
        e.toolkit_mut().queue_save(&output);

        let _ = e.load().unwrap();
        assert_eq!(e.session().source_name(), "in");
        assert_eq!(e.source_path(), Some(input.as_path()));

        let _ = e.enable_clipping();
        let _ = e.apply();
        let _ = e.export().unwrap();

        assert_eq!(e.toolkit().infos, vec![EXPORT_SUCCEEDED.to_string()]);
        let written = read_stl(&output).unwrap();
        assert_eq!(
            written.bounds().unwrap(),
            e.session().working().unwrap().bounds().unwrap()
        );
    }
}

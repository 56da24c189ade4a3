//! The desktop side of the editor: native dialogs, the viewport's mesh and
//! the plane widget.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use stlclip_mesh::{read_stl, write_stl, Bounds, MeshIoResult, Plane, TriMesh};

use crate::adapter::{Editor, ExportOptions, Toolkit};
use crate::i18n::{message, t};
use crate::state::settings::{AppSettings, ClipSettings};
use crate::viewport::plane_widget::PlaneWidget;

pub type DesktopEditor = Editor<DesktopToolkit>;

/// How long a status notice stays in the status bar
const NOTICE_TTL: Duration = Duration::from_secs(5);

pub struct DesktopToolkit {
    pub widget: PlaneWidget,
    displayed: Option<Arc<TriMesh>>,
    camera_request: Option<Bounds>,
    notice: Option<(String, Instant)>,
    /// Starting directory for file dialogs
    pub last_dir: Option<PathBuf>,
    /// Last file read or written, until the app picks it up
    visited: Option<PathBuf>,
}

impl DesktopToolkit {
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            widget: PlaneWidget::new(settings.clip.place_factor, settings.clip.default_axis),
            displayed: None,
            camera_request: None,
            notice: None,
            last_dir: settings.last_dir.clone(),
            visited: None,
        }
    }

    /// Mesh currently shown in the viewport
    pub fn displayed(&self) -> Option<&Arc<TriMesh>> {
        self.displayed.as_ref()
    }

    /// Bounds the camera should be fitted to, once.
    pub fn take_camera_request(&mut self) -> Option<Bounds> {
        self.camera_request.take()
    }

    pub fn take_visited(&mut self) -> Option<PathBuf> {
        self.visited.take()
    }

    /// The latest notice, if it is still fresh.
    pub fn status_notice(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|(_, at)| at.elapsed() < NOTICE_TTL)
            .map(|(text, _)| text.as_str())
    }

    /// Pick up changed widget settings. The widget keeps its current placement.
    pub fn apply_settings(&mut self, clip: &ClipSettings) {
        self.widget.place_factor = clip.place_factor;
        self.widget.default_axis = clip.default_axis;
    }

    fn visit(&mut self, path: &Path) {
        self.visited = Some(path.to_path_buf());
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            self.last_dir = Some(dir.to_path_buf());
        }
    }

    fn file_dialog(&self, title: &str) -> rfd::FileDialog {
        let dialog = rfd::FileDialog::new()
            .set_title(title)
            .add_filter("STL", &["stl", "STL"]);
        match &self.last_dir {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }
}

impl Toolkit for DesktopToolkit {
    fn read_mesh(&mut self, path: &Path) -> MeshIoResult<TriMesh> {
        let mesh = read_stl(path)?;
        self.visit(path);
        Ok(mesh)
    }

    fn write_mesh(
        &mut self,
        mesh: &TriMesh,
        path: &Path,
        options: &ExportOptions,
    ) -> MeshIoResult<()> {
        write_stl(mesh, path, options.format, &options.solid_name)?;
        self.visit(path);
        Ok(())
    }

    fn place_plane_widget(&mut self, bounds: Bounds) -> Plane {
        self.widget.place(bounds)
    }

    fn hide_plane_widget(&mut self) {
        self.widget.hide();
    }

    fn display(&mut self, mesh: Arc<TriMesh>) {
        self.displayed = Some(mesh);
    }

    fn reset_camera(&mut self, bounds: Bounds) {
        self.camera_request = Some(bounds);
    }

    fn pick_open_path(&mut self) -> Option<PathBuf> {
        self.file_dialog(t("dialog.open_title")).pick_file()
    }

    fn pick_save_path(&mut self, suggested_name: &str) -> Option<PathBuf> {
        self.file_dialog(t("dialog.save_title"))
            .set_file_name(suggested_name)
            .save_file()
    }

    fn warn(&mut self, text: &str) {
        tracing::warn!("{text}");
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title(t("dialog.warning"))
            .set_description(message(text))
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }

    fn inform(&mut self, text: &str) {
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title(t("dialog.info"))
            .set_description(message(text))
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }

    fn notice(&mut self, text: &str) {
        tracing::info!("{text}");
        self.notice = Some((message(text).to_string(), Instant::now()));
    }
}

//! 3D viewport panel with OpenGL rendering

mod camera;
mod gl_renderer;
pub use stlclip_gui_lib::viewport::{mesh, picking, plane_widget};
mod overlays;
mod renderer;

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use egui::Ui;
use glam::Vec3;
use stlclip_mesh::{Plane, TriMesh};

use crate::app::toolkit::DesktopEditor;
use crate::state::settings::AppSettings;
use crate::state::AppState;
use camera::ArcBallCamera;
use gl_renderer::{GlRenderer, RenderParams, SceneData};
use mesh::{LineMeshData, MeshData};
use picking::{pick_triangle, ray_plane};
use plane_widget::WidgetPart;

/// Inputs the uploaded scene depends on
#[derive(Clone, PartialEq)]
struct SceneKey {
    session_version: u64,
    grid_range: i32,
    grid_opacity: u32,
    mesh_color: [u8; 3],
    show_edges: bool,
}

impl SceneKey {
    fn new(session_version: u64, settings: &AppSettings) -> Self {
        Self {
            session_version,
            grid_range: settings.grid.range,
            grid_opacity: settings.grid.opacity.to_bits(),
            mesh_color: settings.viewport.mesh_color,
            show_edges: settings.viewport.show_edges,
        }
    }
}

/// 3D viewport panel with OpenGL rendering
pub struct ViewportPanel {
    camera: ArcBallCamera,
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
    scene: Arc<SceneData>,
    scene_key: Option<SceneKey>,
    /// Widget part under the pointer
    hovered: Option<WidgetPart>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: ArcBallCamera::new(),
            gl_renderer: None,
            scene: Arc::new(SceneData::default()),
            scene_key: None,
            hovered: None,
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context) {
        match GlRenderer::new(gl) {
            Ok(renderer) => self.gl_renderer = Some(Arc::new(Mutex::new(renderer))),
            Err(e) => tracing::error!("OpenGL renderer unavailable, using wireframe: {e}"),
        }
    }

    pub fn destroy_gl(&mut self, gl: &glow::Context) {
        if let Some(renderer) = self.gl_renderer.take() {
            if let Ok(mut r) = renderer.lock() {
                r.destroy(gl);
            }
        }
    }

    /// Frame the displayed model, or return to the default view.
    pub fn reset_camera(&mut self, editor: &DesktopEditor) {
        match editor.toolkit().displayed().and_then(|m| m.bounds()) {
            Some(bounds) => self.camera.fit_bounds(&bounds),
            None => self.camera = ArcBallCamera::new(),
        }
    }

    pub fn show(&mut self, ui: &mut Ui, state: &AppState, editor: &mut DesktopEditor) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        if let Some(bounds) = editor.toolkit_mut().take_camera_request() {
            self.camera.fit_bounds(&bounds);
        }

        // ── Plane widget and camera controls ─────────────────────
        self.handle_widget_and_camera(&response, ui, rect, editor);

        // ── Scroll zoom ─────────────────────────────
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll * 0.01);
            }
        }

        // ── Double-click focuses the point under the cursor ─────────
        if response.double_clicked() {
            self.focus_at(&response, rect, editor);
        }

        self.rebuild_scene_if_needed(state, editor);

        if !ui.is_rect_visible(rect) {
            return;
        }

        let widget = &editor.toolkit().widget;
        let widget_lines = widget
            .is_visible()
            .then(|| widget.lines(self.hovered.is_some() || widget.active.is_some()));

        self.render(ui, rect, &state.settings, widget_lines);
        self.draw_overlays(ui, rect, state, editor);
    }

    fn handle_widget_and_camera(
        &mut self,
        response: &egui::Response,
        ui: &Ui,
        rect: egui::Rect,
        editor: &mut DesktopEditor,
    ) {
        let widget_visible = editor.toolkit().widget.is_visible();

        self.hovered = match response.hover_pos() {
            Some(pos) if widget_visible && !response.dragged() => editor
                .toolkit()
                .widget
                .hit_test(&self.camera.screen_ray(pos, rect)),
            _ => None,
        };

        // ── Widget drag start on LMB ───────────────────
        if widget_visible && response.drag_started_by(egui::PointerButton::Primary) {
            let pointer_pos = response.interact_pointer_pos().or_else(|| response.hover_pos());
            if let Some(pos) = pointer_pos {
                let ray = self.camera.screen_ray(pos, rect);
                let widget = &mut editor.toolkit_mut().widget;
                widget.active = widget.hit_test(&ray);
            }
        }

        let active = editor.toolkit().widget.active;
        match active {
            Some(part) => {
                if response.dragged_by(egui::PointerButton::Primary) {
                    let plane = self.drag_widget(part, response, rect, editor);
                    if let Some(plane) = plane {
                        let _ = editor.move_plane(plane);
                    }
                }
                if response.drag_stopped() || !response.dragged_by(egui::PointerButton::Primary) {
                    editor.toolkit_mut().widget.active = None;
                }
            }
            None => {
                // ── Camera controls (only when not dragging the widget) ──
                if response.dragged_by(egui::PointerButton::Primary) {
                    let delta = response.drag_delta();
                    self.camera.rotate(delta.x * 0.5, delta.y * 0.5);
                }
                if response.dragged_by(egui::PointerButton::Secondary)
                    || response.dragged_by(egui::PointerButton::Middle)
                {
                    let delta = response.drag_delta();
                    self.camera.pan(delta.x, delta.y, rect.height());
                }
            }
        }

        if self.hovered.is_some() || active.is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }
    }

    /// New plane for a drag of `part`, or None when the drag has no effect.
    fn drag_widget(
        &self,
        part: WidgetPart,
        response: &egui::Response,
        rect: egui::Rect,
        editor: &mut DesktopEditor,
    ) -> Option<Plane> {
        let widget = &mut editor.toolkit_mut().widget;
        let plane = widget.plane();
        match part {
            WidgetPart::Plane => {
                let distance = push_distance(
                    &self.camera,
                    plane.origin,
                    plane.normal,
                    response.drag_delta(),
                    rect,
                );
                (distance != 0.0).then(|| widget.push(distance))
            }
            WidgetPart::Normal => {
                let pos = response.interact_pointer_pos()?;
                let ray = self.camera.screen_ray(pos, rect);
                // Tip follows the cursor on a plane facing the camera.
                let facing = Plane::new(plane.origin, self.camera.eye_position() - plane.origin);
                let hit = ray.at(ray_plane(&ray, &facing)?);
                let direction = hit - plane.origin;
                (direction.length() > widget.handle_length() * 0.05)
                    .then(|| widget.set_normal(direction))
            }
        }
    }

    fn focus_at(&mut self, response: &egui::Response, rect: egui::Rect, editor: &DesktopEditor) {
        let (Some(pos), Some(mesh)) = (response.interact_pointer_pos(), editor.toolkit().displayed())
        else {
            return;
        };
        let ray = self.camera.screen_ray(pos, rect);
        if let Some(hit) = pick_triangle(&ray, mesh) {
            self.camera.target = hit.point;
        }
    }

    fn rebuild_scene_if_needed(&mut self, state: &AppState, editor: &DesktopEditor) {
        let key = SceneKey::new(editor.session().version(), &state.settings);
        if self.scene_key.as_ref() == Some(&key) {
            return;
        }
        let revision = self.scene.revision + 1;
        self.scene = Arc::new(build_scene(
            editor.toolkit().displayed().map(|m| m.as_ref()),
            &state.settings,
            revision,
        ));
        self.scene_key = Some(key);
    }

    fn render(
        &self,
        ui: &mut Ui,
        rect: egui::Rect,
        settings: &AppSettings,
        widget_lines: Option<LineMeshData>,
    ) {
        let Some(gl_renderer) = &self.gl_renderer else {
            // Fallback: software wireframe rendering
            renderer::paint_viewport(
                ui,
                rect,
                &self.camera,
                settings,
                &self.scene,
                widget_lines.as_ref(),
            );
            return;
        };

        let renderer = Arc::clone(gl_renderer);
        let camera = self.camera;
        let scene = Arc::clone(&self.scene);
        let grid_visible = settings.grid.visible;
        let axes_visible = settings.axes.visible;
        let bg_color = settings.viewport.background_color;

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(egui_glow::CallbackFn::new(move |info, painter| {
                let gl = painter.gl();
                let clip = info.clip_rect_in_pixels();
                let viewport = [
                    clip.left_px as f32,
                    clip.from_bottom_px as f32,
                    clip.width_px as f32,
                    clip.height_px as f32,
                ];

                if let Ok(mut r) = renderer.lock() {
                    r.sync_scene(gl, &scene);
                    r.sync_widget(gl, widget_lines.as_ref());
                    r.paint(
                        gl,
                        &camera,
                        &RenderParams {
                            viewport,
                            grid_visible,
                            axes_visible,
                            bg_color,
                        },
                    );
                }
            })),
        };
        ui.painter().add(callback);
    }

    fn draw_overlays(&self, ui: &mut Ui, rect: egui::Rect, state: &AppState, editor: &DesktopEditor) {
        let painter = ui.painter_at(rect);

        let widget = &editor.toolkit().widget;
        if widget.is_visible() {
            let highlight = self.hovered == Some(WidgetPart::Plane)
                || widget.active == Some(WidgetPart::Plane);
            overlays::draw_plane_fill(&painter, rect, &self.camera, &widget.outline(), highlight);
        }

        if state.settings.axes.visible && state.settings.axes.show_labels {
            overlays::draw_axis_labels(&painter, rect, &self.camera, axes_length(self.camera.scale));
        }

        overlays::draw_camera_info(&painter, rect, &self.camera);

        if editor.toolkit().displayed().is_none() {
            overlays::draw_hint(&painter, rect, crate::i18n::t("status.nav_hint"));
        } else if widget.is_visible() {
            overlays::draw_hint(&painter, rect, crate::i18n::t("status.plane_hint"));
        }
    }
}

// ── Scene building ───────────────────────────────────────────

fn build_scene(mesh: Option<&TriMesh>, settings: &AppSettings, revision: u64) -> SceneData {
    let bounds = mesh.and_then(|m| m.bounds());
    let scale = bounds.map_or(2.0, |b| b.diagonal().max(1e-3));
    let color = settings.viewport.mesh_color.map(|c| c as f32 / 255.0);

    let model = mesh.map_or_else(MeshData::default, |m| MeshData::from_trimesh(m, color));
    let edges = mesh
        .filter(|_| settings.viewport.show_edges)
        .map(|m| edge_lines(m, [0.1, 0.1, 0.12, 0.8]));

    // Grid under the model, centred on it, in steps of a round size
    let step = grid_step(scale);
    let (center, floor) = bounds.map_or((Vec3::ZERO, 0.0), |b| (b.center(), b.min.y));
    let mut grid = mesh::grid(settings.grid.range, step, settings.grid.opacity, floor);
    let offset_x = (center.x / step).round() * step;
    let offset_z = (center.z / step).round() * step;
    for vertex in grid.vertices.chunks_exact_mut(7) {
        vertex[0] += offset_x;
        vertex[2] += offset_z;
    }

    SceneData {
        revision,
        model,
        edges,
        grid,
        axes: mesh::axes(axes_length(scale)),
    }
}

/// Largest power of ten at most a quarter of `scale`.
fn grid_step(scale: f32) -> f32 {
    10f32.powf((scale * 0.25).log10().floor())
}

fn axes_length(scale: f32) -> f32 {
    scale * 0.6
}

/// Each mesh edge once.
fn edge_lines(mesh: &TriMesh, color: [f32; 4]) -> LineMeshData {
    let mut edges = BTreeSet::new();
    for t in &mesh.triangles {
        for k in 0..3 {
            let (a, b) = (t[k], t[(k + 1) % 3]);
            edges.insert((a.min(b), a.max(b)));
        }
    }
    let mut lines = LineMeshData::default();
    for (a, b) in edges {
        lines.push_line(mesh.vertices[a as usize], mesh.vertices[b as usize], color);
    }
    lines
}

/// World distance along `normal` for a screen drag of `screen_delta`.
/// Projects the normal to screen space and converts pixels back to world units.
fn push_distance(
    camera: &ArcBallCamera,
    origin: Vec3,
    normal: Vec3,
    screen_delta: egui::Vec2,
    rect: egui::Rect,
) -> f32 {
    let (Some(p0), Some(p1)) = (camera.project(origin, rect), camera.project(origin + normal, rect))
    else {
        return 0.0;
    };

    let screen_axis = p1 - p0;
    let screen_axis_len = screen_axis.length();
    // Normal points at the camera: no usable drag direction
    if screen_axis_len < 1.0 {
        return 0.0;
    }

    let projected = screen_delta.dot(screen_axis / screen_axis_len);
    projected / screen_axis_len
}

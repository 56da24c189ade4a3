//! Wireframe rendering for the viewport
//!
//! Used when no OpenGL context is available. Draws the same scene data the
//! GL renderer uploads, as egui line segments.

use egui::{Color32, Rect, Stroke, Ui};

use super::camera::ArcBallCamera;
use super::gl_renderer::SceneData;
use super::mesh::{LineMeshData, MeshData};
use crate::state::settings::AppSettings;

/// Above this many triangles only every n-th one is drawn
const MAX_WIRE_TRIANGLES: usize = 20_000;

/// Paint the 3D viewport using egui's painter (wireframe rendering)
pub fn paint_viewport(
    ui: &Ui,
    rect: Rect,
    camera: &ArcBallCamera,
    settings: &AppSettings,
    scene: &SceneData,
    widget: Option<&LineMeshData>,
) {
    let painter = ui.painter_at(rect);

    let bg = &settings.viewport.background_color;
    painter.rect_filled(rect, 0.0, Color32::from_rgb(bg[0], bg[1], bg[2]));

    if settings.grid.visible {
        draw_lines(&painter, rect, camera, &scene.grid, 0.5);
    }
    if settings.axes.visible {
        draw_lines(&painter, rect, camera, &scene.axes, 2.0);
    }

    let c = settings.viewport.mesh_color;
    draw_wireframe(
        &painter,
        rect,
        camera,
        &scene.model,
        Stroke::new(1.0, Color32::from_rgb(c[0], c[1], c[2])),
    );

    if let Some(widget) = widget {
        draw_lines(&painter, rect, camera, widget, 2.0);
    }
}

/// Draw line geometry with its per-vertex colors (first vertex wins).
fn draw_lines(
    painter: &egui::Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    lines: &LineMeshData,
    width: f32,
) {
    for segment in lines.vertices.chunks_exact(14) {
        let a = glam::Vec3::new(segment[0], segment[1], segment[2]);
        let b = glam::Vec3::new(segment[7], segment[8], segment[9]);
        let color = Color32::from_rgba_unmultiplied(
            to_u8(segment[3]),
            to_u8(segment[4]),
            to_u8(segment[5]),
            to_u8(segment[6]),
        );
        draw_line_3d(painter, rect, camera, a, b, Stroke::new(width, color));
    }
}

fn draw_wireframe(
    painter: &egui::Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    mesh: &MeshData,
    stroke: Stroke,
) {
    let count = mesh.triangle_count();
    let stride = count.div_ceil(MAX_WIRE_TRIANGLES).max(1);
    for tri in (0..count).step_by(stride) {
        let corners = [0, 1, 2].map(|k| mesh.position(mesh.indices[tri * 3 + k] as usize));
        for k in 0..3 {
            draw_line_3d(painter, rect, camera, corners[k], corners[(k + 1) % 3], stroke);
        }
    }
}

// --- Helpers ---

fn draw_line_3d(
    painter: &egui::Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    a: glam::Vec3,
    b: glam::Vec3,
    stroke: Stroke,
) {
    if let (Some(pa), Some(pb)) = (camera.project(a, rect), camera.project(b, rect)) {
        if rect.contains(pa) || rect.contains(pb) {
            painter.line_segment([pa, pb], stroke);
        }
    }
}

fn to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

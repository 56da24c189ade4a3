//! Viewport overlay drawing (axis labels, plane fill, hints)

use egui::{Color32, Painter};
use glam::Vec3;

use super::camera::ArcBallCamera;

/// Draw axis labels at the tips of axes of length `length`
pub fn draw_axis_labels(painter: &Painter, rect: egui::Rect, camera: &ArcBallCamera, length: f32) {
    let tip = length * 1.07;
    let labels = [
        (Vec3::X * tip, "X", Color32::from_rgb(220, 70, 70)),
        (Vec3::Y * tip, "Y", Color32::from_rgb(70, 200, 70)),
        (Vec3::Z * tip, "Z", Color32::from_rgb(70, 110, 220)),
    ];

    for (pos, label, color) in labels {
        if let Some(screen) = camera.project(pos, rect) {
            if rect.contains(screen) {
                painter.text(
                    screen,
                    egui::Align2::LEFT_BOTTOM,
                    label,
                    egui::FontId::monospace(12.0),
                    color,
                );
            }
        }
    }
}

/// Translucent fill of the cutting plane inside its volume.
pub fn draw_plane_fill(
    painter: &Painter,
    rect: egui::Rect,
    camera: &ArcBallCamera,
    outline: &[Vec3],
    highlight: bool,
) {
    if outline.len() < 3 {
        return;
    }
    let Some(points) = outline
        .iter()
        .map(|p| camera.project(*p, rect))
        .collect::<Option<Vec<_>>>()
    else {
        // Part of the plane is behind the camera
        return;
    };

    let alpha = if highlight { 70 } else { 40 };
    painter.add(egui::Shape::convex_polygon(
        points,
        Color32::from_rgba_unmultiplied(240, 150, 40, alpha),
        egui::Stroke::NONE,
    ));
}

pub fn draw_camera_info(painter: &Painter, rect: egui::Rect, camera: &ArcBallCamera) {
    let overlay_rect = egui::Rect::from_min_size(
        egui::pos2(rect.right() - 140.0, rect.top() + 4.0),
        egui::vec2(136.0, 44.0),
    );
    painter.rect_filled(
        overlay_rect,
        4.0,
        Color32::from_rgba_premultiplied(0, 0, 0, 140),
    );
    painter.text(
        overlay_rect.min + egui::vec2(6.0, 4.0),
        egui::Align2::LEFT_TOP,
        format!(
            "Dist: {:.1}\nYaw: {:.0}  Pitch: {:.0}",
            camera.distance,
            camera.yaw.to_degrees(),
            camera.pitch.to_degrees(),
        ),
        egui::FontId::monospace(10.0),
        Color32::from_rgb(160, 160, 170),
    );
}

/// One line of help text at the bottom of the viewport
pub fn draw_hint(painter: &Painter, rect: egui::Rect, text: &str) {
    painter.text(
        egui::pos2(rect.center().x, rect.bottom() - 20.0),
        egui::Align2::CENTER_BOTTOM,
        text,
        egui::FontId::proportional(11.0),
        Color32::from_rgb(100, 100, 110),
    );
}

//! Cutting plane controls
//!
//! Numeric editing of the plane the viewport widget shows. Every change goes
//! through the widget first (so the origin stays inside the widget volume)
//! and is then handed to the editor to re-clip.

use egui::{DragValue, Ui};
use glam::Vec3;
use stlclip_mesh::{Axis, Plane};

use super::toolbar;
use crate::app::styles::PLANE_ACCENT;
use crate::app::toolkit::DesktopEditor;
use crate::i18n::t;

pub fn show(ui: &mut Ui, editor: &mut DesktopEditor) {
    ui.horizontal(|ui| {
        ui.colored_label(PLANE_ACCENT, "■");
        ui.heading(t("panel.plane"));
    });
    ui.separator();

    let active = editor.session().flags().clip_widget_active;
    if !active || !editor.toolkit().widget.is_visible() {
        ui.add_space(6.0);
        ui.vertical_centered(|ui| {
            ui.weak(t("panel.plane_inactive"));
        });
        return;
    }

    let widget = &editor.toolkit().widget;
    let plane = widget.plane();
    let speed = widget.volume().map_or(0.01, |v| v.diagonal() / 500.0);
    let mut changed: Option<Plane> = None;

    egui::Grid::new("plane_params")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label(t("panel.origin"));
            let mut origin = plane.origin;
            if vec3_drag(ui, &mut origin, speed) {
                changed = Some(editor.toolkit_mut().widget.set_origin(origin));
            }
            ui.end_row();

            ui.label(t("panel.normal"));
            let mut normal = plane.normal;
            if vec3_drag(ui, &mut normal, 0.01) {
                changed = Some(editor.toolkit_mut().widget.set_normal(normal));
            }
            ui.end_row();
        });

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.label(t("panel.align"));
        for axis in Axis::all() {
            if ui.small_button(axis.label()).clicked() {
                changed = Some(editor.toolkit_mut().widget.align_to(*axis));
            }
        }
        if ui.small_button(t("panel.flip")).clicked() {
            let flipped = plane.flipped();
            changed = Some(editor.toolkit_mut().widget.set_normal(flipped.normal));
        }
    });

    ui.horizontal(|ui| {
        ui.label(t("panel.push"));
        let step = speed * 25.0;
        if ui.small_button("−").clicked() {
            changed = Some(editor.toolkit_mut().widget.push(-step));
        }
        if ui.small_button("+").clicked() {
            changed = Some(editor.toolkit_mut().widget.push(step));
        }
    });

    if let Some(plane) = changed {
        let outcome = editor.move_plane(plane);
        if let Some(rejection) = outcome.rejection() {
            tracing::debug!("plane edit rejected: {rejection}");
        }
    }

    ui.add_space(4.0);
    if ui.button(t("panel.reset")).clicked() {
        toolbar::action_reset_plane(editor);
    }
}

/// Three drag values in a row. Returns true if any of them changed.
fn vec3_drag(ui: &mut Ui, value: &mut Vec3, speed: f32) -> bool {
    ui.horizontal(|ui| {
        let mut changed = false;
        for (label, component) in [("x", &mut value.x), ("y", &mut value.y), ("z", &mut value.z)]
        {
            changed |= ui
                .add(
                    DragValue::new(component)
                        .speed(speed)
                        .max_decimals(3)
                        .prefix(format!("{label}: ")),
                )
                .changed();
        }
        changed
    })
    .inner
}

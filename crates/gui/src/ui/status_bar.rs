use egui::Ui;

use crate::app::styles::state_color;
use crate::app::toolkit::DesktopEditor;
use crate::i18n::t;
use crate::state::SessionState;

pub fn show(ui: &mut Ui, editor: &DesktopEditor) {
    let session = editor.session();
    let state = session.state();

    ui.horizontal(|ui| {
        let label = match state {
            SessionState::Empty => t("status.empty"),
            SessionState::Loaded => t("status.loaded"),
            SessionState::Clipping => t("status.clipping"),
            SessionState::Committed => t("status.committed"),
        };
        ui.colored_label(state_color(state), label);

        if let Some(working) = session.working() {
            ui.separator();
            ui.weak(format!("{}: {}", t("status.faces"), working.face_count()));
        }
        if let (SessionState::Clipping, Some(derived)) = (state, session.derived()) {
            ui.separator();
            ui.weak(format!("{}: {}", t("status.preview"), derived.face_count()));
        }
        if session.commit_count() > 0 {
            ui.separator();
            ui.weak(format!("{}: {}", t("status.commits"), session.commit_count()));
        }

        if let Some(notice) = editor.toolkit().status_notice() {
            ui.separator();
            ui.colored_label(egui::Color32::from_rgb(255, 200, 100), notice);
        }

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(concat!("STL Clip v", env!("CARGO_PKG_VERSION")));
        });
    });
}

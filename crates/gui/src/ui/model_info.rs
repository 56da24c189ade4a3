use egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::app::toolkit::DesktopEditor;
use crate::i18n::t;
use crate::state::SessionState;

pub fn show(ui: &mut Ui, editor: &DesktopEditor) {
    ui.heading(t("panel.model_info"));
    ui.separator();

    let session = editor.session();
    let Some(original) = session.original() else {
        ui.add_space(6.0);
        ui.vertical_centered(|ui| {
            ui.weak(t("panel.none"));
        });
        return;
    };

    let mut rows: Vec<(&str, String)> = vec![
        (t("panel.file"), session.source_name().to_string()),
        (t("panel.vertices"), original.vertex_count().to_string()),
        (t("panel.faces"), original.face_count().to_string()),
    ];
    if let Some(bounds) = original.bounds() {
        let s = bounds.size();
        rows.push((t("panel.size"), format!("{:.2} × {:.2} × {:.2}", s.x, s.y, s.z)));
    }
    if let Some(working) = session.working() {
        rows.push((t("panel.working"), working.face_count().to_string()));
    }
    if let (SessionState::Clipping, Some(derived)) = (session.state(), session.derived()) {
        rows.push((t("panel.preview"), derived.face_count().to_string()));
    }
    rows.push((t("panel.commits"), session.commit_count().to_string()));

    TableBuilder::new(ui)
        .id_salt("model_info")
        .striped(true)
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .body(|mut body| {
            for (label, value) in rows {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.weak(label);
                    });
                    row.col(|ui| {
                        ui.monospace(value);
                    });
                });
            }
        });
}

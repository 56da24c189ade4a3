//! Toolbar actions and UI

use egui::Ui;

use crate::adapter::{EditorError, EditorResult};
use crate::app::toolkit::DesktopEditor;
use crate::i18n::t;
use crate::state::session::{ApplyAction, ClipToggle, Outcome};

// ── Public actions (callable from menus and shortcuts too) ───

pub fn action_load(editor: &mut DesktopEditor) {
    report("load", editor.load());
}

pub fn action_toggle_clip(editor: &mut DesktopEditor) {
    log_outcome("toggle clipping", &editor.toggle_clipping());
}

pub fn action_apply_or_undo(editor: &mut DesktopEditor) {
    log_outcome("apply/undo", &editor.apply_or_undo());
}

pub fn action_apply(editor: &mut DesktopEditor) {
    log_outcome("apply", &editor.apply());
}

pub fn action_undo(editor: &mut DesktopEditor) {
    log_outcome("undo", &editor.undo_apply());
}

/// Escape: leave clipping, but never turn it on.
pub fn action_disable_clip(editor: &mut DesktopEditor) {
    if editor.session().flags().clip_widget_active {
        log_outcome("disable clipping", &editor.disable_clipping());
    }
}

pub fn action_reset_plane(editor: &mut DesktopEditor) {
    log_outcome("reset plane", &editor.reset_plane());
}

pub fn action_export(editor: &mut DesktopEditor) {
    report("export", editor.export());
}

fn report(action: &str, result: EditorResult) {
    match result {
        Ok(outcome) => log_outcome(action, &outcome),
        Err(EditorError::Cancelled) => tracing::debug!("{action} cancelled"),
        // Already shown to the user in a warning dialog
        Err(e) => tracing::debug!("{action} failed: {e}"),
    }
}

fn log_outcome(action: &str, outcome: &Outcome) {
    if let Some(rejection) = outcome.rejection() {
        tracing::debug!("{action} rejected: {rejection}");
    }
}

pub fn clip_toggle_label(toggle: ClipToggle) -> &'static str {
    match toggle {
        ClipToggle::Enable => t("toolbar.enable_clip"),
        ClipToggle::Disable => t("toolbar.disable_clip"),
    }
}

pub fn apply_label(apply: ApplyAction) -> &'static str {
    match apply {
        ApplyAction::Apply => t("toolbar.apply"),
        ApplyAction::Undo => t("toolbar.undo"),
    }
}

// ── Toolbar UI ───────────────────────────────────────────────

pub fn show(ui: &mut Ui, editor: &mut DesktopEditor) {
    let controls = editor.session().controls();

    ui.horizontal(|ui| {
        if ui
            .add_enabled(controls.load_enabled, egui::Button::new(t("toolbar.load")))
            .on_hover_text("Ctrl+O")
            .clicked()
        {
            action_load(editor);
        }

        ui.separator();

        let toggle = egui::Button::new(clip_toggle_label(controls.clip_toggle))
            .selected(controls.clip_toggle == ClipToggle::Disable);
        if ui
            .add_enabled(controls.clip_toggle_enabled, toggle)
            .on_hover_text("C")
            .clicked()
        {
            action_toggle_clip(editor);
        }

        let apply_hint = match controls.apply {
            ApplyAction::Apply => "Enter",
            ApplyAction::Undo => "Ctrl+Z",
        };
        if ui
            .add_enabled(controls.apply_enabled, egui::Button::new(apply_label(controls.apply)))
            .on_hover_text(apply_hint)
            .clicked()
        {
            action_apply_or_undo(editor);
        }

        if ui
            .add_enabled(
                controls.reset_plane_enabled,
                egui::Button::new(t("toolbar.reset_plane")),
            )
            .on_hover_text("R")
            .clicked()
        {
            action_reset_plane(editor);
        }

        ui.separator();

        if ui
            .add_enabled(controls.export_enabled, egui::Button::new(t("toolbar.export")))
            .on_hover_text("Ctrl+E")
            .clicked()
        {
            action_export(editor);
        }
    });
}

//! Keyboard shortcut handling

use eframe::egui;

use super::toolkit::DesktopEditor;
use crate::ui::toolbar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shortcut {
    Load,
    Export,
    ToggleClip,
    Apply,
    Undo,
    ResetPlane,
    Escape,
}

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, editor: &mut DesktopEditor) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    // Collected first: the actions may open native dialogs and must not run
    // while the input state is borrowed.
    let pressed: Vec<Shortcut> = ctx.input(|i| {
        let cmd = i.modifiers.command;
        [
            (cmd && i.key_pressed(egui::Key::O), Shortcut::Load),
            (cmd && i.key_pressed(egui::Key::E), Shortcut::Export),
            (!cmd && i.key_pressed(egui::Key::C), Shortcut::ToggleClip),
            (!cmd && i.key_pressed(egui::Key::Enter), Shortcut::Apply),
            (cmd && !i.modifiers.shift && i.key_pressed(egui::Key::Z), Shortcut::Undo),
            (!cmd && i.key_pressed(egui::Key::R), Shortcut::ResetPlane),
            (i.key_pressed(egui::Key::Escape), Shortcut::Escape),
        ]
        .into_iter()
        .filter_map(|(hit, shortcut)| hit.then_some(shortcut))
        .collect()
    });

    for shortcut in pressed {
        tracing::debug!(?shortcut, "shortcut");
        match shortcut {
            Shortcut::Load => toolbar::action_load(editor),
            Shortcut::Export => toolbar::action_export(editor),
            Shortcut::ToggleClip => toolbar::action_toggle_clip(editor),
            Shortcut::Apply => toolbar::action_apply(editor),
            Shortcut::Undo => toolbar::action_undo(editor),
            Shortcut::ResetPlane => toolbar::action_reset_plane(editor),
            Shortcut::Escape => toolbar::action_disable_clip(editor),
        }
    }
}

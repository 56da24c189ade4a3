//! Application menu bar, settings and about windows

use eframe::egui;
use stlclip_mesh::{Axis, StlFormat};

use super::toolkit::DesktopEditor;
use crate::i18n::{language, set_language, t};
use crate::state::settings::{AppSettings, Language};
use crate::state::AppState;
use crate::ui::toolbar;
use crate::viewport::ViewportPanel;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState, editor: &mut DesktopEditor) {
    let controls = editor.session().controls();
    ui.menu_button(t("menu.file"), |ui| {
        if ui
            .add_enabled(controls.load_enabled, egui::Button::new(t("menu.open")))
            .clicked()
        {
            ui.close_menu();
            toolbar::action_load(editor);
        }
        if ui
            .add_enabled(controls.export_enabled, egui::Button::new(t("menu.export")))
            .clicked()
        {
            ui.close_menu();
            toolbar::action_export(editor);
        }
        ui.menu_button(t("menu.export_format"), |ui| {
            for format in StlFormat::all() {
                if ui
                    .selectable_label(editor.export.format == *format, format.label())
                    .clicked()
                {
                    editor.export.format = *format;
                    state.settings.clip.export_format = *format;
                    state.settings.save();
                    ui.close_menu();
                }
            }
        });
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, editor: &mut DesktopEditor) {
    let controls = editor.session().controls();
    ui.menu_button(t("menu.edit"), |ui| {
        if ui
            .add_enabled(
                controls.clip_toggle_enabled,
                egui::Button::new(toolbar::clip_toggle_label(controls.clip_toggle))
                    .shortcut_text("C"),
            )
            .clicked()
        {
            toolbar::action_toggle_clip(editor);
            ui.close_menu();
        }
        if ui
            .add_enabled(
                editor.session().flags().clip_widget_active,
                egui::Button::new(t("menu.apply")).shortcut_text("Enter"),
            )
            .clicked()
        {
            toolbar::action_apply(editor);
            ui.close_menu();
        }
        if ui
            .add_enabled(
                editor.session().can_undo_apply(),
                egui::Button::new(t("menu.undo")).shortcut_text("Ctrl+Z"),
            )
            .clicked()
        {
            toolbar::action_undo(editor);
            ui.close_menu();
        }
        ui.separator();
        if ui
            .add_enabled(
                controls.reset_plane_enabled,
                egui::Button::new(t("menu.reset_plane")).shortcut_text("R"),
            )
            .clicked()
        {
            toolbar::action_reset_plane(editor);
            ui.close_menu();
        }
    });
}

/// Show the view menu
pub fn view_menu(
    ui: &mut egui::Ui,
    state: &mut AppState,
    viewport: &mut ViewportPanel,
    editor: &DesktopEditor,
) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.model_info, t("menu.model_info"));
        ui.checkbox(&mut state.panels.plane, t("menu.plane_panel"));
        ui.separator();
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.reset_camera(editor);
            ui.close_menu();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            for (lang, name) in [(Language::Ru, "Русский"), (Language::En, "English")] {
                if ui.selectable_label(language() == lang, name).clicked() {
                    set_language(lang);
                    state.settings.ui.language = lang;
                    state.settings.save();
                    ui.close_menu();
                }
            }
        });
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.settings"), |ui| {
        if ui.button(t("menu.preferences")).clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
        if ui.button(t("menu.about")).clicked() {
            state.show_about_window = true;
            ui.close_menu();
        }
    });
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState, editor: &mut DesktopEditor) {
    let mut open = state.show_settings_window;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(true)
        .default_width(400.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_grid_settings(ui, &mut state.settings);
                show_axes_settings(ui, &mut state.settings);
                show_viewport_settings(ui, &mut state.settings);
                show_ui_settings(ui, &mut state.settings);
                show_clip_settings(ui, &mut state.settings);
                show_settings_buttons(ui, state, editor);
            });
        });
    state.show_settings_window &= open;
}

pub fn about_window(ctx: &egui::Context, state: &mut AppState) {
    egui::Window::new(t("about.title"))
        .open(&mut state.show_about_window)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.strong(concat!("STL Clip ", env!("CARGO_PKG_VERSION")));
            ui.add_space(4.0);
            ui.label(t("about.text"));
        });
}

fn show_grid_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.grid"));
    ui.checkbox(&mut settings.grid.visible, t("settings.grid_visible"));

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_range"));
        ui.add(
            egui::DragValue::new(&mut settings.grid.range)
                .speed(1)
                .range(1..=50),
        );
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_opacity"));
        ui.add(egui::Slider::new(&mut settings.grid.opacity, 0.0..=1.0));
    });
    ui.add_space(10.0);
}

fn show_axes_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.axes"));
    ui.checkbox(&mut settings.axes.visible, t("settings.axes_visible"));
    ui.checkbox(&mut settings.axes.show_labels, t("settings.axes_labels"));
    ui.add_space(10.0);
}

fn show_viewport_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.viewport"));
    color_row(ui, t("settings.bg_color"), &mut settings.viewport.background_color);
    color_row(ui, t("settings.mesh_color"), &mut settings.viewport.mesh_color);
    ui.checkbox(&mut settings.viewport.show_edges, t("settings.show_edges"));
    ui.checkbox(&mut settings.viewport.antialiasing, t("settings.antialiasing"));
    ui.add_space(10.0);
}

fn color_row(ui: &mut egui::Ui, label: &str, rgb: &mut [u8; 3]) {
    ui.horizontal(|ui| {
        ui.label(label);
        let mut color = egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2]);
        if ui.color_edit_button_srgba(&mut color).changed() {
            *rgb = [color.r(), color.g(), color.b()];
        }
    });
}

fn show_ui_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.ui"));
    ui.horizontal(|ui| {
        ui.label(t("settings.font_size"));
        ui.add(
            egui::DragValue::new(&mut settings.ui.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });
    ui.add_space(10.0);
}

fn show_clip_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.clip"));
    ui.horizontal(|ui| {
        ui.label(t("settings.place_factor"));
        ui.add(
            egui::DragValue::new(&mut settings.clip.place_factor)
                .speed(0.01)
                .range(1.0..=3.0),
        );
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.default_axis"));
        egui::ComboBox::from_id_salt("default_axis_combo")
            .selected_text(settings.clip.default_axis.label())
            .show_ui(ui, |ui| {
                for axis in Axis::all() {
                    ui.selectable_value(&mut settings.clip.default_axis, *axis, axis.label());
                }
            });
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.export_format"));
        for format in StlFormat::all() {
            ui.radio_value(&mut settings.clip.export_format, *format, format.label());
        }
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.solid_name"));
        ui.text_edit_singleline(&mut settings.clip.solid_name);
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState, editor: &mut DesktopEditor) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.apply")).clicked() {
            state.settings.save();
            editor.toolkit_mut().apply_settings(&state.settings.clip);
            editor.export = state.settings.clip.export_options();
        }
        if ui.button(t("settings.reset")).clicked() {
            state.settings = AppSettings {
                last_dir: state.settings.last_dir.take(),
                ..AppSettings::default()
            };
        }
        if ui.button(t("settings.close")).clicked() {
            state.show_settings_window = false;
        }
    });
}

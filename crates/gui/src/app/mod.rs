//! Main application module

mod keyboard;
mod menus;
pub mod styles;
pub mod toolkit;

use std::path::PathBuf;

use eframe::egui;

use crate::i18n::set_language;
use crate::state::AppState;
use crate::ui::{model_info, plane_panel, status_bar, toolbar};
use crate::viewport::ViewportPanel;
use toolkit::{DesktopEditor, DesktopToolkit};

/// Main application
pub struct StlClipApp {
    state: AppState,
    editor: DesktopEditor,
    viewport: ViewportPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl StlClipApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_file: Option<PathBuf>) -> Self {
        let state = AppState::default();
        set_language(state.settings.ui.language);

        // Apply initial styles with font size from settings
        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let mut viewport = ViewportPanel::new();

        // Initialize GL renderer if glow context is available
        if let Some(gl) = cc.gl.as_ref() {
            viewport.init_gl(gl);
        }

        let mut editor = DesktopEditor::new(DesktopToolkit::new(&state.settings));
        editor.export = state.settings.clip.export_options();

        if let Some(path) = initial_file {
            match editor.load_file(&path) {
                Ok(_) => tracing::info!("Opened {}", path.display()),
                Err(e) => tracing::error!("Failed to open {}: {e}", path.display()),
            }
        }

        let last_font_size = state.settings.ui.font_size;

        Self {
            state,
            editor,
            viewport,
            last_font_size,
        }
    }
}

impl eframe::App for StlClipApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        keyboard::handle_keyboard(ctx, &mut self.editor);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state, &mut self.editor);
                menus::edit_menu(ui, &mut self.editor);
                menus::view_menu(ui, &mut self.state, &mut self.viewport, &self.editor);
                menus::settings_menu(ui, &mut self.state);
            });
        });

        // ── Settings and about windows ───────────────────────
        menus::settings_window(ctx, &mut self.state, &mut self.editor);
        menus::about_window(ctx, &mut self.state);

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.editor);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.editor);
            });

        // ── Right panel: Model info + Plane ──────────────────
        self.show_right_panel(ctx);

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &self.state, &mut self.editor);
            });

        // Remember where the last file came from
        if let Some(path) = self.editor.toolkit_mut().take_visited() {
            self.state.settings.remember_dir(&path);
            self.state.settings.save();
        }

        // Keep repainting so an expired notice disappears
        if self.editor.toolkit().status_notice().is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(500));
        }
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let Some(gl) = gl {
            self.viewport.destroy_gl(gl);
        }
    }
}

impl StlClipApp {
    fn show_right_panel(&mut self, ctx: &egui::Context) {
        let panels = &self.state.panels;
        if !panels.model_info && !panels.plane {
            return;
        }
        let (show_info, show_plane) = (panels.model_info, panels.plane);

        egui::SidePanel::right("right_panel")
            .default_width(290.0)
            .width_range(220.0..=500.0)
            .resizable(true)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("right_scroll")
                    .show(ui, |ui| {
                        if show_info {
                            model_info::show(ui, &self.editor);
                        }
                        if show_info && show_plane {
                            ui.add_space(8.0);
                        }
                        if show_plane {
                            plane_panel::show(ui, &mut self.editor);
                        }
                    });
            });
    }
}

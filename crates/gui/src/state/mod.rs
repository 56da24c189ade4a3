pub mod session;
pub mod settings;

pub use session::{Session, SessionFlags, SessionState};
pub use settings::AppSettings;

/// Panel visibility flags
pub struct PanelVisibility {
    pub model_info: bool,
    pub plane: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            model_info: true,
            plane: true,
        }
    }
}

/// UI state around the editor
pub struct AppState {
    pub panels: PanelVisibility,
    pub settings: AppSettings,
    /// Show settings window
    pub show_settings_window: bool,
    /// Show the about window
    pub show_about_window: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            panels: PanelVisibility::default(),
            settings: AppSettings::load(),
            show_settings_window: false,
            show_about_window: false,
        }
    }
}

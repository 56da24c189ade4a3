//! Application settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stlclip_mesh::{Axis, StlFormat};

use crate::adapter::ExportOptions;
use crate::viewport::plane_widget::DEFAULT_PLACE_FACTOR;

/// Grid display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    /// Show grid
    pub visible: bool,
    /// Number of grid lines in each direction from the model center
    pub range: i32,
    /// Grid line opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            range: 10,
            opacity: 0.6,
        }
    }
}

/// Axis display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisSettings {
    /// Show axes
    pub visible: bool,
    /// Show axis labels (X, Y, Z)
    pub show_labels: bool,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            visible: true,
            show_labels: true,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Model color RGB
    pub mesh_color: [u8; 3],
    /// Draw triangle edges on top of the shaded surface
    pub show_edges: bool,
    /// Enable anti-aliasing
    pub antialiasing: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [30, 30, 35],
            mesh_color: [180, 180, 190],
            show_edges: false,
            antialiasing: true,
        }
    }
}

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    En,
    Ru,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    #[serde(default)]
    pub language: Language,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            language: Language::default(),
        }
    }
}

/// Plane widget and export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipSettings {
    /// Widget volume relative to the mesh bounds
    pub place_factor: f32,
    /// Normal of a freshly placed plane
    pub default_axis: Axis,
    pub export_format: StlFormat,
    /// Name written into the `solid` line of ASCII exports
    pub solid_name: String,
}

impl Default for ClipSettings {
    fn default() -> Self {
        Self {
            place_factor: DEFAULT_PLACE_FACTOR,
            default_axis: Axis::X,
            export_format: StlFormat::Ascii,
            solid_name: "stlclip".to_string(),
        }
    }
}

impl ClipSettings {
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            format: self.export_format,
            solid_name: self.solid_name.clone(),
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppSettings {
    /// Grid settings
    pub grid: GridSettings,
    /// Axis settings
    pub axes: AxisSettings,
    /// Viewport settings
    pub viewport: ViewportSettings,
    /// UI settings
    pub ui: UiSettings,
    #[serde(default)]
    pub clip: ClipSettings,
    /// Directory of the last opened or exported file
    #[serde(default)]
    pub last_dir: Option<PathBuf>,
}

impl AppSettings {
    /// Path of the settings file in the platform config directory
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stlclip", "stlclip")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        let json = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!("Ignoring unreadable settings {}: {e}", path.display());
                None
            }
        }
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Err(e) = self.save_to(&path) {
                tracing::warn!("Failed to save settings to {}: {e}", path.display());
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Remember the directory containing `file`.
    pub fn remember_dir(&mut self, file: &Path) {
        if let Some(dir) = file.parent().filter(|d| !d.as_os_str().is_empty()) {
            self.last_dir = Some(dir.to_path_buf());
        }
    }
}

use std::sync::atomic::{AtomicU8, Ordering};

use crate::adapter::{EMPTY_CLIP, EMPTY_MESH, EXPORT_SUCCEEDED, NO_MESH_LOADED, NO_MESH_TO_EXPORT};
use crate::state::settings::Language;

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=En (default)

pub fn language() -> Language {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Language::Ru,
        _ => Language::En,
    }
}

pub fn set_language(l: Language) {
    CURRENT_LANG.store(
        match l {
            Language::En => 0,
            Language::Ru => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate an editor message. Unknown messages (e.g. I/O errors with a
/// path in them) are shown as they are.
pub fn message(text: &str) -> &str {
    match text {
        NO_MESH_LOADED => t("msg.no_mesh_loaded"),
        NO_MESH_TO_EXPORT => t("msg.no_mesh_to_export"),
        EXPORT_SUCCEEDED => t("msg.export_succeeded"),
        EMPTY_MESH => t("msg.empty_mesh"),
        EMPTY_CLIP => t("msg.empty_clip"),
        other => other,
    }
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = language() == Language::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if ru { "Файл" } else { "File" },
        "menu.open" => if ru { "Открыть STL...  Ctrl+O" } else { "Open STL...  Ctrl+O" },
        "menu.export" => if ru { "Экспорт STL...  Ctrl+E" } else { "Export STL...  Ctrl+E" },
        "menu.export_format" => if ru { "Формат экспорта" } else { "Export format" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.edit" => if ru { "Правка" } else { "Edit" },
        "menu.apply" => if ru { "Применить отсечение  Enter" } else { "Apply clipping  Enter" },
        "menu.undo" => if ru { "Отменить отсечение  Ctrl+Z" } else { "Undo clipping  Ctrl+Z" },
        "menu.reset_plane" => if ru { "Сбросить плоскость  R" } else { "Reset plane  R" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.model_info" => if ru { "Информация о модели" } else { "Model info" },
        "menu.plane_panel" => if ru { "Плоскость" } else { "Cutting plane" },
        "menu.reset_camera" => if ru { "Сбросить камеру" } else { "Reset camera" },
        "menu.language" => if ru { "Язык" } else { "Language" },

        "menu.settings" => if ru { "Настройки" } else { "Settings" },
        "menu.preferences" => if ru { "Параметры..." } else { "Preferences..." },
        "menu.about" => if ru { "О программе" } else { "About" },

        // ── Toolbar ─────────────────────────────────────────
        "toolbar.load" => if ru { "Загрузить STL" } else { "Load STL" },
        "toolbar.enable_clip" => if ru { "Включить отсечение" } else { "Enable Clipping" },
        "toolbar.disable_clip" => if ru { "Выключить отсечение" } else { "Disable Clipping" },
        "toolbar.apply" => if ru { "Применить отсечение" } else { "Apply Clipping" },
        "toolbar.undo" => if ru { "Отменить отсечение" } else { "Undo Clipping" },
        "toolbar.export" => if ru { "Экспорт STL" } else { "Export STL" },
        "toolbar.reset_plane" => if ru { "Сбросить плоскость" } else { "Reset plane" },

        // ── Dialogs ─────────────────────────────────────────
        "dialog.open_title" => if ru { "Открыть STL" } else { "Open STL file" },
        "dialog.save_title" => if ru { "Экспорт STL" } else { "Export STL file" },
        "dialog.warning" => if ru { "Предупреждение" } else { "Warning" },
        "dialog.info" => if ru { "Информация" } else { "Information" },

        "msg.no_mesh_loaded" => if ru { "STL файл не загружен." } else { NO_MESH_LOADED },
        "msg.no_mesh_to_export" => if ru { "STL файл не загружен и не изменён." } else { NO_MESH_TO_EXPORT },
        "msg.export_succeeded" => if ru { "STL файл успешно экспортирован." } else { EXPORT_SUCCEEDED },
        "msg.empty_mesh" => if ru { "STL файл не содержит треугольников." } else { EMPTY_MESH },
        "msg.empty_clip" => if ru { "Отсечение удалит всю модель; оставлен предыдущий результат." } else { EMPTY_CLIP },

        // ── Status bar ──────────────────────────────────────
        "status.empty" => if ru { "Модель не загружена" } else { "No model loaded" },
        "status.loaded" => if ru { "Модель загружена" } else { "Model loaded" },
        "status.clipping" => if ru { "Отсечение" } else { "Clipping" },
        "status.committed" => if ru { "Отсечение применено" } else { "Clipping applied" },
        "status.faces" => if ru { "Треугольники" } else { "Faces" },
        "status.preview" => if ru { "Предпросмотр" } else { "Preview" },
        "status.commits" => if ru { "Применено" } else { "Applied" },
        "status.nav_hint" => if ru {
            "ЛКМ: вращение | ПКМ/СКМ: сдвиг | Колесо: масштаб | Ctrl+O: открыть STL"
        } else {
            "LMB: rotate | RMB/MMB: pan | Scroll: zoom | Ctrl+O: open STL"
        },
        "status.plane_hint" => if ru {
            "Тяните плоскость вдоль нормали, стрелку для поворота"
        } else {
            "Drag the plane to push it, drag the arrow to tilt it"
        },

        // ── Side panel ──────────────────────────────────────
        "panel.model_info" => if ru { "Модель" } else { "Model" },
        "panel.file" => if ru { "Файл" } else { "File" },
        "panel.vertices" => if ru { "Вершины" } else { "Vertices" },
        "panel.faces" => if ru { "Треугольники" } else { "Faces" },
        "panel.size" => if ru { "Размер" } else { "Size" },
        "panel.working" => if ru { "Текущая" } else { "Working" },
        "panel.preview" => if ru { "Предпросмотр" } else { "Preview" },
        "panel.commits" => if ru { "Применено отсечений" } else { "Applied clips" },
        "panel.none" => if ru { "нет" } else { "none" },

        "panel.plane" => if ru { "Плоскость отсечения" } else { "Cutting plane" },
        "panel.plane_inactive" => if ru {
            "Включите отсечение, чтобы редактировать плоскость"
        } else {
            "Enable clipping to edit the plane"
        },
        "panel.origin" => if ru { "Точка" } else { "Origin" },
        "panel.normal" => if ru { "Нормаль" } else { "Normal" },
        "panel.align" => if ru { "По оси" } else { "Align to" },
        "panel.flip" => if ru { "Развернуть" } else { "Flip" },
        "panel.push" => if ru { "Сдвиг" } else { "Push" },
        "panel.reset" => if ru { "Сбросить" } else { "Reset" },

        // ── Settings window ─────────────────────────────────
        "settings.title" => if ru { "Настройки" } else { "Settings" },
        "settings.grid" => if ru { "Сетка" } else { "Grid" },
        "settings.grid_visible" => if ru { "Показывать сетку" } else { "Show grid" },
        "settings.grid_range" => if ru { "Количество линий" } else { "Line count" },
        "settings.grid_opacity" => if ru { "Прозрачность" } else { "Opacity" },
        "settings.axes" => if ru { "Оси" } else { "Axes" },
        "settings.axes_visible" => if ru { "Показывать оси" } else { "Show axes" },
        "settings.axes_labels" => if ru { "Подписи осей" } else { "Axis labels" },
        "settings.viewport" => if ru { "Вьюпорт" } else { "Viewport" },
        "settings.bg_color" => if ru { "Цвет фона" } else { "Background" },
        "settings.mesh_color" => if ru { "Цвет модели" } else { "Model color" },
        "settings.show_edges" => if ru { "Показывать рёбра" } else { "Show edges" },
        "settings.antialiasing" => if ru { "Сглаживание (после перезапуска)" } else { "Anti-aliasing (after restart)" },
        "settings.ui" => if ru { "Интерфейс" } else { "Interface" },
        "settings.font_size" => if ru { "Размер шрифта" } else { "Font size" },
        "settings.clip" => if ru { "Отсечение" } else { "Clipping" },
        "settings.place_factor" => if ru { "Запас рамки плоскости" } else { "Plane bounds factor" },
        "settings.default_axis" => if ru { "Нормаль по умолчанию" } else { "Default normal" },
        "settings.export_format" => if ru { "Формат экспорта" } else { "Export format" },
        "settings.solid_name" => if ru { "Имя solid" } else { "Solid name" },

        "settings.apply" => if ru { "Применить" } else { "Apply" },
        "settings.reset" => if ru { "Сбросить" } else { "Reset" },
        "settings.close" => if ru { "Закрыть" } else { "Close" },

        "about.title" => if ru { "О программе" } else { "About" },
        "about.text" => if ru {
            "Просмотр STL с интерактивным отсечением плоскостью."
        } else {
            "STL viewer with interactive plane clipping."
        },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

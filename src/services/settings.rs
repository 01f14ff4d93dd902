use crate::kernel::select::{SelectConfig, DEFAULT_MAX_RESULTS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = ".obras";
const SETTINGS_FILE: &str = "settings.json";
const LOG_DIR: &str = "logs";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub select: SelectSettings,
    #[serde(default)]
    pub theme: ThemeSettings,
}

/// Tuning for every searchable select in the app.
///
/// `flip_threshold` is in terminal rows here, so its default is far smaller than the
/// kernel's pixel-era default of 300.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectSettings {
    pub flip_threshold: u16,
    pub max_results: usize,
    pub search_delay_ms: u64,
    /// Option rows shown at once before the panel scrolls.
    pub panel_rows: u16,
}

impl Default for SelectSettings {
    fn default() -> Self {
        Self {
            flip_threshold: 12,
            max_results: DEFAULT_MAX_RESULTS,
            search_delay_ms: 16,
            panel_rows: 8,
        }
    }
}

impl SelectSettings {
    pub fn to_config(&self) -> SelectConfig {
        SelectConfig {
            flip_threshold: self.flip_threshold,
            max_results: self.max_results.max(1),
            search_delay: Duration::from_millis(self.search_delay_ms),
        }
    }

    /// Visible option rows, at least one, and small enough that a panel opened upward (border
    /// and search line included) fits in the `flip_threshold` rows it was promised.
    pub fn panel_rows(&self) -> u16 {
        self.panel_rows
            .min(self.flip_threshold.saturating_sub(3))
            .max(1)
    }
}

/// Color names (`"cyan"`, `"dark_gray"`) or `#rrggbb`. `None` leaves the terminal default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive_border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_active_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_active_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warn_fg: Option<String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            accent_fg: Some("yellow".to_string()),
            focus_border: Some("cyan".to_string()),
            inactive_border: Some("dark_gray".to_string()),
            muted_fg: Some("dark_gray".to_string()),
            nav_bg: None,
            nav_fg: Some("gray".to_string()),
            nav_active_bg: Some("blue".to_string()),
            nav_active_fg: Some("white".to_string()),
            field_bg: Some("#1e2430".to_string()),
            panel_bg: Some("#161b24".to_string()),
            selected_bg: Some("dark_gray".to_string()),
            selected_fg: Some("white".to_string()),
            marker_fg: Some("light_red".to_string()),
            ok_fg: Some("green".to_string()),
            warn_fg: Some("yellow".to_string()),
        }
    }
}

pub fn get_settings_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(APP_DIR).join(LOG_DIR))
}

pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    ensure_settings_file_at(&path)?;
    Ok(path)
}

/// Writes default settings to `path` unless a file is already there.
pub fn ensure_settings_file_at(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&Settings::default())
            .unwrap_or_else(|_| "{}".to_string());
        std::fs::write(path, content)?;
    }
    Ok(())
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

pub fn load_settings() -> Option<Settings> {
    let path = get_settings_path()?;
    load_settings_from(&path)
}

/// `None` when the file is missing or does not parse; a parse failure is logged.
pub fn load_settings_from(path: &Path) -> Option<Settings> {
    let data = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(settings) => Some(settings),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings file");
            None
        }
    }
}

fn get_cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/settings.rs"]
mod tests;

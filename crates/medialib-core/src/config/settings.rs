//! Application configuration loaded from a TOML file.
//!
//! The default configuration matches the values shown in `config/medialib.toml`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::drag::DragConstraint;
use crate::error::{CoreError, CoreResult};
use crate::fs::ops::CycleGuard;
use crate::view::ViewMode;

/// Top-level application configuration.
///
/// All fields have sensible defaults so the library browser works without
/// a config file. Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub drag: DragConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(e, path))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// Presentation preferences shared by all three views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub default_mode: ViewMode,
    #[serde(default = "default_true")]
    pub show_preview: bool,
    #[serde(default = "default_true")]
    pub folders_first: bool,
    #[serde(default = "default_sort")]
    pub default_sort: String,
    #[serde(default = "default_grid_columns")]
    pub grid_columns: u16,
    /// Nerd Font glyphs in listings; plain markers when off.
    #[serde(default = "default_true")]
    pub show_icons: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_mode: ViewMode::default(),
            show_preview: true,
            folders_first: true,
            default_sort: default_sort(),
            grid_columns: default_grid_columns(),
            show_icons: true,
        }
    }
}

/// Selection behaviour across navigation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Clear the selection whenever the open folder changes.
    #[serde(default)]
    pub clear_on_navigate: bool,
}

/// Drag activation and move rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragConfig {
    #[serde(default = "default_activation_delay_ms")]
    pub activation_delay_ms: u64,
    #[serde(default = "default_tolerance")]
    pub tolerance: u32,
    /// Refuse drops that would make a folder its own ancestor.
    #[serde(default = "default_true")]
    pub prevent_cycles: bool,
}

impl DragConfig {
    pub fn constraint(&self) -> DragConstraint {
        DragConstraint {
            delay: Duration::from_millis(self.activation_delay_ms),
            tolerance: self.tolerance,
        }
    }

    pub fn cycle_guard(&self) -> CycleGuard {
        CycleGuard::from_prevent(self.prevent_cycles)
    }
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_delay_ms: default_activation_delay_ms(),
            tolerance: default_tolerance(),
            prevent_cycles: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Hop limit for ancestor walks (breadcrumbs, open-by-id).
    #[serde(default = "default_max_breadcrumb_depth")]
    pub max_breadcrumb_depth: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_breadcrumb_depth: default_max_breadcrumb_depth(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_file")]
    pub file: String,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sort() -> String {
    "name".to_string()
}

fn default_grid_columns() -> u16 {
    4
}

fn default_activation_delay_ms() -> u64 {
    150
}

fn default_tolerance() -> u32 {
    5
}

fn default_max_breadcrumb_depth() -> usize {
    crate::fs::store::DEFAULT_MAX_DEPTH
}

fn default_log_file() -> String {
    "/tmp/medialib.log".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_view() {
        let config = Config::default();

        assert_eq!(config.view.default_mode, ViewMode::Grid);
        assert!(config.view.show_preview);
        assert!(config.view.folders_first);
        assert_eq!(config.view.default_sort, "name");
        assert_eq!(config.view.grid_columns, 4);
    }

    #[test]
    fn default_config_keeps_selection_across_navigation() {
        assert!(!Config::default().selection.clear_on_navigate);
    }

    #[test]
    fn default_config_drag() {
        let config = Config::default();

        assert_eq!(config.drag.activation_delay_ms, 150);
        assert_eq!(config.drag.tolerance, 5);
        assert!(config.drag.prevent_cycles);
        assert_eq!(config.drag.constraint().delay, Duration::from_millis(150));
        assert_eq!(config.drag.cycle_guard(), CycleGuard::Reject);
    }

    #[test]
    fn default_config_navigation_and_log() {
        let config = Config::default();
        assert_eq!(config.navigation.max_breadcrumb_depth, 20);
        assert_eq!(config.log.file, "/tmp/medialib.log");
        assert_eq!(config.log.level, "info");
        assert!(config.view.show_icons);
    }

    #[test]
    fn load_full_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("medialib.toml");
        fs::write(
            &path,
            r#"
[view]
default_mode = "columns"
show_preview = false
folders_first = false
default_sort = "size"
grid_columns = 6
show_icons = false

[selection]
clear_on_navigate = true

[drag]
activation_delay_ms = 250
tolerance = 2
prevent_cycles = false

[navigation]
max_breadcrumb_depth = 8

[log]
file = "/var/log/medialib.log"
level = "debug"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.view.default_mode, ViewMode::Columns);
        assert!(!config.view.show_preview);
        assert!(!config.view.folders_first);
        assert_eq!(config.view.default_sort, "size");
        assert_eq!(config.view.grid_columns, 6);
        assert!(config.selection.clear_on_navigate);
        assert_eq!(config.drag.activation_delay_ms, 250);
        assert_eq!(config.drag.tolerance, 2);
        assert_eq!(config.drag.cycle_guard(), CycleGuard::Allow);
        assert_eq!(config.navigation.max_breadcrumb_depth, 8);
        assert!(!config.view.show_icons);
        assert_eq!(config.log.file, "/var/log/medialib.log");
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn load_partial_toml_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("medialib.toml");
        fs::write(&path, "[view]\ndefault_mode = \"list\"\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.view.default_mode, ViewMode::List);
        assert!(config.view.show_preview);
        assert_eq!(config.drag.tolerance, 5);
    }

    #[test]
    fn load_empty_toml_uses_all_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("medialib.toml");
        fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.view.default_mode, ViewMode::Grid);
        assert_eq!(config.navigation.max_breadcrumb_depth, 20);
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("nonexistent.toml"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("medialib.toml");
        fs::write(&path, "this is not valid [[[toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }

    #[test]
    fn unknown_view_mode_is_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("medialib.toml");
        fs::write(&path, "[view]\ndefault_mode = \"gallery\"\n").unwrap();

        assert!(matches!(Config::load(&path), Err(CoreError::ConfigParse(_))));
    }
}

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::Color;
use crate::shapes::{DEFAULT_SIDES, MAX_SIDES, MIN_SIDES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigPathError {
    #[error("neither XDG_CONFIG_HOME nor HOME is set")]
    MissingHomeDirectory,
}

const APP_DIR: &str = "vecdraw";
const APP_CONFIG_FILE: &str = "config.json";

pub const MIN_TOOL_PEN_WIDTH: u32 = 1;
pub const MAX_TOOL_PEN_WIDTH: u32 = 20;
pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 2.0;

/// Editor defaults from `config.json`. Colors are hex names as in saved documents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub pen_color: String,
    pub pen_width: u32,
    pub fill_color: String,
    pub regular_polygon_sides: u32,
    pub simplify_tolerance: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            pen_color: Color::BLACK.name(),
            pen_width: MIN_TOOL_PEN_WIDTH,
            fill_color: Color::TRANSPARENT.name(),
            regular_polygon_sides: DEFAULT_SIDES,
            simplify_tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
        }
    }
}

impl EditorConfig {
    pub fn pen_color(&self) -> Color {
        parse_color_or(&self.pen_color, Color::BLACK, "penColor")
    }

    pub fn fill_color(&self) -> Color {
        parse_color_or(&self.fill_color, Color::TRANSPARENT, "fillColor")
    }

    pub fn pen_width(&self) -> u32 {
        clamp_tool_pen_width(self.pen_width)
    }

    pub fn regular_polygon_sides(&self) -> u32 {
        self.regular_polygon_sides.clamp(MIN_SIDES, MAX_SIDES)
    }

    pub fn simplify_tolerance(&self) -> f64 {
        if self.simplify_tolerance.is_finite() && self.simplify_tolerance > 0.0 {
            self.simplify_tolerance
        } else {
            DEFAULT_SIMPLIFY_TOLERANCE
        }
    }
}

pub fn clamp_tool_pen_width(width: u32) -> u32 {
    width.clamp(MIN_TOOL_PEN_WIDTH, MAX_TOOL_PEN_WIDTH)
}

fn parse_color_or(name: &str, fallback: Color, key: &str) -> Color {
    Color::from_name(name).unwrap_or_else(|| {
        tracing::warn!(key, value = name, "invalid color in config.json; using default");
        fallback
    })
}

pub fn load_editor_config() -> EditorConfig {
    let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    load_editor_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_editor_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> EditorConfig {
    let path = match editor_config_path(xdg_config_home, home) {
        Ok(path) => path,
        Err(err) => {
            tracing::debug!(%err, "no config directory; using defaults");
            return EditorConfig::default();
        }
    };
    if !path.exists() {
        tracing::debug!(?path, "no config.json; using defaults");
        return EditorConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            EditorConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            EditorConfig::default()
        }
    }
}

/// `$XDG_CONFIG_HOME/vecdraw/config.json`, else `$HOME/.config/vecdraw/config.json`.
fn editor_config_path(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let root = match xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        Some(xdg) => xdg.to_path_buf(),
        None => home
            .ok_or(ConfigPathError::MissingHomeDirectory)?
            .join(".config"),
    };
    Ok(root.join(APP_DIR).join(APP_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(root: &Path, contents: &str) {
        let dir = root.join(APP_DIR);
        std::fs::create_dir_all(&dir).expect("config dir should be created");
        std::fs::write(dir.join(APP_CONFIG_FILE), contents).expect("config should be written");
    }

    #[test]
    fn home_dot_config_is_used_when_xdg_is_unset_or_empty() {
        let home = tempfile::tempdir().expect("temp dir should be created");
        write_config(&home.path().join(".config"), r##"{"fillColor": "#ffffff"}"##);

        let config = load_editor_config_with(None, Some(home.path()));
        assert_eq!(config.fill_color(), Color::WHITE);
        let config = load_editor_config_with(Some(Path::new("")), Some(home.path()));
        assert_eq!(config.fill_color(), Color::WHITE);
    }

    #[test]
    fn xdg_config_home_takes_precedence_over_home() {
        let xdg = tempfile::tempdir().expect("temp dir should be created");
        let home = tempfile::tempdir().expect("temp dir should be created");
        write_config(xdg.path(), r#"{"regularPolygonSides": 8}"#);
        write_config(&home.path().join(".config"), r#"{"regularPolygonSides": 6}"#);

        let config = load_editor_config_with(Some(xdg.path()), Some(home.path()));
        assert_eq!(config.regular_polygon_sides(), 8);
    }

    #[test]
    fn no_config_directory_yields_defaults() {
        assert_eq!(
            editor_config_path(None, None).expect_err("path should not resolve"),
            ConfigPathError::MissingHomeDirectory
        );
        assert_eq!(load_editor_config_with(None, None), EditorConfig::default());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let root = tempfile::tempdir().expect("temp dir should be created");
        let config = load_editor_config_with(Some(root.path()), None);
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.pen_color(), Color::BLACK);
        assert_eq!(config.fill_color(), Color::TRANSPARENT);
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let root = tempfile::tempdir().expect("temp dir should be created");
        write_config(root.path(), r##"{"penColor": "#ff0000", "penWidth": 50}"##);

        let config = load_editor_config_with(Some(root.path()), None);
        assert_eq!(config.pen_color(), Color::RED);
        assert_eq!(config.pen_width(), MAX_TOOL_PEN_WIDTH);
        assert_eq!(config.regular_polygon_sides(), DEFAULT_SIDES);
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let root = tempfile::tempdir().expect("temp dir should be created");
        write_config(root.path(), "{ not json");

        let config = load_editor_config_with(Some(root.path()), None);
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn invalid_values_are_sanitized() {
        let config = EditorConfig {
            pen_color: "chartreuse".to_string(),
            pen_width: 0,
            regular_polygon_sides: 1,
            simplify_tolerance: -1.0,
            ..EditorConfig::default()
        };
        assert_eq!(config.pen_color(), Color::BLACK);
        assert_eq!(config.pen_width(), MIN_TOOL_PEN_WIDTH);
        assert_eq!(config.regular_polygon_sides(), MIN_SIDES);
        assert_eq!(config.simplify_tolerance(), DEFAULT_SIMPLIFY_TOLERANCE);
    }

    #[test]
    fn oversized_side_count_is_capped() {
        let config = EditorConfig {
            regular_polygon_sides: u32::MAX,
            ..EditorConfig::default()
        };
        assert_eq!(config.regular_polygon_sides(), MAX_SIDES);
    }
}

//! Visual configuration for rendering.
//!
//! [`RenderSettings`] is the optional, partially specified block a figure file
//! may carry. [`RenderConfig`] is the fully resolved form the renderer uses:
//! it starts from fixed defaults and takes only the fields the settings set.

use serde::{Deserialize, Serialize};

use crate::color::{self, Rgb};
use crate::error::ConfigError;
use crate::geometry::Figure;

pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;

/// Render overrides as written in a figure file. Absent fields keep defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    #[serde(alias = "largura_canvas", skip_serializing_if = "Option::is_none")]
    pub canvas_width: Option<u32>,
    #[serde(alias = "altura_canvas", skip_serializing_if = "Option::is_none")]
    pub canvas_height: Option<u32>,

    #[serde(alias = "fundo", skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(alias = "cor_linha", skip_serializing_if = "Option::is_none")]
    pub line_color: Option<String>,
    #[serde(alias = "cor_vertices", skip_serializing_if = "Option::is_none")]
    pub vertex_color: Option<String>,

    #[serde(alias = "espessura_linha", skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,

    #[serde(alias = "mostrar_vertices", skip_serializing_if = "Option::is_none")]
    pub show_vertices: Option<bool>,
    #[serde(alias = "mostrar_nomes", skip_serializing_if = "Option::is_none")]
    pub show_labels: Option<bool>,
}

impl RenderSettings {
    /// Output size in pixels; non-positive or missing dimensions fall back to 800x600
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.canvas_width.filter(|&w| w > 0).unwrap_or(DEFAULT_CANVAS_WIDTH),
            self.canvas_height.filter(|&h| h > 0).unwrap_or(DEFAULT_CANVAS_HEIGHT),
        )
    }
}

/// Fully resolved visual options
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub background: Rgb,
    pub line_color: Rgb,
    pub line_width: f64,
    pub vertex_color: Rgb,
    pub show_vertices: bool,
    pub show_labels: bool,
}

impl Default for RenderConfig {
    /// White paper, thin black lines, dark red vertices, no markers or labels
    fn default() -> Self {
        Self {
            background: Rgb::WHITE,
            line_color: Rgb::BLACK,
            line_width: 1.0,
            vertex_color: Rgb::DARK_RED,
            show_vertices: false,
            show_labels: false,
        }
    }
}

impl RenderConfig {
    /// Apply `settings` over the defaults.
    ///
    /// Empty color strings count as absent. A line width is taken only when
    /// positive. Any color that fails to resolve aborts the whole build.
    pub fn from_settings(settings: Option<&RenderSettings>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let Some(settings) = settings else {
            return Ok(config);
        };

        if let Some(color) = resolve_field("background", &settings.background)? {
            config.background = color;
        }
        if let Some(color) = resolve_field("line", &settings.line_color)? {
            config.line_color = color;
        }
        if let Some(color) = resolve_field("vertex", &settings.vertex_color)? {
            config.vertex_color = color;
        }

        if let Some(width) = settings.line_width.filter(|&w| w > 0.0) {
            config.line_width = width;
        }

        if let Some(show) = settings.show_vertices {
            config.show_vertices = show;
        }
        if let Some(show) = settings.show_labels {
            config.show_labels = show;
        }

        Ok(config)
    }

    /// The configuration a figure asks for through its own render block
    pub fn for_figure(figure: &Figure) -> Result<Self, ConfigError> {
        Self::from_settings(figure.render.as_ref())
    }
}

fn resolve_field(field: &'static str, value: &Option<String>) -> Result<Option<Rgb>, ConfigError> {
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(spec) => color::resolve(spec)
            .map(Some)
            .map_err(|source| ConfigError::Color { field, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColorError;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.background, Rgb::WHITE);
        assert_eq!(config.line_color, Rgb::BLACK);
        assert_eq!(config.line_width, 1.0);
        assert_eq!(config.vertex_color, Rgb::new(0.8, 0.0, 0.0));
        assert!(!config.show_vertices);
        assert!(!config.show_labels);
    }

    #[test]
    fn test_no_settings() {
        assert_eq!(RenderConfig::from_settings(None), Ok(RenderConfig::default()));
        assert_eq!(
            RenderConfig::from_settings(Some(&RenderSettings::default())),
            Ok(RenderConfig::default())
        );
        assert_eq!(
            RenderConfig::for_figure(&Figure::new("plain")),
            Ok(RenderConfig::default())
        );
    }

    #[test]
    fn test_overrides() {
        let settings = RenderSettings {
            background: Some("black".to_string()),
            line_color: Some("#fff".to_string()),
            vertex_color: Some("#00ff00".to_string()),
            line_width: Some(2.5),
            show_vertices: Some(true),
            show_labels: Some(true),
            ..RenderSettings::default()
        };

        let config = RenderConfig::from_settings(Some(&settings)).unwrap();
        assert_eq!(config.background, Rgb::BLACK);
        assert_eq!(config.line_color, Rgb::WHITE);
        assert_eq!(config.vertex_color, Rgb::new(0.0, 1.0, 0.0));
        assert_eq!(config.line_width, 2.5);
        assert!(config.show_vertices);
        assert!(config.show_labels);
    }

    #[test]
    fn test_non_positive_line_width_ignored() {
        for width in [0.0, -3.0] {
            let settings = RenderSettings {
                line_width: Some(width),
                ..RenderSettings::default()
            };
            let config = RenderConfig::from_settings(Some(&settings)).unwrap();
            assert_eq!(config.line_width, 1.0);
        }
    }

    #[test]
    fn test_explicit_false_is_kept() {
        let settings = RenderSettings {
            show_vertices: Some(false),
            show_labels: None,
            ..RenderSettings::default()
        };
        let config = RenderConfig::from_settings(Some(&settings)).unwrap();
        assert!(!config.show_vertices);
        assert!(!config.show_labels);
    }

    #[test]
    fn test_empty_color_is_absent() {
        let settings = RenderSettings {
            background: Some(String::new()),
            ..RenderSettings::default()
        };
        let config = RenderConfig::from_settings(Some(&settings)).unwrap();
        assert_eq!(config.background, Rgb::WHITE);
    }

    #[test]
    fn test_whitespace_color_is_rejected() {
        let settings = RenderSettings {
            background: Some("   ".to_string()),
            ..RenderSettings::default()
        };
        assert_eq!(
            RenderConfig::from_settings(Some(&settings)),
            Err(ConfigError::Color {
                field: "background",
                source: ColorError::Empty,
            })
        );
    }

    #[test]
    fn test_bad_color_names_field() {
        let settings = RenderSettings {
            line_color: Some("#12345".to_string()),
            ..RenderSettings::default()
        };
        let err = RenderConfig::from_settings(Some(&settings)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Color {
                field: "line",
                source: ColorError::InvalidLength {
                    value: "#12345".to_string()
                },
            }
        );
        assert!(err.to_string().contains("line"));
    }

    #[test]
    fn test_canvas_size() {
        assert_eq!(RenderSettings::default().canvas_size(), (800, 600));
        let settings = RenderSettings {
            canvas_width: Some(1024),
            canvas_height: Some(0),
            ..RenderSettings::default()
        };
        assert_eq!(settings.canvas_size(), (1024, 600));
    }
}

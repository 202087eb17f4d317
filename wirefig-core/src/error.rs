//! Error types for figure loading, configuration and rendering

use thiserror::Error;

/// Which end of an edge an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    P1,
    P2,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::P1 => write!(f, "P1"),
            Endpoint::P2 => write!(f, "P2"),
        }
    }
}

/// Structural problems that make a figure unrenderable
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FigureError {
    #[error("figure must have at least one point")]
    NoPoints,

    #[error("figure must have at least one edge")]
    NoEdges,

    #[error("edge {edge} references invalid point {endpoint}: {index} (must be between 0 and {max})")]
    EdgeOutOfRange {
        edge: usize,
        endpoint: Endpoint,
        index: i64,
        max: usize,
    },

    #[error("camera {field} must be a finite non-zero number, got {value}")]
    InvalidCamera { field: &'static str, value: f64 },
}

/// Color strings that could not be resolved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("empty color value")]
    Empty,

    #[error("invalid color format: {value:?} (expected a color name, #rgb or #rrggbb)")]
    InvalidLength { value: String },

    #[error("invalid hex digits in color: {value:?}")]
    InvalidHex { value: String },
}

/// Render settings that could not be turned into a [`crate::RenderConfig`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {field} color: {source}")]
    Color {
        field: &'static str,
        #[source]
        source: ColorError,
    },
}

/// Failures of a single render call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("figure has no points")]
    EmptyFigure,
}

/// Failures while turning a declarative source into a validated figure
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid figure: {0}")]
    Invalid(#[from] FigureError),
}

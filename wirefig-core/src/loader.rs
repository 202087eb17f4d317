//! Figure files: YAML or JSON text to a validated [`Figure`].
//!
//! A figure file looks like:
//!
//! ```yaml
//! name: square
//! points:
//!   - {x: -1, y: 5, z: -1, name: A}
//!   - {x:  1, y: 5, z: -1}
//!   - {x:  1, y: 5, z:  1}
//!   - {x: -1, y: 5, z:  1}
//! edges:
//!   - {p1: 0, p2: 1}
//!   - {p1: 1, p2: 2}
//!   - {p1: 2, p2: 3}
//!   - {p1: 3, p2: 0}
//! camera:
//!   observer: {x: 0, y: 0, z: 0}
//!   distance: 10
//! render:
//!   background: "#fff"
//!   show_vertices: true
//! ```
//!
//! A missing camera, or one with a zero distance, becomes
//! [`Camera::default_view`](crate::Camera::default_view).

use std::path::Path;

use tracing::debug;

use crate::error::LoadError;
use crate::geometry::Figure;

/// Text formats a figure can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// JSON for `.json` files, YAML for everything else
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Parse a figure in the given format, default its camera and validate it
pub fn parse(source: &str, format: Format) -> Result<Figure, LoadError> {
    let figure = match format {
        Format::Yaml => serde_yaml::from_str(source)?,
        Format::Json => serde_json::from_str(source)?,
    };
    finish(figure)
}

pub fn from_yaml_str(source: &str) -> Result<Figure, LoadError> {
    parse(source, Format::Yaml)
}

pub fn from_json_str(source: &str) -> Result<Figure, LoadError> {
    parse(source, Format::Json)
}

fn finish(mut figure: Figure) -> Result<Figure, LoadError> {
    figure.apply_default_camera();
    figure.validate()?;

    debug!(
        figure = %figure.name,
        points = figure.points.len(),
        edges = figure.edges.len(),
        "loaded figure"
    );
    Ok(figure)
}

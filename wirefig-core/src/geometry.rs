/// Figure primitives: vertices, edges and the figure that owns them
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::config::RenderSettings;
use crate::error::{Endpoint, FigureError};
use crate::projection::Camera;

/// A 3D vertex in world space.
///
/// X is horizontal, Y is depth (distance from the observer) and Z is vertical.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default, alias = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            name: None,
        }
    }

    pub fn named(x: f64, y: f64, z: f64, name: impl Into<String>) -> Self {
        Self {
            x,
            y,
            z,
            name: Some(name.into()),
        }
    }

    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    /// The display name, if the vertex has a non-empty one
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// A segment between two vertices, by index into [`Figure::points`].
///
/// Indices are signed so a negative value in a figure file reaches the
/// validator instead of failing as a type error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub p1: i64,
    pub p2: i64,
}

impl Edge {
    pub fn new(p1: i64, p2: i64) -> Self {
        Self { p1, p2 }
    }

    /// Both endpoints, if they index into a list of `len` points
    pub fn endpoints(&self, len: usize) -> Option<(usize, usize)> {
        let index = |i: i64| usize::try_from(i).ok().filter(|&i| i < len);
        Some((index(self.p1)?, index(self.p2)?))
    }
}

/// A wireframe figure: vertices, the edges joining them and how to look at them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    #[serde(default, alias = "nome")]
    pub name: String,
    #[serde(default, alias = "pontos")]
    pub points: Vec<Point3D>,
    #[serde(default, alias = "linhas")]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub camera: Camera,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderSettings>,
}

impl Figure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            camera: Camera::default_view(),
            ..Self::default()
        }
    }

    /// Append a vertex and return its index
    pub fn add_point(&mut self, point: Point3D) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    pub fn add_edge(&mut self, p1: i64, p2: i64) {
        self.edges.push(Edge::new(p1, p2));
    }

    /// Swap in the default camera when no projection distance was given
    pub fn apply_default_camera(&mut self) {
        if self.camera.is_unset() {
            self.camera = Camera::default_view();
        }
    }

    /// Check the structural invariants every figure must satisfy before rendering.
    ///
    /// Violations are reported in order: missing points, missing edges, the first
    /// edge with an out-of-range endpoint, then a zero or non-finite camera parameter.
    pub fn validate(&self) -> Result<(), FigureError> {
        if self.points.is_empty() {
            return Err(FigureError::NoPoints);
        }
        if self.edges.is_empty() {
            return Err(FigureError::NoEdges);
        }

        let max = self.points.len() - 1;
        for (edge, line) in self.edges.iter().enumerate() {
            for (endpoint, index) in [(Endpoint::P1, line.p1), (Endpoint::P2, line.p2)] {
                if usize::try_from(index).map_or(true, |i| i > max) {
                    return Err(FigureError::EdgeOutOfRange {
                        edge,
                        endpoint,
                        index,
                        max,
                    });
                }
            }
        }

        self.camera.validate()
    }

    /// A cube centred in front of the default observer, corners named A to H
    pub fn cube(size: f64) -> Self {
        let half = size / 2.0;
        let depth = 5.0;
        let mut figure = Self::new("cube");

        let corners = [
            ("A", -half, -half),
            ("B", half, -half),
            ("C", half, half),
            ("D", -half, half),
        ];
        for (offset, suffix) in [(-half, ""), (half, "'")] {
            for (name, x, z) in corners {
                figure.add_point(Point3D::named(x, depth + offset, z, format!("{name}{suffix}")));
            }
        }

        for i in 0..4 {
            // Front face, back face, then the connecting edges
            figure.add_edge(i, (i + 1) % 4);
            figure.add_edge(i + 4, (i + 1) % 4 + 4);
            figure.add_edge(i, i + 4);
        }

        figure
    }
}

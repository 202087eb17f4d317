/// Camera and conic-perspective projection
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::FigureError;
use crate::geometry::Point3D;

/// A projected point in screen pixels, origin at the top-left corner
pub type Point2D = Point2<f64>;

/// Depths at or below this are replaced by it before dividing
pub const MIN_DEPTH: f64 = 0.1;

pub const DEFAULT_DISTANCE: f64 = 10.0;
pub const DEFAULT_SCREEN_WIDTH: f64 = 12.8;
pub const DEFAULT_SCREEN_HEIGHT: f64 = 9.6;

/// Observer and virtual screen used to project a figure.
///
/// `distance` is the distance R from the observer to the projection plane;
/// smaller values exaggerate perspective. `width` and `height` (L1, L2) give
/// the extent of the projection plane in world units and set the scale from
/// world units to pixels.
///
/// `Camera::default()` is the *unset* camera (zero distance) that a figure
/// file without camera settings deserializes into; see [`Camera::default_view`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    #[serde(alias = "observador")]
    pub observer: Point3D,
    #[serde(alias = "distancia")]
    pub distance: f64,
    #[serde(alias = "largura")]
    pub width: f64,
    #[serde(alias = "altura")]
    pub height: f64,
}

impl Camera {
    pub fn new(observer: Point3D, distance: f64, width: f64, height: f64) -> Self {
        Self {
            observer,
            distance,
            width,
            height,
        }
    }

    /// Observer at the origin, distance 10 and a 4:3 virtual screen of 12.8 x 9.6
    pub fn default_view() -> Self {
        Self::new(
            Point3D::new(0.0, 0.0, 0.0),
            DEFAULT_DISTANCE,
            DEFAULT_SCREEN_WIDTH,
            DEFAULT_SCREEN_HEIGHT,
        )
    }

    /// A zero distance means no camera was configured
    pub fn is_unset(&self) -> bool {
        self.distance == 0.0
    }

    /// Same camera with the observer moved to `(x, y, z)`
    pub fn with_observer(&self, x: f64, y: f64, z: f64) -> Self {
        Self {
            observer: Point3D::new(x, y, z),
            ..self.clone()
        }
    }

    pub fn with_distance(&self, distance: f64) -> Self {
        Self {
            distance,
            ..self.clone()
        }
    }

    /// Reject values that would make the projection divide by zero or yield NaN.
    /// Negative values are allowed and mirror the picture.
    pub(crate) fn validate(&self) -> Result<(), FigureError> {
        if !self.distance.is_finite() {
            return Err(FigureError::InvalidCamera {
                field: "distance",
                value: self.distance,
            });
        }
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value == 0.0 {
                return Err(FigureError::InvalidCamera { field, value });
            }
        }
        Ok(())
    }

    /// Project a world-space point onto a `screen_width` x `screen_height` raster.
    ///
    /// World Y is depth and world Z is the vertical axis. Points at or behind
    /// the observer are not clipped: their depth is clamped to [`MIN_DEPTH`],
    /// which yields an extreme but finite position.
    pub fn project(&self, point: &Point3D, screen_width: u32, screen_height: u32) -> Point2D {
        let offset = point.position() - self.observer.position();
        let px = offset.x;
        let py = offset.z;
        let mut pz = offset.y;

        if pz <= MIN_DEPTH {
            pz = MIN_DEPTH;
        }

        let proj_x = px * self.distance / pz;
        let proj_y = py * self.distance / pz;

        let (screen_width, screen_height) = (f64::from(screen_width), f64::from(screen_height));
        let scale_x = screen_width / self.width;
        let scale_y = screen_height / self.height;

        // Screen Y grows downward
        Point2D::new(
            screen_width / 2.0 + proj_x * scale_x,
            screen_height / 2.0 - proj_y * scale_y,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            distance: 0.0,
            ..Self::default_view()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera::default_view()
    }

    #[test]
    fn test_default_view() {
        let camera = Camera::default_view();
        assert_eq!(camera.observer, Point3D::new(0.0, 0.0, 0.0));
        assert_eq!(camera.distance, 10.0);
        assert!((camera.width / camera.height - 4.0 / 3.0).abs() < 1e-9);
        assert!(!camera.is_unset());
        assert!(Camera::default().is_unset());
    }

    #[test]
    fn test_centered_point_at_screen_center() {
        let p = camera().project(&Point3D::new(0.0, 10.0, 0.0), 800, 600);
        assert_relative_eq!(p.x, 400.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 300.0, epsilon = 1e-9);

        let p = camera().project(&Point3D::new(0.0, 5.0, 0.0), 800, 600);
        assert_relative_eq!(p.x, 400.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_perspective_formula() {
        // px = 2, py = 1, pz = 5: plane coords (4, 2), 62.5 px per unit
        let p = camera().project(&Point3D::new(2.0, 5.0, 1.0), 800, 600);
        assert_relative_eq!(p.x, 650.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 175.0, epsilon = 1e-9);
    }

    #[test]
    fn test_right_and_up() {
        let right = camera().project(&Point3D::new(1.0, 5.0, 0.0), 800, 600);
        assert_relative_eq!(right.x, 525.0, epsilon = 1e-9);
        assert_relative_eq!(right.y, 300.0, epsilon = 1e-9);

        let up = camera().project(&Point3D::new(0.0, 5.0, 1.0), 800, 600);
        assert_relative_eq!(up.x, 400.0, epsilon = 1e-9);
        assert_relative_eq!(up.y, 175.0, epsilon = 1e-9);
    }

    #[test]
    fn test_observer_offset() {
        let moved = camera().with_observer(1.0, -5.0, 1.0);
        let a = moved.project(&Point3D::new(3.0, 5.0, 2.0), 800, 600);
        let b = camera().project(&Point3D::new(2.0, 10.0, 1.0), 800, 600);
        assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
    }

    #[test]
    fn test_linear_in_distance() {
        let point = Point3D::new(1.5, 4.0, -0.75);
        let near = camera().project(&point, 800, 600);
        let far = camera().with_distance(20.0).project(&point, 800, 600);

        assert_relative_eq!(far.x - 400.0, 2.0 * (near.x - 400.0), epsilon = 1e-9);
        assert_relative_eq!(far.y - 300.0, 2.0 * (near.y - 300.0), epsilon = 1e-9);
    }

    #[test]
    fn test_behind_observer_is_finite() {
        for depth in [0.1, 0.0, -1.0, -1e6] {
            let p = camera().project(&Point3D::new(1.0, depth, 1.0), 800, 600);
            assert!(p.x.is_finite() && p.y.is_finite());
            // Everything at or behind the clamp lands on the same spot
            assert_relative_eq!(p.x, 400.0 + 100.0 * 62.5, epsilon = 1e-6);
            assert_relative_eq!(p.y, 300.0 - 100.0 * 62.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_independent_axis_scales() {
        let wide = Camera::new(Point3D::new(0.0, 0.0, 0.0), 10.0, 20.0, 5.0);
        let p = wide.project(&Point3D::new(1.0, 10.0, 1.0), 400, 400);
        assert_relative_eq!(p.x, 200.0 + 20.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 200.0 - 80.0, epsilon = 1e-9);
    }

    #[test]
    fn test_validate() {
        assert!(camera().validate().is_ok());
        assert!(camera().with_distance(-1.0).validate().is_ok());
        assert!(camera().with_distance(f64::INFINITY).validate().is_err());
        let mut zero = camera();
        zero.width = 0.0;
        assert!(matches!(
            zero.validate(),
            Err(FigureError::InvalidCamera { field: "width", .. })
        ));
        let mut bad = camera();
        bad.height = f64::NAN;
        assert!(matches!(
            bad.validate(),
            Err(FigureError::InvalidCamera { field: "height", .. })
        ));
    }
}

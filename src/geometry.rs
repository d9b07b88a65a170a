//! Geometric primitives for chart layout and 3D projection.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if a point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Get the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A point in 3D data space, normalized to the unit cube before projection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Point3 {
    /// Create a new 3D point.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Orthographic camera looking at the origin.
///
/// `azimuth` rotates around the vertical (z) axis, `elevation` tilts the
/// camera above the x/y plane. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    azimuth: f32,
    elevation: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(-50.0, 25.0)
    }
}

impl Projection {
    /// Create a projection from camera angles in degrees.
    #[must_use]
    pub fn new(azimuth: f32, elevation: f32) -> Self {
        Self {
            azimuth,
            elevation: elevation.clamp(-90.0, 90.0),
        }
    }

    /// Project a point to screen-space coordinates plus depth.
    ///
    /// The returned `Point` is in camera units (y up); depth grows away from
    /// the viewer so callers can paint far points first.
    #[must_use]
    pub fn project(&self, p: Point3) -> (Point, f32) {
        let (sa, ca) = self.azimuth.to_radians().sin_cos();
        let (se, ce) = self.elevation.to_radians().sin_cos();

        // rotate around z
        let xr = p.x * ca - p.y * sa;
        let yr = p.x * sa + p.y * ca;

        // tilt around the screen x axis
        let screen_y = p.z * ce - yr * se;
        let depth = yr * ce + p.z * se;

        (Point::new(xr, screen_y), depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert!((p1.distance(p2) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(5.0, 5.0)));
        assert!(!rect.contains(Point::new(15.0, 5.0)));
        assert_relative_eq!(rect.right(), 10.0);
        assert_relative_eq!(rect.center().y, 5.0);
    }

    #[test]
    fn test_projection_front_view() {
        let proj = Projection::new(0.0, 0.0);
        let (p, depth) = proj.project(Point3::new(1.0, 0.0, 0.5));
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.5, epsilon = 1e-6);
        assert_relative_eq!(depth, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_projection_top_view_flattens_z() {
        let proj = Projection::new(0.0, 90.0);
        let (a, _) = proj.project(Point3::new(0.3, 0.2, 0.0));
        let (b, _) = proj.project(Point3::new(0.3, 0.2, 1.0));
        assert_relative_eq!(a.x, b.x, epsilon = 1e-6);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-6);
    }

    #[test]
    fn test_elevation_clamped() {
        assert_eq!(Projection::new(0.0, 120.0), Projection::new(0.0, 90.0));
    }
}

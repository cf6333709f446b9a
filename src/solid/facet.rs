use crate::math::{Point3, Vector3, TOLERANCE};

/// An oriented plane `normal · p = w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal pointing out of the solid.
    pub normal: Vector3,
    pub w: f64,
}

impl Plane {
    /// Fits a plane to a polygon using Newell's method.
    ///
    /// Returns `None` when the polygon has no area.
    #[must_use]
    pub fn from_polygon(points: &[Point3]) -> Option<Self> {
        let normal = newell_normal(points);
        let len = normal.norm();
        if len < TOLERANCE {
            return None;
        }
        let normal = normal / len;
        Some(Self {
            normal,
            w: normal.dot(&points[0].coords),
        })
    }

    /// Signed distance from the plane, positive on the normal side.
    #[must_use]
    pub fn distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&p.coords) - self.w
    }

    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            w: -self.w,
        }
    }
}

/// Unnormalized polygon normal from Newell's method. Its length is twice the
/// polygon area.
#[must_use]
pub fn newell_normal(points: &[Point3]) -> Vector3 {
    let n = points.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let cur = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (cur.y - next.y) * (cur.z + next.z);
        normal.y += (cur.z - next.z) * (cur.x + next.x);
        normal.z += (cur.x - next.x) * (cur.y + next.y);
    }
    normal
}

/// A convex planar polygon on the boundary of a solid, wound
/// counter-clockwise when seen from outside.
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    pub vertices: Vec<Point3>,
    pub plane: Plane,
}

impl Facet {
    /// Builds a facet, or returns `None` for fewer than three vertices or a
    /// zero-area polygon.
    #[must_use]
    pub fn new(vertices: Vec<Point3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_polygon(&vertices)?;
        Some(Self { vertices, plane })
    }

    /// Builds a facet that lies on a known plane, as split pieces do.
    #[must_use]
    pub fn on_plane(vertices: Vec<Point3>, plane: Plane) -> Self {
        Self { vertices, plane }
    }

    /// Reverses the orientation.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane = self.plane.flipped();
    }

    /// Area of the facet.
    #[must_use]
    pub fn area(&self) -> f64 {
        newell_normal(&self.vertices).norm() * 0.5
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn counter_clockwise_square_faces_up() {
        let facet = Facet::new(vec![
            p(0.0, 0.0, 2.0),
            p(1.0, 0.0, 2.0),
            p(1.0, 1.0, 2.0),
            p(0.0, 1.0, 2.0),
        ])
        .unwrap();
        assert_relative_eq!(facet.plane.normal, Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(facet.plane.w, 2.0, epsilon = 1e-12);
        assert_relative_eq!(facet.area(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn collinear_points_are_rejected() {
        assert!(Facet::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]).is_none());
        assert!(Facet::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]).is_none());
    }

    #[test]
    fn flip_reverses_plane() {
        let mut facet =
            Facet::new(vec![p(0.0, 0.0, 1.0), p(1.0, 0.0, 1.0), p(0.0, 1.0, 1.0)]).unwrap();
        facet.flip();
        assert_relative_eq!(facet.plane.normal, -Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(facet.plane.distance(&p(0.0, 0.0, 3.0)), -2.0, epsilon = 1e-12);
    }
}

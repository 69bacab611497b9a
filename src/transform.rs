//! Inverse stereographic projection from the north pole of the unit sphere.

use cgmath::{InnerSpace, Point2, Point3};

pub const NORTH_POLE: Point3<f64> = Point3 {
    x: 0.0,
    y: 0.0,
    z: 1.0,
};
pub const SOUTH_POLE: Point3<f64> = Point3 {
    x: 0.0,
    y: 0.0,
    z: -1.0,
};

/// Maps a plane point onto the unit sphere.
///
/// The origin lands on the south pole and points far from the origin approach
/// the north pole, which is never reached for finite input.
pub fn project(u: f64, v: f64) -> Point3<f64> {
    let r2 = u * u + v * v;
    let denominator = r2 + 1.0;
    Point3::new(
        (2.0 * u) / denominator,
        (2.0 * v) / denominator,
        (r2 - 1.0) / denominator,
    )
}

/// Local area scaling of the projection at `(u, v)`: `(2 / (u² + v² + 1))²`.
pub fn distortion(u: f64, v: f64) -> f64 {
    let r2 = u * u + v * v;
    (2.0 / (r2 + 1.0)).powi(2)
}

/// Stereographic projection from the north pole back onto the z = 0 plane.
/// Returns `None` at the north pole itself.
pub fn unproject(point: Point3<f64>) -> Option<Point2<f64>> {
    let denominator = 1.0 - point.z;
    if denominator.abs() < f64::EPSILON {
        return None;
    }
    Some(Point2::new(point.x / denominator, point.y / denominator))
}

/// Distance from `sphere` to the line through the north pole and `(u, v, 0)`.
pub fn ray_offset(plane: Point2<f64>, sphere: Point3<f64>) -> f64 {
    let direction = Point3::new(plane.x, plane.y, 0.0) - NORTH_POLE;
    let to_point = sphere - NORTH_POLE;
    // |a x b| / |a|; direction is never zero because its z component is -1
    direction.cross(to_point).magnitude() / direction.magnitude()
}

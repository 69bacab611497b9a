use cgmath::{Point2, Point3};

use crate::transform;

/// `n` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // avoid accumulated rounding on the endpoint
            values[n - 1] = stop;
            values
        }
    }
}

/// Plane points and their images on the sphere, index aligned.
pub struct ProjectionGrid {
    plane: Vec<Point2<f64>>,
    sphere: Vec<Point3<f64>>,
}

impl ProjectionGrid {
    /// Square grid over `[-extent, extent]²` flattened row by row: `u` follows
    /// the column, `v` the row.
    pub fn new(resolution: usize, extent: f64) -> Self {
        let axis = linspace(-extent, extent, resolution);
        let plane: Vec<Point2<f64>> = axis
            .iter()
            .flat_map(|&v| axis.iter().map(move |&u| Point2::new(u, v)))
            .collect();
        let sphere = plane.iter().map(|p| transform::project(p.x, p.y)).collect();

        Self { plane, sphere }
    }

    pub fn len(&self) -> usize {
        self.plane.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plane.is_empty()
    }

    pub fn plane_points(&self) -> &[Point2<f64>] {
        &self.plane
    }

    pub fn sphere_points(&self) -> &[Point3<f64>] {
        &self.sphere
    }

    pub fn plane(&self, index: usize) -> Point2<f64> {
        self.plane[index]
    }

    pub fn sphere(&self, index: usize) -> Point3<f64> {
        self.sphere[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_endpoints() {
        let axis = linspace(-3.0, 3.0, 15);
        assert_eq!(axis.len(), 15);
        assert_eq!(axis[0], -3.0);
        assert_eq!(axis[14], 3.0);
        assert!(axis[7].abs() < 1e-12);
        assert!((axis[1] - axis[0] - 6.0 / 14.0).abs() < 1e-12);
    }

    #[test]
    fn linspace_degenerate_sizes() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert_eq!(linspace(0.0, 1.0, 2), vec![0.0, 1.0]);
    }

    #[test]
    fn grid_has_resolution_squared_points() {
        let grid = ProjectionGrid::new(15, 3.0);
        assert_eq!(grid.len(), 225);
        assert_eq!(grid.plane_points().len(), grid.sphere_points().len());
        assert!(!grid.is_empty());
    }

    #[test]
    fn grid_is_flattened_row_major() {
        let grid = ProjectionGrid::new(15, 3.0);
        assert_eq!(grid.plane(0), Point2::new(-3.0, -3.0));
        assert_eq!(grid.plane(14), Point2::new(3.0, -3.0));
        assert_eq!(grid.plane(15).y, grid.plane(16).y);
        assert_eq!(grid.plane(224), Point2::new(3.0, 3.0));

        let center = grid.plane(7 * 15 + 7);
        assert!(center.x.abs() < 1e-12 && center.y.abs() < 1e-12);
    }

    #[test]
    fn sphere_points_are_projected_plane_points() {
        let grid = ProjectionGrid::new(15, 3.0);
        for i in 0..grid.len() {
            let p = grid.plane(i);
            let expected = transform::project(p.x, p.y);
            let actual = grid.sphere(i);
            assert!((expected.x - actual.x).abs() < 1e-12);
            assert!((expected.y - actual.y).abs() < 1e-12);
            assert!((expected.z - actual.z).abs() < 1e-12);
        }
    }

    #[test]
    fn grid_never_reaches_north_pole() {
        let grid = ProjectionGrid::new(15, 3.0);
        assert!(grid.sphere_points().iter().all(|p| p.z < 1.0));
    }
}

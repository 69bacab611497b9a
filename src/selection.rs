use std::fmt;

use cgmath::{Point2, Point3};

use crate::{grid::ProjectionGrid, transform};

/// Where the interaction handler draws the projection ray.
///
/// Handles are returned for every drawn artifact so the handler can remove
/// them again on the next selection.
pub trait RayCanvas {
    type Handle;

    fn draw_ray(&mut self, from: Point3<f64>, to: Point3<f64>) -> Self::Handle;
    fn draw_highlight(&mut self, at: Point3<f64>) -> Self::Handle;
    fn remove(&mut self, handle: Self::Handle);
    fn request_redraw(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistortionNote {
    Low,
    High,
}

impl DistortionNote {
    pub fn classify(u: f64, threshold: f64) -> Self {
        if u.abs() < threshold {
            DistortionNote::Low
        } else {
            DistortionNote::High
        }
    }
}

impl fmt::Display for DistortionNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistortionNote::Low => write!(f, ">> Note: Near South Pole/Origin. Little distortion."),
            DistortionNote::High => write!(
                f,
                ">> Note: Far from center. High distortion! (Notice the ray slope)"
            ),
        }
    }
}

/// Everything reported about one selected point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub index: usize,
    pub plane: Point2<f64>,
    pub sphere: Point3<f64>,
    pub distortion: f64,
    pub note: DistortionNote,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Point Selected: Index {} ---", self.index)?;
        writeln!(f, "Plane Coord (u,v): ({:.2}, {:.2})", self.plane.x, self.plane.y)?;
        writeln!(
            f,
            "Sphere Coord (x,y,z): ({:.2}, {:.2}, {:.2})",
            self.sphere.x, self.sphere.y, self.sphere.z
        )?;
        writeln!(f, "Jacobian Factor (Density Correction): {:.4}", self.distortion)?;
        write!(f, "{}", self.note)
    }
}

#[derive(Debug, PartialEq)]
pub struct RayArtifacts<H> {
    pub ray: H,
    pub highlight: H,
}

pub struct SelectionHandler<H> {
    grid: ProjectionGrid,
    low_distortion_threshold: f64,
    current_ray: Option<RayArtifacts<H>>,
}

impl<H> SelectionHandler<H> {
    pub fn new(grid: ProjectionGrid, low_distortion_threshold: f64) -> Self {
        Self {
            grid,
            low_distortion_threshold,
            current_ray: None,
        }
    }

    pub fn grid(&self) -> &ProjectionGrid {
        &self.grid
    }

    pub fn current_ray(&self) -> Option<&RayArtifacts<H>> {
        self.current_ray.as_ref()
    }

    /// Replaces the drawn ray with the one through the point at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is not a valid grid index. The picker only reports indices
    /// of points it was given, so this is a caller bug.
    pub fn on_select<C>(&mut self, index: usize, canvas: &mut C) -> Selection
    where
        C: RayCanvas<Handle = H>,
    {
        let plane = self.grid.plane(index);
        let sphere = self.grid.sphere(index);
        let selection = Selection {
            index,
            plane,
            sphere,
            distortion: transform::distortion(plane.x, plane.y),
            note: DistortionNote::classify(plane.x, self.low_distortion_threshold),
        };

        if let Some(previous) = self.current_ray.take() {
            tracing::debug!(index, "removing previous projection ray");
            canvas.remove(previous.ray);
            canvas.remove(previous.highlight);
        }

        let target = Point3::new(plane.x, plane.y, 0.0);
        tracing::debug!(
            offset = transform::ray_offset(plane, sphere),
            "sphere point distance from projection ray"
        );
        self.current_ray = Some(RayArtifacts {
            ray: canvas.draw_ray(transform::NORTH_POLE, target),
            highlight: canvas.draw_highlight(target),
        });
        canvas.request_redraw();

        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Ray(usize, Point3<f64>, Point3<f64>),
        Highlight(usize, Point3<f64>),
        Remove(usize),
        Redraw,
    }

    #[derive(Default)]
    struct RecordingCanvas {
        next_handle: usize,
        live: Vec<usize>,
        ops: Vec<Op>,
    }

    impl RecordingCanvas {
        fn allocate(&mut self) -> usize {
            let handle = self.next_handle;
            self.next_handle += 1;
            self.live.push(handle);
            handle
        }
    }

    impl RayCanvas for RecordingCanvas {
        type Handle = usize;

        fn draw_ray(&mut self, from: Point3<f64>, to: Point3<f64>) -> usize {
            let handle = self.allocate();
            self.ops.push(Op::Ray(handle, from, to));
            handle
        }

        fn draw_highlight(&mut self, at: Point3<f64>) -> usize {
            let handle = self.allocate();
            self.ops.push(Op::Highlight(handle, at));
            handle
        }

        fn remove(&mut self, handle: usize) {
            self.live.retain(|&h| h != handle);
            self.ops.push(Op::Remove(handle));
        }

        fn request_redraw(&mut self) {
            self.ops.push(Op::Redraw);
        }
    }

    fn handler() -> SelectionHandler<usize> {
        SelectionHandler::new(ProjectionGrid::new(15, 3.0), 0.5)
    }

    const ORIGIN_INDEX: usize = 7 * 15 + 7;
    const CORNER_INDEX: usize = 224;

    #[test]
    fn classify_uses_absolute_u() {
        assert_eq!(DistortionNote::classify(0.4, 0.5), DistortionNote::Low);
        assert_eq!(DistortionNote::classify(-0.4, 0.5), DistortionNote::Low);
        assert_eq!(DistortionNote::classify(0.6, 0.5), DistortionNote::High);
        assert_eq!(DistortionNote::classify(-0.6, 0.5), DistortionNote::High);
        assert_eq!(DistortionNote::classify(0.5, 0.5), DistortionNote::High);
    }

    #[test]
    fn selecting_origin_reports_south_pole() {
        let mut handler = handler();
        let mut canvas = RecordingCanvas::default();
        let selection = handler.on_select(ORIGIN_INDEX, &mut canvas);

        assert_eq!(selection.index, ORIGIN_INDEX);
        assert!(selection.sphere.x.abs() < 1e-12);
        assert!(selection.sphere.y.abs() < 1e-12);
        assert!((selection.sphere.z + 1.0).abs() < 1e-12);
        assert_eq!(format!("{:.4}", selection.distortion), "4.0000");
        assert_eq!(selection.note, DistortionNote::Low);
    }

    #[test]
    fn selecting_corner_reports_high_distortion() {
        let mut handler = handler();
        let mut canvas = RecordingCanvas::default();
        let selection = handler.on_select(CORNER_INDEX, &mut canvas);

        assert_eq!(selection.plane, Point2::new(3.0, 3.0));
        assert!((selection.sphere.x - 6.0 / 19.0).abs() < 1e-12);
        assert!((selection.sphere.y - 6.0 / 19.0).abs() < 1e-12);
        assert!((selection.sphere.z - 17.0 / 19.0).abs() < 1e-12);
        assert_eq!(format!("{:.4}", selection.sphere.z), "0.8947");
        assert_eq!(format!("{:.4}", selection.distortion), "0.0111");
        assert_eq!(selection.note, DistortionNote::High);
    }

    #[test]
    fn first_selection_draws_ray_then_highlight_then_redraws() {
        let mut handler = handler();
        let mut canvas = RecordingCanvas::default();
        handler.on_select(CORNER_INDEX, &mut canvas);

        let target = Point3::new(3.0, 3.0, 0.0);
        assert_eq!(
            canvas.ops,
            vec![
                Op::Ray(0, transform::NORTH_POLE, target),
                Op::Highlight(1, target),
                Op::Redraw,
            ]
        );
        assert_eq!(
            handler.current_ray(),
            Some(&RayArtifacts {
                ray: 0,
                highlight: 1
            })
        );
    }

    #[test]
    fn next_selection_removes_previous_ray_before_drawing() {
        let mut handler = handler();
        let mut canvas = RecordingCanvas::default();
        handler.on_select(CORNER_INDEX, &mut canvas);
        canvas.ops.clear();

        handler.on_select(ORIGIN_INDEX, &mut canvas);

        assert_eq!(&canvas.ops[..2], &[Op::Remove(0), Op::Remove(1)]);
        assert!(matches!(canvas.ops[2], Op::Ray(2, _, _)));
        assert!(matches!(canvas.ops[3], Op::Highlight(3, _)));
        assert_eq!(canvas.ops[4], Op::Redraw);
        assert_eq!(canvas.live, vec![2, 3]);
    }

    #[test]
    fn reselecting_same_point_keeps_single_ray() {
        let mut handler = handler();
        let mut canvas = RecordingCanvas::default();
        for _ in 0..3 {
            handler.on_select(ORIGIN_INDEX, &mut canvas);
        }
        assert_eq!(canvas.live.len(), 2);
    }

    #[test]
    fn report_matches_expected_text() {
        let mut handler = handler();
        let mut canvas = RecordingCanvas::default();
        let report = handler.on_select(ORIGIN_INDEX, &mut canvas).to_string();

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "--- Point Selected: Index 112 ---");
        assert_eq!(lines[3], "Jacobian Factor (Density Correction): 4.0000");
        assert_eq!(
            lines[4],
            ">> Note: Near South Pole/Origin. Little distortion."
        );
        assert!(lines[2].starts_with("Sphere Coord (x,y,z): ("));
        assert!(lines[2].ends_with("-1.00)"));
    }

    #[test]
    #[should_panic]
    fn out_of_range_index_panics() {
        let mut handler = handler();
        let mut canvas = RecordingCanvas::default();
        handler.on_select(225, &mut canvas);
    }
}

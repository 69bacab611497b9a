use cgmath::{InnerSpace, Matrix4, Point3, Vector2};

pub struct PickingSystem {}

impl PickingSystem {
    /// Projects `point` into window pixel coordinates, origin at the top left.
    /// Returns `None` for points behind the camera.
    pub fn world_to_screen(
        view_proj_matrix: Matrix4<f32>,
        screen_width: f32,
        screen_height: f32,
        point: Point3<f32>,
    ) -> Option<Vector2<f32>> {
        let clip = view_proj_matrix * point.to_homogeneous();
        if clip.w <= 0.0 {
            return None;
        }

        // Convert from homogeneous to normalized device coordinates
        let ndc = clip.truncate() / clip.w;
        Some(Vector2::new(
            (ndc.x + 1.0) * 0.5 * screen_width,
            (1.0 - ndc.y) * 0.5 * screen_height,
        ))
    }

    /// Index of the point drawn closest to the cursor, if any lies within
    /// `tolerance` pixels of it.
    pub fn pick_nearest<I>(
        points: I,
        view_proj_matrix: Matrix4<f32>,
        screen_width: f32,
        screen_height: f32,
        cursor: Vector2<f32>,
        tolerance: f32,
    ) -> Option<usize>
    where
        I: IntoIterator<Item = (usize, Point3<f32>)>,
    {
        let mut best = None;
        let mut best_dist = tolerance;
        for (index, point) in points {
            let Some(screen) = PickingSystem::world_to_screen(
                view_proj_matrix,
                screen_width,
                screen_height,
                point,
            ) else {
                continue;
            };
            let dist = (screen - cursor).magnitude();
            if dist <= best_dist {
                best_dist = dist;
                best = Some(index);
            }
        }
        best
    }
}

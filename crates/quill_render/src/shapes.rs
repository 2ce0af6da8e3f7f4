use std::f32::consts::TAU;

use glam::{Vec2, Vec3, vec3};

use crate::{
    Color, Error, Result,
    camera::Camera,
    device::{DeviceHandle, IndexedDraw, Shading, Transform},
    geometry_batch::GeometryBatch,
    math::rotate,
    vertex::Vertex,
};

/// Border thickness used by [`FillMode::border`]
pub const DEFAULT_THICKNESS: f32 = 2.0;

/// Whether a shape is drawn solid or as an outline of lines
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FillMode {
    #[default]
    Filled,
    /// Outline; `thickness` is in pixels at zoom factor 1
    Border { thickness: f32 },
}

impl FillMode {
    /// Outline with [`DEFAULT_THICKNESS`]
    pub const fn border() -> Self {
        FillMode::Border {
            thickness: DEFAULT_THICKNESS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchState {
    Idle,
    Batching,
}

/// Immediate-mode batcher for colored 2D shapes
///
/// Shapes accumulate into fixed-size buffers between [`Shapes::begin`] & [`Shapes::end`].
/// When a shape doesn't fit in the remaining room the batch is flushed first, so
/// only a shape larger than the whole buffer is an error
pub struct Shapes {
    device: DeviceHandle,
    batch: GeometryBatch,
    shape_count: usize,
    state: BatchState,
    transform: Transform,
    zoom_factor: f32,
}

impl Shapes {
    pub const MAX_VERTICES: usize = 2048;
    pub const MAX_INDICES: usize = Self::MAX_VERTICES * 3;

    pub fn new(device: DeviceHandle) -> Self {
        Self {
            device,
            batch: GeometryBatch::new(Self::MAX_VERTICES, Self::MAX_INDICES),
            shape_count: 0,
            state: BatchState::Idle,
            transform: Transform::IDENTITY,
            zoom_factor: 1.0,
        }
    }

    /// Starts a batch
    ///
    /// With a camera its matrices are refreshed & used, and line thickness follows its
    /// zoom. Without one, shapes are positioned in pixels of the current render
    /// destination with the origin at the bottom-left
    pub fn begin(&mut self, camera: Option<&mut Camera>) -> Result<()> {
        if self.state == BatchState::Batching {
            return Err(Error::AlreadyBatching);
        }

        match camera {
            Some(camera) => {
                camera.update_matrices();
                self.transform = camera.transform();
                self.zoom_factor = camera.zoom_factor();
            }
            None => {
                let (w, h) = self.device.borrow().viewport_size();
                self.transform = Transform::pixel_space(w, h);
                self.zoom_factor = 1.0;
            }
        }

        self.state = BatchState::Batching;
        Ok(())
    }

    /// Flushes whatever is left & ends the batch
    pub fn end(&mut self) -> Result<()> {
        self.flush()?;
        self.state = BatchState::Idle;
        Ok(())
    }

    /// Submits all accumulated shapes as one draw call & empties the buffers
    pub fn flush(&mut self) -> Result<()> {
        self.ensure_batching()?;
        if self.batch.is_empty() {
            return Ok(());
        }

        log::trace!(
            "submitting {} shapes ({} vertices, {} indices)",
            self.shape_count,
            self.batch.vertex_count(),
            self.batch.index_count()
        );
        self.device.borrow_mut().draw_indexed(IndexedDraw {
            vertices: self.batch.vertices(),
            indices: self.batch.indices(),
            transform: self.transform,
            shading: Shading::VertexColor,
        });

        self.batch.clear();
        self.shape_count = 0;
        Ok(())
    }

    pub fn is_batching(&self) -> bool {
        self.state == BatchState::Batching
    }

    pub fn shape_count(&self) -> usize {
        self.shape_count
    }

    pub fn vertex_count(&self) -> usize {
        self.batch.vertex_count()
    }

    pub fn index_count(&self) -> usize {
        self.batch.index_count()
    }

    /// Vertices accumulated since the last flush
    pub fn vertices(&self) -> &[Vertex] {
        self.batch.vertices()
    }

    /// Indices accumulated since the last flush
    pub fn indices(&self) -> &[u16] {
        self.batch.indices()
    }

    /// Zoom factor captured by the current batch, 1 without a camera
    pub fn zoom_factor(&self) -> f32 {
        self.zoom_factor
    }

    fn ensure_batching(&self) -> Result<()> {
        match self.state {
            BatchState::Batching => Ok(()),
            BatchState::Idle => Err(Error::NotBatching),
        }
    }

    // Validates against total capacity, then flushes if the remaining room is short
    fn ensure_space(&mut self, vert_count: usize, idx_count: usize) -> Result<()> {
        self.batch.check_capacity(vert_count, idx_count)?;

        if self.batch.would_overflow(vert_count, idx_count) {
            log::debug!(
                "shape batch full at {} vertices, flushing before a {vert_count} vertex shape",
                self.batch.vertex_count()
            );
            self.flush()?;
        }
        Ok(())
    }

    // Appends one shape whose indices are relative to its own first vertex
    fn push(&mut self, vertices: &[Vertex], indices: &[u16]) -> Result<()> {
        self.ensure_space(vertices.len(), indices.len())?;

        let (verts, idx, base) = self
            .batch
            .try_allocate(vertices.len(), indices.len())
            .ok_or(Error::VertexCapacity {
                required: vertices.len(),
                capacity: Self::MAX_VERTICES,
            })?;
        verts.copy_from_slice(vertices);
        for (slot, i) in idx.iter_mut().zip(indices) {
            *slot = base + i;
        }

        self.shape_count += 1;
        Ok(())
    }

    /// Quad from four corners in a consistent winding (e.g. top-left, top-right,
    /// bottom-right, bottom-left)
    pub fn draw_quad(
        &mut self,
        a: Vec3,
        b: Vec3,
        c: Vec3,
        d: Vec3,
        color: Color,
        fill: FillMode,
    ) -> Result<()> {
        self.ensure_batching()?;

        match fill {
            FillMode::Filled => self.push(
                &[
                    Vertex::colored(a, color),
                    Vertex::colored(b, color),
                    Vertex::colored(c, color),
                    Vertex::colored(d, color),
                ],
                &[0, 1, 2, 0, 2, 3],
            ),
            FillMode::Border { thickness } => {
                self.draw_line_3d(a, b, thickness, color)?;
                self.draw_line_3d(b, c, thickness, color)?;
                self.draw_line_3d(c, d, thickness, color)?;
                self.draw_line_3d(d, a, thickness, color)
            }
        }
    }

    /// Axis-aligned rectangle from its bottom-left corner & size
    pub fn draw_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
        fill: FillMode,
    ) -> Result<()> {
        let (left, right) = (x, x + width);
        let (bottom, top) = (y, y + height);

        self.draw_quad(
            vec3(left, top, 0.0),
            vec3(right, top, 0.0),
            vec3(right, bottom, 0.0),
            vec3(left, bottom, 0.0),
            color,
            fill,
        )
    }

    pub fn draw_triangle(
        &mut self,
        a: Vec2,
        b: Vec2,
        c: Vec2,
        color: Color,
        fill: FillMode,
    ) -> Result<()> {
        self.ensure_batching()?;

        match fill {
            FillMode::Filled => self.push(
                &[
                    Vertex::colored(a.extend(0.0), color),
                    Vertex::colored(b.extend(0.0), color),
                    Vertex::colored(c.extend(0.0), color),
                ],
                &[0, 1, 2],
            ),
            FillMode::Border { thickness } => {
                self.draw_line(a, b, thickness, color)?;
                self.draw_line(b, c, thickness, color)?;
                self.draw_line(c, a, thickness, color)
            }
        }
    }

    /// Line on the z = 0 plane, see [`Shapes::draw_line_3d`]
    pub fn draw_line(&mut self, a: Vec2, b: Vec2, thickness: f32, color: Color) -> Result<()> {
        self.draw_line_3d(a.extend(0.0), b.extend(0.0), thickness, color)
    }

    /// Line drawn as a quad `thickness` wide, extended past both ends by half the
    /// thickness so joined segments meet without gaps
    ///
    /// Thickness is multiplied by the batch's zoom factor, keeping the on-screen
    /// width constant while zooming. Zero-length lines become a square
    pub fn draw_line_3d(&mut self, a: Vec3, b: Vec3, thickness: f32, color: Color) -> Result<()> {
        self.ensure_batching()?;

        let half_thickness = thickness * 0.5 * self.zoom_factor;

        let e1 = (b - a).try_normalize().unwrap_or(Vec3::X) * half_thickness;
        let e2 = -e1;
        let n1 = vec3(-e1.y, e1.x, 0.0);
        let n2 = -n1;

        self.draw_quad(
            a + n1 + e2,
            b + n1 + e1,
            b + n2 + e1,
            a + n2 + e2,
            color,
            FillMode::Filled,
        )
    }

    /// Regular polygon around `center`, first corner straight up at distance `size`,
    /// remaining corners placed clockwise
    pub fn draw_regular_polygon(
        &mut self,
        center: Vec2,
        sides: usize,
        size: f32,
        color: Color,
        fill: FillMode,
    ) -> Result<()> {
        if sides < 3 {
            return Err(Error::TooFewSides(sides));
        }
        self.ensure_batching()?;

        let angle = TAU / sides as f32;
        let origin = center.extend(0.0);
        let first = vec3(center.x, center.y + size, 0.0);
        let corner = |i: usize| rotate(first, origin, -angle * i as f32);

        match fill {
            FillMode::Filled => {
                self.batch.check_capacity(sides + 1, sides * 3)?;

                let mut vertices = Vec::with_capacity(sides + 1);
                vertices.push(Vertex::colored(origin, color));
                vertices.push(Vertex::colored(first, color));
                vertices.extend((1..sides).map(|i| Vertex::colored(corner(i), color)));

                let mut indices = Vec::with_capacity(sides * 3);
                for i in 1..sides as u16 {
                    indices.extend_from_slice(&[0, i, i + 1]);
                }
                indices.extend_from_slice(&[0, sides as u16, 1]);

                self.push(&vertices, &indices)
            }
            FillMode::Border { thickness } => {
                let mut previous = first;
                for i in 1..sides {
                    let current = corner(i);
                    self.draw_line_3d(previous, current, thickness, color)?;
                    previous = current;
                }
                self.draw_line_3d(previous, first, thickness, color)
            }
        }
    }

    /// Circle approximated by a regular polygon
    ///
    /// The side count follows the on-screen radius, `round(clamp(radius / zoom, 4, 190))`
    pub fn draw_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        color: Color,
        fill: FillMode,
    ) -> Result<()> {
        if !radius.is_finite() {
            return Err(Error::NonFiniteRadius(radius));
        }
        let sides = circle_sides(radius, self.zoom_factor);
        self.draw_regular_polygon(center, sides, radius, color, fill)
    }

    /// Arbitrary closed polygon
    ///
    /// Only [`FillMode::Border`] produces geometry; filling arbitrary polygons is not
    /// supported and draws nothing
    pub fn draw_polygon(&mut self, points: &[Vec2], color: Color, fill: FillMode) -> Result<()> {
        if points.len() < 3 {
            return Err(Error::TooFewPoints {
                shape: "a polygon",
                min: 3,
                got: points.len(),
            });
        }
        self.ensure_batching()?;

        match fill {
            FillMode::Filled => {
                log::warn!(
                    "filled polygons are not supported, skipped {} points",
                    points.len()
                );
                Ok(())
            }
            FillMode::Border { thickness } => {
                for pair in points.windows(2) {
                    self.draw_line(pair[0], pair[1], thickness, color)?;
                }
                self.draw_line(points[points.len() - 1], points[0], thickness, color)
            }
        }
    }

    /// Open chain of line segments through `points`
    pub fn draw_polyline(&mut self, points: &[Vec2], thickness: f32, color: Color) -> Result<()> {
        if points.len() < 2 {
            return Err(Error::TooFewPoints {
                shape: "a polyline",
                min: 2,
                got: points.len(),
            });
        }
        self.ensure_batching()?;

        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], thickness, color)?;
        }
        Ok(())
    }
}

/// Side count for a circle of `radius` world units seen at `zoom_factor`
pub fn circle_sides(radius: f32, zoom_factor: f32) -> usize {
    (radius / zoom_factor).clamp(4.0, 190.0).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{share, testing::RecordingDevice};
    use glam::vec2;

    fn shapes() -> (std::rc::Rc<std::cell::RefCell<RecordingDevice>>, Shapes) {
        let (recorder, device) = RecordingDevice::shared(640, 480);
        (recorder, Shapes::new(device))
    }

    #[test]
    fn begin_twice_fails() {
        let (_, mut shapes) = shapes();
        shapes.begin(None).unwrap();
        assert_eq!(shapes.begin(None), Err(Error::AlreadyBatching));
        shapes.end().unwrap();
        shapes.begin(None).unwrap();
    }

    #[test]
    fn end_and_flush_need_begin() {
        let (_, mut shapes) = shapes();
        assert_eq!(shapes.end(), Err(Error::NotBatching));
        assert_eq!(shapes.flush(), Err(Error::NotBatching));
        assert_eq!(
            shapes.draw_rect(0.0, 0.0, 1.0, 1.0, Color::RED, FillMode::Filled),
            Err(Error::NotBatching)
        );
    }

    #[test]
    fn empty_batch_submits_nothing() {
        let (recorder, mut shapes) = shapes();
        shapes.begin(None).unwrap();
        shapes.end().unwrap();
        assert!(recorder.borrow().draws.is_empty());
    }

    #[test]
    fn filled_rect_is_two_triangles() {
        let (recorder, mut shapes) = shapes();
        shapes.begin(None).unwrap();
        shapes
            .draw_rect(16.0, 16.0, 128.0, 64.0, Color::RED, FillMode::Filled)
            .unwrap();
        assert_eq!((shapes.vertex_count(), shapes.index_count()), (4, 6));
        assert_eq!(shapes.indices(), &[0, 1, 2, 0, 2, 3]);

        let corners: Vec<Vec3> = shapes.vertices().iter().map(Vertex::position).collect();
        assert_eq!(
            corners,
            vec![
                vec3(16.0, 80.0, 0.0),
                vec3(144.0, 80.0, 0.0),
                vec3(144.0, 16.0, 0.0),
                vec3(16.0, 16.0, 0.0)
            ]
        );

        shapes.end().unwrap();
        let recorder = recorder.borrow();
        assert_eq!(recorder.draws.len(), 1);
        assert_eq!(recorder.draws[0].shading, Shading::VertexColor);
        assert_eq!(recorder.draws[0].transform, Transform::pixel_space(640, 480));
        assert_eq!(shapes.vertex_count(), 0);
    }

    #[test]
    fn border_rect_is_four_lines() {
        let (_, mut shapes) = shapes();
        shapes.begin(None).unwrap();
        shapes
            .draw_rect(-64.0, 0.0, 164.0, 64.0, Color::BLACK, FillMode::border())
            .unwrap();
        assert_eq!(shapes.shape_count(), 4);
        assert_eq!(shapes.vertex_count(), 16);
        assert_eq!(shapes.index_count(), 24);
    }

    #[test]
    fn line_overhangs_endpoints_by_half_thickness() {
        let (_, mut shapes) = shapes();
        shapes.begin(None).unwrap();
        shapes
            .draw_line(vec2(0.0, 0.0), vec2(10.0, 0.0), 2.0, Color::WHITE)
            .unwrap();

        let corners: Vec<Vec3> = shapes.vertices().iter().map(Vertex::position).collect();
        assert_eq!(
            corners,
            vec![
                vec3(-1.0, 1.0, 0.0),
                vec3(11.0, 1.0, 0.0),
                vec3(11.0, -1.0, 0.0),
                vec3(-1.0, -1.0, 0.0)
            ]
        );
    }

    #[test]
    fn line_thickness_follows_camera_zoom() {
        let (_, mut shapes) = shapes();
        let mut camera = Camera::from_size(640, 480);
        camera.zoom(camera.z_base());

        shapes.begin(Some(&mut camera)).unwrap();
        assert!((shapes.zoom_factor() - 2.0).abs() < 1e-5);
        shapes
            .draw_line(vec2(0.0, 0.0), vec2(0.0, 10.0), 2.0, Color::WHITE)
            .unwrap();

        let first = shapes.vertices()[0].position();
        assert!((first - vec3(-2.0, -2.0, 0.0)).length() < 1e-4, "{first}");
    }

    #[test]
    fn degenerate_line_is_a_square() {
        let (_, mut shapes) = shapes();
        shapes.begin(None).unwrap();
        shapes
            .draw_line(vec2(5.0, 5.0), vec2(5.0, 5.0), 4.0, Color::WHITE)
            .unwrap();
        let xs: Vec<f32> = shapes.vertices().iter().map(|v| v.position[0]).collect();
        assert_eq!(xs, vec![3.0, 7.0, 7.0, 3.0]);
        assert!(shapes.vertices().iter().all(|v| v.position[0].is_finite()));
    }

    #[test]
    fn regular_polygon_is_a_closed_fan() {
        let (_, mut shapes) = shapes();
        shapes.begin(None).unwrap();
        shapes
            .draw_regular_polygon(vec2(0.0, 0.0), 6, 10.0, Color::GREEN, FillMode::Filled)
            .unwrap();

        // center plus one vertex per side
        assert_eq!(shapes.vertex_count(), 7);
        assert_eq!(shapes.index_count(), 18);
        assert_eq!(&shapes.indices()[15..], &[0, 6, 1]);
        assert!(shapes.indices().chunks(3).all(|tri| tri[0] == 0));

        let first = shapes.vertices()[1].position();
        assert!((first - vec3(0.0, 10.0, 0.0)).length() < 1e-5);
        // clockwise: second corner sits to the right of the first
        assert!(shapes.vertices()[2].position[0] > 0.0);
        for v in &shapes.vertices()[1..] {
            assert!((v.position().length() - 10.0).abs() < 1e-4);
        }
    }

    #[test]
    fn regular_polygon_needs_three_sides() {
        let (_, mut shapes) = shapes();
        shapes.begin(None).unwrap();
        assert_eq!(
            shapes.draw_regular_polygon(Vec2::ZERO, 2, 10.0, Color::WHITE, FillMode::Filled),
            Err(Error::TooFewSides(2))
        );
    }

    #[test]
    fn regular_polygon_border_is_one_line_per_side() {
        let (_, mut shapes) = shapes();
        shapes.begin(None).unwrap();
        shapes
            .draw_regular_polygon(Vec2::ZERO, 5, 10.0, Color::WHITE, FillMode::border())
            .unwrap();
        assert_eq!(shapes.shape_count(), 5);
    }

    #[test]
    fn circle_sides_follow_apparent_radius() {
        assert_eq!(circle_sides(1.0, 1.0), 4);
        assert_eq!(circle_sides(37.4, 1.0), 37);
        assert_eq!(circle_sides(37.5, 1.0), 38);
        assert_eq!(circle_sides(1000.0, 1.0), 190);
        assert_eq!(circle_sides(100.0, 2.0), 50);

        let (_, mut shapes) = shapes();
        shapes.begin(None).unwrap();
        shapes
            .draw_circle(Vec2::ZERO, 100.0, Color::WHITE, FillMode::Filled)
            .unwrap();
        assert_eq!(shapes.vertex_count(), 101);
    }

    #[test]
    fn non_finite_radius_is_rejected() {
        let (_, mut shapes) = shapes();
        shapes.begin(None).unwrap();
        assert!(matches!(
            shapes.draw_circle(Vec2::ZERO, f32::NAN, Color::WHITE, FillMode::Filled),
            Err(Error::NonFiniteRadius(r)) if r.is_nan()
        ));
        assert_eq!(
            shapes.draw_circle(Vec2::ZERO, f32::INFINITY, Color::WHITE, FillMode::border()),
            Err(Error::NonFiniteRadius(f32::INFINITY))
        );
        assert_eq!(shapes.vertex_count(), 0);
    }

    #[test]
    fn polygon_border_closes_the_loop() {
        let (_, mut shapes) = shapes();
        shapes.begin(None).unwrap();
        let points = [vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(10.0, 10.0), vec2(0.0, 10.0)];
        shapes
            .draw_polygon(&points, Color::WHITE, FillMode::border())
            .unwrap();
        assert_eq!(shapes.shape_count(), 4);

        shapes
            .draw_polygon(&points, Color::WHITE, FillMode::Filled)
            .unwrap();
        assert_eq!(shapes.shape_count(), 4);

        assert_eq!(
            shapes.draw_polygon(&points[..2], Color::WHITE, FillMode::border()),
            Err(Error::TooFewPoints {
                shape: "a polygon",
                min: 3,
                got: 2
            })
        );
    }

    #[test]
    fn polyline_stays_open() {
        let (_, mut shapes) = shapes();
        shapes.begin(None).unwrap();
        let points = [vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(10.0, 10.0)];
        shapes.draw_polyline(&points, 1.0, Color::WHITE).unwrap();
        assert_eq!(shapes.shape_count(), 2);
        assert!(shapes.draw_polyline(&points[..1], 1.0, Color::WHITE).is_err());
    }

    #[test]
    fn triangle_fills_and_outlines() {
        let (_, mut shapes) = shapes();
        shapes.begin(None).unwrap();
        let (a, b, c) = (vec2(0.0, 0.0), vec2(4.0, 0.0), vec2(2.0, 3.0));
        shapes.draw_triangle(a, b, c, Color::BLUE, FillMode::Filled).unwrap();
        assert_eq!((shapes.vertex_count(), shapes.index_count()), (3, 3));
        shapes.draw_triangle(a, b, c, Color::BLUE, FillMode::border()).unwrap();
        assert_eq!(shapes.shape_count(), 4);
    }

    #[test]
    fn overflow_flushes_once_and_keeps_the_shape() {
        let (recorder, mut shapes) = shapes();
        shapes.begin(None).unwrap();

        // 511 quads leave room for 4 vertices, not for a 101 vertex circle
        for i in 0..511 {
            shapes
                .draw_rect(i as f32, 0.0, 1.0, 1.0, Color::WHITE, FillMode::Filled)
                .unwrap();
        }
        assert_eq!(shapes.vertex_count(), 2044);
        assert!(recorder.borrow().draws.is_empty());

        shapes
            .draw_regular_polygon(Vec2::ZERO, 100, 10.0, Color::WHITE, FillMode::Filled)
            .unwrap();
        assert_eq!(recorder.borrow().draws.len(), 1);
        assert_eq!(recorder.borrow().draws[0].vertices.len(), 2044);
        assert_eq!(shapes.vertex_count(), 101);
        assert_eq!(shapes.indices()[0], 0);
        assert_eq!(shapes.shape_count(), 1);

        shapes.end().unwrap();
        assert_eq!(recorder.borrow().draws.len(), 2);
    }

    #[test]
    fn oversized_shape_fails_without_touching_counts() {
        let (recorder, mut shapes) = shapes();
        shapes.begin(None).unwrap();
        shapes
            .draw_rect(0.0, 0.0, 1.0, 1.0, Color::WHITE, FillMode::Filled)
            .unwrap();

        let err = shapes
            .draw_regular_polygon(Vec2::ZERO, 2048, 10.0, Color::WHITE, FillMode::Filled)
            .unwrap_err();
        assert_eq!(
            err,
            Error::VertexCapacity {
                required: 2049,
                capacity: Shapes::MAX_VERTICES
            }
        );
        assert_eq!((shapes.vertex_count(), shapes.index_count()), (4, 6));
        assert_eq!(shapes.shape_count(), 1);
        assert!(recorder.borrow().draws.is_empty());
    }

    #[test]
    fn camera_batch_uses_camera_matrices() {
        let (recorder, mut shapes) = shapes();
        let mut camera = Camera::from_size(640, 480);
        camera.pan(vec2(50.0, 0.0));

        shapes.begin(Some(&mut camera)).unwrap();
        shapes
            .draw_circle(Vec2::ZERO, 100.0, Color::WHITE, FillMode::border())
            .unwrap();
        shapes.end().unwrap();

        let recorder = recorder.borrow();
        assert_eq!(recorder.draws[0].transform, camera.transform());
        assert!(recorder.draws.iter().all(|d| d.indices.len() % 3 == 0));
    }

    #[test]
    fn shapes_follow_the_bound_target_size() {
        let device = share(RecordingDevice::new(1920, 1080));
        let target = device.borrow_mut().create_render_target(640, 480);
        device.borrow_mut().set_render_target(Some(target)).unwrap();

        let mut shapes = Shapes::new(device);
        shapes.begin(None).unwrap();
        assert_eq!(shapes.transform, Transform::pixel_space(640, 480));
    }
}

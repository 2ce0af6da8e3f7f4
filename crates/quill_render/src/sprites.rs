use glam::{Vec2, Vec3, vec2};

use crate::{
    Color, Error, Result,
    camera::Camera,
    device::{DeviceHandle, Filter, IndexedDraw, Shading, TextureId, Transform},
    geometry_batch::GeometryBatch,
    math::{PixelRect, rotate},
    vertex::Vertex,
};

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchState {
    Idle,
    Batching,
}

/// Batches textured quads drawn with a camera's matrices or in pixel space
///
/// Consecutive quads sharing a texture go out as one draw; switching textures
/// flushes what came before
pub struct Sprites {
    device: DeviceHandle,
    batch: GeometryBatch,
    texture: Option<TextureId>,
    filter: Filter,
    transform: Transform,
    state: BatchState,
    sprite_count: usize,
}

impl Sprites {
    pub const MAX_SPRITES: usize = 512;

    pub fn new(device: DeviceHandle) -> Self {
        Self {
            device,
            batch: GeometryBatch::new(Self::MAX_SPRITES * 4, Self::MAX_SPRITES * 6),
            texture: None,
            filter: Filter::default(),
            transform: Transform::IDENTITY,
            state: BatchState::Idle,
            sprite_count: 0,
        }
    }

    /// Starts a batch sampled with `filter`
    ///
    /// Without a camera positions are pixels of the current render destination,
    /// origin bottom-left
    pub fn begin(&mut self, camera: Option<&mut Camera>, filter: Filter) -> Result<()> {
        if self.state == BatchState::Batching {
            return Err(Error::AlreadyBatching);
        }

        self.transform = match camera {
            Some(camera) => {
                camera.update_matrices();
                camera.transform()
            }
            None => {
                let (w, h) = self.device.borrow().viewport_size();
                Transform::pixel_space(w, h)
            }
        };
        self.filter = filter;
        self.texture = None;
        self.state = BatchState::Batching;
        Ok(())
    }

    pub fn end(&mut self) -> Result<()> {
        self.flush()?;
        self.state = BatchState::Idle;
        Ok(())
    }

    /// Submits the queued quads of the current texture
    pub fn flush(&mut self) -> Result<()> {
        if self.state == BatchState::Idle {
            return Err(Error::NotBatching);
        }
        let Some(texture) = self.texture else {
            return Ok(());
        };
        if self.batch.is_empty() {
            return Ok(());
        }

        log::trace!("submitting {} sprites of {texture:?}", self.sprite_count);
        self.device.borrow_mut().draw_indexed(IndexedDraw {
            vertices: self.batch.vertices(),
            indices: self.batch.indices(),
            transform: self.transform,
            shading: Shading::Textured {
                texture,
                filter: self.filter,
            },
        });

        self.batch.clear();
        self.sprite_count = 0;
        Ok(())
    }

    pub fn is_batching(&self) -> bool {
        self.state == BatchState::Batching
    }

    /// Quads queued since the last flush
    pub fn sprite_count(&self) -> usize {
        self.sprite_count
    }

    pub fn vertices(&self) -> &[Vertex] {
        self.batch.vertices()
    }

    /// Draws the whole texture unrotated at its pixel size, `origin` placed at `position`
    pub fn draw(
        &mut self,
        texture: TextureId,
        origin: Vec2,
        position: Vec2,
        color: Color,
    ) -> Result<()> {
        self.draw_ex(texture, None, origin, position, 0.0, Vec2::ONE, color)
    }

    /// Draws `source` (whole texture when `None`) pivoted on `origin`
    ///
    /// `origin` is in source pixels from the source's top-left corner. The quad is
    /// scaled, then rotated counter-clockwise by `rotation` radians around `position`
    #[allow(clippy::too_many_arguments)]
    pub fn draw_ex(
        &mut self,
        texture: TextureId,
        source: Option<PixelRect>,
        origin: Vec2,
        position: Vec2,
        rotation: f32,
        scale: Vec2,
        color: Color,
    ) -> Result<()> {
        self.ensure_batching()?;
        let (source, uvs) = self.source_uvs(texture, source)?;

        let size = vec2(source.width as f32, source.height as f32);
        let left = -origin.x;
        let right = size.x - origin.x;
        let top = origin.y;
        let bottom = origin.y - size.y;

        let pivot = position.extend(0.0);
        let corner = |x: f32, y: f32| {
            let local = vec2(x, y) * scale + position;
            rotate(local.extend(0.0), pivot, rotation)
        };

        self.push_quad(
            texture,
            [
                corner(left, top),
                corner(right, top),
                corner(right, bottom),
                corner(left, bottom),
            ],
            uvs,
            color,
        )
    }

    /// Stretches `source` (whole texture when `None`) over `destination`
    ///
    /// `destination` is bottom-left based, in the batch's coordinate space
    pub fn draw_rect(
        &mut self,
        texture: TextureId,
        source: Option<PixelRect>,
        destination: PixelRect,
        color: Color,
    ) -> Result<()> {
        self.ensure_batching()?;
        let (_, uvs) = self.source_uvs(texture, source)?;

        let [tl, tr, br, bl] = destination.to_rect().corners();
        self.push_quad(
            texture,
            [tl, tr, br, bl].map(|c| c.extend(0.0)),
            uvs,
            color,
        )
    }

    fn ensure_batching(&self) -> Result<()> {
        match self.state {
            BatchState::Batching => Ok(()),
            BatchState::Idle => Err(Error::NotBatching),
        }
    }

    // Resolves the source rectangle & its texture coordinates in TL, TR, BR, BL order
    fn source_uvs(
        &self,
        texture: TextureId,
        source: Option<PixelRect>,
    ) -> Result<(PixelRect, [[f32; 2]; 4])> {
        let (tw, th) = self
            .device
            .borrow()
            .texture_size(texture)
            .ok_or(Error::UnknownTexture(texture))?;
        let source = source.unwrap_or(PixelRect::new(0, 0, tw, th));

        let right = source.x.checked_add(source.width).filter(|&r| r <= tw);
        let bottom = source.y.checked_add(source.height).filter(|&b| b <= th);
        let (Some(right), Some(bottom)) = (right, bottom) else {
            return Err(Error::SourceOutOfBounds {
                rect: source,
                width: tw,
                height: th,
            });
        };

        let (tw, th) = (tw.max(1) as f32, th.max(1) as f32);
        let u0 = source.x as f32 / tw;
        let u1 = right as f32 / tw;
        let v0 = source.y as f32 / th;
        let v1 = bottom as f32 / th;

        Ok((source, [[u0, v0], [u1, v0], [u1, v1], [u0, v1]]))
    }

    fn push_quad(
        &mut self,
        texture: TextureId,
        corners: [Vec3; 4],
        uvs: [[f32; 2]; 4],
        color: Color,
    ) -> Result<()> {
        if self.texture != Some(texture) {
            if !self.batch.is_empty() {
                log::debug!(
                    "texture changed to {texture:?}, flushing {} sprites",
                    self.sprite_count
                );
            }
            self.flush()?;
            self.texture = Some(texture);
        }
        if self.batch.would_overflow(4, QUAD_INDICES.len()) {
            log::debug!("sprite batch full, flushing {} sprites", self.sprite_count);
            self.flush()?;
        }

        let (verts, indices, base) = self
            .batch
            .try_allocate(4, QUAD_INDICES.len())
            .ok_or(Error::VertexCapacity {
                required: 4,
                capacity: Self::MAX_SPRITES * 4,
            })?;
        for ((slot, corner), uv) in verts.iter_mut().zip(corners).zip(uvs) {
            *slot = Vertex::new(corner, color, uv);
        }
        for (slot, i) in indices.iter_mut().zip(QUAD_INDICES) {
            *slot = base + i;
        }

        self.sprite_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{GraphicsDevice, testing::RecordingDevice};
    use glam::vec3;
    use std::{cell::RefCell, f32::consts::FRAC_PI_2, rc::Rc};

    fn setup() -> (Rc<RefCell<RecordingDevice>>, Sprites, TextureId, TextureId) {
        let (recorder, device) = RecordingDevice::shared(800, 600);
        let player = recorder.borrow_mut().create_texture(32, 64, &[]);
        let tiles = recorder.borrow_mut().create_texture(128, 128, &[]);
        (recorder, Sprites::new(device), player, tiles)
    }

    fn positions(sprites: &Sprites) -> Vec<Vec3> {
        sprites.vertices().iter().map(Vertex::position).collect()
    }

    #[test]
    fn protocol_is_enforced() {
        let (_, mut sprites, player, _) = setup();
        assert_eq!(
            sprites.draw(player, Vec2::ZERO, Vec2::ZERO, Color::WHITE),
            Err(Error::NotBatching)
        );
        assert_eq!(sprites.end(), Err(Error::NotBatching));

        sprites.begin(None, Filter::Linear).unwrap();
        assert_eq!(
            sprites.begin(None, Filter::Linear),
            Err(Error::AlreadyBatching)
        );
        sprites.end().unwrap();
        assert!(!sprites.is_batching());
    }

    #[test]
    fn unknown_texture_is_rejected() {
        let (recorder, mut sprites, player, _) = setup();
        recorder.borrow_mut().release_texture(player);

        sprites.begin(None, Filter::Linear).unwrap();
        assert_eq!(
            sprites.draw(player, Vec2::ZERO, Vec2::ZERO, Color::WHITE),
            Err(Error::UnknownTexture(player))
        );
        assert_eq!(sprites.sprite_count(), 0);
    }

    #[test]
    fn source_outside_texture_is_rejected() {
        let (_, mut sprites, player, tiles) = setup();
        sprites.begin(None, Filter::Linear).unwrap();

        let overflowing = PixelRect::new(u32::MAX, 0, 2, 2);
        assert_eq!(
            sprites.draw_ex(
                player,
                Some(overflowing),
                Vec2::ZERO,
                Vec2::ZERO,
                0.0,
                Vec2::ONE,
                Color::WHITE
            ),
            Err(Error::SourceOutOfBounds {
                rect: overflowing,
                width: 32,
                height: 64
            })
        );

        let past_edge = PixelRect::new(100, 100, 64, 64);
        let err = sprites
            .draw_rect(tiles, Some(past_edge), PixelRect::new(0, 0, 8, 8), Color::WHITE)
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
        assert_eq!(sprites.sprite_count(), 0);

        // touching the far edges is fine
        sprites
            .draw_rect(
                tiles,
                Some(PixelRect::new(64, 64, 64, 64)),
                PixelRect::new(0, 0, 8, 8),
                Color::WHITE,
            )
            .unwrap();
        assert_eq!(sprites.sprite_count(), 1);
    }

    #[test]
    fn draw_places_origin_at_position() {
        let (_, mut sprites, player, _) = setup();
        sprites.begin(None, Filter::Nearest).unwrap();
        sprites
            .draw(player, vec2(16.0, 32.0), vec2(100.0, 100.0), Color::WHITE)
            .unwrap();

        assert_eq!(
            positions(&sprites),
            vec![
                vec3(84.0, 132.0, 0.0),
                vec3(116.0, 132.0, 0.0),
                vec3(116.0, 68.0, 0.0),
                vec3(84.0, 68.0, 0.0)
            ]
        );
        let uvs: Vec<[f32; 2]> = sprites.vertices().iter().map(|v| v.tex_coords).collect();
        assert_eq!(uvs, vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    }

    #[test]
    fn source_rect_maps_to_texture_coordinates() {
        let (_, mut sprites, _, tiles) = setup();
        sprites.begin(None, Filter::Nearest).unwrap();
        sprites
            .draw_ex(
                tiles,
                Some(PixelRect::new(32, 64, 32, 32)),
                Vec2::ZERO,
                Vec2::ZERO,
                0.0,
                vec2(2.0, 2.0),
                Color::WHITE,
            )
            .unwrap();

        let verts = sprites.vertices();
        assert_eq!(verts[0].tex_coords, [0.25, 0.5]);
        assert_eq!(verts[2].tex_coords, [0.5, 0.75]);
        // origin at the top-left, so the quad hangs below the position
        assert_eq!(verts[2].position(), vec3(64.0, -64.0, 0.0));
    }

    #[test]
    fn rotation_turns_around_position() {
        let (_, mut sprites, player, _) = setup();
        sprites.begin(None, Filter::Linear).unwrap();
        sprites
            .draw_ex(
                player,
                None,
                Vec2::ZERO,
                vec2(10.0, 10.0),
                FRAC_PI_2,
                Vec2::ONE,
                Color::WHITE,
            )
            .unwrap();

        // top-right corner (42, 10) swings a quarter turn to (10, 42)
        let tr = sprites.vertices()[1].position();
        assert!((tr - vec3(10.0, 42.0, 0.0)).length() < 1e-4, "{tr}");
    }

    #[test]
    fn texture_change_flushes() {
        let (recorder, mut sprites, player, tiles) = setup();
        sprites.begin(None, Filter::Linear).unwrap();
        sprites.draw(player, Vec2::ZERO, Vec2::ZERO, Color::WHITE).unwrap();
        sprites.draw(player, Vec2::ZERO, vec2(50.0, 0.0), Color::WHITE).unwrap();
        assert!(recorder.borrow().draws.is_empty());

        sprites.draw(tiles, Vec2::ZERO, Vec2::ZERO, Color::WHITE).unwrap();
        sprites.end().unwrap();

        let recorder = recorder.borrow();
        assert_eq!(recorder.draws.len(), 2);
        assert_eq!(recorder.draws[0].indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
        assert_eq!(
            recorder.draws[1].shading,
            Shading::Textured {
                texture: tiles,
                filter: Filter::Linear
            }
        );
    }

    #[test]
    fn full_batch_flushes() {
        let (recorder, mut sprites, player, _) = setup();
        sprites.begin(None, Filter::Linear).unwrap();
        for _ in 0..=Sprites::MAX_SPRITES {
            sprites.draw(player, Vec2::ZERO, Vec2::ZERO, Color::WHITE).unwrap();
        }
        assert_eq!(recorder.borrow().draws.len(), 1);
        assert_eq!(sprites.sprite_count(), 1);
    }

    #[test]
    fn camera_batch_uses_camera_transform() {
        let (recorder, mut sprites, player, _) = setup();
        let mut camera = Camera::from_size(800, 600);
        camera.move_to(vec2(-40.0, 12.0));

        sprites.begin(Some(&mut camera), Filter::Nearest).unwrap();
        sprites.draw(player, Vec2::ZERO, Vec2::ZERO, Color::WHITE).unwrap();
        sprites.end().unwrap();
        assert_eq!(recorder.borrow().draws[0].transform, camera.transform());
    }

    #[test]
    fn draw_rect_fills_destination() {
        let (recorder, mut sprites, _, tiles) = setup();
        sprites.begin(None, Filter::Nearest).unwrap();
        sprites
            .draw_rect(tiles, None, PixelRect::new(10, 20, 100, 50), Color::RED)
            .unwrap();
        sprites.end().unwrap();

        let recorder = recorder.borrow();
        let draw = &recorder.draws[0];
        let corners: Vec<Vec3> = draw.vertices.iter().map(Vertex::position).collect();
        assert_eq!(
            corners,
            vec![
                vec3(10.0, 70.0, 0.0),
                vec3(110.0, 70.0, 0.0),
                vec3(110.0, 20.0, 0.0),
                vec3(10.0, 20.0, 0.0)
            ]
        );
        assert_eq!(draw.transform, Transform::pixel_space(800, 600));
        assert!(draw.vertices.iter().all(|v| v.color == Color::RED.components()));
    }
}

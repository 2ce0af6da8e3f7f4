use crate::{
    Color, Error, Result,
    device::{DeviceHandle, Filter, TextureId},
    math::PixelRect,
    sprites::Sprites,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BindState {
    Unbound,
    Bound,
    Released,
}

/// Fixed-size off-screen render target, presented letterboxed into the backbuffer
///
/// Everything is drawn at the screen's own resolution; [`Screen::present`] scales
/// it to the largest centered rectangle of the same aspect ratio that fits
pub struct Screen {
    device: DeviceHandle,
    target: TextureId,
    width: u32,
    height: u32,
    state: BindState,
}

impl Screen {
    pub const MIN_DIMENSION: u32 = 64;
    pub const MAX_DIMENSION: u32 = 4096;

    /// Allocates the off-screen target; dimensions are clamped to
    /// [`Self::MIN_DIMENSION`, `Self::MAX_DIMENSION`]
    pub fn new(device: DeviceHandle, width: u32, height: u32) -> Self {
        let width = width.clamp(Self::MIN_DIMENSION, Self::MAX_DIMENSION);
        let height = height.clamp(Self::MIN_DIMENSION, Self::MAX_DIMENSION);

        let target = device.borrow_mut().create_render_target(width, height);
        log::debug!("allocated {width}x{height} screen target {target:?}");

        Self {
            device,
            target,
            width,
            height,
            state: BindState::Unbound,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn is_bound(&self) -> bool {
        self.state == BindState::Bound
    }

    /// The off-screen target, usable as a texture once unbound
    pub fn texture(&self) -> TextureId {
        self.target
    }

    /// Makes this screen the render destination
    pub fn bind(&mut self) -> Result<()> {
        match self.state {
            BindState::Bound => Err(Error::AlreadyBound),
            BindState::Released => Err(Error::Released),
            BindState::Unbound => {
                self.device
                    .borrow_mut()
                    .set_render_target(Some(self.target))?;
                self.state = BindState::Bound;
                Ok(())
            }
        }
    }

    /// Restores the backbuffer as the render destination
    pub fn unbind(&mut self) -> Result<()> {
        match self.state {
            BindState::Unbound => Err(Error::NotBound),
            BindState::Released => Err(Error::Released),
            BindState::Bound => {
                self.device.borrow_mut().set_render_target(None)?;
                self.state = BindState::Unbound;
                Ok(())
            }
        }
    }

    /// Largest rectangle with the screen's aspect ratio centered in the backbuffer
    pub fn presentation_rect(&self, backbuffer_width: u32, backbuffer_height: u32) -> PixelRect {
        fit_rect(self.size(), (backbuffer_width, backbuffer_height))
    }

    /// Clears the backbuffer to black & draws the screen's contents letterboxed into it
    ///
    /// `sprites` must be idle; nothing is cleared or drawn if it is mid-batch
    pub fn present(&self, sprites: &mut Sprites, filter: Filter) -> Result<()> {
        match self.state {
            BindState::Bound => return Err(Error::StillBound),
            BindState::Released => return Err(Error::Released),
            BindState::Unbound => {}
        }
        if sprites.is_batching() {
            return Err(Error::AlreadyBatching);
        }

        let (bw, bh) = {
            let mut device = self.device.borrow_mut();
            device.clear(Color::BLACK);
            device.backbuffer_size()
        };

        sprites.begin(None, filter)?;
        sprites.draw_rect(self.target, None, self.presentation_rect(bw, bh), Color::WHITE)?;
        sprites.end()
    }

    /// Frees the off-screen target; calling it again does nothing
    pub fn release(&mut self) {
        if self.state == BindState::Released {
            return;
        }

        let mut device = self.device.borrow_mut();
        if self.state == BindState::Bound {
            let _ = device.set_render_target(None);
        }
        device.release_texture(self.target);
        self.state = BindState::Released;
        log::debug!("released screen target {:?}", self.target);
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        self.release();
    }
}

/// Centers `content` inside `outer` keeping its aspect ratio
///
/// Pillarboxes when `outer` is relatively wider, letterboxes when it is relatively
/// taller. Integer cross-multiplication keeps the result exact
pub fn fit_rect(content: (u32, u32), outer: (u32, u32)) -> PixelRect {
    let (cw, ch) = (content.0.max(1) as u64, content.1.max(1) as u64);
    let (ow, oh) = (outer.0 as u64, outer.1 as u64);

    if ow * ch > oh * cw {
        let width = oh * cw / ch;
        PixelRect::new(((ow - width) / 2) as u32, 0, width as u32, oh as u32)
    } else if ow * ch < oh * cw {
        let height = ow * ch / cw;
        PixelRect::new(0, ((oh - height) / 2) as u32, ow as u32, height as u32)
    } else {
        PixelRect::new(0, 0, ow as u32, oh as u32)
    }
}

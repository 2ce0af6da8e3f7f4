use crate::{device::TextureId, math::PixelRect};

/// Broad category of an [`Error`]
///
/// None of these are retried internally; the category only tells the caller
/// whether it passed bad data, called things out of order or sized a shape
/// past what a batcher can ever hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    ProtocolViolation,
    CapacityExceeded,
}

/// Errors produced by screens, batchers & devices
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// `bind` called on a screen that is already the render destination
    #[error("render target is already bound")]
    AlreadyBound,

    /// `unbind` called on a screen that is not the render destination
    #[error("render target is not bound")]
    NotBound,

    /// `present` called while the screen is still the render destination
    #[error("render target must be unbound before it is presented")]
    StillBound,

    /// The screen's off-screen target has already been released
    #[error("render target has been released")]
    Released,

    /// `begin` called twice without an `end`
    #[error("batching already started")]
    AlreadyBatching,

    /// A draw, `flush` or `end` call outside of `begin`/`end`
    #[error("batching not started")]
    NotBatching,

    #[error("a polygon needs a minimum of 3 sides, got {0}")]
    TooFewSides(usize),

    #[error("{shape} needs a minimum of {min} points, got {got}")]
    TooFewPoints {
        shape: &'static str,
        min: usize,
        got: usize,
    },

    #[error("texture {0:?} does not exist or was released")]
    UnknownTexture(TextureId),

    /// A sprite source rectangle reaching past its texture's edges
    #[error("source {rect:?} lies outside the {width}x{height} texture")]
    SourceOutOfBounds {
        rect: PixelRect,
        width: u32,
        height: u32,
    },

    /// A circle radius that is NaN or infinite
    #[error("circle radius must be finite, got {0}")]
    NonFiniteRadius(f32),

    /// A single shape needs more vertices than the batcher can ever hold
    #[error("shape needs {required} vertices but the maximum vertex count is {capacity}")]
    VertexCapacity { required: usize, capacity: usize },

    /// A single shape needs more indices than the batcher can ever hold
    #[error("shape needs {required} indices but the maximum index count is {capacity}")]
    IndexCapacity { required: usize, capacity: usize },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::TooFewSides(_)
            | Error::TooFewPoints { .. }
            | Error::UnknownTexture(_)
            | Error::SourceOutOfBounds { .. }
            | Error::NonFiniteRadius(_) => ErrorKind::InvalidArgument,
            Error::AlreadyBound
            | Error::NotBound
            | Error::StillBound
            | Error::Released
            | Error::AlreadyBatching
            | Error::NotBatching => ErrorKind::ProtocolViolation,
            Error::VertexCapacity { .. } | Error::IndexCapacity { .. } => {
                ErrorKind::CapacityExceeded
            }
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

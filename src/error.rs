use thiserror::Error;

/// Top-level error type for the glyph fusion pipeline.
#[derive(Debug, Error)]
pub enum GlyphFuseError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors caused by unusable user input. Raised before any geometry work.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("text for side {side} is empty")]
    EmptyText { side: char },

    #[error("cannot load font: {0}")]
    FontLoad(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors related to pixel masks.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("mask dimensions {width}x{height} are invalid")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("rasterized text produced an empty canvas")]
    EmptyCanvas,
}

/// Errors raised by the solid modeling kernel.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error("solid not found")]
    SolidNotFound,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("triangulation failed: {0}")]
    Triangulation(String),
}

impl KernelError {
    /// Whether the error comes from unusable geometry rather than misuse of
    /// the kernel.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate(_) | Self::Triangulation(_))
    }
}

/// Errors raised while serializing solids.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write STL: {0}")]
    Io(#[from] std::io::Error),

    #[error("nothing to export")]
    Empty,
}

/// Convenience type alias for results using [`GlyphFuseError`].
pub type Result<T> = std::result::Result<T, GlyphFuseError>;

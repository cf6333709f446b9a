mod components;
mod figure;
mod mask;
mod rasterize;

pub use components::split_components;
pub use figure::{Figure, PixelPoint};
pub use mask::{PixelMask, PixelRect, INK};
pub use rasterize::{GlyphRasterizer, TextRasterizer};

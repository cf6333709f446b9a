//! Turns two lines of text into one solid whose silhouette reads as the first
//! text from one side and the second text from the other.
//!
//! The entry point is [`pipeline::generate`]; the stages it chains are
//! public for callers that need only part of the work.

pub mod config;
pub mod contours;
pub mod error;
pub mod export;
pub mod fuse;
pub mod math;
pub mod operations;
pub mod pipeline;
pub mod raster;
pub mod segmentation;
pub mod solid;
pub mod tessellation;

pub use error::{GlyphFuseError, Result};

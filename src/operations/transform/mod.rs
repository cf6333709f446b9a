mod colorize;
mod general;
mod rotate;
mod translate;

pub use colorize::Colorize;
pub use general::{transform_point, GeneralTransform};
pub use rotate::Rotate;
pub use translate::Translate;

mod bsp;
mod engine;
mod intersect_op;
mod subtract;
mod union;

pub use bsp::BspNode;
pub use engine::BooleanOp;
pub use intersect_op::Intersect;
pub use subtract::Subtract;
pub use union::{Union, UnionAll};

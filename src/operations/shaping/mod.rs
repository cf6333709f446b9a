mod extrude;

pub use extrude::ExtrudeLinear;

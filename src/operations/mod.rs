//! Operations on solids in a [`SolidStore`](crate::solid::SolidStore).
//!
//! Each operation is a struct built with `new(..)` and run with
//! `execute(&mut store)`.

pub mod boolean;
pub mod shaping;
pub mod transform;

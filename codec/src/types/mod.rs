//! Built-in codec implementations, grouped by structural kind.

pub mod bytes;
pub mod map;
pub mod primitives;
pub mod tuple;
pub mod vec;

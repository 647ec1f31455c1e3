//! Utility types shared by the reader.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - Math type re-exports from glam plus [`BBox3f`]

mod error;
mod math;

pub use error::*;
pub use math::*;

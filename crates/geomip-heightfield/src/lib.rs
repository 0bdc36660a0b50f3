//! Height field sources for block meshing: the [`HeightField`] contract, an
//! in-memory [`HeightGrid`], and a seeded fBm generator to fill it.

mod error;
mod fbm;
mod field;
mod grid;

pub use error::HeightFieldError;
pub use fbm::{FbmHeights, FbmParams};
pub use field::{HeightField, HeightSample};
pub use grid::HeightGrid;

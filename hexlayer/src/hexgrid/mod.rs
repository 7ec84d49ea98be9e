//! Hexagonal coverage grid
//!
//! Tessellates the padded viewport polygon into H3 cells at a resolution
//! chosen from the map zoom level.
//!
//! # Example
//!
//! ```ignore
//! use hexlayer::hexgrid::{HexGridGenerator, ZoomResolutionTable};
//! use hexlayer::viewport::ViewportBounds;
//!
//! let generator = HexGridGenerator::new(ZoomResolutionTable::default());
//! let grid = generator.generate(&bounds.expand(), 18);
//! for cell in &grid.cells {
//!     println!("{} has {} ring points", cell.id, cell.boundary.len());
//! }
//! ```

mod generator;
mod resolution;

pub use generator::{HexCell, HexGrid, HexGridGenerator, DEFAULT_MAX_CELLS};
pub use resolution::{
    resolution_from_u8, FixedResolution, ResolutionError, ResolutionPolicy, ZoomResolutionTable,
    DEFAULT_MAX_RESOLUTION, REFERENCE_RESOLUTION,
};

//! HexLayer - Geospatial overlay and visibility engine for live operations maps
//!
//! This library provides the pure, deterministic computations behind a drone
//! operations dashboard map:
//!
//! - [`overlay`]: turn a map viewport into a hexagonal (H3) coverage grid
//! - [`visibility`]: pick which detected entities to draw, combining cluster
//!   proximity with deterministic hash-based sampling
//! - [`annotation`]: place numbered badges next to cluster markers
//!
//! Rendering, HTTP polling and styling are left to the host application.

pub mod annotation;
pub mod config;
pub mod geo;
pub mod hexgrid;
pub mod logging;
pub mod overlay;
pub mod render;
pub mod snapshot;
pub mod viewport;
pub mod visibility;

pub use annotation::offset_position;
pub use overlay::compute_overlay;
pub use visibility::filter_visible_entities;

//! CLI command implementations.

pub mod badges;
pub mod common;
pub mod config;
pub mod filter;
pub mod overlay;
pub mod plan;
pub mod sample;

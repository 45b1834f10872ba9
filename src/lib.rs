#![forbid(unsafe_code)]

//! Geometric re-projection and surface reconstruction for point clouds.
//!
//! This umbrella crate re-exports the workspace members so integration tests,
//! benchmarks and demos can depend on a single package.

pub use pointclouds_core;
pub use pointclouds_projection;
pub use pointclouds_triangulation;

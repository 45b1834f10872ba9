#![forbid(unsafe_code)]

pub mod delaunay;
pub mod dispatch;
pub mod error;
pub mod mesh;
pub mod plane;

pub use delaunay::Delaunay2d;
pub use dispatch::{compute_triangulation, TriangulationStrategy};
pub use error::TriangulationError;
pub use mesh::IndexedMesh;
pub use plane::{triangulate_on_plane, LsPlane};

use pointclouds_core::CloudSource;
use tracing::{debug, warn};

use crate::delaunay::{stage_points, Delaunay2d};
use crate::plane::{filter_long_edges, triangulate_on_plane};
use crate::{IndexedMesh, TriangulationError};

/// How [`compute_triangulation`] builds its mesh.
///
/// `max_edge_length <= 0` disables the long-edge filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriangulationStrategy {
    /// Delaunay triangulation of the points projected on the XY plane.
    Generic { max_edge_length: f32 },
    /// Delaunay triangulation inside the cloud's least-squares plane.
    BestFitPlane { max_edge_length: f32 },
    /// A mesh handle over the cloud with no triangles.
    EmptyPassthrough,
}

impl Default for TriangulationStrategy {
    fn default() -> Self {
        TriangulationStrategy::Generic {
            max_edge_length: 0.0,
        }
    }
}

/// Triangulate `cloud` with the given strategy.
///
/// Triangles always index into `cloud` itself, which the returned mesh
/// borrows. `Ok(None)` means the long-edge filter removed every triangle.
///
/// # Errors
///
/// Returns [`TriangulationError`] when the staging buffer cannot be
/// allocated, when no plane can be fitted, or when the points cannot be
/// triangulated (fewer than 3, or collinear once projected).
pub fn compute_triangulation<C>(
    cloud: &C,
    strategy: TriangulationStrategy,
) -> Result<Option<IndexedMesh<'_, C>>, TriangulationError>
where
    C: CloudSource + ?Sized,
{
    let result = match strategy {
        TriangulationStrategy::Generic { max_edge_length } => {
            triangulate_xy(cloud, max_edge_length)
        }
        TriangulationStrategy::BestFitPlane { max_edge_length } => {
            triangulate_on_plane(cloud, max_edge_length)
        }
        TriangulationStrategy::EmptyPassthrough => Ok(Some(IndexedMesh::empty(cloud))),
    };

    match &result {
        Ok(Some(mesh)) => debug!(triangles = mesh.len(), ?strategy, "triangulation done"),
        Ok(None) => debug!(?strategy, "every triangle exceeded the maximum edge length"),
        Err(err) => warn!(%err, points = cloud.len(), ?strategy, "triangulation failed"),
    }
    result
}

fn triangulate_xy<C>(
    cloud: &C,
    max_edge_length: f32,
) -> Result<Option<IndexedMesh<'_, C>>, TriangulationError>
where
    C: CloudSource + ?Sized,
{
    let staged = stage_points(cloud, |p| [p[0] as f64, p[1] as f64])?;
    let mesh = Delaunay2d::build(&staged)?.link_to_cloud(cloud);
    Ok(filter_long_edges(mesh, max_edge_length))
}

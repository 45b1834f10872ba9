//! Planar Delaunay triangulation engine.
//!
//! Points are triangulated in 2D; the resulting index triplets are then
//! bound to the 3D cloud the 2D points were staged from.

use delaunator::{triangulate, Point};
use pointclouds_core::CloudSource;
use tracing::debug;

use crate::{IndexedMesh, TriangulationError};

/// Triangles produced by a 2D Delaunay pass, not yet tied to a cloud.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delaunay2d {
    num_points: usize,
    triangles: Vec<[usize; 3]>,
}

impl Delaunay2d {
    /// Triangulate 2D points.
    ///
    /// # Errors
    ///
    /// - [`TriangulationError::NotEnoughPoints`] for fewer than 3 points.
    /// - [`TriangulationError::NonFinite`] when a coordinate is NaN or
    ///   infinite.
    /// - [`TriangulationError::Degenerate`] when all points are collinear or
    ///   coincident.
    /// - [`TriangulationError::Allocation`] if the triangle list cannot be
    ///   reserved.
    pub fn build(points: &[Point]) -> Result<Self, TriangulationError> {
        if points.len() < 3 {
            return Err(TriangulationError::NotEnoughPoints {
                count: points.len(),
            });
        }

        // the engine cannot order NaN coordinates
        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(TriangulationError::NonFinite { index });
        }

        let result = triangulate(points);
        if result.triangles.is_empty() {
            return Err(TriangulationError::Degenerate);
        }

        let count = result.triangles.len() / 3;
        let mut triangles = Vec::new();
        triangles
            .try_reserve_exact(count)
            .map_err(|source| TriangulationError::Allocation { count, source })?;
        for chunk in result.triangles.chunks_exact(3) {
            triangles.push([chunk[0], chunk[1], chunk[2]]);
        }

        debug!(
            "Triangulated {} points into {} triangles",
            points.len(),
            triangles.len()
        );

        Ok(Self {
            num_points: points.len(),
            triangles,
        })
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Bind the triangles to the cloud the 2D points were staged from.
    ///
    /// `cloud` must hold the points in the same order as the staged buffer.
    pub fn link_to_cloud<C>(self, cloud: &C) -> IndexedMesh<'_, C>
    where
        C: CloudSource + ?Sized,
    {
        debug_assert_eq!(self.num_points, cloud.len());
        IndexedMesh::new(cloud, self.triangles)
    }
}

/// Stage every point of `cloud` into a 2D buffer using `project`.
///
/// # Errors
///
/// Returns [`TriangulationError::Allocation`] if the buffer cannot be
/// reserved.
pub(crate) fn stage_points<C, F>(cloud: &C, project: F) -> Result<Vec<Point>, TriangulationError>
where
    C: CloudSource + ?Sized,
    F: Fn([f32; 3]) -> [f64; 2],
{
    let count = cloud.len();
    let mut staged = Vec::new();
    staged
        .try_reserve_exact(count)
        .map_err(|source| TriangulationError::Allocation { count, source })?;
    staged.extend(cloud.points().map(|p| {
        let [x, y] = project(p);
        Point { x, y }
    }));
    Ok(staged)
}

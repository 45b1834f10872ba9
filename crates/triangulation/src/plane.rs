use nalgebra::{Matrix3, SymmetricEigen, Vector3};
use pointclouds_core::CloudSource;
use tracing::debug;

use crate::delaunay::{stage_points, Delaunay2d};
use crate::{IndexedMesh, TriangulationError};

/// Least-squares plane through a point set, with an in-plane frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LsPlane {
    pub centroid: [f32; 3],
    /// Unit normal, direction of least spread.
    pub normal: [f32; 3],
    /// In-plane unit axis along the direction of largest spread.
    pub u: [f32; 3],
    /// `normal x u`.
    pub v: [f32; 3],
}

impl LsPlane {
    /// Fit a plane by PCA of the point covariance.
    ///
    /// Returns `None` for fewer than 3 points or when every point coincides.
    pub fn fit<C>(cloud: &C) -> Option<Self>
    where
        C: CloudSource + ?Sized,
    {
        let n = cloud.len();
        if n < 3 {
            return None;
        }

        // f64 accumulation, clouds far from the origin lose too much in f32
        let mut centroid = Vector3::<f64>::zeros();
        for p in cloud.points() {
            centroid += Vector3::new(p[0] as f64, p[1] as f64, p[2] as f64);
        }
        centroid /= n as f64;

        let mut cov = Matrix3::<f64>::zeros();
        for p in cloud.points() {
            let d = Vector3::new(p[0] as f64, p[1] as f64, p[2] as f64) - centroid;
            cov += d * d.transpose();
        }
        cov /= n as f64;

        if !cov.iter().all(|v| v.is_finite()) {
            return None;
        }

        let eigen = SymmetricEigen::new(cov);
        let values = eigen.eigenvalues;
        let (mut min_i, mut max_i) = (0, 0);
        for i in 1..3 {
            if values[i] < values[min_i] {
                min_i = i;
            }
            if values[i] > values[max_i] {
                max_i = i;
            }
        }
        // spread below the centroid's rounding level counts as none
        let noise_floor = (4.0 * f64::EPSILON * centroid.amax()).powi(2);
        if min_i == max_i || values[max_i] <= noise_floor {
            return None;
        }

        let normal = eigen.eigenvectors.column(min_i).normalize();
        let u = eigen.eigenvectors.column(max_i).normalize();
        let v = normal.cross(&u).normalize();

        Some(Self {
            centroid: to_f32(&centroid),
            normal: to_f32(&normal),
            u: to_f32(&u),
            v: to_f32(&v),
        })
    }

    /// Coordinates of `p` in the plane frame `(u, v)`, origin at the centroid.
    pub fn project(&self, p: [f32; 3]) -> [f64; 2] {
        let d = [
            (p[0] - self.centroid[0]) as f64,
            (p[1] - self.centroid[1]) as f64,
            (p[2] - self.centroid[2]) as f64,
        ];
        [dot(&d, &self.u), dot(&d, &self.v)]
    }

    /// Signed distance from `p` to the plane, positive on the normal side.
    pub fn signed_distance(&self, p: [f32; 3]) -> f32 {
        let d = [
            (p[0] - self.centroid[0]) as f64,
            (p[1] - self.centroid[1]) as f64,
            (p[2] - self.centroid[2]) as f64,
        ];
        dot(&d, &self.normal) as f32
    }
}

/// Triangulate a cloud inside its least-squares plane.
///
/// Points are expressed in the plane frame, triangulated in 2D and bound back
/// to `cloud`. With `max_edge_length > 0`, triangles having a longer 3D edge
/// are removed; if none survive the result is `Ok(None)`.
///
/// # Errors
///
/// - [`TriangulationError::PlaneFit`] if no plane can be fitted.
/// - Any error of [`Delaunay2d::build`] or staging.
pub fn triangulate_on_plane<C>(
    cloud: &C,
    max_edge_length: f32,
) -> Result<Option<IndexedMesh<'_, C>>, TriangulationError>
where
    C: CloudSource + ?Sized,
{
    let plane = LsPlane::fit(cloud).ok_or(TriangulationError::PlaneFit {
        count: cloud.len(),
    })?;
    debug!(normal = ?plane.normal, "fitted least-squares plane");

    let staged = stage_points(cloud, |p| plane.project(p))?;
    let mesh = Delaunay2d::build(&staged)?.link_to_cloud(cloud);
    Ok(filter_long_edges(mesh, max_edge_length))
}

/// Apply the optional long-edge filter; an emptied mesh becomes `None`.
pub(crate) fn filter_long_edges<C>(
    mut mesh: IndexedMesh<'_, C>,
    max_edge_length: f32,
) -> Option<IndexedMesh<'_, C>>
where
    C: CloudSource + ?Sized,
{
    if max_edge_length > 0.0 {
        let removed = mesh.remove_triangles_longer_than(max_edge_length);
        debug!(removed, kept = mesh.len(), max_edge_length, "removed long triangles");
        if mesh.is_empty() {
            return None;
        }
    }
    Some(mesh)
}

fn to_f32(v: &Vector3<f64>) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

fn dot(d: &[f64; 3], axis: &[f32; 3]) -> f64 {
    d[0] * axis[0] as f64 + d[1] * axis[1] as f64 + d[2] * axis[2] as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pointclouds_core::PointCloud;

    /// 5x5 grid on the plane x + z = 4, tilted 45 degrees about Y.
    fn tilted_grid() -> PointCloud {
        let mut pts = Vec::new();
        for i in 0..5 {
            for j in 0..5 {
                let s = i as f32 * 0.5;
                pts.push([s, j as f32 * 0.5, 4.0 - s]);
            }
        }
        PointCloud::from_points(&pts)
    }

    #[test]
    fn fit_recovers_tilted_normal() {
        let plane = LsPlane::fit(&tilted_grid()).unwrap();
        let inv_sqrt2 = std::f32::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(plane.normal[0].abs(), inv_sqrt2, epsilon = 1e-4);
        assert_relative_eq!(plane.normal[1].abs(), 0.0, epsilon = 1e-4);
        assert_relative_eq!(plane.normal[2].abs(), inv_sqrt2, epsilon = 1e-4);
        for p in tilted_grid().iter_points() {
            assert_relative_eq!(plane.signed_distance(p), 0.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn frame_is_orthonormal() {
        let plane = LsPlane::fit(&tilted_grid()).unwrap();
        let d = |a: &[f32; 3], b: &[f32; 3]| a[0] * b[0] + a[1] * b[1] + a[2] * b[2];
        assert_relative_eq!(d(&plane.u, &plane.u), 1.0, epsilon = 1e-5);
        assert_relative_eq!(d(&plane.v, &plane.v), 1.0, epsilon = 1e-5);
        assert_relative_eq!(d(&plane.u, &plane.v), 0.0, epsilon = 1e-5);
        assert_relative_eq!(d(&plane.u, &plane.normal), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn fit_needs_three_distinct_points() {
        assert!(LsPlane::fit(&PointCloud::from_points(&[[0.0; 3], [1.0; 3]])).is_none());
        assert!(LsPlane::fit(&PointCloud::from_points(&[[2.0; 3]; 5])).is_none());
    }

    #[test]
    fn fit_does_not_depend_on_cloud_scale() {
        let mut pts = Vec::new();
        for i in 0..5 {
            for j in 0..5 {
                pts.push([i as f32 * 1e-9, j as f32 * 1e-9, 0.0]);
            }
        }
        let cloud = PointCloud::from_points(&pts);
        let plane = LsPlane::fit(&cloud).unwrap();
        assert_relative_eq!(plane.normal[2].abs(), 1.0, epsilon = 1e-4);
        let mesh = triangulate_on_plane(&cloud, 0.0).unwrap().unwrap();
        assert!(!mesh.is_empty());
    }

    #[test]
    fn coincident_points_far_from_origin_do_not_fit() {
        let cloud = PointCloud::from_points(&[[0.1, 1.0e4, -3.3]; 7]);
        assert!(LsPlane::fit(&cloud).is_none());
    }

    #[test]
    fn vertical_wall_triangulates_where_xy_projection_cannot() {
        // all points share x == y, so their XY projection is a line
        let mut pts = Vec::new();
        for i in 0..4 {
            for k in 0..4 {
                pts.push([i as f32, i as f32, k as f32]);
            }
        }
        let cloud = PointCloud::from_points(&pts);
        let mesh = triangulate_on_plane(&cloud, 0.0).unwrap().unwrap();
        // a 4x4 grid has 9 cells, two triangles each
        assert!(mesh.len() >= 18);
        assert!(mesh.triangles().iter().flatten().all(|&i| i < cloud.len()));
    }

    #[test]
    fn long_edge_filter_can_empty_the_mesh() {
        let cloud = tilted_grid();
        assert!(triangulate_on_plane(&cloud, 0.1).unwrap().is_none());
        let kept = triangulate_on_plane(&cloud, 1.0).unwrap().unwrap();
        assert!(!kept.is_empty());
    }

    #[test]
    fn collinear_cloud_fails_plane_triangulation() {
        let cloud = PointCloud::from_points(&[[0.0; 3], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]]);
        assert!(triangulate_on_plane(&cloud, 0.0).is_err());
    }
}

use pointclouds_core::{CloudSource, PointCloud, ProgressReporter, ProgressSession};
use tracing::debug;

use crate::{ProjectionError, RollAxis};

/// How the ordinate of a developed cone point is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConeProjection {
    /// Ordinate is the raw height along the roll axis.
    #[default]
    Direct,
    /// Ordinate is the slant distance of the point's foot on the cone
    /// surface, scaled by `cos(half_angle)` and signed like the foot's height.
    Orthogonal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeParams {
    pub axis: RollAxis,
    /// Scale applied to the angle to get an arc length.
    pub base_radius: f32,
    /// Half opening angle in degrees.
    ///
    /// Values approaching 90 make `tan` blow up and the projection lose all
    /// precision; they are passed through unchanged.
    pub half_angle_deg: f32,
    /// Apex of the cone.
    pub center: [f32; 3],
    pub projection: ConeProjection,
}

impl Default for ConeParams {
    fn default() -> Self {
        Self {
            axis: RollAxis::Z,
            base_radius: 1.0,
            half_angle_deg: 0.0,
            center: [0.0; 3],
            projection: ConeProjection::Direct,
        }
    }
}

/// Unroll a cloud onto the lateral surface of a cone.
///
/// For each point, relative to the apex, the output is
/// `(angle * base_radius, ordinate + center[axis], altitude)` where
/// `altitude` is the distance to the foot of the point on the cone profile,
/// negative when `x2 * h - z2 * rho < 0`.
///
/// A half angle of 0 degenerates to a cylinder of radius 0: the altitude is
/// then the distance to the axis, up to sign.
///
/// # Errors
///
/// Returns [`ProjectionError::Allocation`] if the output cloud cannot be
/// reserved.
pub fn develop_on_cone<C>(
    cloud: &C,
    params: &ConeParams,
    progress: Option<&mut dyn ProgressReporter>,
) -> Result<PointCloud, ProjectionError>
where
    C: CloudSource + ?Sized,
{
    let count = cloud.len();
    let mut out = PointCloud::try_with_capacity(count).map_err(ProjectionError::allocation(count))?;

    let alpha = params.half_angle_deg.to_radians();
    let tan_alpha = alpha.tan();
    let cos_alpha = alpha.cos();
    let q = 1.0 / (1.0 + tan_alpha * tan_alpha);
    let center = params.center;
    let base = center[params.axis.index()];

    let mut session = ProgressSession::begin(progress, "DevelopOnCone", count);
    for p in cloud.points() {
        let local = [p[0] - center[0], p[1] - center[1], p[2] - center[2]];
        let c = params.axis.cylindrical(local);
        let (u, h) = (c.radius, c.height);

        // foot of the point on the cone profile
        let z2 = (h + u * tan_alpha) * q;
        let x2 = z2 * tan_alpha;

        let lat = match params.projection {
            ConeProjection::Direct => h,
            ConeProjection::Orthogonal => {
                let lat = (x2 * x2 + z2 * z2).sqrt() * cos_alpha;
                if lat * z2 < 0.0 {
                    -lat
                } else {
                    lat
                }
            }
        };

        let dx = u - x2;
        let dz = h - z2;
        let mut alt = (dx * dx + dz * dz).sqrt();
        if x2 * h - z2 * u < 0.0 {
            alt = -alt;
        }

        out.push([c.angle * params.base_radius, lat + base, alt]);

        if session.step().is_break() {
            debug!(developed = out.len(), total = count, "cone development cancelled");
            break;
        }
    }

    debug!(
        points = out.len(),
        half_angle_deg = params.half_angle_deg,
        projection = ?params.projection,
        "developed cloud on cone"
    );
    Ok(out)
}

use nalgebra::{Matrix3, Vector3};
use pointclouds_core::{CloudSource, PointCloud, ProgressReporter, ProgressSession};
use tracing::debug;

use crate::ProjectionError;

/// Similarity transform `p' = s * R * p + t`.
///
/// `rotation == None` stands for the identity rotation, giving `p' = s * p + t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformation {
    pub scale: f32,
    /// Row-major rotation matrix.
    pub rotation: Option<[[f32; 3]; 3]>,
    pub translation: [f32; 3],
}

/// The arithmetic a [`Transformation`] reduces to, decided once per cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformKind {
    Identity,
    Scaled {
        scale: f32,
        translation: Vector3<f32>,
    },
    Rotated {
        scale: f32,
        rotation: Matrix3<f32>,
        translation: Vector3<f32>,
    },
}

impl TransformKind {
    #[inline]
    pub fn apply(&self, p: [f32; 3]) -> [f32; 3] {
        match self {
            TransformKind::Identity => p,
            TransformKind::Scaled { scale, translation } => {
                let v = Vector3::from(p) * *scale + translation;
                [v.x, v.y, v.z]
            }
            TransformKind::Rotated {
                scale,
                rotation,
                translation,
            } => {
                let v = (rotation * Vector3::from(p)) * *scale + translation;
                [v.x, v.y, v.z]
            }
        }
    }
}

impl Transformation {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            rotation: None,
            translation: [0.0; 3],
        }
    }

    pub fn new(scale: f32, rotation: [[f32; 3]; 3], translation: [f32; 3]) -> Self {
        Self {
            scale,
            rotation: Some(rotation),
            translation,
        }
    }

    pub fn scaled(scale: f32, translation: [f32; 3]) -> Self {
        Self {
            scale,
            rotation: None,
            translation,
        }
    }

    pub fn translation(translation: [f32; 3]) -> Self {
        Self::scaled(1.0, translation)
    }

    pub fn kind(&self) -> TransformKind {
        let translation = Vector3::from(self.translation);
        match self.rotation {
            Some(r) => TransformKind::Rotated {
                scale: self.scale,
                rotation: mat3_from_arrays(&r),
                translation,
            },
            None if self.scale == 1.0 && translation == Vector3::zeros() => {
                TransformKind::Identity
            }
            None => TransformKind::Scaled {
                scale: self.scale,
                translation,
            },
        }
    }

    pub fn apply_to_point(&self, p: &[f32; 3]) -> [f32; 3] {
        self.kind().apply(*p)
    }

    /// Compose two transforms: apply `self` first, then `other`.
    ///
    /// Result: s = s2 * s1, R = R2 * R1, t = s2 * R2 * t1 + t2
    pub fn compose(&self, other: &Transformation) -> Transformation {
        let r_self = self.rotation.as_ref().map(mat3_from_arrays);
        let r_other = other.rotation.as_ref().map(mat3_from_arrays);
        let t_self = Vector3::from(self.translation);
        let t_other = Vector3::from(other.translation);

        let rotated_t_self = match r_other {
            Some(r) => r * t_self,
            None => t_self,
        };
        let t_new = rotated_t_self * other.scale + t_other;

        let rotation = match (r_self, r_other) {
            (None, None) => None,
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (Some(a), Some(b)) => Some(b * a),
        };

        Transformation {
            scale: other.scale * self.scale,
            rotation: rotation.as_ref().map(mat3_to_arrays),
            translation: [t_new.x, t_new.y, t_new.z],
        }
    }

    /// Inverse transform, assuming the rotation is orthonormal.
    ///
    /// Returns `None` for a zero or non-finite scale.
    pub fn inverse(&self) -> Option<Transformation> {
        if self.scale == 0.0 || !self.scale.is_finite() {
            return None;
        }
        let inv_scale = 1.0 / self.scale;
        let r_t = self.rotation.as_ref().map(|r| mat3_from_arrays(r).transpose());
        let t = Vector3::from(self.translation);
        let t_inv = match r_t {
            Some(r_t) => -(r_t * t) * inv_scale,
            None => -t * inv_scale,
        };
        Some(Transformation {
            scale: inv_scale,
            rotation: r_t.as_ref().map(mat3_to_arrays),
            translation: [t_inv.x, t_inv.y, t_inv.z],
        })
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

/// Apply a similarity transform to all points in a cloud, returning a new
/// cloud.
///
/// Whether a rotation is involved is decided once, before the point loop.
/// If `progress` cancels, the points transformed so far are returned.
///
/// # Errors
///
/// Returns [`ProjectionError::Allocation`] if the output cloud cannot be
/// reserved.
pub fn apply_transformation<C>(
    cloud: &C,
    transform: &Transformation,
    progress: Option<&mut dyn ProgressReporter>,
) -> Result<PointCloud, ProjectionError>
where
    C: CloudSource + ?Sized,
{
    let count = cloud.len();
    let mut out = PointCloud::try_with_capacity(count).map_err(ProjectionError::allocation(count))?;
    let mut session = ProgressSession::begin(progress, "ApplyTransformation", count);

    let kind = transform.kind();
    match kind {
        TransformKind::Identity => transform_points(cloud, &mut out, &mut session, |p| p),
        TransformKind::Scaled { scale, translation } => {
            // P' = s*P+T
            transform_points(cloud, &mut out, &mut session, |p| {
                let v = Vector3::from(p) * scale + translation;
                [v.x, v.y, v.z]
            })
        }
        TransformKind::Rotated {
            scale,
            rotation,
            translation,
        } => {
            // P' = s*R.P+T
            transform_points(cloud, &mut out, &mut session, |p| {
                let v = (rotation * Vector3::from(p)) * scale + translation;
                [v.x, v.y, v.z]
            })
        }
    }

    debug!(points = out.len(), total = count, kind = ?kind, "applied transformation");
    Ok(out)
}

fn transform_points<C, F>(
    cloud: &C,
    out: &mut PointCloud,
    session: &mut ProgressSession<'_>,
    f: F,
) where
    C: CloudSource + ?Sized,
    F: Fn([f32; 3]) -> [f32; 3],
{
    for p in cloud.points() {
        out.push(f(p));
        if session.step().is_break() {
            break;
        }
    }
}

/// Convert a nalgebra Matrix3 to a [[f32; 3]; 3] array (row-major).
fn mat3_to_arrays(m: &Matrix3<f32>) -> [[f32; 3]; 3] {
    [
        [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
        [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
        [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
    ]
}

/// Convert a [[f32; 3]; 3] array to a nalgebra Matrix3.
fn mat3_from_arrays(a: &[[f32; 3]; 3]) -> Matrix3<f32> {
    Matrix3::new(
        a[0][0], a[0][1], a[0][2], a[1][0], a[1][1], a[1][2], a[2][0], a[2][1], a[2][2],
    )
}

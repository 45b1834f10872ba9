use pointclouds_core::{CloudSource, PointCloud, ProgressReporter, ProgressSession};
use tracing::debug;

use crate::{ProjectionError, RollAxis};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParams {
    pub radius: f32,
    pub axis: RollAxis,
    /// Point on the cylinder axis. `None` uses the midpoint of the cloud's
    /// bounding box.
    pub center: Option<[f32; 3]>,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            axis: RollAxis::Z,
            center: None,
        }
    }
}

/// Unroll a cloud onto the plane tangent to a cylinder.
///
/// Each point `p` (taken relative to the center) becomes
/// `(angle * radius, height, distance_to_axis - radius)`, so points lying
/// on the cylinder map to `z == 0`, points outside get positive `z`.
///
/// If `progress` cancels, the points developed so far are returned.
///
/// # Errors
///
/// Returns [`ProjectionError::Allocation`] if the output cloud cannot be
/// reserved.
pub fn develop_on_cylinder<C>(
    cloud: &C,
    params: &CylinderParams,
    progress: Option<&mut dyn ProgressReporter>,
) -> Result<PointCloud, ProjectionError>
where
    C: CloudSource + ?Sized,
{
    let count = cloud.len();
    let mut out = PointCloud::try_with_capacity(count).map_err(ProjectionError::allocation(count))?;

    let center = match params.center {
        Some(c) => c,
        None => cloud.aabb().center().unwrap_or([0.0; 3]),
    };
    let radius = params.radius;

    let mut session = ProgressSession::begin(progress, "Develop", count);
    for p in cloud.points() {
        let local = [p[0] - center[0], p[1] - center[1], p[2] - center[2]];
        let c = params.axis.cylindrical(local);
        out.push([c.angle * radius, c.height, c.radius - radius]);

        if session.step().is_break() {
            debug!(developed = out.len(), total = count, "cylinder development cancelled");
            break;
        }
    }

    debug!(points = out.len(), radius, axis = ?params.axis, "developed cloud on cylinder");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pointclouds_core::PointCloud;
    use proptest::prelude::*;
    use std::f32::consts::PI;
    use std::ops::ControlFlow;

    struct CancelAfter(usize);

    impl ProgressReporter for CancelAfter {
        fn step(&mut self) -> ControlFlow<()> {
            self.0 -= 1;
            if self.0 == 0 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
    }

    fn ring() -> PointCloud {
        PointCloud::from_points(&[
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
        ])
    }

    #[test]
    fn points_on_cylinder_have_zero_deviation() {
        let params = CylinderParams {
            radius: 1.0,
            axis: RollAxis::Z,
            center: Some([0.0; 3]),
        };
        let out = develop_on_cylinder(&ring(), &params, None).unwrap();
        assert_eq!(out.len(), 4);
        for z in &out.z {
            assert_relative_eq!(*z, 0.0, epsilon = 1e-6);
        }
        // arc length = angle * radius
        assert_relative_eq!(out.x[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(out.x[1], PI / 2.0, epsilon = 1e-6);
        assert_relative_eq!(out.x[2], PI, epsilon = 1e-6);
        assert_relative_eq!(out.x[3], -PI / 2.0, epsilon = 1e-6);
    }

    #[test]
    fn height_is_preserved_exactly() {
        let cloud = PointCloud::from_points(&[[2.0, 0.0, 5.5], [0.0, -3.0, -1.25]]);
        let params = CylinderParams {
            radius: 2.0,
            axis: RollAxis::Z,
            center: Some([0.0; 3]),
        };
        let out = develop_on_cylinder(&cloud, &params, None).unwrap();
        assert_eq!(out.y, vec![5.5, -1.25]);
        assert_relative_eq!(out.z[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn default_center_is_bounding_box_midpoint() {
        let shifted = PointCloud::from_points(&[
            [11.0, 20.0, 30.0],
            [10.0, 21.0, 31.0],
            [9.0, 20.0, 32.0],
            [10.0, 19.0, 30.0],
        ]);
        let params = CylinderParams {
            radius: 1.0,
            axis: RollAxis::Z,
            center: None,
        };
        let out = develop_on_cylinder(&shifted, &params, None).unwrap();
        for z in &out.z {
            assert_relative_eq!(*z, 0.0, epsilon = 1e-5);
        }
        assert_relative_eq!(out.y[0], -1.0, epsilon = 1e-6);
        assert_relative_eq!(out.y[2], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn roll_axis_x_uses_z_and_y() {
        // about X: dim1 = z, dim2 = y
        let cloud = PointCloud::from_points(&[[4.0, 0.0, 2.0]]);
        let params = CylinderParams {
            radius: 2.0,
            axis: RollAxis::X,
            center: Some([0.0; 3]),
        };
        let out = develop_on_cylinder(&cloud, &params, None).unwrap();
        assert_relative_eq!(out.x[0], PI / 2.0 * 2.0, epsilon = 1e-6);
        assert_eq!(out.y[0], 4.0);
        assert_relative_eq!(out.z[0], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn negative_zero_on_the_seam_unrolls_to_plus_pi() {
        let cloud = PointCloud::from_points(&[[-1.0, -0.0, 0.0]]);
        let params = CylinderParams {
            radius: 1.0,
            axis: RollAxis::Z,
            center: Some([0.0; 3]),
        };
        let out = develop_on_cylinder(&cloud, &params, None).unwrap();
        assert_eq!(out.x[0], PI);
    }

    #[test]
    fn cancellation_keeps_partial_cloud() {
        let cloud = PointCloud::from_points(&[[1.0, 0.0, 0.0]; 10]);
        for k in 1..10 {
            let mut cancel = CancelAfter(k);
            let out =
                develop_on_cylinder(&cloud, &CylinderParams::default(), Some(&mut cancel)).unwrap();
            assert_eq!(out.len(), k);
        }
    }

    #[test]
    fn empty_cloud_gives_empty_output() {
        let out = develop_on_cylinder(&PointCloud::new(), &CylinderParams::default(), None).unwrap();
        assert!(out.is_empty());
    }

    proptest! {
        #[test]
        fn radial_and_angular_pair_round_trips(
            pts in prop::collection::vec((-50.0f32..50.0f32, -50.0f32..50.0f32, -50.0f32..50.0f32), 1..200),
            radius in 0.5f32..20.0f32,
            axis_index in 0u8..3,
        ) {
            let axis = RollAxis::from_index(axis_index).unwrap();
            let pts: Vec<[f32; 3]> = pts.into_iter().map(|(x, y, z)| [x, y, z]).collect();
            let cloud = PointCloud::from_points(&pts);
            let center = cloud.aabb().center().unwrap();
            let params = CylinderParams { radius, axis, center: Some(center) };
            let out = develop_on_cylinder(&cloud, &params, None).unwrap();
            prop_assert_eq!(out.len(), cloud.len());

            for (i, p) in pts.iter().enumerate() {
                let local = [p[0] - center[0], p[1] - center[1], p[2] - center[2]];
                let expected = axis.cylindrical(local);
                let angle = out.x[i] / radius;
                let rho = out.z[i] + radius;
                prop_assert!(angle > -PI - 1e-5 && angle <= PI + 1e-5);
                prop_assert!((angle - expected.angle).abs() < 1e-4);
                prop_assert!((rho - expected.radius).abs() < 1e-3);
                prop_assert_eq!(out.y[i], expected.height);
            }
        }
    }
}

use pointclouds_projection::{
    ConeParams, ConeProjection, CylinderParams, ProjectionError, RollAxis, Transformation,
};
use pyo3::prelude::*;

use crate::cloud::PyPointCloud;

fn roll_axis(dim: u8) -> PyResult<RollAxis> {
    RollAxis::from_index(dim).ok_or_else(|| {
        pyo3::exceptions::PyValueError::new_err(format!("dim must be 0, 1 or 2, got {dim}"))
    })
}

fn to_py_err(err: ProjectionError) -> PyErr {
    pyo3::exceptions::PyMemoryError::new_err(err.to_string())
}

#[pyfunction(name = "develop_on_cylinder")]
#[pyo3(signature = (cloud, radius, dim=2, center=None))]
pub fn develop_on_cylinder_py(
    cloud: &PyPointCloud,
    radius: f32,
    dim: u8,
    center: Option<[f32; 3]>,
) -> PyResult<PyPointCloud> {
    let params = CylinderParams {
        radius,
        axis: roll_axis(dim)?,
        center,
    };
    let out = pointclouds_projection::develop_on_cylinder(&cloud.inner, &params, None)
        .map_err(to_py_err)?;
    Ok(PyPointCloud { inner: out })
}

#[pyfunction(name = "develop_on_cone")]
#[pyo3(signature = (cloud, base_radius, half_angle_deg, center, dim=2, orthogonal=false))]
pub fn develop_on_cone_py(
    cloud: &PyPointCloud,
    base_radius: f32,
    half_angle_deg: f32,
    center: [f32; 3],
    dim: u8,
    orthogonal: bool,
) -> PyResult<PyPointCloud> {
    let params = ConeParams {
        axis: roll_axis(dim)?,
        base_radius,
        half_angle_deg,
        center,
        projection: if orthogonal {
            ConeProjection::Orthogonal
        } else {
            ConeProjection::Direct
        },
    };
    let out =
        pointclouds_projection::develop_on_cone(&cloud.inner, &params, None).map_err(to_py_err)?;
    Ok(PyPointCloud { inner: out })
}

#[pyfunction(name = "apply_transformation")]
#[pyo3(signature = (cloud, scale=1.0, rotation=None, translation=[0.0, 0.0, 0.0]))]
pub fn apply_transformation_py(
    cloud: &PyPointCloud,
    scale: f32,
    rotation: Option<[[f32; 3]; 3]>,
    translation: [f32; 3],
) -> PyResult<PyPointCloud> {
    let transform = Transformation {
        scale,
        rotation,
        translation,
    };
    let out = pointclouds_projection::apply_transformation(&cloud.inner, &transform, None)
        .map_err(to_py_err)?;
    Ok(PyPointCloud { inner: out })
}

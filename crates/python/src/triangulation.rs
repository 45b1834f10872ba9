use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pointclouds_triangulation::{TriangulationError, TriangulationStrategy};
use pyo3::prelude::*;

use crate::cloud::PyPointCloud;

fn strategy_from_name(name: &str, max_edge_length: f32) -> PyResult<TriangulationStrategy> {
    match name {
        "generic" => Ok(TriangulationStrategy::Generic { max_edge_length }),
        "best_fit_plane" => Ok(TriangulationStrategy::BestFitPlane { max_edge_length }),
        "empty" => Ok(TriangulationStrategy::EmptyPassthrough),
        other => Err(pyo3::exceptions::PyValueError::new_err(format!(
            "unknown strategy {other:?}, expected 'generic', 'best_fit_plane' or 'empty'"
        ))),
    }
}

fn to_py_err(err: TriangulationError) -> PyErr {
    match err {
        TriangulationError::Allocation { .. } => {
            pyo3::exceptions::PyMemoryError::new_err(err.to_string())
        }
        _ => pyo3::exceptions::PyValueError::new_err(err.to_string()),
    }
}

/// Triangulate a cloud. Returns an (M, 3) array of point indices, or `None`
/// when the edge-length filter removed every triangle.
#[pyfunction(name = "compute_triangulation")]
#[pyo3(signature = (cloud, strategy="generic", max_edge_length=0.0))]
pub fn compute_triangulation_py<'py>(
    py: Python<'py>,
    cloud: &PyPointCloud,
    strategy: &str,
    max_edge_length: f32,
) -> PyResult<Option<Bound<'py, PyArray2<usize>>>> {
    let strategy = strategy_from_name(strategy, max_edge_length)?;
    let mesh = pointclouds_triangulation::compute_triangulation(&cloud.inner, strategy)
        .map_err(to_py_err)?;

    let Some(mesh) = mesh else {
        return Ok(None);
    };
    let flat: Vec<usize> = mesh.triangles().iter().flatten().copied().collect();
    let array = PyArray1::from_vec_bound(py, flat).reshape([mesh.len(), 3])?;
    Ok(Some(array))
}

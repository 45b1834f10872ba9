#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod cloud;
mod projection;
mod triangulation;

#[pymodule]
fn pcdevkit(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core
    m.add_class::<cloud::PyPointCloud>()?;

    // Projection
    m.add_function(wrap_pyfunction!(projection::develop_on_cylinder_py, m)?)?;
    m.add_function(wrap_pyfunction!(projection::develop_on_cone_py, m)?)?;
    m.add_function(wrap_pyfunction!(projection::apply_transformation_py, m)?)?;

    // Triangulation
    m.add_function(wrap_pyfunction!(
        triangulation::compute_triangulation_py,
        m
    )?)?;

    Ok(())
}

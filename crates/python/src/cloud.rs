use numpy::{Element, PyArray1, PyArray2, PyArrayMethods, PyUntypedArrayMethods};
use pyo3::prelude::*;

#[pyclass(name = "PointCloud")]
#[derive(Debug, Clone)]
pub struct PyPointCloud {
    pub(crate) inner: pointclouds_core::PointCloud,
}

#[pymethods]
impl PyPointCloud {
    #[new]
    pub fn new() -> Self {
        Self {
            inner: pointclouds_core::PointCloud::new(),
        }
    }

    /// Create a PointCloud from an Nx3 NumPy array.
    ///
    /// Accepts float32 or float64; float64 is narrowed to float32. The array
    /// must be C-contiguous.
    #[staticmethod]
    pub fn from_numpy(array: &Bound<'_, PyAny>) -> PyResult<Self> {
        if let Ok(arr) = array.downcast::<PyArray2<f32>>() {
            return read_xyz(arr, |v| v);
        }
        if let Ok(arr) = array.downcast::<PyArray2<f64>>() {
            return read_xyz(arr, |v| v as f32);
        }
        Err(pyo3::exceptions::PyTypeError::new_err(
            "expected NumPy array with dtype float32 or float64, shape (N, 3)",
        ))
    }

    pub fn to_numpy<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let n = self.inner.len();
        PyArray1::from_vec_bound(py, self.inner.to_array()).reshape([n, 3])
    }

    pub fn point(&self, index: usize) -> PyResult<[f32; 3]> {
        if index >= self.inner.len() {
            return Err(pyo3::exceptions::PyIndexError::new_err(format!(
                "point index {index} out of range for cloud of {} points",
                self.inner.len()
            )));
        }
        Ok(self.inner.point(index))
    }

    /// `(min, max)` corners over the finite points, or `None` if there are none.
    pub fn bounding_box(&self) -> Option<([f32; 3], [f32; 3])> {
        let aabb = self.inner.aabb();
        (!aabb.is_empty()).then_some((aabb.min, aabb.max))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    pub fn __repr__(&self) -> String {
        format!("PointCloud(n={})", self.inner.len())
    }
}

fn read_xyz<T, F>(array: &Bound<'_, PyArray2<T>>, convert: F) -> PyResult<PyPointCloud>
where
    T: Element + Copy,
    F: Fn(T) -> f32,
{
    // Fortran-order memory would be silently misread as interleaved xyz.
    if !array.is_c_contiguous() {
        return Err(pyo3::exceptions::PyValueError::new_err(
            "array must be C-contiguous (row-major). \
             Use numpy.ascontiguousarray(arr) to convert.",
        ));
    }
    let readonly = array.readonly();
    let shape = readonly.shape();
    if shape.len() != 2 || shape[1] != 3 {
        return Err(pyo3::exceptions::PyValueError::new_err(
            "expected shape (N, 3)",
        ));
    }
    let num_points = shape[0];
    let slice = readonly.as_slice().map_err(|_| {
        pyo3::exceptions::PyValueError::new_err("failed to read array as contiguous slice")
    })?;
    let data: Vec<f32> = slice.iter().map(|&v| convert(v)).collect();
    Ok(PyPointCloud {
        inner: pointclouds_core::PointCloud::from_array(&data, num_points),
    })
}

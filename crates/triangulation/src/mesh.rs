use std::fmt;

use pointclouds_core::CloudSource;

/// Triangles indexing into a cloud the mesh does not own.
///
/// The borrow ties the mesh to its source: every index stays valid for the
/// cloud the mesh was built from, and attributes stored alongside that cloud
/// (normals, colors) can be looked up with the same indices.
pub struct IndexedMesh<'a, C: ?Sized> {
    cloud: &'a C,
    triangles: Vec<[usize; 3]>,
}

impl<'a, C: CloudSource + ?Sized> IndexedMesh<'a, C> {
    pub fn new(cloud: &'a C, triangles: Vec<[usize; 3]>) -> Self {
        debug_assert!(
            triangles.iter().flatten().all(|&i| i < cloud.len()),
            "triangle index out of bounds for source cloud"
        );
        Self { cloud, triangles }
    }

    /// A mesh over `cloud` with no triangles.
    pub fn empty(cloud: &'a C) -> Self {
        Self {
            cloud,
            triangles: Vec::new(),
        }
    }

    pub fn cloud(&self) -> &'a C {
        self.cloud
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn triangle(&self, i: usize) -> [usize; 3] {
        self.triangles[i]
    }

    pub fn triangle_points(&self, i: usize) -> [[f32; 3]; 3] {
        self.triangles[i].map(|v| self.cloud.point(v))
    }

    pub fn iter_triangle_points(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.triangles
            .iter()
            .map(|tri| tri.map(|v| self.cloud.point(v)))
    }

    /// Drop every triangle with an edge longer than `max_edge_length`,
    /// measured between the 3D source points. Returns how many were removed.
    pub fn remove_triangles_longer_than(&mut self, max_edge_length: f32) -> usize {
        let max_sq = max_edge_length * max_edge_length;
        let cloud = self.cloud;
        let before = self.triangles.len();
        self.triangles.retain(|tri| {
            let [a, b, c] = tri.map(|v| cloud.point(v));
            squared_distance(&a, &b) <= max_sq
                && squared_distance(&b, &c) <= max_sq
                && squared_distance(&c, &a) <= max_sq
        });
        before - self.triangles.len()
    }
}

impl<C: ?Sized> fmt::Debug for IndexedMesh<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedMesh")
            .field("triangles", &self.triangles.len())
            .finish_non_exhaustive()
    }
}

#[inline]
fn squared_distance(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

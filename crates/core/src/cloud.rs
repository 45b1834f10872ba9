use std::collections::TryReserveError;

use crate::{Aabb, CloudSource};

/// Structure-of-arrays point cloud.
///
/// Positions live in `x/y/z`; normals and colors are optional per-point
/// attributes that stay index-aligned with the positions, so a triangle
/// index into this cloud also addresses its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
    pub normals: Option<Normals>,
    pub colors: Option<Colors>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normals {
    pub nx: Vec<f32>,
    pub ny: Vec<f32>,
    pub nz: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Colors {
    pub r: Vec<u8>,
    pub g: Vec<u8>,
    pub b: Vec<u8>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            z: Vec::new(),
            normals: None,
            colors: None,
        }
    }

    /// Allocate an empty cloud able to hold `num_points` positions without
    /// reallocating.
    ///
    /// # Errors
    ///
    /// Returns the allocator's error when the request cannot be satisfied,
    /// instead of aborting the process.
    pub fn try_with_capacity(num_points: usize) -> Result<Self, TryReserveError> {
        let mut cloud = Self::new();
        cloud.try_reserve(num_points)?;
        Ok(cloud)
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.x.try_reserve_exact(additional)?;
        self.y.try_reserve_exact(additional)?;
        self.z.try_reserve_exact(additional)?;
        Ok(())
    }

    pub fn from_xyz(x: Vec<f32>, y: Vec<f32>, z: Vec<f32>) -> Self {
        assert_eq!(x.len(), y.len(), "x and y must have same length");
        assert_eq!(x.len(), z.len(), "x and z must have same length");

        Self {
            x,
            y,
            z,
            normals: None,
            colors: None,
        }
    }

    pub fn from_points(points: &[[f32; 3]]) -> Self {
        let mut cloud = Self::new();
        cloud.x.reserve_exact(points.len());
        cloud.y.reserve_exact(points.len());
        cloud.z.reserve_exact(points.len());
        for &p in points {
            cloud.push(p);
        }
        cloud
    }

    pub fn from_array(data: &[f32], num_points: usize) -> Self {
        assert_eq!(
            data.len(),
            num_points * 3,
            "interleaved xyz input must have num_points * 3 floats"
        );

        let mut x = Vec::with_capacity(num_points);
        let mut y = Vec::with_capacity(num_points);
        let mut z = Vec::with_capacity(num_points);

        for chunk in data.chunks_exact(3).take(num_points) {
            x.push(chunk[0]);
            y.push(chunk[1]);
            z.push(chunk[2]);
        }

        Self::from_xyz(x, y, z)
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.x.len(), self.y.len());
        debug_assert_eq!(self.x.len(), self.z.len());
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_xyz(&self.x, &self.y, &self.z)
    }

    pub fn point(&self, i: usize) -> [f32; 3] {
        [self.x[i], self.y[i], self.z[i]]
    }

    /// Append a position. Attribute arrays are not touched, so only use this
    /// on clouds without normals or colors.
    pub fn push(&mut self, p: [f32; 3]) {
        debug_assert!(self.normals.is_none() && self.colors.is_none());
        self.x.push(p[0]);
        self.y.push(p[1]);
        self.z.push(p[2]);
    }

    pub fn iter_points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((x, y), z)| [*x, *y, *z])
    }

    pub fn to_array(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.len() * 3);
        for i in 0..self.len() {
            out.push(self.x[i]);
            out.push(self.y[i]);
            out.push(self.z[i]);
        }
        out
    }
}

impl Default for PointCloud {
    fn default() -> Self {
        Self::new()
    }
}

impl CloudSource for PointCloud {
    fn len(&self) -> usize {
        PointCloud::len(self)
    }

    fn point(&self, i: usize) -> [f32; 3] {
        PointCloud::point(self, i)
    }

    fn aabb(&self) -> Aabb {
        PointCloud::aabb(self)
    }
}

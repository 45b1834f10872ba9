#[derive(Debug, Clone, PartialEq)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
    empty: bool,
}

impl Aabb {
    pub fn empty() -> Self {
        Self {
            min: [f32::INFINITY; 3],
            max: [f32::NEG_INFINITY; 3],
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn expand_with_point(&mut self, point: [f32; 3]) {
        if !point.iter().all(|v| v.is_finite()) {
            return;
        }

        if self.empty {
            self.min = point;
            self.max = point;
            self.empty = false;
            return;
        }

        for (axis, &val) in point.iter().enumerate() {
            self.min[axis] = self.min[axis].min(val);
            self.max[axis] = self.max[axis].max(val);
        }
    }

    /// Midpoint of the box, or `None` when no finite point was ever added.
    pub fn center(&self) -> Option<[f32; 3]> {
        if self.empty {
            return None;
        }
        Some([
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ])
    }

    pub fn from_points(points: impl IntoIterator<Item = [f32; 3]>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.expand_with_point(p);
        }
        aabb
    }

    pub fn from_xyz(x: &[f32], y: &[f32], z: &[f32]) -> Self {
        let n = x.len().min(y.len()).min(z.len());
        Self::from_points((0..n).map(|i| [x[i], y[i], z[i]]))
    }
}

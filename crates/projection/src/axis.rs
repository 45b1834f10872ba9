/// Axis a cylinder or cone is rolled around.
///
/// The two remaining axes form the cross-section plane and are taken in
/// cyclic order: for roll axis `d`, `dim1 = d - 1 mod 3` and
/// `dim2 = d + 1 mod 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RollAxis {
    X,
    Y,
    #[default]
    Z,
}

/// A point expressed relative to a roll axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylindrical {
    /// Distance to the roll axis.
    pub radius: f32,
    /// `atan2(p[dim1], p[dim2])`, in `(-pi, pi]`.
    pub angle: f32,
    /// Coordinate along the roll axis.
    pub height: f32,
}

impl RollAxis {
    pub const ALL: [RollAxis; 3] = [RollAxis::X, RollAxis::Y, RollAxis::Z];

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(RollAxis::X),
            1 => Some(RollAxis::Y),
            2 => Some(RollAxis::Z),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            RollAxis::X => 0,
            RollAxis::Y => 1,
            RollAxis::Z => 2,
        }
    }

    /// `(dim1, dim2)` for this roll axis.
    pub const fn companions(self) -> (usize, usize) {
        let d = self.index();
        ((d + 2) % 3, (d + 1) % 3)
    }

    #[inline]
    pub fn cylindrical(self, p: [f32; 3]) -> Cylindrical {
        let (dim1, dim2) = self.companions();
        // + 0.0 turns -0.0 into +0.0: atan2 stays off -pi, and the axis is at 0
        let a = p[dim1] + 0.0;
        let b = p[dim2] + 0.0;
        Cylindrical {
            radius: (a * a + b * b).sqrt(),
            angle: a.atan2(b),
            height: p[self.index()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn companions_are_cyclic() {
        assert_eq!(RollAxis::X.companions(), (2, 1));
        assert_eq!(RollAxis::Y.companions(), (0, 2));
        assert_eq!(RollAxis::Z.companions(), (1, 0));
    }

    #[test]
    fn companions_never_include_roll_axis() {
        for axis in RollAxis::ALL {
            let (a, b) = axis.companions();
            assert_ne!(a, axis.index());
            assert_ne!(b, axis.index());
            assert_ne!(a, b);
        }
    }

    #[test]
    fn from_index_rejects_out_of_range() {
        assert_eq!(RollAxis::from_index(0), Some(RollAxis::X));
        assert_eq!(RollAxis::from_index(2), Some(RollAxis::Z));
        assert_eq!(RollAxis::from_index(3), None);
    }

    #[test]
    fn angle_covers_all_quadrants_about_z() {
        // about Z: dim1 = y, dim2 = x
        let cases = [
            ([1.0, 1.0, 0.0], PI / 4.0),
            ([-1.0, 1.0, 0.0], 3.0 * PI / 4.0),
            ([-1.0, -1.0, 0.0], -3.0 * PI / 4.0),
            ([1.0, -1.0, 0.0], -PI / 4.0),
            ([1.0, 0.0, 0.0], 0.0),
            ([0.0, 1.0, 0.0], FRAC_PI_2),
            ([-1.0, 0.0, 0.0], PI),
            ([0.0, -1.0, 0.0], -FRAC_PI_2),
            ([-1.0, -0.0, 0.0], PI),
            ([-0.0, -0.0, 0.0], 0.0),
        ];
        for (p, expected) in cases {
            let c = RollAxis::Z.cylindrical(p);
            assert_relative_eq!(c.angle, expected, epsilon = 1e-6);
            assert!(c.angle > -PI && c.angle <= PI);
        }
    }

    #[test]
    fn height_is_roll_coordinate() {
        let p = [3.0, -4.0, 7.0];
        assert_eq!(RollAxis::X.cylindrical(p).height, 3.0);
        assert_eq!(RollAxis::Y.cylindrical(p).height, -4.0);
        assert_eq!(RollAxis::Z.cylindrical(p).height, 7.0);
        for axis in RollAxis::ALL {
            let c = axis.cylindrical(p);
            let h = c.height;
            assert_relative_eq!(c.radius * c.radius + h * h, 74.0, epsilon = 1e-4);
        }
    }
}

use std::iter::FusedIterator;

use crate::Aabb;

/// Read access to an ordered, finite set of 3D positions.
///
/// Implementors must return the same point for the same index for as long
/// as they are borrowed; meshes keep indices into a source and rely on it.
pub trait CloudSource {
    fn len(&self) -> usize;

    fn point(&self, i: usize) -> [f32; 3];

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sequential cursor over the cloud, starting at the first point.
    fn points(&self) -> Points<'_, Self> {
        Points {
            cloud: self,
            next: 0,
        }
    }

    fn aabb(&self) -> Aabb {
        Aabb::from_points(self.points())
    }
}

/// Iterator returned by [`CloudSource::points`].
#[derive(Debug)]
pub struct Points<'a, C: ?Sized> {
    cloud: &'a C,
    next: usize,
}

impl<C: CloudSource + ?Sized> Iterator for Points<'_, C> {
    type Item = [f32; 3];

    fn next(&mut self) -> Option<[f32; 3]> {
        if self.next >= self.cloud.len() {
            return None;
        }
        let p = self.cloud.point(self.next);
        self.next += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cloud.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<C: CloudSource + ?Sized> ExactSizeIterator for Points<'_, C> {}

impl<C: CloudSource + ?Sized> FusedIterator for Points<'_, C> {}

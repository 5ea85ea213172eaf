//! Axis-aligned bounding boxes

use crate::point::*;
use serde::{Deserialize, Serialize};

/// The smallest axis-aligned box containing a set of points.
///
/// An `Aabb` always contains at least one point; an empty point set has no
/// box at all, which callers model with `Option<Aabb>`. A single-point box
/// is valid and has zero size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3f,
    pub max: Point3f,
}

impl Aabb {
    /// Create a box containing exactly one point
    pub fn from_point(point: Point3f) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Create the smallest box containing all given points, or `None` for
    /// an empty slice
    pub fn from_points(points: &[Point3f]) -> Option<Self> {
        let mut iter = points.iter();
        let mut aabb = Self::from_point(*iter.next()?);
        for point in iter {
            aabb.grow(*point);
        }
        Some(aabb)
    }

    /// Expand the box to contain the given point
    pub fn grow(&mut self, point: Point3f) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// The smallest box containing both boxes
    pub fn union(mut self, other: Self) -> Self {
        self.grow(other.min);
        self.grow(other.max);
        self
    }

    /// The center of the box
    pub fn center(&self) -> Point3f {
        Point3f::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// The extent of the box along each axis
    pub fn size(&self) -> Vector3f {
        self.max - self.min
    }

    /// The Euclidean length of the box diagonal; zero for degenerate boxes
    pub fn diagonal(&self) -> f32 {
        self.size().norm()
    }
}

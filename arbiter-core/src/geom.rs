/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A 3-D single-precision vector type.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}
impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }
    /// Returns the dot product with other.
    pub fn dot(&self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
    /// Returns the squared length.
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }
    /// Returns the length.
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }
    /// Returns the distance to other.
    pub fn distance(&self, other: Vec3) -> f32 {
        (other - *self).length()
    }
    /// Returns the unit-length version of self, or `None` for a
    /// degenerate (near-zero) vector.
    pub fn normalized(&self) -> Option<Vec3> {
        let length = self.length();
        if length <= f32::EPSILON {
            None
        } else {
            Some(*self / length)
        }
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Self::Output {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f32) -> Self::Output {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// An axis-aligned bounding box, the collidable volume of levels and agents.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}
impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Aabb { min, max }
    }
    /// Builds a box from its center and half extents.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Aabb {
            min: center - half_extents,
            max: center + half_extents,
        }
    }
    /// Returns the center point.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
    /// Returns the half extents.
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
    /// Returns whether the point lies inside or on the box.
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
    /// Returns whether the two boxes overlap.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
    /// Slab test of a ray against the box.
    ///
    /// `dir` must be unit length; the return value is the parametric
    /// distance to the entry point, clamped to 0 when the origin is
    /// already inside. `None` means the ray misses the box entirely
    /// within `range`, which is distinct from a hit at distance 0.
    pub fn ray_entry(&self, origin: Vec3, dir: Vec3, range: f32) -> Option<f32> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let axes = [
            (origin.x, dir.x, self.min.x, self.max.x),
            (origin.y, dir.y, self.min.y, self.max.y),
            (origin.z, dir.z, self.min.z, self.max.z),
        ];
        for (start, d, min, max) in axes {
            if d.abs() <= f32::EPSILON {
                // Parallel to the slab: either always inside it or never.
                if start < min || start > max {
                    return None;
                }
            } else {
                let t0 = (min - start) / d;
                let t1 = (max - start) / d;
                let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
                t_enter = t_enter.max(near);
                t_exit = t_exit.min(far);
            }
        }
        if t_enter > t_exit || t_exit < 0.0 {
            return None;
        }
        let t = t_enter.max(0.0);
        if t <= range {
            Some(t)
        } else {
            None
        }
    }
}

/// A piece of diagnostic geometry emitted by behaviors, without gameplay effect.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// A probe ray or aim line.
    Segment { from: Vec3, to: Vec3 },
    /// A sensing radius or bounding volume.
    Volume(Aabb),
}

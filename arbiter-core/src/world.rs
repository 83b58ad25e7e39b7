/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

use crate::Aabb;

/// The read-only view of the current level that probes query.
///
/// The level stays mutable elsewhere (platforms move), which is why probe
/// results are never cached across ticks; during one tick the collidable
/// list must be treated as read-only.
pub trait World {
    /// Returns the collidable bounding volumes of the level.
    fn collidables(&self) -> &[Aabb];
}

impl World for Vec<Aabb> {
    fn collidables(&self) -> &[Aabb] {
        self
    }
}

impl World for [Aabb] {
    fn collidables(&self) -> &[Aabb] {
        self
    }
}

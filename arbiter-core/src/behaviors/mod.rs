/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

//! The built-in behavior strategies.
//!
//! All utility rules are pure functions of current positions and probe
//! results; there is no memory of what was true last tick.

mod boss;
mod flee;
mod melee;
mod patrol;
mod pursue;
mod shoot;
mod wait;

pub use boss::*;
pub use flee::*;
pub use melee::*;
pub use patrol::*;
pub use pursue::*;
pub use shoot::*;
pub use wait::*;

use crate::{Direction, Vec3};

/// Aim vector from `origin` toward `target`, falling back to the facing
/// axis when the two coincide.
pub(crate) fn aim_between(origin: Vec3, target: Vec3, facing: Direction) -> Vec3 {
    (target - origin)
        .normalized()
        .unwrap_or_else(|| facing.vector())
}

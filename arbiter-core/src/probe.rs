/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

//! Short ray tests against the level's collidable list.
//!
//! Locomotive behaviors re-issue these every tick; nothing here is
//! cached, because the level is mutable between ticks. A `None` result
//! is the ground-missing / wall-absent / sight-blocked branch of the
//! caller, never an error, and is distinct from a hit at distance 0.

use crate::{Aabb, Direction, Vec3, World};

/// How far ahead of the leading edge the ledge probe is planted.
pub const GROUND_PROBE_AHEAD: f32 = 25.0;
/// How far below the feet the ledge probe reaches.
pub const GROUND_PROBE_DEPTH: f32 = 30.0;
/// Lift of probe origins off exact surfaces, so standing on a platform
/// does not read as being embedded in it.
const SURFACE_CLEARANCE: f32 = 1.0;
/// Slack at the far end of a sight line; hits at the target point itself
/// do not block.
const SIGHT_SLACK: f32 = 0.5;

/// Casts a ray against every collidable and returns the nearest hit
/// distance within `range`, or `None` when nothing intersects.
pub fn sweep(world: &dyn World, origin: Vec3, dir: Vec3, range: f32) -> Option<f32> {
    let dir = dir.normalized()?;
    let mut nearest: Option<f32> = None;
    for volume in world.collidables() {
        if let Some(t) = volume.ray_entry(origin, dir, range) {
            nearest = Some(nearest.map_or(t, |best| best.min(t)));
        }
    }
    nearest
}

/// Short downward probe planted ahead of the agent's leading edge.
///
/// `None` means the agent is about to walk off a ledge.
pub fn ground_ahead(world: &dyn World, bounds: Aabb, facing: Direction) -> Option<f32> {
    let half = bounds.half_extents();
    let center = bounds.center();
    let ahead = facing.vector() * (half.x + GROUND_PROBE_AHEAD);
    let origin = Vec3::new(
        center.x + ahead.x,
        bounds.min.y + SURFACE_CLEARANCE,
        center.z + ahead.z,
    );
    sweep(
        world,
        origin,
        Direction::Down.vector(),
        GROUND_PROBE_DEPTH + SURFACE_CLEARANCE,
    )
}

/// Forward probe at agent height, measured from the leading edge.
///
/// `Some(distance)` means a wall within `reach` units.
pub fn wall_ahead(world: &dyn World, bounds: Aabb, facing: Direction, reach: f32) -> Option<f32> {
    let half = bounds.half_extents();
    let origin = bounds.center() + facing.vector() * (half.x + SURFACE_CLEARANCE);
    sweep(world, origin, facing.vector(), reach)
}

/// Straight-line probe between two points.
///
/// Returns false when level geometry intersects strictly before the far
/// point.
pub fn line_of_sight(world: &dyn World, from: Vec3, to: Vec3) -> bool {
    let offset = to - from;
    let distance = offset.length();
    if distance <= f32::EPSILON {
        return true;
    }
    match sweep(world, from, offset, distance) {
        Some(t) => t >= distance - SIGHT_SLACK,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Aabb {
        Aabb::new(Vec3::new(-200.0, -20.0, -50.0), Vec3::new(200.0, 0.0, 50.0))
    }

    fn agent_bounds(x: f32) -> Aabb {
        Aabb::from_center(Vec3::new(x, 30.0, 0.0), Vec3::new(15.0, 30.0, 15.0))
    }

    #[test]
    fn nearest_hit_wins() {
        let world = vec![
            Aabb::new(Vec3::new(50.0, -10.0, -10.0), Vec3::new(60.0, 10.0, 10.0)),
            Aabb::new(Vec3::new(20.0, -10.0, -10.0), Vec3::new(30.0, 10.0, 10.0)),
        ];
        let hit = sweep(&world, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 100.0);
        assert_eq!(hit, Some(20.0));
    }

    #[test]
    fn ground_present_and_missing() {
        let world = vec![floor()];
        assert!(ground_ahead(&world, agent_bounds(0.0), Direction::Right).is_some());
        // Leading edge past the platform rim.
        assert!(ground_ahead(&world, agent_bounds(195.0), Direction::Right).is_none());
        assert!(ground_ahead(&world, agent_bounds(195.0), Direction::Left).is_some());
    }

    #[test]
    fn wall_within_reach() {
        let wall = Aabb::new(Vec3::new(60.0, 0.0, -50.0), Vec3::new(70.0, 100.0, 50.0));
        let world = vec![floor(), wall];
        let hit = wall_ahead(&world, agent_bounds(0.0), Direction::Right, 75.0);
        assert_eq!(hit, Some(44.0));
        assert!(wall_ahead(&world, agent_bounds(0.0), Direction::Left, 75.0).is_none());
    }

    #[test]
    fn sight_blocked_by_wall_only() {
        let wall = Aabb::new(Vec3::new(60.0, 0.0, -50.0), Vec3::new(70.0, 100.0, 50.0));
        let world = vec![floor(), wall];
        let eye = Vec3::new(0.0, 30.0, 0.0);
        assert!(!line_of_sight(&world, eye, Vec3::new(150.0, 30.0, 0.0)));
        assert!(line_of_sight(&world, eye, Vec3::new(-150.0, 30.0, 0.0)));
        // The far point sits exactly on the wall face: not blocked.
        assert!(line_of_sight(&world, eye, Vec3::new(60.0, 30.0, 0.0)));
    }
}

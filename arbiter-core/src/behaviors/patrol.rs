/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

use crate::{
    probe, utility, Agent, AgentView, Behavior, Context, ContextMut, DebugShape, Direction, Flow,
    Utility,
};

/// Score while the target is at least the far distance away.
pub const PATROL_FAR_UTILITY: f32 = 0.5;
/// Score while the target is close: still barely beats waiting, loses to
/// anything that reacts to the target.
pub const PATROL_NEAR_UTILITY: f32 = 0.02;

/// Default distance beyond which patrolling is the preferred activity.
pub const DEFAULT_FAR_DISTANCE: f32 = 500.0;
/// Default reach of the forward wall probe.
pub const DEFAULT_WALL_REACH: f32 = 75.0;

/// Walk back and forth along the platform, turning at walls and ledges.
pub struct Patrol {
    far_distance: f32,
    sight_radius: f32,
    wall_reach: f32,
    facing: Direction,
}

impl Patrol {
    /// `far_distance` is the distance beyond which patrol scores high;
    /// `sight_radius` is where it gives up and re-arbitrates (typically
    /// the pursuer's aggro radius).
    pub fn new(far_distance: f32, sight_radius: f32) -> Self {
        Self {
            far_distance,
            sight_radius,
            wall_reach: DEFAULT_WALL_REACH,
            facing: Direction::Right,
        }
    }

    pub fn with_wall_reach(mut self, wall_reach: f32) -> Self {
        self.wall_reach = wall_reach;
        self
    }
}

impl Behavior for Patrol {
    fn start(&mut self, ctx: &mut ContextMut) {
        self.facing = ctx.agent.facing();
        ctx.agent.begin_animation("walk", true);
    }

    fn update(&mut self, ctx: &mut ContextMut) -> Flow {
        let bounds = ctx.agent.bounds();
        let wall = probe::wall_ahead(ctx.world, bounds, self.facing, self.wall_reach);
        let ground = probe::ground_ahead(ctx.world, bounds, self.facing);
        if wall.is_some() || ground.is_none() {
            self.facing = self.facing.opposite();
            ctx.agent.set_facing(self.facing);
        }
        ctx.agent.set_look_direction(self.facing.vector());
        ctx.agent.push_move(self.facing);

        if ctx.target_distance() <= self.sight_radius {
            Flow::Finish
        } else {
            Flow::Continue
        }
    }

    fn evaluate(&self, ctx: Context) -> Utility {
        if ctx.target_distance() >= self.far_distance {
            utility(PATROL_FAR_UTILITY)
        } else {
            utility(PATROL_NEAR_UTILITY)
        }
    }

    fn debug_shapes(&self, ctx: Context, out: &mut Vec<DebugShape>) {
        let origin = ctx.agent.position;
        let probe_end = origin + self.facing.vector() * self.wall_reach;
        out.push(DebugShape::Segment {
            from: origin,
            to: probe_end,
        });
    }
}

/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

use crate::{
    behaviors::aim_between, probe, utility, Agent, AgentView, Behavior, Context, ContextMut,
    DebugShape, Flow, Utility,
};

/// Score while the target sits inside the aggro radius.
pub const PURSUE_UTILITY: f32 = 0.5;

/// Reach of the forward probe that keeps the pursuer from running into
/// walls.
const PURSUE_WALL_REACH: f32 = 40.0;

/// Close on the target along the dominant axis, without walking off
/// ledges.
pub struct Pursue {
    aggro_radius: f32,
    reach: f32,
}

impl Pursue {
    /// `reach` is where pursuit stops and hands over to arbitration,
    /// normally the strike range of the paired attack.
    pub fn new(aggro_radius: f32, reach: f32) -> Self {
        Self {
            aggro_radius,
            reach,
        }
    }
}

impl Behavior for Pursue {
    fn start(&mut self, ctx: &mut ContextMut) {
        ctx.agent.begin_animation("run", true);
    }

    fn update(&mut self, ctx: &mut ContextMut) -> Flow {
        let distance = ctx.target_distance();
        if distance > self.aggro_radius || distance <= self.reach {
            return Flow::Finish;
        }

        let direction = ctx.target_direction();
        ctx.agent.set_facing(direction);
        let aim = aim_between(ctx.agent.position(), ctx.target.position, direction);
        ctx.agent.set_look_direction(aim);

        // Hold at ledges and walls rather than abandoning the chase.
        let bounds = ctx.agent.bounds();
        let ledge = probe::ground_ahead(ctx.world, bounds, direction).is_none();
        let wall = probe::wall_ahead(ctx.world, bounds, direction, PURSUE_WALL_REACH).is_some();
        if !ledge && !wall {
            ctx.agent.push_move(direction);
        }
        Flow::Continue
    }

    fn evaluate(&self, ctx: Context) -> Utility {
        if ctx.target_distance() <= self.aggro_radius {
            utility(PURSUE_UTILITY)
        } else {
            utility(0.0)
        }
    }

    fn debug_shapes(&self, ctx: Context, out: &mut Vec<DebugShape>) {
        out.push(DebugShape::Segment {
            from: ctx.agent.position,
            to: ctx.target.position,
        });
    }
}

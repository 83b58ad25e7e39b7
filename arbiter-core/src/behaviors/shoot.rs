/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

use crate::{
    behaviors::aim_between, probe, utility, Ability, Agent, AgentView, Behavior, Context,
    ContextMut, DebugShape, Flow, Utility,
};

/// Score with line of sight inside the near band.
pub const SHOOT_NEAR_UTILITY: f32 = 0.9;
/// Score with line of sight inside the far band.
pub const SHOOT_FAR_UTILITY: f32 = 0.1;

/// Fire at a visible target within range.
///
/// Commits only on a clear sight line: the score drops to zero the tick
/// geometry moves in between.
pub struct Shoot {
    near_band: f32,
    far_band: f32,
    ability: Box<dyn Ability>,
}

impl Shoot {
    /// `far_band` is the maximum range; beyond it the score is zero.
    pub fn new(near_band: f32, far_band: f32, ability: Box<dyn Ability>) -> Self {
        Self {
            near_band,
            far_band,
            ability,
        }
    }
}

impl Behavior for Shoot {
    fn start(&mut self, ctx: &mut ContextMut) {
        let direction = ctx.target_direction();
        ctx.agent.set_facing(direction);
        let aim = aim_between(ctx.agent.position(), ctx.target.position, direction);
        ctx.agent.set_look_direction(aim);
        ctx.agent.begin_animation("shoot", false);
    }

    fn update(&mut self, ctx: &mut ContextMut) -> Flow {
        // Track the target until the release frame.
        let aim = aim_between(
            ctx.agent.position(),
            ctx.target.position,
            ctx.agent.facing(),
        );
        ctx.agent.set_look_direction(aim);
        if ctx.agent.take_animation_complete() {
            let origin = ctx.agent.position();
            self.ability.cast(origin, aim);
            return Flow::Finish;
        }
        Flow::Continue
    }

    fn evaluate(&self, ctx: Context) -> Utility {
        let distance = ctx.target_distance();
        if distance > self.far_band {
            return utility(0.0);
        }
        if !probe::line_of_sight(ctx.world, ctx.agent.position, ctx.target.position) {
            return utility(0.0);
        }
        if distance <= self.near_band {
            utility(SHOOT_NEAR_UTILITY)
        } else {
            utility(SHOOT_FAR_UTILITY)
        }
    }

    fn debug_shapes(&self, ctx: Context, out: &mut Vec<DebugShape>) {
        out.push(DebugShape::Segment {
            from: ctx.agent.position,
            to: ctx.target.position,
        });
    }
}

/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

use crate::{
    behaviors::aim_between, utility, Ability, Agent, AgentView, Behavior, Context, ContextMut,
    Flow, Utility,
};

/// Score the instant the target is inside strike range.
pub const MELEE_UTILITY: f32 = 1.0;

/// Swing at a target in strike range.
///
/// `start` begins the one-shot attack clip; the cast is released when
/// the animation completion event arrives.
pub struct Melee {
    range: f32,
    ability: Box<dyn Ability>,
}

impl Melee {
    pub fn new(range: f32, ability: Box<dyn Ability>) -> Self {
        Self { range, ability }
    }
}

impl Behavior for Melee {
    fn start(&mut self, ctx: &mut ContextMut) {
        let direction = ctx.target_direction();
        ctx.agent.set_facing(direction);
        let aim = aim_between(ctx.agent.position(), ctx.target.position, direction);
        ctx.agent.set_look_direction(aim);
        ctx.agent.begin_animation("attack", false);
    }

    fn update(&mut self, ctx: &mut ContextMut) -> Flow {
        if ctx.agent.take_animation_complete() {
            let origin = ctx.agent.position();
            let aim = aim_between(origin, ctx.target.position, ctx.agent.facing());
            self.ability.cast(origin, aim);
            return Flow::Finish;
        }
        Flow::Continue
    }

    fn evaluate(&self, ctx: Context) -> Utility {
        if ctx.target_distance() <= self.range {
            utility(MELEE_UTILITY)
        } else {
            utility(0.0)
        }
    }
}

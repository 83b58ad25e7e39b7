/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

use crate::{probe, utility, Agent, AgentView, Behavior, Context, ContextMut, Flow, Utility};

/// Score while wounded with the target nearby; outranks pursuit and
/// patrol, loses to a strike already in range.
pub const FLEE_UTILITY: f32 = 0.8;

/// Reach of the forward probe while running away.
const FLEE_WALL_REACH: f32 = 40.0;

/// Run from the target while wounded.
pub struct Flee {
    health_threshold: f32,
    aggro_radius: f32,
    safe_distance: f32,
}

impl Flee {
    /// Flees while health is at or below `health_threshold` and the
    /// target is within `aggro_radius`; gives up once `safe_distance`
    /// away.
    pub fn new(health_threshold: f32, aggro_radius: f32, safe_distance: f32) -> Self {
        Self {
            health_threshold,
            aggro_radius,
            safe_distance,
        }
    }
}

impl Behavior for Flee {
    fn start(&mut self, ctx: &mut ContextMut) {
        ctx.agent.begin_animation("run", true);
    }

    fn update(&mut self, ctx: &mut ContextMut) -> Flow {
        if ctx.agent.health() > self.health_threshold
            || ctx.target_distance() >= self.safe_distance
        {
            return Flow::Finish;
        }

        let away = ctx.target_direction().opposite();
        ctx.agent.set_facing(away);
        ctx.agent.set_look_direction(away.vector());

        // Cornered against a wall or a ledge: hold position this tick.
        let bounds = ctx.agent.bounds();
        let ledge = probe::ground_ahead(ctx.world, bounds, away).is_none();
        let wall = probe::wall_ahead(ctx.world, bounds, away, FLEE_WALL_REACH).is_some();
        if !ledge && !wall {
            ctx.agent.push_move(away);
        }
        Flow::Continue
    }

    fn evaluate(&self, ctx: Context) -> Utility {
        if ctx.agent.health <= self.health_threshold && ctx.target_distance() <= self.aggro_radius
        {
            utility(FLEE_UTILITY)
        } else {
            utility(0.0)
        }
    }
}

/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

use crate::{
    behaviors::{aim_between, Wait},
    probe, utility, Ability, Agent, AgentView, Behavior, Context, ContextMut, Flow, Transition,
    Utility, FALLBACK_STATE,
};

/// Score of a boss strike with the target inside range.
pub const BOSS_MELEE_UTILITY: f32 = 1.0;
/// Score of a boss volley with line of sight inside the near band.
pub const BOSS_SHOOT_NEAR_UTILITY: f32 = 0.9;
/// Score of a boss volley with line of sight inside the far band.
pub const BOSS_SHOOT_FAR_UTILITY: f32 = 0.3;

fn recover_through(next: Option<&str>, recovery: f32) -> Transition {
    // The base rule, decorated: configure the recovery pause on the
    // incoming wait behavior before its start.
    Transition::of(next).with_setup(move |behavior| {
        if let Some(wait) = behavior.downcast_mut::<Wait>() {
            wait.set_duration(recovery);
        }
    })
}

/// A wide boss swing followed by a forced recovery pause.
///
/// Transitions explicitly to the recovery state instead of arbitrating,
/// and stretches that wait to the boss recovery time on the way in.
pub struct BossMelee {
    range: f32,
    recovery: f32,
    recover_state: String,
    ability: Box<dyn Ability>,
}

impl BossMelee {
    pub fn new(range: f32, recovery: f32, ability: Box<dyn Ability>) -> Self {
        Self {
            range,
            recovery,
            recover_state: FALLBACK_STATE.to_owned(),
            ability,
        }
    }
}

impl Behavior for BossMelee {
    fn start(&mut self, ctx: &mut ContextMut) {
        let direction = ctx.target_direction();
        ctx.agent.set_facing(direction);
        ctx.agent.begin_animation("smash", false);
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
            utility(BOSS_MELEE_UTILITY)
        } else {
            utility(0.0)
        }
    }

    fn next_state(&self) -> Option<&str> {
        Some(&self.recover_state)
    }

    fn finish(&mut self, _ctx: Context) -> Transition {
        recover_through(self.next_state(), self.recovery)
    }
}

/// A multi-shot boss volley followed by a forced recovery pause.
pub struct BossShoot {
    near_band: f32,
    far_band: f32,
    volley: u32,
    recovery: f32,
    recover_state: String,
    fired: u32,
    ability: Box<dyn Ability>,
}

impl BossShoot {
    /// Fires `volley` casts, one per completed clip, before recovering.
    pub fn new(
        near_band: f32,
        far_band: f32,
        volley: u32,
        recovery: f32,
        ability: Box<dyn Ability>,
    ) -> Self {
        Self {
            near_band,
            far_band,
            volley,
            recovery,
            recover_state: FALLBACK_STATE.to_owned(),
            fired: 0,
            ability,
        }
    }
}

impl Behavior for BossShoot {
    fn start(&mut self, ctx: &mut ContextMut) {
        self.fired = 0;
        let direction = ctx.target_direction();
        ctx.agent.set_facing(direction);
        ctx.agent.begin_animation("cast", false);
    }

    fn update(&mut self, ctx: &mut ContextMut) -> Flow {
        let aim = aim_between(
            ctx.agent.position(),
            ctx.target.position,
            ctx.agent.facing(),
        );
        ctx.agent.set_look_direction(aim);
        if ctx.agent.take_animation_complete() {
            let origin = ctx.agent.position();
            self.ability.cast(origin, aim);
            self.fired += 1;
            if self.fired >= self.volley {
                return Flow::Finish;
            }
            ctx.agent.begin_animation("cast", false);
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
            utility(BOSS_SHOOT_NEAR_UTILITY)
        } else {
            utility(BOSS_SHOOT_FAR_UTILITY)
        }
    }

    fn next_state(&self) -> Option<&str> {
        Some(&self.recover_state)
    }

    fn finish(&mut self, _ctx: Context) -> Transition {
        recover_through(self.next_state(), self.recovery)
    }
}

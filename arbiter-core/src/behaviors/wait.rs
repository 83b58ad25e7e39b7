/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

use crate::{utility, Agent, Behavior, Context, ContextMut, Flow, Utility};

/// Constant low score: the safety net that never beats a positive signal.
pub const WAIT_UTILITY: f32 = 0.01;

/// How long an unconfigured wait lasts, in seconds.
pub const DEFAULT_WAIT_DURATION: f32 = 0.8;

/// Stand idle for a fixed duration, then re-arbitrate.
///
/// The conventional fallback state; attack behaviors with a recovery
/// time reconfigure its duration on hand-off.
pub struct Wait {
    duration: f32,
    elapsed: f32,
}

impl Wait {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Reconfigures the duration of the next activation.
    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration;
    }
}

impl Default for Wait {
    fn default() -> Self {
        Self::new(DEFAULT_WAIT_DURATION)
    }
}

impl Behavior for Wait {
    fn start(&mut self, ctx: &mut ContextMut) {
        self.elapsed = 0.0;
        ctx.agent.begin_animation("idle", true);
    }

    fn update(&mut self, ctx: &mut ContextMut) -> Flow {
        self.elapsed += ctx.dt;
        if self.elapsed >= self.duration {
            Flow::Finish
        } else {
            Flow::Continue
        }
    }

    fn evaluate(&self, _ctx: Context) -> Utility {
        utility(WAIT_UTILITY)
    }
}

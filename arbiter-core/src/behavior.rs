/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

use downcast_rs::{impl_downcast, Downcast};
use ordered_float::NotNan;

use crate::{Context, ContextMut, DebugShape};

/// The comparative score a behavior reports for the current situation.
///
/// A scalar in [0, 1]: 0 means never select, small epsilons (0.01, 0.02)
/// mean low-priority defaults, larger values mean high situational
/// relevance. Not a probability; only used for `max()` selection.
pub type Utility = NotNan<f32>;

/// Wraps a plain score into a [Utility].
///
/// Panics on NaN; scores are authored constants, a NaN is a programming
/// error.
pub fn utility(value: f32) -> Utility {
    NotNan::new(value).expect("utility scores must not be NaN")
}

/// What a behavior's `update` requests for the rest of the tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Stay active, update again next tick.
    Continue,
    /// Done: run `finish` and transition this tick.
    Finish,
}

/// The transition a finished behavior hands back to its state machine.
pub struct Transition {
    next: Option<String>,
    setup: Option<Box<dyn FnOnce(&mut dyn Behavior)>>,
}

impl Transition {
    /// Asks the state machine to arbitrate among all registered behaviors.
    pub fn arbitrate() -> Self {
        Self {
            next: None,
            setup: None,
        }
    }

    /// Transitions directly to the named state, bypassing arbitration.
    pub fn to(name: impl Into<String>) -> Self {
        Self {
            next: Some(name.into()),
            setup: None,
        }
    }

    /// The default transition rule: the explicit next state if one is
    /// set, arbitration otherwise.
    ///
    /// `finish` overrides start from this and decorate it.
    pub fn of(next: Option<&str>) -> Self {
        match next {
            Some(name) => Self::to(name),
            None => Self::arbitrate(),
        }
    }

    /// Attaches post-transition bookkeeping, run on the incoming behavior
    /// after the swap and before its `start`.
    pub fn with_setup(mut self, setup: impl FnOnce(&mut dyn Behavior) + 'static) -> Self {
        self.setup = Some(Box::new(setup));
        self
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Option<Box<dyn FnOnce(&mut dyn Behavior)>>) {
        (self.next, self.setup)
    }
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.next {
            Some(name) => write!(f, "Transition(to {name})"),
            None => write!(f, "Transition(arbitrate)"),
        }
    }
}

/// One named decision strategy within an agent's state machine.
///
/// A behavior is constructed once at setup time and re-entered across
/// many activation cycles; per-activation counters belong in [start](Self::start),
/// not in the constructor. [update](Self::update) is only ever invoked while the
/// behavior is the machine's current state.
pub trait Behavior: Downcast {
    /// Called exactly once on each transition into this behavior.
    ///
    /// Resets per-activation state, triggers the entry animation, and may
    /// perform an immediate one-shot action.
    fn start(&mut self, ctx: &mut ContextMut);

    /// Called once per tick while active: senses, writes locomotion and
    /// animation intents, and decides whether to finish this tick.
    fn update(&mut self, ctx: &mut ContextMut) -> Flow;

    /// Scores this behavior against the current situation.
    ///
    /// A pure function of the context: no side effects, safe to call
    /// while not current, identical results for an unchanged world.
    fn evaluate(&self, ctx: Context) -> Utility;

    /// The explicit successor state, if this behavior bypasses arbitration.
    fn next_state(&self) -> Option<&str> {
        None
    }

    /// Produces the outgoing transition once `update` returned
    /// [Flow::Finish].
    fn finish(&mut self, _ctx: Context) -> Transition {
        Transition::of(self.next_state())
    }

    /// Emits diagnostic geometry; no gameplay effect.
    fn debug_shapes(&self, _ctx: Context, _out: &mut Vec<DebugShape>) {}
}
impl_downcast!(Behavior);

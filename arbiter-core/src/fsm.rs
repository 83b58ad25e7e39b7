/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{utility, AgentView, Behavior, Context, ContextMut, DebugShape, Flow, Transition};

/// The state name that acts as the fallback when none was flagged
/// explicitly.
pub const FALLBACK_STATE: &str = "wait";

/// A configuration or corruption error of a [StateMachine].
///
/// Sensing misses and unreachable targets are not errors; everything
/// here indicates a setup bug or a corrupted transition and is surfaced
/// immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsmError {
    #[error("state name must not be empty")]
    EmptyStateName,
    #[error("state `{0}` is already registered")]
    DuplicateState(String),
    #[error("states cannot be registered after automation has begun")]
    RegisterAfterBegin,
    #[error("automation has already begun")]
    AlreadyBegun,
    #[error("automation has not begun")]
    NotBegun,
    #[error("no fallback state registered and no `wait` state present")]
    MissingFallback,
    #[error("unknown state `{0}`")]
    UnknownState(String),
}

struct StateEntry {
    name: String,
    behavior: Box<dyn Behavior>,
}

/// The per-agent container of named behaviors and their arbitration.
///
/// States are the registered behavior names; transitions are initiated
/// by the active behavior through its finish path; the initial state is
/// the fallback. There is no terminal state: the machine runs until its
/// owner stops updating it.
#[derive(Default)]
pub struct StateMachine {
    /// Registration order is load-bearing: arbitration ties are broken
    /// in favor of the earliest registration.
    entries: Vec<StateEntry>,
    index: FxHashMap<String, usize>,
    current: Option<usize>,
    flagged_fallback: Option<usize>,
    begun: bool,
}

impl StateMachine {
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers a behavior under a unique, non-empty name.
    ///
    /// Registration is only possible before [begin_automation](Self::begin_automation).
    pub fn add_state(
        &mut self,
        name: impl Into<String>,
        behavior: Box<dyn Behavior>,
    ) -> Result<(), FsmError> {
        self.register(name.into(), behavior, false)
    }

    /// Registers a behavior and marks it as the fallback.
    ///
    /// The most recent registration with the fallback flag wins.
    pub fn add_fallback_state(
        &mut self,
        name: impl Into<String>,
        behavior: Box<dyn Behavior>,
    ) -> Result<(), FsmError> {
        self.register(name.into(), behavior, true)
    }

    fn register(
        &mut self,
        name: String,
        behavior: Box<dyn Behavior>,
        fallback: bool,
    ) -> Result<(), FsmError> {
        if self.begun {
            return Err(FsmError::RegisterAfterBegin);
        }
        if name.is_empty() {
            return Err(FsmError::EmptyStateName);
        }
        if self.index.contains_key(&name) {
            return Err(FsmError::DuplicateState(name));
        }
        let index = self.entries.len();
        self.index.insert(name.clone(), index);
        if fallback {
            self.flagged_fallback = Some(index);
        }
        self.entries.push(StateEntry { name, behavior });
        Ok(())
    }

    /// Returns the name of the currently active state, if automation has
    /// begun.
    pub fn current_state(&self) -> Option<&str> {
        self.current.map(|index| self.entries[index].name.as_str())
    }

    /// Returns the registered state names, in registration order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Returns the behavior registered under `name`.
    pub fn behavior(&self, name: &str) -> Option<&dyn Behavior> {
        self.index
            .get(name)
            .map(|&index| self.entries[index].behavior.as_ref())
    }

    /// Returns the behavior registered under `name`, mutably.
    pub fn behavior_mut(&mut self, name: &str) -> Option<&mut dyn Behavior> {
        let index = *self.index.get(name)?;
        Some(self.entries[index].behavior.as_mut())
    }

    fn fallback_index(&self) -> Result<usize, FsmError> {
        self.flagged_fallback
            .or_else(|| self.index.get(FALLBACK_STATE).copied())
            .ok_or(FsmError::MissingFallback)
    }

    fn lookup(&self, name: &str) -> Result<usize, FsmError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| FsmError::UnknownState(name.to_owned()))
    }

    /// Starts automation: the fallback becomes current and is started.
    ///
    /// Must be called exactly once, after all registrations.
    pub fn begin_automation(&mut self, ctx: &mut ContextMut) -> Result<(), FsmError> {
        if self.begun {
            return Err(FsmError::AlreadyBegun);
        }
        let fallback = self.fallback_index()?;
        self.begun = true;
        self.enter(fallback, None, ctx);
        Ok(())
    }

    /// Advances the active behavior by one tick.
    ///
    /// A dead agent makes this a no-op for the tick; the owner is
    /// expected to drop the machine between ticks. Calling before
    /// [begin_automation](Self::begin_automation) is a setup bug and fails.
    pub fn update(&mut self, ctx: &mut ContextMut) -> Result<(), FsmError> {
        let current = self.current.ok_or(FsmError::NotBegun)?;
        if !ctx.agent.alive() {
            return Ok(());
        }
        match self.entries[current].behavior.update(ctx) {
            Flow::Continue => Ok(()),
            Flow::Finish => {
                let transition = self.entries[current].behavior.finish(ctx.view());
                self.apply(transition, ctx)
            }
        }
    }

    /// Scores every registered behavior and returns the winner's name.
    ///
    /// Strict greater-than against a running maximum starting at 0.0:
    /// the first-registered behavior wins ties, nothing scoring 0 can be
    /// selected, and the fallback wins when no score is positive.
    pub fn pick_next(&self, ctx: Context) -> Result<&str, FsmError> {
        self.pick_next_index(ctx)
            .map(|index| self.entries[index].name.as_str())
    }

    fn pick_next_index(&self, ctx: Context) -> Result<usize, FsmError> {
        let mut best = self.fallback_index()?;
        let mut best_score = utility(0.0);
        for (index, entry) in self.entries.iter().enumerate() {
            let score = entry.behavior.evaluate(ctx);
            log::trace!("{}: {} scores {}", ctx.agent_id, entry.name, score);
            if score > best_score {
                best = index;
                best_score = score;
            }
        }
        Ok(best)
    }

    /// Force-transitions to the named state, or to the fallback for an
    /// empty name. There is no exit hook: cleanup belongs at the top of
    /// the next `start`.
    pub fn set_current(&mut self, name: &str, ctx: &mut ContextMut) -> Result<(), FsmError> {
        if !self.begun {
            return Err(FsmError::NotBegun);
        }
        let index = if name.is_empty() {
            self.fallback_index()?
        } else {
            self.lookup(name)?
        };
        self.enter(index, None, ctx);
        Ok(())
    }

    fn apply(&mut self, transition: Transition, ctx: &mut ContextMut) -> Result<(), FsmError> {
        let (next, setup) = transition.into_parts();
        let index = match next {
            Some(name) => self.lookup(&name)?,
            None => self.pick_next_index(ctx.view())?,
        };
        self.enter(index, setup, ctx);
        Ok(())
    }

    fn enter(
        &mut self,
        index: usize,
        setup: Option<Box<dyn FnOnce(&mut dyn Behavior)>>,
        ctx: &mut ContextMut,
    ) {
        if let Some(setup) = setup {
            setup(self.entries[index].behavior.as_mut());
        }
        if log::log_enabled!(log::Level::Debug) {
            let from = self
                .current
                .map(|current| self.entries[current].name.as_str())
                .unwrap_or("-");
            log::debug!(
                "{}: transition {} -> {}",
                ctx.agent_id,
                from,
                self.entries[index].name
            );
        }
        self.current = Some(index);
        self.entries[index].behavior.start(ctx);
    }

    /// Collects the active behavior's diagnostic geometry.
    pub fn debug_shapes(&self, ctx: Context) -> Vec<DebugShape> {
        let mut out = Vec::new();
        if let Some(current) = self.current {
            self.entries[current].behavior.debug_shapes(ctx, &mut out);
        }
        out
    }
}

impl std::fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.entries.iter().map(|e| &e.name).collect::<Vec<_>>())
            .field("current", &self.current_state())
            .field("begun", &self.begun)
            .finish()
    }
}

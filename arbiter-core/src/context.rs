/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

use crate::{Agent, AgentId, AgentSnapshot, AgentView, Direction, World};

/// The environment a behavior reads during one call.
///
/// Read-only and cheap to copy; this is what `evaluate` receives, so
/// scores cannot have side effects by construction.
#[derive(Copy, Clone)]
pub struct Context<'a> {
    /// current simulation tick
    pub tick: u64,
    /// seconds elapsed since the previous tick
    pub dt: f32,
    /// the agent this state machine controls
    pub agent_id: AgentId,
    /// read surface of the controlled agent
    pub agent: AgentSnapshot,
    /// read surface of the target (typically the player)
    pub target: AgentSnapshot,
    /// collidable geometry of the current level
    pub world: &'a dyn World,
}

impl<'a> Context<'a> {
    /// Creates a new Context from its components.
    pub fn new(
        tick: u64,
        dt: f32,
        agent_id: AgentId,
        agent: AgentSnapshot,
        target: AgentSnapshot,
        world: &'a dyn World,
    ) -> Self {
        Self {
            tick,
            dt,
            agent_id,
            agent,
            target,
            world,
        }
    }

    /// Returns the distance between the agent and its target.
    pub fn target_distance(&self) -> f32 {
        self.agent.position.distance(self.target.position)
    }

    /// Returns the dominant-axis locomotion direction toward the target.
    pub fn target_direction(&self) -> Direction {
        if self.target.position.x >= self.agent.position.x {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

/// The environment a behavior acts on during `start` and `update`.
///
/// Carries the mutable agent facade; everything else stays read-only.
pub struct ContextMut<'a> {
    /// current simulation tick
    pub tick: u64,
    /// seconds elapsed since the previous tick
    pub dt: f32,
    /// the agent this state machine controls
    pub agent_id: AgentId,
    /// mutable facade of the controlled agent
    pub agent: &'a mut dyn Agent,
    /// read surface of the target (typically the player)
    pub target: AgentSnapshot,
    /// collidable geometry of the current level
    pub world: &'a dyn World,
}

impl<'a> ContextMut<'a> {
    /// Creates a new ContextMut from its components.
    pub fn new(
        tick: u64,
        dt: f32,
        agent_id: AgentId,
        agent: &'a mut dyn Agent,
        target: AgentSnapshot,
        world: &'a dyn World,
    ) -> Self {
        Self {
            tick,
            dt,
            agent_id,
            agent,
            target,
            world,
        }
    }

    /// Downgrades to the read-only view, snapshotting the agent.
    pub fn view(&self) -> Context {
        Context {
            tick: self.tick,
            dt: self.dt,
            agent_id: self.agent_id,
            agent: AgentSnapshot::capture(&*self.agent),
            target: self.target,
            world: self.world,
        }
    }

    /// Returns the distance between the agent and its target.
    pub fn target_distance(&self) -> f32 {
        self.agent.position().distance(self.target.position)
    }

    /// Returns the dominant-axis locomotion direction toward the target.
    pub fn target_direction(&self) -> Direction {
        if self.target.position.x >= self.agent.position().x {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

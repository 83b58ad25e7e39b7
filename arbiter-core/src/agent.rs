/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

use crate::{Aabb, Direction, Vec3};

/// The read surface of a controllable actor.
///
/// This is all a behavior may know about another actor, and in particular
/// all it may know about its target.
pub trait AgentView {
    /// Returns the world position (center of the bounding volume).
    fn position(&self) -> Vec3;
    /// Returns the current facing.
    fn facing(&self) -> Direction;
    /// Returns the current aim vector.
    fn look_direction(&self) -> Vec3;
    /// Returns the collidable bounding volume.
    fn bounds(&self) -> Aabb;
    /// Returns the current health.
    fn health(&self) -> f32;
    /// Returns whether the actor is still alive.
    fn alive(&self) -> bool {
        self.health() > 0.0
    }
}

/// The minimal mutable view of the actor a behavior controls.
///
/// The simulation layer owns the actor; behaviors only write intents
/// through this facade. Locomotion is a discrete per-tick input, not a
/// continuous velocity.
pub trait Agent: AgentView {
    /// Sets the facing.
    fn set_facing(&mut self, facing: Direction);
    /// Sets the aim vector.
    fn set_look_direction(&mut self, look: Vec3);
    /// Starts an animation clip, replacing the current one.
    fn begin_animation(&mut self, name: &str, looped: bool);
    /// Consumes the completion event of the last one-shot animation.
    ///
    /// The simulation raises this synchronously during its own stepping;
    /// the currently active behavior is its only consumer and polls it
    /// from `update` within the same tick.
    fn take_animation_complete(&mut self) -> bool;
    /// Pushes a logical locomotion direction for this tick.
    fn push_move(&mut self, direction: Direction);
}

/// A by-value copy of an actor's read surface, taken once per call.
///
/// Evaluation works on snapshots so that utility scores are pure
/// functions of the world state at the time of the call.
#[derive(Copy, Clone, Debug)]
pub struct AgentSnapshot {
    pub position: Vec3,
    pub facing: Direction,
    pub look_direction: Vec3,
    pub bounds: Aabb,
    pub health: f32,
}

impl AgentSnapshot {
    /// Captures the current read surface of an actor.
    pub fn capture<A: AgentView + ?Sized>(agent: &A) -> Self {
        Self {
            position: agent.position(),
            facing: agent.facing(),
            look_direction: agent.look_direction(),
            bounds: agent.bounds(),
            health: agent.health(),
        }
    }

    /// Returns whether the actor was alive at capture time.
    pub fn alive(&self) -> bool {
        self.health > 0.0
    }
}

/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use arbiter_core::{Aabb, Ability, Agent, AgentView, Direction, Vec3, World};

use crate::Steppable;

/// How long a one-shot animation clip runs by default, in seconds.
pub const DEFAULT_CLIP_DURATION: f32 = 0.4;

#[derive(Debug, Clone)]
struct Clip {
    name: String,
    looped: bool,
    remaining: f32,
}

/// A reference implementation of the agent facade for tests and demos.
///
/// Locomotion inputs are integrated in [advance](Steppable::advance);
/// the animation clock raises the completion event there too, in the
/// same tick, which is what the facade contract demands.
#[derive(Debug, Clone)]
pub struct SimAgent {
    pub position: Vec3,
    pub half_extents: Vec3,
    pub health: f32,
    /// World units per second of one held locomotion key.
    pub speed: f32,
    /// Length of one-shot animation clips.
    pub clip_duration: f32,
    facing: Direction,
    look: Vec3,
    clip: Option<Clip>,
    clip_complete: bool,
    moves: Vec<Direction>,
    last_move: Option<Direction>,
}

impl SimAgent {
    pub fn new(position: Vec3, half_extents: Vec3, health: f32) -> Self {
        Self {
            position,
            half_extents,
            health,
            speed: 60.0,
            clip_duration: DEFAULT_CLIP_DURATION,
            facing: Direction::Right,
            look: Direction::Right.vector(),
            clip: None,
            clip_complete: false,
            moves: Vec::new(),
            last_move: None,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_clip_duration(mut self, clip_duration: f32) -> Self {
        self.clip_duration = clip_duration;
        self
    }

    pub fn with_facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self.look = facing.vector();
        self
    }

    pub fn apply_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    /// The most recent locomotion input, for assertions in tests.
    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    /// The name of the currently playing clip.
    pub fn current_clip(&self) -> Option<&str> {
        self.clip.as_ref().map(|clip| clip.name.as_str())
    }
}

impl AgentView for SimAgent {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn facing(&self) -> Direction {
        self.facing
    }

    fn look_direction(&self) -> Vec3 {
        self.look
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.half_extents)
    }

    fn health(&self) -> f32 {
        self.health
    }
}

impl Agent for SimAgent {
    fn set_facing(&mut self, facing: Direction) {
        self.facing = facing;
    }

    fn set_look_direction(&mut self, look: Vec3) {
        self.look = look;
    }

    fn begin_animation(&mut self, name: &str, looped: bool) {
        self.clip = Some(Clip {
            name: name.to_owned(),
            looped,
            remaining: self.clip_duration,
        });
        self.clip_complete = false;
    }

    fn take_animation_complete(&mut self) -> bool {
        mem::take(&mut self.clip_complete)
    }

    fn push_move(&mut self, direction: Direction) {
        self.moves.push(direction);
        self.last_move = Some(direction);
    }
}

impl Steppable for SimAgent {
    fn advance(&mut self, dt: f32) {
        let step = self.speed * dt;
        for direction in mem::take(&mut self.moves) {
            self.position += direction.vector() * step;
        }
        let mut finished = false;
        if let Some(clip) = &mut self.clip {
            if !clip.looped {
                clip.remaining -= dt;
                finished = clip.remaining <= 0.0;
            }
        }
        if finished {
            self.clip = None;
            self.clip_complete = true;
        }
    }
}

/// A static level: a plain list of collidable volumes.
#[derive(Debug, Clone, Default)]
pub struct SimWorld {
    collidables: Vec<Aabb>,
}

impl SimWorld {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a collidable block.
    pub fn add_block(&mut self, min: Vec3, max: Vec3) -> &mut Self {
        self.collidables.push(Aabb::new(min, max));
        self
    }

    /// Adds a horizontal platform with its walking surface at `top`.
    pub fn add_platform(&mut self, x0: f32, x1: f32, top: f32) -> &mut Self {
        self.add_block(
            Vec3::new(x0, top - 20.0, -50.0),
            Vec3::new(x1, top, 50.0),
        )
    }
}

impl World for SimWorld {
    fn collidables(&self) -> &[Aabb] {
        &self.collidables
    }
}

/// One recorded cast of a [RecordingAbility].
#[derive(Copy, Clone, Debug)]
pub struct CastRecord {
    pub origin: Vec3,
    pub aim: Vec3,
}

/// A shared, cloneable log of casts.
#[derive(Clone, Debug, Default)]
pub struct CastLog(Rc<RefCell<Vec<CastRecord>>>);

impl CastLog {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn count(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn records(&self) -> Vec<CastRecord> {
        self.0.borrow().clone()
    }

    fn push(&self, record: CastRecord) {
        self.0.borrow_mut().push(record);
    }
}

/// An ability that only records its casts; the stand-in for the real
/// spell system in tests and demos.
#[derive(Clone, Debug)]
pub struct RecordingAbility {
    log: CastLog,
}

impl RecordingAbility {
    pub fn new(log: CastLog) -> Self {
        Self { log }
    }
}

impl Ability for RecordingAbility {
    fn cast(&mut self, origin: Vec3, aim: Vec3) {
        log::info!("cast from {} along {}", origin, aim);
        self.log.push(CastRecord { origin, aim });
    }
}

/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

use ansi_term::Style;
use arbiter_core::{
    Agent, AgentId, AgentSnapshot, AgentView, ContextMut, FsmError, StateMachine, World,
};

fn highlight_style() -> Style {
    ansi_term::Style::new().bold().fg(ansi_term::Colour::Green)
}
fn highlight_tick(tick: u64) -> String {
    let tick_text = format!("T{}", tick);
    highlight_style().paint(&tick_text).to_string()
}
fn highlight_agent(agent_id: AgentId) -> String {
    let agent_text = format!("{}", agent_id);
    highlight_style().paint(&agent_text).to_string()
}

/// Simulation stepping outside the behavior contract: locomotion
/// integration and the animation clock of an actor.
pub trait Steppable {
    /// Advances the actor's own simulation by `dt` seconds.
    fn advance(&mut self, dt: f32);
}

/// One driven agent: its actor and its state machine.
pub struct Unit<A> {
    pub id: AgentId,
    pub agent: A,
    pub fsm: StateMachine,
}

/// A single-threaded update loop over a set of agents.
///
/// Per tick, every unit's actor is advanced, then its state machine
/// updated against a fresh snapshot of the target; dead units are
/// compacted after the iteration completes, never during it.
pub struct SimpleDriver<W, T, A> {
    /// The current level.
    pub world: W,
    /// The shared target, typically the player.
    pub target: T,
    units: Vec<Unit<A>>,
    tick: u64,
    next_id: u32,
}

impl<W, T, A> SimpleDriver<W, T, A>
where
    W: World,
    T: Agent + Steppable,
    A: Agent + Steppable,
{
    pub fn new(world: W, target: T) -> Self {
        Self {
            world,
            target,
            units: Vec::new(),
            tick: 0,
            next_id: 0,
        }
    }

    /// Adds an agent and begins its automation.
    pub fn spawn(&mut self, agent: A, fsm: StateMachine) -> Result<AgentId, FsmError> {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        let mut unit = Unit { id, agent, fsm };
        let target = AgentSnapshot::capture(&self.target);
        let mut ctx = ContextMut::new(self.tick, 0.0, id, &mut unit.agent, target, &self.world);
        unit.fsm.begin_automation(&mut ctx)?;
        log::info!(
            "{} - {} spawned in state {}",
            highlight_tick(self.tick),
            highlight_agent(id),
            unit.fsm.current_state().unwrap_or("-")
        );
        self.units.push(unit);
        Ok(id)
    }

    /// Advances the whole simulation by one tick of `dt` seconds and
    /// returns the number of units still alive.
    pub fn step(&mut self, dt: f32) -> Result<usize, FsmError> {
        self.tick += 1;
        self.target.advance(dt);
        let target = AgentSnapshot::capture(&self.target);
        for unit in &mut self.units {
            unit.agent.advance(dt);
            let mut ctx =
                ContextMut::new(self.tick, dt, unit.id, &mut unit.agent, target, &self.world);
            unit.fsm.update(&mut ctx)?;
        }
        // Deferred removal: deaths are observed during the iteration but
        // compacted only after it.
        let tick = self.tick;
        self.units.retain(|unit| {
            let alive = unit.agent.alive();
            if !alive {
                log::info!("{} - {} died, removing", highlight_tick(tick), highlight_agent(unit.id));
            }
            alive
        });
        Ok(self.units.len())
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn units(&self) -> &[Unit<A>] {
        &self.units
    }

    pub fn unit(&self, id: AgentId) -> Option<&Unit<A>> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn unit_mut(&mut self, id: AgentId) -> Option<&mut Unit<A>> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }
}

#[cfg(test)]
mod tests {
    use arbiter_core::Vec3;

    use crate::{
        grunt_state_machine, CastLog, GruntProfile, RecordingAbility, SimAgent, SimWorld,
        SimpleDriver,
    };

    fn arena() -> SimWorld {
        let mut world = SimWorld::new();
        world.add_platform(-1000.0, 1000.0, 0.0);
        world
    }

    fn actor(x: f32, health: f32) -> SimAgent {
        SimAgent::new(
            Vec3::new(x, 30.0, 0.0),
            Vec3::new(15.0, 30.0, 15.0),
            health,
        )
    }

    #[test]
    fn spawn_and_step() {
        let log = CastLog::new();
        let fsm = grunt_state_machine(
            &GruntProfile::default(),
            Box::new(RecordingAbility::new(log)),
        )
        .unwrap();
        let mut driver = SimpleDriver::new(arena(), actor(0.0, 100.0));
        let id = driver.spawn(actor(900.0, 50.0), fsm).unwrap();
        assert_eq!(driver.unit(id).unwrap().fsm.current_state(), Some("wait"));
        for _ in 0..10 {
            assert_eq!(driver.step(0.1).unwrap(), 1);
        }
    }

    #[test]
    fn dead_units_are_compacted_after_the_tick() {
        let log = CastLog::new();
        let fsm = grunt_state_machine(
            &GruntProfile::default(),
            Box::new(RecordingAbility::new(log)),
        )
        .unwrap();
        let mut driver = SimpleDriver::new(arena(), actor(0.0, 100.0));
        let id = driver.spawn(actor(900.0, 50.0), fsm).unwrap();
        driver.step(0.1).unwrap();
        driver.unit_mut(id).unwrap().agent.apply_damage(50.0);
        assert_eq!(driver.step(0.1).unwrap(), 0);
        assert!(driver.unit(id).is_none());
    }
}

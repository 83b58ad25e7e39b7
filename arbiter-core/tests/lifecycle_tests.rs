/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

use std::cell::Cell;
use std::rc::Rc;

use arbiter_core::{
    utility, AgentId, AgentSnapshot, Behavior, Context, ContextMut, Flow, FsmError, StateMachine,
    Utility, Vec3, Wait,
};
use arbiter_utils::{CastLog, RecordingAbility, SimAgent, SimWorld, Steppable};

/// Counts lifecycle calls; scores like an idle state.
#[derive(Clone, Default)]
struct Counting {
    starts: Rc<Cell<u32>>,
    updates: Rc<Cell<u32>>,
}

impl Behavior for Counting {
    fn start(&mut self, _ctx: &mut ContextMut) {
        self.starts.set(self.starts.get() + 1);
    }

    fn update(&mut self, _ctx: &mut ContextMut) -> Flow {
        self.updates.set(self.updates.get() + 1);
        Flow::Continue
    }

    fn evaluate(&self, _ctx: Context) -> Utility {
        utility(0.01)
    }
}

/// Finishes immediately with an explicit successor.
struct Hop(&'static str);

impl Behavior for Hop {
    fn start(&mut self, _ctx: &mut ContextMut) {}

    fn update(&mut self, _ctx: &mut ContextMut) -> Flow {
        Flow::Finish
    }

    fn evaluate(&self, _ctx: Context) -> Utility {
        utility(0.0)
    }

    fn next_state(&self) -> Option<&str> {
        Some(self.0)
    }
}

/// Finishes every tick and lets arbitration re-seat it.
#[derive(Clone, Default)]
struct Restless {
    starts: Rc<Cell<u32>>,
}

impl Behavior for Restless {
    fn start(&mut self, _ctx: &mut ContextMut) {
        self.starts.set(self.starts.get() + 1);
    }

    fn update(&mut self, _ctx: &mut ContextMut) -> Flow {
        Flow::Finish
    }

    fn evaluate(&self, _ctx: Context) -> Utility {
        utility(0.01)
    }
}

fn flat_world() -> SimWorld {
    let mut world = SimWorld::new();
    world.add_platform(-2000.0, 2000.0, 0.0);
    world
}

fn actor(x: f32, health: f32) -> SimAgent {
    SimAgent::new(Vec3::new(x, 30.0, 0.0), Vec3::new(15.0, 30.0, 15.0), health)
}

fn update_once(fsm: &mut StateMachine, agent: &mut SimAgent, target: &SimAgent, world: &SimWorld) -> Result<(), FsmError> {
    let target = AgentSnapshot::capture(target);
    let mut ctx = ContextMut::new(0, 0.1, AgentId(0), agent, target, world);
    fsm.update(&mut ctx)
}

fn begin(fsm: &mut StateMachine, agent: &mut SimAgent, target: &SimAgent, world: &SimWorld) -> Result<(), FsmError> {
    let target = AgentSnapshot::capture(target);
    let mut ctx = ContextMut::new(0, 0.0, AgentId(0), agent, target, world);
    fsm.begin_automation(&mut ctx)
}

#[test]
fn begin_enters_fallback_and_starts_it_once() {
    let counting = Counting::default();
    let starts = counting.starts.clone();
    let updates = counting.updates.clone();
    let mut fsm = StateMachine::new();
    fsm.add_fallback_state("wait", Box::new(counting)).unwrap();
    let world = flat_world();
    let (mut agent, target) = (actor(0.0, 100.0), actor(500.0, 100.0));

    assert_eq!(fsm.current_state(), None);
    begin(&mut fsm, &mut agent, &target, &world).unwrap();
    assert_eq!(fsm.current_state(), Some("wait"));
    assert_eq!(starts.get(), 1);
    assert_eq!(updates.get(), 0);

    update_once(&mut fsm, &mut agent, &target, &world).unwrap();
    assert_eq!(starts.get(), 1);
    assert_eq!(updates.get(), 1);
}

#[test]
fn begin_twice_is_a_setup_bug() {
    let mut fsm = StateMachine::new();
    fsm.add_fallback_state("wait", Box::new(Counting::default())).unwrap();
    let world = flat_world();
    let (mut agent, target) = (actor(0.0, 100.0), actor(500.0, 100.0));
    begin(&mut fsm, &mut agent, &target, &world).unwrap();
    assert_eq!(
        begin(&mut fsm, &mut agent, &target, &world).unwrap_err(),
        FsmError::AlreadyBegun
    );
}

#[test]
fn update_before_begin_is_a_setup_bug() {
    let mut fsm = StateMachine::new();
    fsm.add_fallback_state("wait", Box::new(Counting::default())).unwrap();
    let world = flat_world();
    let (mut agent, target) = (actor(0.0, 100.0), actor(500.0, 100.0));
    assert_eq!(
        update_once(&mut fsm, &mut agent, &target, &world).unwrap_err(),
        FsmError::NotBegun
    );
}

#[test]
fn registration_errors() {
    let mut fsm = StateMachine::new();
    assert_eq!(
        fsm.add_state("", Box::new(Counting::default())).unwrap_err(),
        FsmError::EmptyStateName
    );
    fsm.add_fallback_state("wait", Box::new(Counting::default())).unwrap();
    assert_eq!(
        fsm.add_state("wait", Box::new(Counting::default())).unwrap_err(),
        FsmError::DuplicateState("wait".to_owned())
    );

    let world = flat_world();
    let (mut agent, target) = (actor(0.0, 100.0), actor(500.0, 100.0));
    begin(&mut fsm, &mut agent, &target, &world).unwrap();
    assert_eq!(
        fsm.add_state("late", Box::new(Counting::default())).unwrap_err(),
        FsmError::RegisterAfterBegin
    );
}

#[test]
fn begin_without_fallback_fails() {
    let mut fsm = StateMachine::new();
    fsm.add_state("a", Box::new(Counting::default())).unwrap();
    let world = flat_world();
    let (mut agent, target) = (actor(0.0, 100.0), actor(500.0, 100.0));
    assert_eq!(
        begin(&mut fsm, &mut agent, &target, &world).unwrap_err(),
        FsmError::MissingFallback
    );
}

#[test]
fn wait_name_is_the_implicit_fallback() {
    let mut fsm = StateMachine::new();
    fsm.add_state("a", Box::new(Counting::default())).unwrap();
    // Registered without the fallback flag; the name alone designates it.
    fsm.add_state("wait", Box::new(Counting::default())).unwrap();
    let world = flat_world();
    let (mut agent, target) = (actor(0.0, 100.0), actor(500.0, 100.0));
    begin(&mut fsm, &mut agent, &target, &world).unwrap();
    assert_eq!(fsm.current_state(), Some("wait"));
}

#[test]
fn most_recent_fallback_flag_wins() {
    let mut fsm = StateMachine::new();
    fsm.add_fallback_state("first", Box::new(Counting::default())).unwrap();
    fsm.add_fallback_state("second", Box::new(Counting::default())).unwrap();
    let world = flat_world();
    let (mut agent, target) = (actor(0.0, 100.0), actor(500.0, 100.0));
    begin(&mut fsm, &mut agent, &target, &world).unwrap();
    assert_eq!(fsm.current_state(), Some("second"));
}

#[test]
fn explicit_next_bypasses_arbitration() {
    let mut fsm = StateMachine::new();
    fsm.add_fallback_state("wait", Box::new(Counting::default())).unwrap();
    fsm.add_state("hop", Box::new(Hop("sink"))).unwrap();
    // Scores zero: arbitration would never pick it.
    fsm.add_state("sink", Box::new(Hop("wait"))).unwrap();
    let world = flat_world();
    let (mut agent, target) = (actor(0.0, 100.0), actor(500.0, 100.0));
    begin(&mut fsm, &mut agent, &target, &world).unwrap();

    let target_snapshot = AgentSnapshot::capture(&target);
    let mut ctx = ContextMut::new(0, 0.1, AgentId(0), &mut agent, target_snapshot, &world);
    fsm.set_current("hop", &mut ctx).unwrap();
    fsm.update(&mut ctx).unwrap();
    assert_eq!(fsm.current_state(), Some("sink"));
}

#[test]
fn unknown_explicit_successor_fails_loudly() {
    let mut fsm = StateMachine::new();
    fsm.add_fallback_state("wait", Box::new(Counting::default())).unwrap();
    fsm.add_state("hop", Box::new(Hop("nope"))).unwrap();
    let world = flat_world();
    let (mut agent, target) = (actor(0.0, 100.0), actor(500.0, 100.0));
    begin(&mut fsm, &mut agent, &target, &world).unwrap();

    let target_snapshot = AgentSnapshot::capture(&target);
    let mut ctx = ContextMut::new(0, 0.1, AgentId(0), &mut agent, target_snapshot, &world);
    fsm.set_current("hop", &mut ctx).unwrap();
    assert_eq!(
        fsm.update(&mut ctx).unwrap_err(),
        FsmError::UnknownState("nope".to_owned())
    );
}

#[test]
fn set_current_with_empty_name_means_fallback() {
    let mut fsm = StateMachine::new();
    fsm.add_fallback_state("wait", Box::new(Counting::default())).unwrap();
    fsm.add_state("other", Box::new(Counting::default())).unwrap();
    let world = flat_world();
    let (mut agent, target) = (actor(0.0, 100.0), actor(500.0, 100.0));
    begin(&mut fsm, &mut agent, &target, &world).unwrap();

    let target_snapshot = AgentSnapshot::capture(&target);
    let mut ctx = ContextMut::new(0, 0.1, AgentId(0), &mut agent, target_snapshot, &world);
    fsm.set_current("other", &mut ctx).unwrap();
    assert_eq!(fsm.current_state(), Some("other"));
    fsm.set_current("", &mut ctx).unwrap();
    assert_eq!(fsm.current_state(), Some("wait"));
    assert_eq!(
        fsm.set_current("missing", &mut ctx).unwrap_err(),
        FsmError::UnknownState("missing".to_owned())
    );
}

#[test]
fn dead_agent_skips_the_tick() {
    let counting = Counting::default();
    let updates = counting.updates.clone();
    let mut fsm = StateMachine::new();
    fsm.add_fallback_state("wait", Box::new(counting)).unwrap();
    let world = flat_world();
    let (mut agent, target) = (actor(0.0, 100.0), actor(500.0, 100.0));
    begin(&mut fsm, &mut agent, &target, &world).unwrap();

    agent.apply_damage(100.0);
    update_once(&mut fsm, &mut agent, &target, &world).unwrap();
    assert_eq!(updates.get(), 0);
    assert_eq!(fsm.current_state(), Some("wait"));
}

#[test]
fn finishing_always_lands_in_a_registered_state() {
    let restless = Restless::default();
    let starts = restless.starts.clone();
    let mut fsm = StateMachine::new();
    fsm.add_fallback_state("wait", Box::new(restless)).unwrap();
    fsm.add_state("a", Box::new(Hop("wait"))).unwrap();
    let world = flat_world();
    let (mut agent, target) = (actor(0.0, 100.0), actor(500.0, 100.0));
    begin(&mut fsm, &mut agent, &target, &world).unwrap();

    let names: Vec<_> = fsm.state_names().map(str::to_owned).collect();
    for _ in 0..20 {
        update_once(&mut fsm, &mut agent, &target, &world).unwrap();
        let current = fsm.current_state().expect("a current state must remain set");
        assert!(names.iter().any(|name| name == current));
    }
    // Re-seated by arbitration on every finish.
    assert_eq!(starts.get(), 21);
}

#[test]
fn boss_recovery_reconfigures_the_wait_duration() {
    use arbiter_core::BossMelee;

    let log = CastLog::new();
    let mut fsm = StateMachine::new();
    fsm.add_fallback_state("wait", Box::new(Wait::new(10.0))).unwrap();
    fsm.add_state(
        "smash",
        Box::new(BossMelee::new(
            100.0,
            1.5,
            Box::new(RecordingAbility::new(log.clone())),
        )),
    )
    .unwrap();
    let world = flat_world();
    let mut agent = actor(0.0, 100.0).with_clip_duration(0.05);
    let target = actor(50.0, 100.0);
    begin(&mut fsm, &mut agent, &target, &world).unwrap();

    {
        let target_snapshot = AgentSnapshot::capture(&target);
        let mut ctx = ContextMut::new(0, 0.1, AgentId(0), &mut agent, target_snapshot, &world);
        fsm.set_current("smash", &mut ctx).unwrap();
    }
    // One advance completes the one-shot clip, the next update casts and
    // hands over to wait with the boss recovery time.
    for tick in 1..=3 {
        agent.advance(0.1);
        let target_snapshot = AgentSnapshot::capture(&target);
        let mut ctx = ContextMut::new(tick, 0.1, AgentId(0), &mut agent, target_snapshot, &world);
        fsm.update(&mut ctx).unwrap();
        if fsm.current_state() == Some("wait") {
            break;
        }
    }

    assert_eq!(log.count(), 1);
    assert_eq!(fsm.current_state(), Some("wait"));
    let wait = fsm
        .behavior("wait")
        .and_then(|behavior| behavior.downcast_ref::<Wait>())
        .expect("wait must stay registered");
    assert_eq!(wait.duration(), 1.5);
}

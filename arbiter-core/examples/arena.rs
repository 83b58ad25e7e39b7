/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

//! A seeded side-scroller arena: a player walks across a platform while
//! a handful of enemies patrol, pursue, shoot and smash.
//!
//! Run with `RUST_LOG=debug` to watch every state transition.

use arbiter_core::{Agent, Direction, Vec3};
use arbiter_utils::{
    archer_state_machine, boss_state_machine, grunt_state_machine, ArcherProfile, BossProfile,
    CastLog, GruntProfile, RecordingAbility, SimAgent, SimWorld, SimpleDriver,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const TICKS: u32 = 600;
const DT: f32 = 1.0 / 30.0;

fn enemy(x: f32, health: f32) -> SimAgent {
    SimAgent::new(Vec3::new(x, 30.0, 0.0), Vec3::new(15.0, 30.0, 15.0), health)
}

fn main() {
    // Enable logging if specified in the RUST_LOG environment variable.
    env_logger::init();

    let mut world = SimWorld::new();
    world.add_platform(-1200.0, 1200.0, 0.0);
    // A pillar that breaks line of sight near the archer.
    world.add_block(Vec3::new(380.0, 0.0, -50.0), Vec3::new(400.0, 120.0, 50.0));

    let player = SimAgent::new(Vec3::new(-100.0, 30.0, 0.0), Vec3::new(15.0, 30.0, 15.0), 500.0);
    let mut driver = SimpleDriver::new(world, player);

    let casts = CastLog::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0xA4B1);

    for _ in 0..3 {
        let x = rng.gen_range(500.0..1000.0);
        let fsm = grunt_state_machine(
            &GruntProfile::default(),
            Box::new(RecordingAbility::new(casts.clone())),
        )
        .expect("grunt state machine is well-formed");
        driver.spawn(enemy(x, 60.0), fsm).expect("spawn grunt");
    }

    let archer = archer_state_machine(
        &ArcherProfile::default(),
        Box::new(RecordingAbility::new(casts.clone())),
    )
    .expect("archer state machine is well-formed");
    driver.spawn(enemy(700.0, 40.0), archer).expect("spawn archer");

    let boss = boss_state_machine(
        &BossProfile::default(),
        Box::new(RecordingAbility::new(casts.clone())),
        Box::new(RecordingAbility::new(casts.clone())),
    )
    .expect("boss state machine is well-formed");
    driver.spawn(enemy(-700.0, 300.0), boss).expect("spawn boss");

    for tick in 0..TICKS {
        // The player strolls toward the enemy camp.
        driver.target.push_move(Direction::Right);
        driver.step(DT).expect("driver tick");

        if tick % 60 == 0 {
            println!("T{tick} player at x={:.0}", driver.target.position.x);
            for unit in driver.units() {
                println!(
                    "  {} {:>6} at x={:.0}",
                    unit.id,
                    unit.fsm.current_state().unwrap_or("-"),
                    unit.agent.position.x
                );
            }
        }
    }

    println!(
        "done after {} ticks: {} casts released, {} enemies still alive",
        TICKS,
        casts.count(),
        driver.units().len()
    );
}

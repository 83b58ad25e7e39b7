/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

//! This is the utility module of the [Arbiter engine](https://crates.io/crates/arbiter-core/), containing helpful support code.
//!
//! It contains the following features:
//! - A single-threaded update loop, [SimpleDriver], that steps a set of agents and their state machines, with deferred removal of dead agents, and the [Steppable] abstraction it drives.
//! - Reference implementations of the core facades for tests and demos: [SimAgent], [SimWorld] and the cast-recording [RecordingAbility]/[CastLog] pair.
//! - Archetype factories assembling complete state machines from serde tuning profiles: [grunt_state_machine], [archer_state_machine] and [boss_state_machine].

mod archetype;
mod driver;
mod sim;

pub use archetype::*;
pub use driver::*;
pub use sim::*;

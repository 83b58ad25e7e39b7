/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

//! This is the core of the Arbiter engine, containing the behavior state
//! machine, its utility-based arbitration and the sensing probes that
//! feed it.
//!
//! Every agent owns a [StateMachine] holding named [Behavior] strategies.
//! Once per tick the machine drives the active behavior; when that
//! behavior finishes, the machine either jumps to an explicitly named
//! successor or scores every registered behavior and picks the winner.
//!
//! Support features such as the update-loop driver and reference agent
//! implementations are available in the `arbiter-utils` crate.

mod ability;
mod agent;
mod behavior;
mod behaviors;
mod context;
mod direction;
mod fsm;
mod geom;
pub mod probe;
mod world;

pub use ability::*;
pub use agent::*;
pub use behavior::*;
pub use behaviors::*;
pub use context::*;
pub use direction::*;
pub use fsm::*;
pub use geom::*;
pub use world::*;

/// The identifier of an agent, essentially a u32.
#[derive(
    Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub struct AgentId(pub u32);
impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A{}", self.0)
    }
}

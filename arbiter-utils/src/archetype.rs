/*
 *  SPDX-License-Identifier: Apache-2.0 OR MIT
 *  © 2020-2022 ETH Zurich and other contributors, see AUTHORS.txt for details
 */

//! Assembly of complete state machines per agent archetype.
//!
//! This is the thin factory layer on top of the core: tuning profiles
//! are plain serde data so levels can ship them as assets.

use arbiter_core::{
    Ability, BossMelee, BossShoot, Flee, FsmError, Melee, Patrol, Pursue, Shoot, StateMachine,
    Wait,
};
use serde::{Deserialize, Serialize};

/// Tuning of the standard melee enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GruntProfile {
    pub wait_duration: f32,
    pub patrol_far_distance: f32,
    pub aggro_radius: f32,
    pub strike_range: f32,
}

impl Default for GruntProfile {
    fn default() -> Self {
        Self {
            wait_duration: 0.8,
            patrol_far_distance: 500.0,
            aggro_radius: 200.0,
            strike_range: 60.0,
        }
    }
}

/// Tuning of the ranged enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ArcherProfile {
    pub wait_duration: f32,
    pub patrol_far_distance: f32,
    pub sight_radius: f32,
    pub near_band: f32,
    pub far_band: f32,
    pub flee_health: f32,
    pub safe_distance: f32,
}

impl Default for ArcherProfile {
    fn default() -> Self {
        Self {
            wait_duration: 0.8,
            patrol_far_distance: 500.0,
            sight_radius: 600.0,
            near_band: 250.0,
            far_band: 600.0,
            flee_health: 25.0,
            safe_distance: 400.0,
        }
    }
}

/// Tuning of the boss.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BossProfile {
    pub aggro_radius: f32,
    pub strike_range: f32,
    pub recovery: f32,
    pub near_band: f32,
    pub far_band: f32,
    pub volley: u32,
}

impl Default for BossProfile {
    fn default() -> Self {
        Self {
            aggro_radius: 700.0,
            strike_range: 90.0,
            recovery: 1.5,
            near_band: 400.0,
            far_band: 800.0,
            volley: 3,
        }
    }
}

/// Builds the standard enemy: wait, patrol, pursue, melee.
pub fn grunt_state_machine(
    profile: &GruntProfile,
    strike: Box<dyn Ability>,
) -> Result<StateMachine, FsmError> {
    let mut fsm = StateMachine::new();
    fsm.add_fallback_state("wait", Box::new(Wait::new(profile.wait_duration)))?;
    fsm.add_state(
        "patrol",
        Box::new(Patrol::new(profile.patrol_far_distance, profile.aggro_radius)),
    )?;
    fsm.add_state(
        "pursue",
        Box::new(Pursue::new(profile.aggro_radius, profile.strike_range)),
    )?;
    fsm.add_state("melee", Box::new(Melee::new(profile.strike_range, strike)))?;
    Ok(fsm)
}

/// Builds the ranged enemy: wait, patrol, shoot, flee.
pub fn archer_state_machine(
    profile: &ArcherProfile,
    bow: Box<dyn Ability>,
) -> Result<StateMachine, FsmError> {
    let mut fsm = StateMachine::new();
    fsm.add_fallback_state("wait", Box::new(Wait::new(profile.wait_duration)))?;
    fsm.add_state(
        "patrol",
        Box::new(Patrol::new(profile.patrol_far_distance, profile.sight_radius)),
    )?;
    fsm.add_state(
        "shoot",
        Box::new(Shoot::new(profile.near_band, profile.far_band, bow)),
    )?;
    fsm.add_state(
        "flee",
        Box::new(Flee::new(
            profile.flee_health,
            profile.sight_radius,
            profile.safe_distance,
        )),
    )?;
    Ok(fsm)
}

/// Builds the boss: wait, pursue, and the two recovery-gated attacks.
pub fn boss_state_machine(
    profile: &BossProfile,
    smash: Box<dyn Ability>,
    volley: Box<dyn Ability>,
) -> Result<StateMachine, FsmError> {
    let mut fsm = StateMachine::new();
    fsm.add_fallback_state("wait", Box::new(Wait::default()))?;
    fsm.add_state(
        "pursue",
        Box::new(Pursue::new(profile.aggro_radius, profile.strike_range)),
    )?;
    fsm.add_state(
        "smash",
        Box::new(BossMelee::new(
            profile.strike_range,
            profile.recovery,
            smash,
        )),
    )?;
    fsm.add_state(
        "volley",
        Box::new(BossShoot::new(
            profile.near_band,
            profile.far_band,
            profile.volley,
            profile.recovery,
            volley,
        )),
    )?;
    Ok(fsm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CastLog, RecordingAbility};

    #[test]
    fn grunt_registration_order() {
        let fsm = grunt_state_machine(
            &GruntProfile::default(),
            Box::new(RecordingAbility::new(CastLog::new())),
        )
        .unwrap();
        let names: Vec<_> = fsm.state_names().collect();
        assert_eq!(names, ["wait", "patrol", "pursue", "melee"]);
    }

    #[test]
    fn profiles_deserialize_with_defaults() {
        let profile: GruntProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.aggro_radius, 200.0);
        let profile: BossProfile = serde_json::from_str("{\"volley\": 5}").unwrap();
        assert_eq!(profile.volley, 5);
        assert_eq!(profile.strike_range, 90.0);
    }
}

//! Daily casualty formulas.
//!
//! Nothing here mutates an army: [`inflict`] reads the attacking army's
//! targets and returns a per-slot damage buffer for the defender, so both
//! sides' losses are computed before either is applied.

use crate::army::{Army, Leader, SlotDamage};
use crate::battle::Side;
use crate::error::BattleError;
use crate::fixed::Fixed;
use crate::modifiers::MORALE_DAMAGE_DIVISOR;
use crate::regiment::Regiment;
use crate::row::Row;
use serde::{Deserialize, Serialize};

/// Base casualties before pips.
const BASE_CASUALTIES: i64 = 15;

/// Extra casualties per pip.
const CASUALTIES_PER_PIP: i64 = 5;

/// Days in one fire/shock cycle; the first half is fire.
const PHASE_CYCLE: u32 = 6;

const FRONT_ROW_FACTOR: Fixed = Fixed::ONE;
const BACK_ROW_FACTOR: Fixed = Fixed::HALF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Fire,
    Shock,
}

impl Phase {
    /// Phase of a combat day (days count from 1).
    pub fn for_day(day: u32) -> Self {
        if day.saturating_sub(1) % PHASE_CYCLE < PHASE_CYCLE / 2 {
            Phase::Fire
        } else {
            Phase::Shock
        }
    }

    pub fn is_fire(self) -> bool {
        self == Phase::Fire
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Fire => f.write_str("fire"),
            Phase::Shock => f.write_str("shock"),
        }
    }
}

/// Pips every regiment of one side adds for the day.
///
/// `penalty` is the terrain and crossing penalty, already zero for the
/// defender.
pub fn base_pips(own: &Leader, enemy: &Leader, phase: Phase, roll: i32, penalty: i32) -> i32 {
    let is_fire = phase.is_fire();
    let leader_difference = (own.pips(is_fire) - enemy.pips(is_fire)).max(0);
    leader_difference + roll + penalty
}

/// `1 + day / 100`: battles grow bloodier the longer they last.
pub fn round_multiplier(day: u32) -> Fixed {
    Fixed::ONE + Fixed::from_int(day as i64) / Fixed::HUNDRED
}

/// Everything about one side's attack that is shared by all its regiments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attack {
    pub side: Side,
    pub day: u32,
    pub phase: Phase,
    pub base_pips: i32,
    /// Terrain horde multiplier for horde armies, one otherwise.
    pub horde_multiplier: Fixed,
}

impl Attack {
    fn pip_casualties(pips: i32) -> Fixed {
        Fixed::from_int(BASE_CASUALTIES + CASUALTIES_PER_PIP * pips.max(0) as i64)
    }

    /// Men `attacker` kills in `target` in one day.
    pub fn strength_casualties(
        &self,
        attacker: &Regiment,
        attacking_army: &Army,
        target: &Regiment,
        defending_army: &Army,
        row_factor: Fixed,
    ) -> i64 {
        let is_fire = self.phase.is_fire();
        let pips = self.base_pips + attacker.strength_offence_pips(is_fire)
            - target.strength_defence_pips(is_fire);
        let attack = attacking_army.damage();
        let defence = defending_army.damage();

        let damage = Self::pip_casualties(pips)
            * round_multiplier(self.day)
            * attack.strength_multiplier(attacker.unit_type(), is_fire)
            * defence.phase_defense_multiplier(is_fire)
            / defence.tactics()
            * self.horde_multiplier
            * row_factor;
        damage.floor_to_int().max(0)
    }

    /// Morale `attacker` knocks off `target` in one day.
    pub fn morale_damage(
        &self,
        attacker: &Regiment,
        attacking_army: &Army,
        target: &Regiment,
        defending_army: &Army,
        row_factor: Fixed,
    ) -> Fixed {
        let is_fire = self.phase.is_fire();
        let pips = self.base_pips + attacker.morale_offence_pips(is_fire)
            - target.morale_defence_pips(is_fire);
        let attack = attacking_army.damage();
        let defence = defending_army.damage();

        let damage = Self::pip_casualties(pips)
            * round_multiplier(self.day)
            * attack.morale_multiplier(attacker.unit_type(), is_fire)
            * defence.morale_defense_multiplier()
            / defence.tactics()
            * self.horde_multiplier
            * row_factor;
        (damage / Fixed::from_int(MORALE_DAMAGE_DIVISOR)).max(Fixed::ZERO)
    }
}

/// Damage `attacker` deals to `defender`'s front row this day, indexed by slot.
///
/// Fails without side effects if any regiment targets an empty enemy slot.
pub fn inflict(attack: &Attack, attacker: &Army, defender: &Army) -> Result<Vec<SlotDamage>, BattleError> {
    let mut buffer = vec![SlotDamage::default(); defender.front().width()];

    let rows: [(&Row, Fixed); 2] = [
        (attacker.front(), FRONT_ROW_FACTOR),
        (attacker.back(), BACK_ROW_FACTOR),
    ];
    for (row, row_factor) in rows {
        for (slot, key) in row.occupied() {
            let regiment = attacker.regiment(key);
            let Some(target) = regiment.target() else {
                continue;
            };
            let Some(target_key) = defender.front().get(target) else {
                return Err(BattleError::DanglingTarget {
                    side: attack.side,
                    day: attack.day,
                    slot,
                    target,
                });
            };
            let victim = defender.regiment(target_key);

            let hit = &mut buffer[target];
            hit.casualties +=
                attack.strength_casualties(regiment, attacker, victim, defender, row_factor);
            hit.morale += attack.morale_damage(regiment, attacker, victim, defender, row_factor);
        }
    }

    Ok(buffer)
}

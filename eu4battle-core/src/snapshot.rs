//! Immutable per-day history records.

use crate::battle::BattleOutcome;
use crate::fixed::Fixed;
use crate::regiment::{Frozen, Regiment};
use serde::Serialize;

/// One row as it stood at the end of a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSnapshot {
    pub(crate) slots: Vec<Option<Frozen<Regiment>>>,
}

impl RowSnapshot {
    pub fn slots(&self) -> &[Option<Frozen<Regiment>>] {
        &self.slots
    }

    pub fn width(&self) -> usize {
        self.slots.len()
    }

    pub fn regiments(&self) -> impl Iterator<Item = &Regiment> + '_ {
        self.slots.iter().flatten().map(|r| &**r)
    }
}

/// Full state of one army at the end of a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArmySnapshot {
    pub(crate) name: String,
    pub(crate) front: RowSnapshot,
    pub(crate) back: RowSnapshot,
    pub(crate) reserves: Vec<Frozen<Regiment>>,
    pub(crate) retreated: usize,
    pub(crate) strength: i64,
    pub(crate) max_strength: i64,
    pub(crate) morale: Fixed,
    pub(crate) max_morale: Fixed,
}

impl ArmySnapshot {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn front(&self) -> &RowSnapshot {
        &self.front
    }

    pub fn back(&self) -> &RowSnapshot {
        &self.back
    }

    pub fn reserves(&self) -> &[Frozen<Regiment>] {
        &self.reserves
    }

    /// Regiments no longer on the field.
    pub fn retreated(&self) -> usize {
        self.retreated
    }

    pub fn strength(&self) -> i64 {
        self.strength
    }

    pub fn max_strength(&self) -> i64 {
        self.max_strength
    }

    pub fn morale(&self) -> Fixed {
        self.morale
    }

    pub fn max_morale(&self) -> Fixed {
        self.max_morale
    }

    pub fn is_broken(&self) -> bool {
        self.strength <= 0 || self.morale <= Fixed::ZERO
    }
}

/// Both armies after one day. Day 0 is the deployed, pre-combat state.
///
/// Taken after the day's damage and before broken regiments leave the field,
/// so the totals still count them. An army can therefore break during
/// replacement without [`ArmySnapshot::is_broken`] showing it; `outcome` on
/// the last entry is the authoritative result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySnapshot {
    pub day: u32,
    /// `None` on day 0.
    pub is_fire: Option<bool>,
    pub attacker_roll: i32,
    pub defender_roll: i32,
    pub attacker: ArmySnapshot,
    pub defender: ArmySnapshot,
    /// Set on the day the battle ended.
    pub outcome: Option<BattleOutcome>,
}

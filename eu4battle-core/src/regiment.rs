//! The atomic combat unit.

use crate::bounded::{new_strength, Morale, Strength};
use crate::fixed::Fixed;
use crate::unit::{UnitDef, UnitType};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

/// Unique regiment identifier within one battle setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegimentId(pub u32);

impl std::fmt::Display for RegimentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out monotonically increasing [`RegimentId`]s.
///
/// Owned by whoever assembles the armies, so independent battles never share
/// a counter and tests can start from a known value.
#[derive(Debug, Clone, Default)]
pub struct RegimentIdGen {
    next: u32,
}

impl RegimentIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }

    pub fn next_id(&mut self) -> RegimentId {
        let id = RegimentId(self.next);
        self.next += 1;
        id
    }
}

/// A regiment's live state.
///
/// `target` is an index into the enemy front row, resolved through the enemy
/// army when casualties are computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Regiment {
    id: RegimentId,
    unit: Arc<UnitDef>,
    strength: Strength,
    morale: Morale,
    target: Option<usize>,
}

impl Regiment {
    pub fn new(id: RegimentId, unit: Arc<UnitDef>, max_morale: Fixed) -> Self {
        Self {
            id,
            unit,
            strength: new_strength(),
            morale: Morale::full(max_morale),
            target: None,
        }
    }

    pub fn id(&self) -> RegimentId {
        self.id
    }

    pub fn unit(&self) -> &UnitDef {
        &self.unit
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit.unit_type
    }

    pub fn strength(&self) -> i32 {
        self.strength.get()
    }

    pub fn max_strength(&self) -> i32 {
        self.strength.max()
    }

    pub fn morale(&self) -> Fixed {
        self.morale.get()
    }

    pub fn max_morale(&self) -> Fixed {
        self.morale.max()
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<usize>) {
        self.target = target;
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// Removes men; artillery caught in the line loses twice as many.
    /// Negative casualties are ignored.
    pub fn take_casualties(&mut self, casualties: i64) {
        let losses = match self.unit_type() {
            UnitType::Artillery => casualties.saturating_mul(2),
            UnitType::Infantry | UnitType::Cavalry => casualties,
        };
        self.strength.drain(losses.clamp(0, i32::MAX as i64) as i32);
    }

    /// Negative damage is ignored.
    pub fn take_morale_damage(&mut self, damage: Fixed) {
        self.morale.drain(damage);
    }

    pub fn is_broken(&self) -> bool {
        self.strength.get() <= 0 || self.morale.get() <= Fixed::ZERO
    }

    /// Number of slots to either side in which this regiment can find a target.
    ///
    /// Depleted regiments lose reach before `bonus_percent` is applied:
    /// −75% below 250 men, −50% below 500, −25% below 750. Never below 1.
    pub fn flanking_range(&self, bonus_percent: Fixed) -> usize {
        let strength = self.strength.get();
        let penalty = if strength < 250 {
            -75
        } else if strength < 500 {
            -50
        } else if strength < 750 {
            -25
        } else {
            0
        };

        let base = Fixed::from_int(self.unit_type().base_flanking_range());
        let multiplier = Fixed::percent_multiplier(bonus_percent + Fixed::from_int(penalty));
        (base * multiplier).floor_to_int().max(1) as usize
    }

    pub fn strength_offence_pips(&self, is_fire: bool) -> i32 {
        let pips = &self.unit.pips;
        if is_fire {
            pips.fire_offence
        } else {
            pips.shock_offence
        }
    }

    pub fn strength_defence_pips(&self, is_fire: bool) -> i32 {
        let pips = &self.unit.pips;
        if is_fire {
            pips.fire_defence
        } else {
            pips.shock_defence
        }
    }

    pub fn morale_offence_pips(&self, is_fire: bool) -> i32 {
        self.strength_offence_pips(is_fire) + self.unit.pips.morale_offence
    }

    pub fn morale_defence_pips(&self, is_fire: bool) -> i32 {
        self.strength_defence_pips(is_fire) + self.unit.pips.morale_defence
    }

    /// Read-only copy for the battle history.
    ///
    /// ```compile_fail
    /// use eu4battle_core::regiment::{Regiment, RegimentId};
    /// use eu4battle_core::unit::{UnitDef, UnitType};
    /// use eu4battle_core::Fixed;
    /// use std::sync::Arc;
    ///
    /// let unit = Arc::new(UnitDef::default_for(UnitType::Infantry));
    /// let regiment = Regiment::new(RegimentId(0), unit, Fixed::from_int(3));
    /// let mut frozen = regiment.unmodifiable_copy();
    /// frozen.take_casualties(100);
    /// ```
    pub fn unmodifiable_copy(&self) -> Frozen<Regiment> {
        Frozen(self.clone())
    }
}

/// An owned value that only hands out shared references.
///
/// Recorded history is wrapped in this so nothing can mutate it afterwards;
/// there is no `DerefMut` and no way to take the inner value back out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Frozen<T>(T);

impl<T> Deref for Frozen<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

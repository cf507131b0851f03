use crate::fixed::Fixed;
use serde::{Deserialize, Serialize};

/// A value clamped to a Fixed-point range (for continuous values).
/// Used for: regiment morale (0 to the army's max morale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundedFixed {
    value: Fixed,
    min: Fixed,
    max: Fixed,
}

impl BoundedFixed {
    pub const fn new(value: Fixed, min: Fixed, max: Fixed) -> Self {
        let value = if value.raw() < min.raw() {
            min
        } else if value.raw() > max.raw() {
            max
        } else {
            value
        };
        Self { value, min, max }
    }

    /// A value starting at its maximum, e.g. a fresh regiment's morale.
    pub const fn full(max: Fixed) -> Self {
        Self::new(max, Fixed::ZERO, max)
    }

    pub fn get(&self) -> Fixed {
        self.value
    }

    pub fn min(&self) -> Fixed {
        self.min
    }

    pub fn max(&self) -> Fixed {
        self.max
    }

    pub fn add(&mut self, delta: Fixed) {
        self.value = (self.value + delta).max(self.min).min(self.max);
    }

    /// Lowers the value by `amount`; negative amounts are ignored.
    pub fn drain(&mut self, amount: Fixed) {
        if amount > Fixed::ZERO {
            self.add(-amount);
        }
    }

    pub fn set(&mut self, value: Fixed) {
        self.value = value.max(self.min).min(self.max);
    }
}

/// A value clamped to an integer range (for discrete values).
/// Used for: regiment strength (0 to 1000 men), leader pips (0 to 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundedInt {
    value: i32,
    min: i32,
    max: i32,
}

impl BoundedInt {
    pub const fn new(value: i32, min: i32, max: i32) -> Self {
        let value = if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        };
        Self { value, min, max }
    }

    pub fn get(&self) -> i32 {
        self.value
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn add(&mut self, delta: i32) {
        self.value = self.value.saturating_add(delta).clamp(self.min, self.max);
    }

    /// Lowers the value by `amount`; negative amounts are ignored.
    pub fn drain(&mut self, amount: i32) {
        if amount > 0 {
            self.add(-amount);
        }
    }

    pub fn set(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max);
    }
}

pub type Strength = BoundedInt;
pub type Morale = BoundedFixed;

/// Men in a full-strength regiment.
pub const REGIMENT_SIZE: i32 = 1000;

/// Highest pip value a leader can have in one skill.
pub const MAX_LEADER_PIPS: i32 = 6;

pub const fn new_strength() -> BoundedInt {
    BoundedInt::new(REGIMENT_SIZE, 0, REGIMENT_SIZE)
}

pub const fn new_leader_pips(pips: i32) -> BoundedInt {
    BoundedInt::new(pips, 0, MAX_LEADER_PIPS)
}

//! Dice for the daily combat roll.
//!
//! Battles never call `rand` directly: the controller owns a [`DiceRoller`],
//! so a seed (or a fixed face) fully determines the day-by-day trace.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Highest face of the combat die; faces run from 0.
pub const DIE_MAX: i32 = 9;

pub trait DiceRoller {
    /// A face in `0..=DIE_MAX`.
    fn roll(&mut self) -> i32;
}

/// Reproducible dice from a 64-bit seed.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: StdRng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DiceRoller for SeededDice {
    fn roll(&mut self) -> i32 {
        self.rng.gen_range(0..=DIE_MAX)
    }
}

/// Always lands on the same face (clamped into the die's range).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDice(i32);

impl FixedDice {
    pub fn new(face: i32) -> Self {
        Self(face.clamp(0, DIE_MAX))
    }
}

impl DiceRoller for FixedDice {
    fn roll(&mut self) -> i32 {
        self.0
    }
}

impl<D: DiceRoller + ?Sized> DiceRoller for Box<D> {
    fn roll(&mut self) -> i32 {
        (**self).roll()
    }
}

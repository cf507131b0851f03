//! Errors that abort a battle.
//!
//! All of these are internal-consistency failures or misuse of the controller;
//! a battle that hits one stops without recording the failing day.

use crate::battle::Side;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("Row width mismatch: own row has {own} slots, enemy row has {enemy}")]
    WidthMismatch { own: usize, enemy: usize },

    #[error("{side} regiment in slot {slot} targets empty enemy slot {target} on day {day}")]
    DanglingTarget {
        side: Side,
        day: u32,
        slot: usize,
        target: usize,
    },

    #[error("Combat width must be at least 1")]
    ZeroCombatWidth,

    #[error("{side} army has no regiments")]
    EmptyArmy { side: Side },

    #[error("Battle has already been started")]
    AlreadyStarted,

    #[error("Battle has not been started")]
    NotStarted,

    #[error("Battle already concluded on day {day}")]
    AlreadyConcluded { day: u32 },

    #[error("Battle still running after day {day}")]
    NotConcluded { day: u32 },
}

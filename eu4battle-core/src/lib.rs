//! # EU4 Battle Core
//!
//! Deterministic land battle simulation in the style of Europa Universalis IV.
//!
//! Two armies deploy onto a front of fixed combat width, pick targets within
//! their flanking range, and trade casualties and morale damage one day at a
//! time through alternating fire and shock phases until one side breaks or
//! the day limit is reached. Every day is recorded as an immutable snapshot.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ BattleSetup │────▶│    Battle    │────▶│BattleReport │
//! │ (armies,    │     │ (day loop,   │     │ (outcome,   │
//! │  terrain)   │     │  dice)       │     │  history)   │
//! └─────────────┘     └──────┬───────┘     └─────────────┘
//!                            │
//!               ┌────────────▼────────────┐
//!               │ Army ─▶ Row ─▶ Regiment │
//!               │   combat::inflict       │
//!               └─────────────────────────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Battle`] | State machine driving the day-by-day loop |
//! | [`Army`] | One side: regiment arena, front/back rows, reserves |
//! | [`Row`] | Fixed-width slots with all positional algorithms |
//! | [`Regiment`] | Strength, morale, pips and current target |
//! | [`DamageModifiers`] | Technology and modifiers folded into multipliers |
//! | [`DaySnapshot`] | Frozen copy of both armies at the end of a day |
//! | [`DiceRoller`] | Injectable dice so seeded runs replay exactly |
//!
//! All arithmetic on non-integer quantities uses [`Fixed`], so identical
//! inputs give identical histories on every platform.

pub mod army;
pub mod battle;
pub mod bounded;
pub mod combat;
pub mod config;
pub mod dice;
pub mod error;
pub mod fixed;
pub mod modifiers;
pub mod profiling;
pub mod regiment;
pub mod row;
pub mod snapshot;
pub mod tech;
pub mod terrain;
pub mod testing;
pub mod unit;

pub use army::{Army, ArmyConfig, Leader, SlotDamage, UnitChoice};
pub use battle::{Battle, BattleOutcome, BattleReport, BattleSetup, BattleState, Side};
pub use bounded::{BoundedFixed, BoundedInt};
pub use combat::Phase;
pub use config::{BattleConfig, HARD_DAY_LIMIT};
pub use dice::{DiceRoller, FixedDice, SeededDice};
pub use error::BattleError;
pub use fixed::Fixed;
pub use modifiers::{DamageModifiers, ModifierKind, ModifierSet};
pub use regiment::{Frozen, Regiment, RegimentId, RegimentIdGen};
pub use row::{RegimentKey, Row};
pub use snapshot::{ArmySnapshot, DaySnapshot, RowSnapshot};
pub use tech::{DamageTable, PhaseDamage, TechLevel};
pub use terrain::{Crossing, Terrain};
pub use unit::{TechGroup, UnitDef, UnitPips, UnitType};

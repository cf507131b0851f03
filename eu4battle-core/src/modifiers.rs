//! Army-wide percentage modifiers and the damage multipliers derived from them.
//!
//! Values are percentages (`10` means +10%) and are turned into multipliers via
//! [`Fixed::percent_multiplier`]. Missing entries mean 0%, which leaves every
//! multiplier neutral.

use crate::fixed::Fixed;
use crate::tech::{DamageTable, TechLevel};
use crate::unit::UnitType;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Divisor normalising morale damage against a 5.4 morale baseline (×100 scale).
pub const MORALE_DAMAGE_DIVISOR: i64 = 540;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    Discipline,
    Morale,
    InfantryCombatAbility,
    CavalryCombatAbility,
    ArtilleryCombatAbility,
    FireDamage,
    ShockDamage,
    MoraleDamage,
    FireDamageReceived,
    ShockDamageReceived,
    MoraleDamageReceived,
    /// Extra flanking range for cavalry only.
    CavalryFlanking,
}

impl ModifierKind {
    pub fn combat_ability(unit_type: UnitType) -> Self {
        match unit_type {
            UnitType::Infantry => ModifierKind::InfantryCombatAbility,
            UnitType::Cavalry => ModifierKind::CavalryCombatAbility,
            UnitType::Artillery => ModifierKind::ArtilleryCombatAbility,
        }
    }
}

/// Sparse set of percentage modifiers for one army.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierSet {
    values: FxHashMap<ModifierKind, Fixed>,
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: ModifierKind, percent: Fixed) -> Self {
        self.set(kind, percent);
        self
    }

    pub fn set(&mut self, kind: ModifierKind, percent: Fixed) {
        self.values.insert(kind, percent);
    }

    /// Percentage value, 0 when absent.
    pub fn get(&self, kind: ModifierKind) -> Fixed {
        self.values.get(&kind).copied().unwrap_or(Fixed::ZERO)
    }

    pub fn multiplier(&self, kind: ModifierKind) -> Fixed {
        Fixed::percent_multiplier(self.get(kind))
    }
}

/// Multipliers consumed by the casualty formulas, precomputed from the
/// technology table and the army's modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageModifiers {
    damage: DamageTable,
    discipline: Fixed,
    combat_ability: [Fixed; 3],
    fire_dealt: Fixed,
    shock_dealt: Fixed,
    morale_dealt: Fixed,
    fire_received: Fixed,
    shock_received: Fixed,
    morale_received: Fixed,
    max_morale: Fixed,
    tactics: Fixed,
}

impl DamageModifiers {
    pub fn new(tech: &TechLevel, modifiers: &ModifierSet) -> Self {
        let discipline = modifiers.multiplier(ModifierKind::Discipline);
        let combat_ability =
            UnitType::ALL.map(|t| modifiers.multiplier(ModifierKind::combat_ability(t)));

        Self {
            damage: tech.damage,
            discipline,
            combat_ability,
            fire_dealt: modifiers.multiplier(ModifierKind::FireDamage),
            shock_dealt: modifiers.multiplier(ModifierKind::ShockDamage),
            morale_dealt: modifiers.multiplier(ModifierKind::MoraleDamage),
            fire_received: modifiers.multiplier(ModifierKind::FireDamageReceived),
            shock_received: modifiers.multiplier(ModifierKind::ShockDamageReceived),
            morale_received: modifiers.multiplier(ModifierKind::MoraleDamageReceived),
            max_morale: tech.morale * modifiers.multiplier(ModifierKind::Morale),
            tactics: tech.tactics * discipline,
        }
    }

    fn base(&self, unit_type: UnitType, is_fire: bool) -> Fixed {
        let phase_dealt = if is_fire {
            self.fire_dealt
        } else {
            self.shock_dealt
        };
        self.discipline
            * self.combat_ability[unit_type as usize]
            * self.damage.get(unit_type, is_fire)
            * phase_dealt
    }

    /// Scales strength casualties inflicted by a regiment of `unit_type`.
    pub fn strength_multiplier(&self, unit_type: UnitType, is_fire: bool) -> Fixed {
        self.base(unit_type, is_fire)
    }

    /// Scales morale damage inflicted by a regiment of `unit_type`.
    ///
    /// Excludes the `1 / MORALE_DAMAGE_DIVISOR` factor; the casualty formula
    /// applies it last so the small result keeps its precision.
    pub fn morale_multiplier(&self, unit_type: UnitType, is_fire: bool) -> Fixed {
        self.base(unit_type, is_fire) * self.morale_dealt * self.max_morale
    }

    /// Scales strength casualties this army receives in the given phase.
    pub fn phase_defense_multiplier(&self, is_fire: bool) -> Fixed {
        if is_fire {
            self.fire_received
        } else {
            self.shock_received
        }
    }

    /// Scales morale damage this army receives.
    pub fn morale_defense_multiplier(&self) -> Fixed {
        self.morale_received
    }

    pub fn max_morale(&self) -> Fixed {
        self.max_morale
    }

    /// Military tactics after discipline; divides casualties taken.
    pub fn tactics(&self) -> Fixed {
        self.tactics
    }
}

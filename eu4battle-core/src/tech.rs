use crate::fixed::Fixed;
use crate::unit::UnitType;
use serde::{Deserialize, Serialize};

/// Fire and shock damage multipliers of one unit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseDamage {
    pub fire: Fixed,
    pub shock: Fixed,
}

impl PhaseDamage {
    pub const fn new(fire: Fixed, shock: Fixed) -> Self {
        Self { fire, shock }
    }

    pub fn for_phase(&self, is_fire: bool) -> Fixed {
        if is_fire {
            self.fire
        } else {
            self.shock
        }
    }
}

/// Per-type damage multipliers unlocked by military technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DamageTable {
    pub infantry: PhaseDamage,
    pub cavalry: PhaseDamage,
    pub artillery: PhaseDamage,
}

impl DamageTable {
    pub fn get(&self, unit_type: UnitType, is_fire: bool) -> Fixed {
        let damage = match unit_type {
            UnitType::Infantry => &self.infantry,
            UnitType::Cavalry => &self.cavalry,
            UnitType::Artillery => &self.artillery,
        };
        damage.for_phase(is_fire)
    }
}

impl Default for DamageTable {
    fn default() -> Self {
        Self {
            infantry: PhaseDamage::new(Fixed::from_raw(3500), Fixed::from_raw(5000)),
            cavalry: PhaseDamage::new(Fixed::ZERO, Fixed::from_raw(8000)),
            artillery: PhaseDamage::new(Fixed::ONE, Fixed::from_raw(500)),
        }
    }
}

/// One row of the military technology table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TechLevel {
    pub level: u8,
    /// Base land morale before morale modifiers.
    pub morale: Fixed,
    /// Base military tactics before discipline.
    pub tactics: Fixed,
    pub combat_width: usize,
    /// Flanking range bonus in percent.
    pub flanking_bonus: Fixed,
    pub damage: DamageTable,
}

impl Default for TechLevel {
    fn default() -> Self {
        Self {
            level: 0,
            morale: Fixed::from_raw(25000),
            tactics: Fixed::HALF,
            combat_width: 20,
            flanking_bonus: Fixed::ZERO,
            damage: DamageTable::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_lookup_by_phase() {
        let table = DamageTable::default();
        assert_eq!(table.get(UnitType::Infantry, true), Fixed::from_f64(0.35));
        assert_eq!(table.get(UnitType::Cavalry, false), Fixed::from_f64(0.8));
        assert_eq!(table.get(UnitType::Artillery, true), Fixed::ONE);
    }

    #[test]
    fn test_partial_tech_json_uses_defaults() {
        let tech: TechLevel = serde_json::from_str(r#"{"level": 12, "morale": 3.0}"#).unwrap();
        assert_eq!(tech.level, 12);
        assert_eq!(tech.morale, Fixed::from_int(3));
        assert_eq!(tech.tactics, Fixed::HALF);
        assert_eq!(tech.combat_width, 20);
    }
}

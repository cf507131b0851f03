//! Unit reference data: regiment types, pips and technology groups.
//!
//! These are plain values handed over by whoever reads the game's unit files;
//! nothing here is mutated during a battle.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Infantry,
    Cavalry,
    Artillery,
}

impl UnitType {
    pub const ALL: [UnitType; 3] = [UnitType::Infantry, UnitType::Cavalry, UnitType::Artillery];

    /// Lateral reach before strength penalties and bonuses.
    pub const fn base_flanking_range(self) -> i64 {
        match self {
            UnitType::Infantry => 1,
            UnitType::Cavalry | UnitType::Artillery => 2,
        }
    }
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UnitType::Infantry => "infantry",
            UnitType::Cavalry => "cavalry",
            UnitType::Artillery => "artillery",
        };
        f.write_str(name)
    }
}

/// Land technology groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechGroup {
    #[default]
    Western,
    Eastern,
    Anatolian,
    Muslim,
    Indian,
    Chinese,
    /// Horde armies; their casualties are scaled by the terrain's horde multiplier.
    Nomad,
    SubSaharan,
    NorthAmerican,
    Mesoamerican,
    Andean,
    HighAmerican,
}

impl TechGroup {
    pub fn is_horde(self) -> bool {
        matches!(self, TechGroup::Nomad)
    }
}

/// The six combat pips of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UnitPips {
    pub fire_offence: i32,
    pub fire_defence: i32,
    pub shock_offence: i32,
    pub shock_defence: i32,
    pub morale_offence: i32,
    pub morale_defence: i32,
}

impl UnitPips {
    pub const fn new(
        fire_offence: i32,
        fire_defence: i32,
        shock_offence: i32,
        shock_defence: i32,
        morale_offence: i32,
        morale_defence: i32,
    ) -> Self {
        Self {
            fire_offence,
            fire_defence,
            shock_offence,
            shock_defence,
            morale_offence,
            morale_defence,
        }
    }
}

/// A unit stat block as found in the game's unit definitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitDef {
    pub name: String,
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    #[serde(default)]
    pub tech_group: TechGroup,
    #[serde(default)]
    pub tech_level: u8,
    pub pips: UnitPips,
}

impl UnitDef {
    /// Starting western unit of each type.
    pub fn default_for(unit_type: UnitType) -> Self {
        let (name, tech_level, pips) = match unit_type {
            UnitType::Infantry => ("Western Medieval Infantry", 0, UnitPips::new(0, 0, 1, 1, 1, 1)),
            UnitType::Cavalry => ("Western Medieval Knights", 0, UnitPips::new(0, 0, 2, 1, 1, 1)),
            UnitType::Artillery => ("Large Cast Bronze Mortar", 7, UnitPips::new(1, 0, 0, 0, 0, 1)),
        };
        Self {
            name: name.to_string(),
            unit_type,
            tech_group: TechGroup::Western,
            tech_level,
            pips,
        }
    }
}

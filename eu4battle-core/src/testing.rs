//! Builders for tests and quick scenarios.

use crate::army::{ArmyConfig, Leader, UnitChoice};
use crate::fixed::Fixed;
use crate::modifiers::ModifierKind;
use crate::regiment::{Regiment, RegimentId};
use crate::tech::TechLevel;
use crate::unit::{TechGroup, UnitDef, UnitType};
use std::sync::Arc;

/// Fresh regiments of the given types with default units and 2.5 morale.
/// Each regiment's index doubles as its `RegimentKey`.
pub fn regiment_arena(types: &[UnitType]) -> Vec<Regiment> {
    types
        .iter()
        .enumerate()
        .map(|(i, &unit_type)| {
            Regiment::new(
                RegimentId(i as u32),
                Arc::new(UnitDef::default_for(unit_type)),
                TechLevel::default().morale,
            )
        })
        .collect()
}

pub struct ArmyConfigBuilder {
    config: ArmyConfig,
}

impl ArmyConfigBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            config: ArmyConfig {
                name: name.to_string(),
                ..ArmyConfig::default()
            },
        }
    }

    pub fn infantry(mut self, count: u32) -> Self {
        self.config.infantry.count = count;
        self
    }

    pub fn cavalry(mut self, count: u32) -> Self {
        self.config.cavalry.count = count;
        self
    }

    pub fn artillery(mut self, count: u32) -> Self {
        self.config.artillery.count = count;
        self
    }

    /// Uses `unit` for every regiment of its type.
    pub fn unit(mut self, count: u32, unit: UnitDef) -> Self {
        let choice = UnitChoice {
            count,
            unit: Some(unit.clone()),
        };
        match unit.unit_type {
            UnitType::Infantry => self.config.infantry = choice,
            UnitType::Cavalry => self.config.cavalry = choice,
            UnitType::Artillery => self.config.artillery = choice,
        }
        self
    }

    pub fn leader(mut self, fire: i32, shock: i32, maneuver: i32) -> Self {
        self.config.leader = Leader::new(fire, shock, maneuver);
        self
    }

    pub fn tech(mut self, tech: TechLevel) -> Self {
        self.config.tech = tech;
        self
    }

    pub fn combat_width(mut self, width: usize) -> Self {
        self.config.tech.combat_width = width;
        self
    }

    pub fn tech_group(mut self, group: TechGroup) -> Self {
        self.config.tech_group = group;
        self
    }

    pub fn modifier(mut self, kind: ModifierKind, percent: i64) -> Self {
        self.config.modifiers.set(kind, Fixed::from_int(percent));
        self
    }

    pub fn build(self) -> ArmyConfig {
        self.config
    }
}

use anyhow::{Context, Result};
use eu4battle_core::{ArmyConfig, BattleConfig, BattleSetup, Crossing, Terrain};
use serde::Deserialize;
use std::path::Path;

/// Terrain as written in a scenario: a preset name or a full definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TerrainSpec {
    Preset(String),
    Custom(Terrain),
}

impl TerrainSpec {
    pub fn resolve(self) -> Result<Terrain> {
        match self {
            TerrainSpec::Preset(name) => parse_terrain(&name),
            TerrainSpec::Custom(terrain) => Ok(terrain),
        }
    }
}

/// On-disk scenario layout.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub attacker: ArmyConfig,
    pub defender: ArmyConfig,
    #[serde(default)]
    pub terrain: Option<TerrainSpec>,
    #[serde(default)]
    pub crossing: Crossing,
    #[serde(default)]
    pub config: BattleConfig,
}

impl Scenario {
    pub fn into_setup(self) -> Result<BattleSetup> {
        let terrain = match self.terrain {
            Some(spec) => spec.resolve()?,
            None => Terrain::default(),
        };
        Ok(BattleSetup {
            attacker: self.attacker,
            defender: self.defender,
            terrain,
            crossing: self.crossing,
            config: self.config,
        })
    }
}

pub fn parse_terrain(name: &str) -> Result<Terrain> {
    Terrain::preset(name).with_context(|| {
        format!(
            "Unknown terrain '{}' (expected one of: {})",
            name,
            Terrain::preset_names().join(", ")
        )
    })
}

pub fn parse_scenario(json: &str) -> Result<BattleSetup> {
    let scenario: Scenario = serde_json::from_str(json).context("Invalid scenario JSON")?;
    scenario.into_setup()
}

pub fn load_scenario(path: &Path) -> Result<BattleSetup> {
    log::info!("Loading scenario from {:?}", path);
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario {}", path.display()))?;
    let setup =
        parse_scenario(&json).with_context(|| format!("Failed to load {}", path.display()))?;
    log::debug!(
        "Loaded {} ({} regiments) vs {} ({} regiments) on {}",
        setup.attacker.name,
        setup.attacker.regiment_count(),
        setup.defender.name,
        setup.defender.regiment_count(),
        setup.terrain.name
    );
    Ok(setup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eu4battle_core::{Fixed, Leader, ModifierKind, UnitType};

    #[test]
    fn test_minimal_scenario() {
        let setup = parse_scenario(
            r#"{
                "attacker": {"name": "Castile", "infantry": {"count": 10}},
                "defender": {"name": "Granada", "infantry": {"count": 8}, "cavalry": {"count": 4}}
            }"#,
        )
        .unwrap();
        assert_eq!(setup.attacker.regiment_count(), 10);
        assert_eq!(setup.defender.choice(UnitType::Cavalry).count, 4);
        assert_eq!(setup.terrain, Terrain::default());
        assert_eq!(setup.crossing, Crossing::None);
        assert_eq!(setup.config, BattleConfig::default());
    }

    #[test]
    fn test_full_scenario() {
        let setup = parse_scenario(
            r#"{
                "attacker": {
                    "name": "Ottomans",
                    "tech_group": "anatolian",
                    "tech": {"level": 9, "morale": 3.0, "tactics": 1.0, "combat_width": 24},
                    "leader": {"fire": 2, "shock": 4, "maneuver": 3},
                    "modifiers": {"discipline": 5, "cavalry_combat_ability": 10},
                    "infantry": {"count": 20},
                    "cavalry": {"count": 8}
                },
                "defender": {"name": "Hungary", "infantry": {"count": 15}},
                "terrain": "hills",
                "crossing": "river",
                "config": {"max_days": 30}
            }"#,
        )
        .unwrap();
        assert_eq!(setup.attacker.tech.combat_width, 24);
        assert_eq!(setup.attacker.leader.shock, 4);
        assert_eq!(
            setup.attacker.modifiers.get(ModifierKind::Discipline),
            Fixed::from_int(5)
        );
        assert_eq!(setup.terrain.attacker_penalty, -1);
        assert_eq!(setup.crossing, Crossing::River);
        assert_eq!(setup.config.max_days, 30);
    }

    #[test]
    fn test_leader_pips_clamped() {
        let setup = parse_scenario(
            r#"{
                "attacker": {"infantry": {"count": 1}, "leader": {"fire": 9, "shock": -4, "maneuver": 6}},
                "defender": {"infantry": {"count": 1}, "leader": {"fire": 12}}
            }"#,
        )
        .unwrap();
        assert_eq!(setup.attacker.leader, Leader::new(6, 0, 6));
        assert_eq!(setup.defender.leader.fire, 6);
        assert_eq!(setup.defender.leader.shock, 0);
    }

    #[test]
    fn test_custom_terrain() {
        let setup = parse_scenario(
            r#"{
                "attacker": {"infantry": {"count": 1}},
                "defender": {"infantry": {"count": 1}},
                "terrain": {"name": "swampy_steppe", "attacker_penalty": -1, "horde_multiplier": 1.25}
            }"#,
        )
        .unwrap();
        assert_eq!(setup.terrain.name, "swampy_steppe");
        assert_eq!(setup.terrain.horde_multiplier, Fixed::from_f64(1.25));
    }

    #[test]
    fn test_unknown_terrain_lists_presets() {
        let err = parse_scenario(
            r#"{"attacker": {}, "defender": {}, "terrain": "ocean"}"#,
        )
        .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("ocean"));
        assert!(message.contains("mountains"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_scenario(Path::new("/nonexistent/battle.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("nonexistent"));
    }
}

//! Battlefield terrain and river/strait crossings.

use crate::fixed::Fixed;
use serde::{Deserialize, Serialize};

/// Terrain the battle is fought on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terrain {
    pub name: String,
    /// Added to the attacker's base pips; zero or negative.
    #[serde(default)]
    pub attacker_penalty: i32,
    /// Scales damage dealt by horde armies.
    #[serde(default = "neutral_multiplier")]
    pub horde_multiplier: Fixed,
}

fn neutral_multiplier() -> Fixed {
    Fixed::ONE
}

const HORDE_FAVOURED: Fixed = Fixed::from_raw(12500);

impl Terrain {
    pub fn new(name: &str, attacker_penalty: i32, horde_multiplier: Fixed) -> Self {
        Self {
            name: name.to_string(),
            attacker_penalty: attacker_penalty.min(0),
            horde_multiplier,
        }
    }

    /// Looks up a named preset (case-insensitive).
    pub fn preset(name: &str) -> Option<Self> {
        let key = name.to_ascii_lowercase();
        let (penalty, horde) = match key.as_str() {
            "grasslands" | "steppe" => (0, HORDE_FAVOURED),
            "farmlands" | "desert" | "coastal_desert" | "drylands" | "savannah" => (0, Fixed::ONE),
            "forest" | "woods" | "hills" | "highlands" | "marsh" | "jungle" | "glacier" => {
                (-1, Fixed::ONE)
            }
            "mountains" => (-2, Fixed::ONE),
            _ => return None,
        };
        Some(Self::new(&key, penalty, horde))
    }

    pub fn preset_names() -> &'static [&'static str] {
        &[
            "grasslands",
            "steppe",
            "farmlands",
            "desert",
            "coastal_desert",
            "drylands",
            "savannah",
            "forest",
            "woods",
            "hills",
            "highlands",
            "marsh",
            "jungle",
            "glacier",
            "mountains",
        ]
    }
}

impl Default for Terrain {
    fn default() -> Self {
        Self::new("grasslands", 0, Fixed::ONE)
    }
}

/// Obstacle the attacker crosses to reach the defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crossing {
    #[default]
    None,
    River,
    Strait,
}

impl Crossing {
    pub fn penalty(self) -> i32 {
        match self {
            Crossing::None => 0,
            Crossing::River => -1,
            Crossing::Strait => -2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let mountains = Terrain::preset("Mountains").unwrap();
        assert_eq!(mountains.attacker_penalty, -2);
        assert_eq!(mountains.horde_multiplier, Fixed::ONE);

        let steppe = Terrain::preset("steppe").unwrap();
        assert_eq!(steppe.attacker_penalty, 0);
        assert_eq!(steppe.horde_multiplier, Fixed::from_f64(1.25));

        assert!(Terrain::preset("ocean").is_none());
        for name in Terrain::preset_names() {
            assert!(Terrain::preset(name).is_some(), "{}", name);
        }
    }

    #[test]
    fn test_new_clamps_positive_penalty() {
        assert_eq!(Terrain::new("odd", 2, Fixed::ONE).attacker_penalty, 0);
    }

    #[test]
    fn test_terrain_json_defaults() {
        let terrain: Terrain = serde_json::from_str(r#"{"name": "plain"}"#).unwrap();
        assert_eq!(terrain.attacker_penalty, 0);
        assert_eq!(terrain.horde_multiplier, Fixed::ONE);
    }

    #[test]
    fn test_crossing_penalty() {
        assert_eq!(Crossing::None.penalty(), 0);
        assert_eq!(Crossing::River.penalty(), -1);
        assert_eq!(Crossing::Strait.penalty(), -2);
    }
}

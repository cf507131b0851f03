use serde::{Deserialize, Serialize};

/// Days after which a battle is called a stalemate regardless of configuration.
pub const HARD_DAY_LIMIT: u32 = 100;

/// Battle configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Stop after this many combat days. Values above [`HARD_DAY_LIMIT`]
    /// are capped, zero is treated as one.
    pub max_days: u32,
}

impl BattleConfig {
    pub fn effective_max_days(&self) -> u32 {
        self.max_days.clamp(1, HARD_DAY_LIMIT)
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_days: HARD_DAY_LIMIT,
        }
    }
}

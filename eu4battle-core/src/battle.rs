//! The day-by-day battle controller.
//!
//! ```text
//! NotStarted ──start()──▶ Running ──step()*──▶ Concluded
//! ```
//!
//! `start` deploys both armies and records day 0. Each `step` then:
//!
//! 1. picks the phase and re-rolls the dice when it changes,
//! 2. retargets both sides if either changed shape the day before,
//! 3. computes both sides' damage from the same pre-damage state,
//! 4. applies it, records the day, and replaces broken regiments,
//! 5. concludes on breakage or at the day limit.

use crate::army::{Army, ArmyConfig};
use crate::combat::{self, Attack, Phase};
use crate::config::BattleConfig;
use crate::dice::DiceRoller;
use crate::error::BattleError;
use crate::fixed::Fixed;
use crate::profiling;
use crate::regiment::RegimentIdGen;
use crate::snapshot::DaySnapshot;
use crate::terrain::{Crossing, Terrain};
use serde::{Deserialize, Serialize};
use tracing::instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Attacker,
    Defender,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Attacker => f.write_str("Attacker"),
            Side::Defender => f.write_str("Defender"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleState {
    NotStarted,
    Running,
    Concluded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    AttackerWon,
    DefenderWon,
    BothBroken,
    /// Day limit reached with both sides still standing.
    Stalemate,
}

impl BattleOutcome {
    pub fn is_decisive(self) -> bool {
        !matches!(self, BattleOutcome::Stalemate)
    }
}

impl std::fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            BattleOutcome::AttackerWon => "attacker won",
            BattleOutcome::DefenderWon => "defender won",
            BattleOutcome::BothBroken => "both armies broke",
            BattleOutcome::Stalemate => "stalemate",
        };
        f.write_str(text)
    }
}

/// Everything needed to fight one battle, as read from a scenario file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleSetup {
    pub attacker: ArmyConfig,
    pub defender: ArmyConfig,
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub crossing: Crossing,
    #[serde(default)]
    pub config: BattleConfig,
}

/// Result of a finished battle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    /// Combat days fought.
    pub days: u32,
    /// One entry per day, starting with the deployed state on day 0.
    pub history: Vec<DaySnapshot>,
}

impl BattleReport {
    pub fn last(&self) -> Option<&DaySnapshot> {
        self.history.last()
    }
}

pub struct Battle<D: DiceRoller> {
    attacker: Army,
    defender: Army,
    terrain: Terrain,
    crossing: Crossing,
    config: BattleConfig,
    dice: D,
    state: BattleState,
    day: u32,
    phase: Option<Phase>,
    rolls: (i32, i32),
    retarget: bool,
    outcome: Option<BattleOutcome>,
    history: Vec<DaySnapshot>,
}

impl<D: DiceRoller> Battle<D> {
    /// Assembles both armies with regiment ids unique to this battle.
    pub fn new(setup: &BattleSetup, dice: D) -> Self {
        let mut ids = RegimentIdGen::new();
        let attacker = Army::new(&setup.attacker, &mut ids);
        let defender = Army::new(&setup.defender, &mut ids);
        Self::from_armies(
            attacker,
            defender,
            setup.terrain.clone(),
            setup.crossing,
            setup.config,
            dice,
        )
    }

    pub fn from_armies(
        attacker: Army,
        defender: Army,
        terrain: Terrain,
        crossing: Crossing,
        config: BattleConfig,
        dice: D,
    ) -> Self {
        Self {
            attacker,
            defender,
            terrain,
            crossing,
            config,
            dice,
            state: BattleState::NotStarted,
            day: 0,
            phase: None,
            rolls: (0, 0),
            retarget: true,
            outcome: None,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    /// Combat days fought so far.
    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn attacker(&self) -> &Army {
        &self.attacker
    }

    pub fn defender(&self) -> &Army {
        &self.defender
    }

    pub fn army(&self, side: Side) -> &Army {
        match side {
            Side::Attacker => &self.attacker,
            Side::Defender => &self.defender,
        }
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn history(&self) -> &[DaySnapshot] {
        &self.history
    }

    /// Combat width: the wider of the two sides' technology.
    pub fn combat_width(&self) -> usize {
        self.attacker
            .tech()
            .combat_width
            .max(self.defender.tech().combat_width)
    }

    /// Deploys both armies and records the day-0 snapshot.
    #[instrument(skip_all, name = "battle_start")]
    pub fn start(&mut self) -> Result<(), BattleError> {
        if self.state != BattleState::NotStarted {
            return Err(BattleError::AlreadyStarted);
        }
        for side in [Side::Attacker, Side::Defender] {
            if self.army(side).regiment_count() == 0 {
                return Err(BattleError::EmptyArmy { side });
            }
        }
        let width = self.combat_width();
        if width == 0 {
            return Err(BattleError::ZeroCombatWidth);
        }

        let attacker_count = self.attacker.regiment_count();
        let defender_count = self.defender.regiment_count();
        self.attacker.deploy(width, defender_count);
        self.defender.deploy(width, attacker_count);

        log::info!(
            "Battle of {} vs {} on {} (width {}, {} vs {} regiments)",
            self.attacker.name(),
            self.defender.name(),
            self.terrain.name,
            width,
            attacker_count,
            defender_count
        );

        self.record(None);
        self.state = BattleState::Running;
        self.check_conclusion();
        Ok(())
    }

    /// Terrain and crossing penalty for the attacker. A river or strait only
    /// counts if the attacking general does not out-manoeuvre the defender.
    pub fn attacker_penalty(&self) -> i32 {
        let crossing = if self.attacker.leader().maneuver <= self.defender.leader().maneuver {
            self.crossing.penalty()
        } else {
            0
        };
        self.terrain.attacker_penalty.min(0) + crossing
    }

    fn horde_multiplier(&self, army: &Army) -> Fixed {
        if army.tech_group().is_horde() {
            self.terrain.horde_multiplier
        } else {
            Fixed::ONE
        }
    }

    /// Fights one day. Nothing of a failing day is applied or recorded.
    #[instrument(skip_all, name = "battle_day")]
    pub fn step(&mut self) -> Result<BattleState, BattleError> {
        match self.state {
            BattleState::NotStarted => return Err(BattleError::NotStarted),
            BattleState::Concluded => return Err(BattleError::AlreadyConcluded { day: self.day }),
            BattleState::Running => {}
        }

        let day = self.day + 1;
        let phase = Phase::for_day(day);
        let rolls = if self.phase != Some(phase) {
            (self.dice.roll(), self.dice.roll())
        } else {
            self.rolls
        };

        if self.retarget {
            self.attacker.set_targets(self.defender.front())?;
            self.defender.set_targets(self.attacker.front())?;
        }

        let attacker_leader = *self.attacker.leader();
        let defender_leader = *self.defender.leader();
        let attack = Attack {
            side: Side::Attacker,
            day,
            phase,
            base_pips: combat::base_pips(
                &attacker_leader,
                &defender_leader,
                phase,
                rolls.0,
                self.attacker_penalty(),
            ),
            horde_multiplier: self.horde_multiplier(&self.attacker),
        };
        let counter = Attack {
            side: Side::Defender,
            day,
            phase,
            base_pips: combat::base_pips(&defender_leader, &attacker_leader, phase, rolls.1, 0),
            horde_multiplier: self.horde_multiplier(&self.defender),
        };

        let to_defender = combat::inflict(&attack, &self.attacker, &self.defender)?;
        let to_attacker = combat::inflict(&counter, &self.defender, &self.attacker)?;

        let attacker_morale = self.attacker.average_max_morale();
        let defender_morale = self.defender.average_max_morale();
        self.defender
            .apply_casualties_and_morale_damage(&to_defender, attacker_morale);
        self.attacker
            .apply_casualties_and_morale_damage(&to_attacker, defender_morale);

        self.day = day;
        self.phase = Some(phase);
        self.rolls = rolls;
        self.record(Some(phase));

        let attacker_changed = self.attacker.replace_regiments();
        let defender_changed = self.defender.replace_regiments();
        self.retarget = attacker_changed || defender_changed;

        log::debug!(
            "Day {} ({}, rolls {}/{}): attacker {} men {} morale, defender {} men {} morale",
            day,
            phase,
            rolls.0,
            rolls.1,
            self.attacker.total_strength(),
            self.attacker.total_morale(),
            self.defender.total_strength(),
            self.defender.total_morale()
        );

        self.check_conclusion();
        profiling::frame_mark_battle_day();
        Ok(self.state)
    }

    fn record(&mut self, phase: Option<Phase>) {
        self.history.push(DaySnapshot {
            day: self.day,
            is_fire: phase.map(Phase::is_fire),
            attacker_roll: self.rolls.0,
            defender_roll: self.rolls.1,
            attacker: self.attacker.snapshot(),
            defender: self.defender.snapshot(),
            outcome: None,
        });
    }

    fn check_conclusion(&mut self) {
        let outcome = match (self.attacker.is_broken(), self.defender.is_broken()) {
            (true, true) => BattleOutcome::BothBroken,
            (true, false) => BattleOutcome::DefenderWon,
            (false, true) => BattleOutcome::AttackerWon,
            (false, false) if self.day >= self.config.effective_max_days() => {
                BattleOutcome::Stalemate
            }
            (false, false) => return,
        };

        log::info!("Battle concluded on day {}: {}", self.day, outcome);
        self.outcome = Some(outcome);
        self.state = BattleState::Concluded;
        if let Some(last) = self.history.last_mut() {
            last.outcome = Some(outcome);
        }
    }

    /// Starts the battle if needed and fights it to the end.
    pub fn run(mut self) -> Result<BattleReport, BattleError> {
        if self.state == BattleState::NotStarted {
            self.start()?;
        }
        while self.state == BattleState::Running {
            self.step()?;
        }
        self.into_report()
    }

    /// The finished battle's report; fails if it is still being fought.
    pub fn into_report(self) -> Result<BattleReport, BattleError> {
        match self.outcome {
            Some(outcome) => Ok(BattleReport {
                outcome,
                days: self.day,
                history: self.history,
            }),
            None if self.state == BattleState::NotStarted => Err(BattleError::NotStarted),
            None => Err(BattleError::NotConcluded { day: self.day }),
        }
    }
}

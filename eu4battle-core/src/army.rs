//! One side of a battle: its regiments, rows, reserves and modifiers.
//!
//! The army owns every regiment in an arena that never shrinks. At any time a
//! regiment is in exactly one of: the front row, the back row, the reserve
//! pool, or none of them (retreated or destroyed). Rows and reserves only hold
//! [`RegimentKey`]s into the arena.

use crate::bounded::new_leader_pips;
use crate::error::BattleError;
use crate::fixed::Fixed;
use crate::modifiers::{DamageModifiers, ModifierKind, ModifierSet};
use crate::regiment::{Regiment, RegimentIdGen};
use crate::row::{RegimentKey, Row};
use crate::snapshot::{ArmySnapshot, RowSnapshot};
use crate::tech::TechLevel;
use crate::unit::{TechGroup, UnitDef, UnitType};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Passive daily morale loss of deployed regiments, as a share of the enemy's
/// average maximum morale.
const FRONTLINE_MORALE_DRAIN: Fixed = Fixed::from_raw(100); // 1%

/// Passive daily morale loss of reserves.
const RESERVE_MORALE_DRAIN: Fixed = Fixed::from_raw(200); // 2%

/// Leader pips per skill.
///
/// Deserialization goes through [`Leader::new`], so pips read from a
/// scenario are clamped like any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawLeader")]
pub struct Leader {
    pub fire: i32,
    pub shock: i32,
    pub maneuver: i32,
}

/// Unclamped leader pips as written in input files.
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawLeader {
    fire: i32,
    shock: i32,
    maneuver: i32,
}

impl From<RawLeader> for Leader {
    fn from(raw: RawLeader) -> Self {
        Leader::new(raw.fire, raw.shock, raw.maneuver)
    }
}

impl Leader {
    /// Clamps every skill into the 0-6 pip range.
    pub fn new(fire: i32, shock: i32, maneuver: i32) -> Self {
        Self {
            fire: new_leader_pips(fire).get(),
            shock: new_leader_pips(shock).get(),
            maneuver: new_leader_pips(maneuver).get(),
        }
    }

    pub fn pips(&self, is_fire: bool) -> i32 {
        if is_fire {
            self.fire
        } else {
            self.shock
        }
    }
}

/// Regiments of one type an army brings, with the unit they are drawn from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitChoice {
    pub count: u32,
    /// Falls back to the type's starting unit when absent.
    pub unit: Option<UnitDef>,
}

impl UnitChoice {
    pub fn new(count: u32) -> Self {
        Self { count, unit: None }
    }
}

/// Everything needed to assemble an army.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmyConfig {
    pub name: String,
    pub tech: TechLevel,
    pub tech_group: TechGroup,
    pub leader: Leader,
    pub modifiers: ModifierSet,
    pub infantry: UnitChoice,
    pub cavalry: UnitChoice,
    pub artillery: UnitChoice,
}

impl Default for ArmyConfig {
    fn default() -> Self {
        Self {
            name: "Army".to_string(),
            tech: TechLevel::default(),
            tech_group: TechGroup::default(),
            leader: Leader::default(),
            modifiers: ModifierSet::default(),
            infantry: UnitChoice::default(),
            cavalry: UnitChoice::default(),
            artillery: UnitChoice::default(),
        }
    }
}

impl ArmyConfig {
    pub fn choice(&self, unit_type: UnitType) -> &UnitChoice {
        match unit_type {
            UnitType::Infantry => &self.infantry,
            UnitType::Cavalry => &self.cavalry,
            UnitType::Artillery => &self.artillery,
        }
    }

    pub fn regiment_count(&self) -> usize {
        UnitType::ALL
            .iter()
            .map(|&t| self.choice(t).count as usize)
            .sum()
    }
}

#[derive(Debug, Clone)]
pub struct Army {
    name: String,
    tech: TechLevel,
    tech_group: TechGroup,
    leader: Leader,
    modifiers: ModifierSet,
    damage: DamageModifiers,
    regiments: Vec<Regiment>,
    front: Row,
    back: Row,
    reserves: Vec<RegimentKey>,
}

impl Army {
    /// Creates every regiment at full strength and morale, all in reserve.
    pub fn new(config: &ArmyConfig, ids: &mut RegimentIdGen) -> Self {
        let damage = DamageModifiers::new(&config.tech, &config.modifiers);
        let max_morale = damage.max_morale();

        let mut regiments = Vec::with_capacity(config.regiment_count());
        for unit_type in UnitType::ALL {
            let choice = config.choice(unit_type);
            let unit = Arc::new(
                choice
                    .unit
                    .clone()
                    .unwrap_or_else(|| UnitDef::default_for(unit_type)),
            );
            for _ in 0..choice.count {
                regiments.push(Regiment::new(ids.next_id(), Arc::clone(&unit), max_morale));
            }
        }

        let reserves = (0..regiments.len()).map(RegimentKey).collect();
        Self {
            name: config.name.clone(),
            tech: config.tech,
            tech_group: config.tech_group,
            leader: config.leader,
            modifiers: config.modifiers.clone(),
            damage,
            regiments,
            front: Row::new(0),
            back: Row::new(0),
            reserves,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tech(&self) -> &TechLevel {
        &self.tech
    }

    pub fn tech_group(&self) -> TechGroup {
        self.tech_group
    }

    pub fn leader(&self) -> &Leader {
        &self.leader
    }

    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    pub fn damage(&self) -> &DamageModifiers {
        &self.damage
    }

    pub fn front(&self) -> &Row {
        &self.front
    }

    pub fn back(&self) -> &Row {
        &self.back
    }

    pub fn reserves(&self) -> &[RegimentKey] {
        &self.reserves
    }

    pub fn regiments(&self) -> &[Regiment] {
        &self.regiments
    }

    pub fn regiment(&self, key: RegimentKey) -> &Regiment {
        &self.regiments[key.0]
    }

    #[cfg(test)]
    pub(crate) fn regiments_mut(&mut self) -> &mut [Regiment] {
        &mut self.regiments
    }

    /// Total regiments owned, including those that have left the field.
    pub fn regiment_count(&self) -> usize {
        self.regiments.len()
    }

    /// Keys of regiments still on the field: front, back, then reserves.
    pub fn active_keys(&self) -> Vec<RegimentKey> {
        self.front
            .occupied()
            .chain(self.back.occupied())
            .map(|(_, key)| key)
            .chain(self.reserves.iter().copied())
            .collect()
    }

    fn active(&self) -> impl Iterator<Item = &Regiment> + '_ {
        self.active_keys()
            .into_iter()
            .map(move |key| &self.regiments[key.0])
    }

    /// Regiments that have retreated or been destroyed.
    pub fn retreated_count(&self) -> usize {
        self.regiment_count() - self.active_keys().len()
    }

    pub fn total_strength(&self) -> i64 {
        self.active().map(|r| r.strength() as i64).sum()
    }

    pub fn max_strength(&self) -> i64 {
        self.regiments.iter().map(|r| r.max_strength() as i64).sum()
    }

    pub fn total_morale(&self) -> Fixed {
        self.active().map(Regiment::morale).sum()
    }

    pub fn max_morale(&self) -> Fixed {
        self.regiments.iter().map(Regiment::max_morale).sum()
    }

    /// Mean maximum morale over every regiment the army owns.
    pub fn average_max_morale(&self) -> Fixed {
        if self.regiments.is_empty() {
            return Fixed::ZERO;
        }
        self.max_morale() / Fixed::from_int(self.regiments.len() as i64)
    }

    /// True once the regiments left on the field have no men or no morale.
    pub fn is_broken(&self) -> bool {
        self.total_strength() <= 0 || self.total_morale() <= Fixed::ZERO
    }

    /// Lays the army out on a front of `max_width` slots facing an enemy that
    /// can put `enemy_frontline_count` regiments in line.
    ///
    /// Infantry take the centre and cavalry the flanks; artillery forms the
    /// back row. Leftovers go to reserve and top up the front if it is still
    /// short of the target width.
    pub fn deploy(&mut self, max_width: usize, enemy_frontline_count: usize) {
        self.front = Row::new(max_width);
        self.back = Row::new(max_width);
        for regiment in self.regiments.iter_mut() {
            regiment.clear_target();
        }

        let target_width = max_width.min(enemy_frontline_count);
        let mut infantry = self.keys_of(UnitType::Infantry);
        let mut cavalry = self.keys_of(UnitType::Cavalry);
        let mut artillery = self.keys_of(UnitType::Artillery);

        let (infantry_slots, cavalry_slots) = if infantry.len() + cavalry.len() <= target_width {
            (infantry.len(), cavalry.len())
        } else if enemy_frontline_count * 2 < max_width || infantry.len() * 2 < max_width {
            let infantry_slots = infantry.len().min(target_width);
            let cavalry_slots = cavalry.len().min(target_width - infantry_slots);
            (infantry_slots, cavalry_slots)
        } else {
            let cavalry_slots = cavalry.len().min(max_width / 2).min(target_width);
            let infantry_slots = infantry.len().min(target_width - cavalry_slots);
            let cavalry_slots = cavalry
                .len()
                .min(target_width - infantry_slots)
                .max(cavalry_slots);
            (infantry_slots, cavalry_slots)
        };

        self.front.add_regiments(&mut infantry, Some(infantry_slots));
        self.front.add_regiments(&mut cavalry, Some(cavalry_slots));
        self.back.add_regiments(&mut artillery, None);

        // Popped from the end: infantry first, artillery last.
        self.reserves = artillery;
        self.reserves.extend(cavalry);
        self.reserves.extend(infantry);

        let shortfall = target_width.saturating_sub(self.front.count());
        self.front.add_regiments(&mut self.reserves, Some(shortfall));

        log::debug!(
            "{} deployed {} front, {} back, {} reserve on width {}",
            self.name,
            self.front.count(),
            self.back.count(),
            self.reserves.len(),
            max_width
        );
    }

    /// Keys of one type, ordered so popping yields the lowest key first.
    fn keys_of(&self, unit_type: UnitType) -> Vec<RegimentKey> {
        self.regiments
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, r)| r.unit_type() == unit_type)
            .map(|(i, _)| RegimentKey(i))
            .collect()
    }

    /// Points the front and back rows at `enemy_front`.
    pub fn set_targets(&mut self, enemy_front: &Row) -> Result<(), BattleError> {
        let tech_bonus = self.tech.flanking_bonus;
        let cavalry_bonus = self.modifiers.get(ModifierKind::CavalryFlanking);
        self.front
            .set_targets(&mut self.regiments, enemy_front, tech_bonus, cavalry_bonus)?;
        self.back
            .set_targets(&mut self.regiments, enemy_front, tech_bonus, cavalry_bonus)
    }

    /// Applies one day of losses. `damage` is indexed by front-row slot.
    ///
    /// Every deployed regiment also loses 1% of the enemy's average morale,
    /// reserves lose 2%.
    pub fn apply_casualties_and_morale_damage(
        &mut self,
        damage: &[SlotDamage],
        enemy_average_morale: Fixed,
    ) {
        let frontline_drain = enemy_average_morale * FRONTLINE_MORALE_DRAIN;
        let reserve_drain = enemy_average_morale * RESERVE_MORALE_DRAIN;

        for (slot, key) in self.front.occupied() {
            let regiment = &mut self.regiments[key.0];
            let hit = damage.get(slot).copied().unwrap_or_default();
            regiment.take_casualties(hit.casualties);
            regiment.take_morale_damage(hit.morale + frontline_drain);
        }
        for (_, key) in self.back.occupied() {
            self.regiments[key.0].take_morale_damage(frontline_drain);
        }
        for key in &self.reserves {
            self.regiments[key.0].take_morale_damage(reserve_drain);
        }
    }

    /// Clears broken regiments off the field, then refills the front.
    ///
    /// Reserves are fed in alternating left and right of centre, each into
    /// the innermost gap on its side. Once reserves run out the back row
    /// steps forward. Idle regiments on the outside are then pulled inward
    /// and the back row is closed up. Returns true if anything changed.
    pub fn replace_regiments(&mut self) -> bool {
        let mut changed = self.front.remove_broken_regiments(&mut self.regiments);
        changed |= self.back.remove_broken_regiments(&mut self.regiments);

        let before = self.reserves.len();
        self.reserves.retain(|key| !self.regiments[key.0].is_broken());
        changed |= self.reserves.len() != before;

        changed |= self.refill_from_reserves();
        changed |= self.advance_back_row();

        while self.front.move_outmost_regiment_to_inmost_gap(&self.regiments) {
            changed = true;
        }
        changed |= self.back.shift_regiments();

        changed
    }

    fn refill_from_reserves(&mut self) -> bool {
        let width = self.front.width();
        let gaps: Vec<usize> = self
            .front
            .centre_order()
            .into_iter()
            .filter(|&i| !self.front.is_occupied(i))
            .collect();
        let (left, right): (Vec<usize>, Vec<usize>) =
            gaps.into_iter().partition(|&i| 2 * i + 1 < width);
        let mut left = left.into_iter();
        let mut right = right.into_iter();

        let mut placed = false;
        while !self.reserves.is_empty() {
            let mut progressed = false;
            for side in [&mut left, &mut right] {
                let Some(slot) = side.next() else {
                    continue;
                };
                let Some(key) = self.reserves.pop() else {
                    break;
                };
                self.front.place(slot, key);
                progressed = true;
            }
            if !progressed {
                break;
            }
            placed = true;
        }
        placed
    }

    /// With no reserves left, back-row regiments fill remaining front gaps,
    /// innermost first.
    fn advance_back_row(&mut self) -> bool {
        if !self.reserves.is_empty() {
            return false;
        }

        let gaps: Vec<usize> = self
            .front
            .centre_order()
            .into_iter()
            .filter(|&i| !self.front.is_occupied(i))
            .collect();
        let movers: Vec<usize> = self
            .back
            .centre_order()
            .into_iter()
            .filter(|&i| self.back.is_occupied(i))
            .collect();

        let mut moved = false;
        for (gap, from) in gaps.into_iter().zip(movers) {
            if let Some(key) = self.back.take(from) {
                self.regiments[key.0].clear_target();
                self.front.place(gap, key);
                moved = true;
            }
        }
        moved
    }

    /// Independent copy of the army's current state.
    pub fn snapshot(&self) -> ArmySnapshot {
        let freeze_row = |row: &Row| RowSnapshot {
            slots: row
                .slots()
                .iter()
                .map(|slot| slot.map(|key| self.regiments[key.0].unmodifiable_copy()))
                .collect(),
        };

        ArmySnapshot {
            name: self.name.clone(),
            front: freeze_row(&self.front),
            back: freeze_row(&self.back),
            reserves: self
                .reserves
                .iter()
                .map(|key| self.regiments[key.0].unmodifiable_copy())
                .collect(),
            retreated: self.retreated_count(),
            strength: self.total_strength(),
            max_strength: self.max_strength(),
            morale: self.total_morale(),
            max_morale: self.max_morale(),
        }
    }
}

/// Losses one front-row slot takes in a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotDamage {
    pub casualties: i64,
    pub morale: Fixed,
}

//! One line (front or back) of a deployed army.
//!
//! A [`Row`] is a fixed number of slots, each empty or holding a
//! [`RegimentKey`] into the owning army's regiment arena. Everything
//! positional lives here: centre-outward placement, gap filling, shifting
//! and target acquisition.
//!
//! The centre distance of slot `i` in a row of width `W` is `|2i − W + 1|`.
//! Equal distances are ordered right-of-centre first, so a width-7 row is
//! walked as `[3, 4, 2, 5, 1, 6, 0]`.

use crate::error::BattleError;
use crate::fixed::Fixed;
use crate::regiment::Regiment;
use crate::unit::UnitType;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Index of a regiment in its army's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegimentKey(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    slots: Vec<Option<RegimentKey>>,
}

impl Row {
    pub fn new(width: usize) -> Self {
        Self {
            slots: vec![None; width],
        }
    }

    pub fn width(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, index: usize) -> Option<RegimentKey> {
        self.slots.get(index).copied().flatten()
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    pub fn slots(&self) -> &[Option<RegimentKey>] {
        &self.slots
    }

    /// Occupied slots as `(index, key)`, left to right.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, RegimentKey)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|key| (i, key)))
    }

    pub fn count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub(crate) fn place(&mut self, index: usize, key: RegimentKey) {
        debug_assert!(self.slots[index].is_none(), "slot {} already taken", index);
        self.slots[index] = Some(key);
    }

    pub(crate) fn take(&mut self, index: usize) -> Option<RegimentKey> {
        self.slots[index].take()
    }

    pub fn centre_distance(&self, index: usize) -> usize {
        (2 * index as i64 - self.width() as i64 + 1).unsigned_abs() as usize
    }

    /// Sort key for the centre-outward order (smaller is closer to centre).
    fn centre_key(&self, index: usize) -> (usize, Reverse<usize>) {
        (self.centre_distance(index), Reverse(index))
    }

    /// Slot indices from the centre outward.
    pub fn centre_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.width()).collect();
        order.sort_by_key(|&i| self.centre_key(i));
        order
    }

    /// Every slot paired with its index, centre outward (or outside in when
    /// `reversed`).
    pub fn regiments_by_centre_distance(&self, reversed: bool) -> Vec<(Option<RegimentKey>, usize)> {
        let mut order = self.centre_order();
        if reversed {
            order.reverse();
        }
        order.into_iter().map(|i| (self.slots[i], i)).collect()
    }

    /// Fills empty slots from the centre outward, popping from the end of
    /// `source`. Stops when `source` runs dry, `max` regiments have been
    /// placed, or the row is full. Returns how many were placed.
    pub fn add_regiments(&mut self, source: &mut Vec<RegimentKey>, max: Option<usize>) -> usize {
        let limit = max.unwrap_or(usize::MAX);
        let mut placed = 0;

        for index in self.centre_order() {
            if placed >= limit {
                break;
            }
            if self.slots[index].is_some() {
                continue;
            }
            let Some(key) = source.pop() else {
                break;
            };
            self.slots[index] = Some(key);
            placed += 1;
        }

        placed
    }

    /// Moves the outermost idle regiment into the innermost gap.
    ///
    /// Only regiments strictly farther from the centre than the gap and without
    /// a target are eligible. Returns false when there is no gap or no such
    /// regiment.
    pub fn move_outmost_regiment_to_inmost_gap(&mut self, regiments: &[Regiment]) -> bool {
        let order = self.centre_order();
        let Some(gap) = order.iter().copied().find(|&i| self.slots[i].is_none()) else {
            return false;
        };
        let gap_distance = self.centre_distance(gap);

        let outmost = order.iter().rev().copied().find(|&i| {
            self.centre_distance(i) > gap_distance
                && self.slots[i].is_some_and(|key| regiments[key.0].target().is_none())
        });

        match outmost {
            Some(from) => {
                self.slots[gap] = self.slots[from].take();
                true
            }
            None => false,
        }
    }

    /// Closes internal gaps by sliding regiments toward the centre, the left
    /// half and the right half independently. Returns true if anything moved.
    pub fn shift_regiments(&mut self) -> bool {
        let split = self.width() / 2;
        let (left, right) = self.slots.split_at_mut(split);

        // Left half packs against its right edge, right half against its left edge.
        let left_moved = compact(left.iter_mut().rev());
        let right_moved = compact(right.iter_mut());
        left_moved || right_moved
    }

    /// Empties every slot holding a broken regiment and clears that regiment's
    /// target. Returns true if any slot changed.
    pub fn remove_broken_regiments(&mut self, regiments: &mut [Regiment]) -> bool {
        let mut changed = false;
        for slot in self.slots.iter_mut() {
            if let Some(key) = *slot {
                let regiment = &mut regiments[key.0];
                if regiment.is_broken() {
                    regiment.clear_target();
                    *slot = None;
                    changed = true;
                }
            }
        }
        changed
    }

    /// Picks a target in `enemy` for every regiment in this row.
    ///
    /// A directly opposed enemy always wins. Otherwise the nearest enemy within
    /// flanking range is chosen, ties going to the slot closer to the enemy
    /// row's centre. Cavalry add `cavalry_bonus` to `tech_bonus`.
    pub fn set_targets(
        &self,
        regiments: &mut [Regiment],
        enemy: &Row,
        tech_bonus: Fixed,
        cavalry_bonus: Fixed,
    ) -> Result<(), BattleError> {
        if self.width() != enemy.width() {
            return Err(BattleError::WidthMismatch {
                own: self.width(),
                enemy: enemy.width(),
            });
        }

        for (index, key) in self.occupied() {
            let regiment = &mut regiments[key.0];

            if enemy.is_occupied(index) {
                regiment.set_target(Some(index));
                continue;
            }

            let bonus = match regiment.unit_type() {
                UnitType::Cavalry => tech_bonus + cavalry_bonus,
                UnitType::Infantry | UnitType::Artillery => tech_bonus,
            };
            let range = regiment.flanking_range(bonus);
            let low = index.saturating_sub(range);
            let high = (index + range).min(enemy.width() - 1);

            let target = (low..=high)
                .filter(|&j| enemy.is_occupied(j))
                .min_by_key(|&j| (j.abs_diff(index), enemy.centre_key(j)));
            regiment.set_target(target);
        }

        Ok(())
    }
}

/// Packs the occupied slots of `half` to the front of the iteration order.
fn compact<'a>(half: impl Iterator<Item = &'a mut Option<RegimentKey>>) -> bool {
    let slots: Vec<&mut Option<RegimentKey>> = half.collect();
    let packed: Vec<RegimentKey> = slots.iter().filter_map(|s| **s).collect();

    let mut moved = false;
    for (i, slot) in slots.into_iter().enumerate() {
        let next = packed.get(i).copied();
        if *slot != next {
            *slot = next;
            moved = true;
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::regiment_arena;

    fn keys(range: std::ops::Range<usize>) -> Vec<RegimentKey> {
        range.map(RegimentKey).collect()
    }

    fn row_from(pattern: &[Option<usize>]) -> Row {
        Row {
            slots: pattern.iter().map(|s| s.map(RegimentKey)).collect(),
        }
    }

    #[test]
    fn test_centre_order_odd_and_even() {
        assert_eq!(Row::new(7).centre_order(), vec![3, 4, 2, 5, 1, 6, 0]);
        assert_eq!(Row::new(6).centre_order(), vec![3, 2, 4, 1, 5, 0]);
        assert_eq!(Row::new(1).centre_order(), vec![0]);
    }

    #[test]
    fn test_regiments_by_centre_distance_reversed() {
        let row = row_from(&[None, Some(0), None]);
        assert_eq!(
            row.regiments_by_centre_distance(false),
            vec![(Some(RegimentKey(0)), 1), (None, 2), (None, 0)]
        );
        assert_eq!(
            row.regiments_by_centre_distance(true),
            vec![(None, 0), (None, 2), (Some(RegimentKey(0)), 1)]
        );
    }

    #[test]
    fn test_add_regiments_fills_centre_outward() {
        let mut row = Row::new(7);
        // Popped from the end: key 6 first, key 0 last.
        let mut source = keys(0..7);
        assert_eq!(row.add_regiments(&mut source, None), 7);
        assert!(source.is_empty());

        let expected_order = [3, 4, 2, 5, 1, 6, 0];
        for (n, &slot) in expected_order.iter().enumerate() {
            assert_eq!(row.get(slot), Some(RegimentKey(6 - n)));
        }
    }

    #[test]
    fn test_add_regiments_respects_max_and_full_row() {
        let mut row = Row::new(5);
        let mut source = keys(0..10);
        assert_eq!(row.add_regiments(&mut source, Some(2)), 2);
        assert_eq!(row.count(), 2);
        assert!(row.is_occupied(2) && row.is_occupied(3));

        assert_eq!(row.add_regiments(&mut source, None), 3);
        assert!(row.is_full());

        let before = row.clone();
        let mut more = keys(20..23);
        assert_eq!(row.add_regiments(&mut more, None), 0);
        assert_eq!(more.len(), 3);
        assert_eq!(row, before);
    }

    #[test]
    fn test_shift_regiments_closes_gaps_per_half() {
        let mut row = row_from(&[Some(0), None, None, None, None, Some(1)]);
        assert!(row.shift_regiments());
        assert_eq!(row, row_from(&[None, None, Some(0), Some(1), None, None]));

        let mut row = row_from(&[Some(0), None, Some(1), None, Some(2), None, Some(3)]);
        assert!(row.shift_regiments());
        assert_eq!(
            row,
            row_from(&[None, Some(0), Some(1), Some(2), Some(3), None, None])
        );
    }

    #[test]
    fn test_shift_regiments_centre_block_is_noop() {
        let mut row = row_from(&[None, None, Some(0), Some(1), Some(2), None, None]);
        let before = row.clone();
        assert!(!row.shift_regiments());
        assert_eq!(row, before);
        assert!(!row.shift_regiments());
    }

    #[test]
    fn test_move_outmost_regiment_to_inmost_gap() {
        let regiments = regiment_arena(&[UnitType::Infantry; 3]);
        let mut row = row_from(&[Some(0), None, None, Some(1), Some(2)]);

        // Innermost gap is slot 2, outermost idle regiment is in slot 0.
        assert!(row.move_outmost_regiment_to_inmost_gap(&regiments));
        assert_eq!(row, row_from(&[None, None, Some(0), Some(1), Some(2)]));

        // Next gap is slot 1; slot 4 sits farther out and moves in.
        assert!(row.move_outmost_regiment_to_inmost_gap(&regiments));
        assert_eq!(row, row_from(&[None, Some(2), Some(0), Some(1), None]));

        // Remaining gaps are both outermost: nothing farther out.
        assert!(!row.move_outmost_regiment_to_inmost_gap(&regiments));
    }

    #[test]
    fn test_move_outmost_skips_engaged_regiments() {
        let mut regiments = regiment_arena(&[UnitType::Infantry; 2]);
        regiments[0].set_target(Some(0));
        let mut row = row_from(&[Some(0), None, None, None, Some(1)]);

        assert!(row.move_outmost_regiment_to_inmost_gap(&regiments));
        assert_eq!(row, row_from(&[Some(0), None, Some(1), None, None]));

        // Only the engaged regiment is left outside.
        assert!(!row.move_outmost_regiment_to_inmost_gap(&regiments));
    }

    #[test]
    fn test_move_outmost_without_gap() {
        let regiments = regiment_arena(&[UnitType::Infantry; 2]);
        let mut row = row_from(&[Some(0), Some(1)]);
        assert!(!row.move_outmost_regiment_to_inmost_gap(&regiments));
    }

    #[test]
    fn test_remove_broken_regiments() {
        let mut regiments = regiment_arena(&[UnitType::Infantry; 3]);
        regiments[1].set_target(Some(2));
        regiments[1].take_casualties(1000);
        let mut row = row_from(&[Some(0), Some(1), Some(2)]);

        assert!(row.remove_broken_regiments(&mut regiments));
        assert_eq!(row, row_from(&[Some(0), None, Some(2)]));
        assert_eq!(regiments[1].target(), None);

        assert!(!row.remove_broken_regiments(&mut regiments));
    }

    #[test]
    fn test_set_targets_width_mismatch() {
        let mut regiments = regiment_arena(&[]);
        let err = Row::new(5)
            .set_targets(&mut regiments, &Row::new(4), Fixed::ZERO, Fixed::ZERO)
            .unwrap_err();
        assert_eq!(err, BattleError::WidthMismatch { own: 5, enemy: 4 });
    }

    #[test]
    fn test_set_targets_empty_enemy() {
        let mut regiments = regiment_arena(&[UnitType::Cavalry; 5]);
        for r in regiments.iter_mut() {
            r.set_target(Some(0));
        }
        let row = row_from(&[Some(0), Some(1), Some(2), Some(3), Some(4)]);
        row.set_targets(&mut regiments, &Row::new(5), Fixed::ZERO, Fixed::ZERO)
            .unwrap();
        assert!(regiments.iter().all(|r| r.target().is_none()));
    }

    #[test]
    fn test_set_targets_single_centred_enemy() {
        let mut regiments = regiment_arena(&[UnitType::Infantry; 5]);
        let row = row_from(&[Some(0), Some(1), Some(2), Some(3), Some(4)]);
        let enemy = row_from(&[None, None, Some(0), None, None]);

        row.set_targets(&mut regiments, &enemy, Fixed::ZERO, Fixed::ZERO)
            .unwrap();
        let targets: Vec<_> = regiments.iter().map(|r| r.target()).collect();
        assert_eq!(targets, vec![None, Some(2), Some(2), Some(2), None]);
    }

    #[test]
    fn test_set_targets_prefers_direct_then_nearest_then_centre() {
        let mut regiments = regiment_arena(&[UnitType::Cavalry; 7]);
        let row = row_from(&[
            Some(0),
            Some(1),
            Some(2),
            Some(3),
            Some(4),
            Some(5),
            Some(6),
        ]);
        let enemy = row_from(&[None, Some(0), None, None, None, Some(1), None]);

        row.set_targets(&mut regiments, &enemy, Fixed::ZERO, Fixed::ZERO)
            .unwrap();
        let targets: Vec<_> = regiments.iter().map(|r| r.target()).collect();
        // Slot 3 is two away from both 1 and 5; 5 is right of centre and wins.
        assert_eq!(
            targets,
            vec![Some(1), Some(1), Some(1), Some(5), Some(5), Some(5), Some(5)]
        );
    }

    #[test]
    fn test_set_targets_cavalry_bonus_only_for_cavalry() {
        let mut regiments = regiment_arena(&[UnitType::Infantry, UnitType::Cavalry]);
        let row = row_from(&[Some(0), None, None, None, Some(1)]);
        let enemy = row_from(&[None, None, Some(0), None, None]);

        // +100% for cavalry: infantry reach stays 1, cavalry reach becomes 4.
        row.set_targets(&mut regiments, &enemy, Fixed::ZERO, Fixed::from_int(100))
            .unwrap();
        assert_eq!(regiments[0].target(), None);
        assert_eq!(regiments[1].target(), Some(2));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Shifting keeps every regiment exactly once and is idempotent.
            #[test]
            fn shift_conserves_and_settles(
                pattern in proptest::collection::vec(any::<bool>(), 1..25)
            ) {
                let slots: Vec<Option<usize>> = pattern
                    .iter()
                    .enumerate()
                    .map(|(i, &filled)| filled.then_some(i))
                    .collect();
                let mut row = row_from(&slots);
                let before: Vec<RegimentKey> = row.occupied().map(|(_, k)| k).collect();

                row.shift_regiments();
                let mut after: Vec<RegimentKey> = row.occupied().map(|(_, k)| k).collect();
                // Order within the row is preserved.
                prop_assert_eq!(&after, &before);

                let settled = row.clone();
                prop_assert!(!row.shift_regiments());
                prop_assert_eq!(row, settled);

                after.dedup();
                prop_assert_eq!(after.len(), before.len());
            }

            /// Filling never exceeds the width or the limit and never loses a key.
            #[test]
            fn add_regiments_respects_capacity(
                width in 1usize..30,
                available in 0usize..40,
                limit in proptest::option::of(0usize..40)
            ) {
                let mut row = Row::new(width);
                let mut source = keys(0..available);
                let placed = row.add_regiments(&mut source, limit);

                prop_assert_eq!(placed, row.count());
                prop_assert!(placed <= width);
                prop_assert!(placed <= limit.unwrap_or(usize::MAX));
                prop_assert_eq!(placed + source.len(), available);
                // The occupied block is centred.
                for index in row.centre_order().into_iter().take(placed) {
                    prop_assert!(row.is_occupied(index));
                }
            }
        }
    }
}

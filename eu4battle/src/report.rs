//! Plain-text battle report.

use eu4battle_core::{ArmySnapshot, BattleReport, DaySnapshot, RowSnapshot, UnitType};
use std::fmt::Write;

/// One character per slot: `I`/`C`/`A` by unit type, `.` when empty.
pub fn render_row(row: &RowSnapshot) -> String {
    row.slots()
        .iter()
        .map(|slot| match slot.as_ref().map(|r| r.unit_type()) {
            Some(UnitType::Infantry) => 'I',
            Some(UnitType::Cavalry) => 'C',
            Some(UnitType::Artillery) => 'A',
            None => '.',
        })
        .collect()
}

fn phase_label(day: &DaySnapshot) -> &'static str {
    match day.is_fire {
        Some(true) => "fire",
        Some(false) => "shock",
        None => "-",
    }
}

fn army_columns(army: &ArmySnapshot) -> String {
    format!(
        "{:>7} {:>6.2} {:>4}",
        army.strength(),
        army.morale().to_f64(),
        army.retreated()
    )
}

/// Day-by-day casualty table followed by the final front lines.
pub fn render_table(report: &BattleReport) -> String {
    let mut out = String::new();
    let Some(first) = report.history.first() else {
        return out;
    };

    let _ = writeln!(
        out,
        "{} vs {}",
        first.attacker.name(),
        first.defender.name()
    );
    let _ = writeln!(
        out,
        "{:>4} {:>5} {:>5} | {:>7} {:>6} {:>4} | {:>7} {:>6} {:>4}",
        "day", "phase", "rolls", "men", "morale", "gone", "men", "morale", "gone"
    );
    for day in &report.history {
        let _ = writeln!(
            out,
            "{:>4} {:>5} {:>2}/{:<2} | {} | {}",
            day.day,
            phase_label(day),
            day.attacker_roll,
            day.defender_roll,
            army_columns(&day.attacker),
            army_columns(&day.defender)
        );
    }

    if let Some(last) = report.history.last() {
        let _ = writeln!(out);
        for army in [&last.attacker, &last.defender] {
            let _ = writeln!(
                out,
                "{:<12} front [{}] back [{}] reserves {}",
                army.name(),
                render_row(army.front()),
                render_row(army.back()),
                army.reserves().len()
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Outcome: {} after {} days", report.outcome, report.days);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use eu4battle_core::testing::ArmyConfigBuilder;
    use eu4battle_core::{Battle, BattleSetup, FixedDice};

    fn report() -> BattleReport {
        let setup = BattleSetup {
            attacker: ArmyConfigBuilder::new("Sweden")
                .infantry(3)
                .cavalry(2)
                .artillery(1)
                .combat_width(7)
                .build(),
            defender: ArmyConfigBuilder::new("Denmark")
                .infantry(4)
                .combat_width(7)
                .build(),
            ..BattleSetup::default()
        };
        Battle::new(&setup, FixedDice::new(5)).run().unwrap()
    }

    #[test]
    fn test_render_row_day_zero() {
        let report = report();
        let day_zero = &report.history[0];
        assert_eq!(render_row(day_zero.attacker.front()), "..IIIC.");
        assert_eq!(render_row(day_zero.attacker.back()), "...A...");
        assert_eq!(render_row(day_zero.defender.front()), "..IIII.");
    }

    #[test]
    fn test_render_table_lists_every_day() {
        let report = report();
        let table = render_table(&report);
        assert!(table.starts_with("Sweden vs Denmark"));
        // Title, header, one line per day, blank, two front lines, blank, outcome.
        assert_eq!(table.lines().count(), report.history.len() + 7);
        assert!(table.contains(&format!("Outcome: {}", report.outcome)));
    }
}

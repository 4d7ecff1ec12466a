use std::collections::BTreeSet;

use league_schedule::fixtures::FixtureGenerator;
use league_schedule::models::{
    Availability, AvailabilityBook, CommittedSlot, Fixture, Match, PlayerId, SlotKey,
    UnplacedReason,
};
use league_schedule::scheduler::{SlotAssigner, WeekKpi};
use league_schedule::season::{MatchStatus, Season, SeasonStatus};
use league_schedule::ScheduleError;

fn slot(s: &str) -> SlotKey {
    s.parse().unwrap()
}

fn avail(slots: &[(&str, u32)]) -> Availability {
    slots.iter().map(|&(s, w)| (slot(s), w)).collect()
}

fn players(ids: &[&str]) -> Vec<PlayerId> {
    ids.iter().map(|&id| PlayerId::new(id)).collect()
}

fn pair(f: &Fixture) -> (String, String) {
    let (a, b) = (f.player1.to_string(), f.player2.to_string());
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[test]
fn test_three_player_round_robin() {
    let fixtures = FixtureGenerator::new()
        .generate(&players(&["A", "B", "C"]), 2)
        .unwrap();

    let pairs: BTreeSet<_> = fixtures.iter().map(pair).collect();
    let expected: BTreeSet<_> = [("A", "B"), ("A", "C"), ("B", "C")]
        .into_iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();
    assert_eq!(fixtures.len(), 3);
    assert_eq!(pairs, expected);
    assert!(fixtures.iter().all(|f| f.week == 1 || f.week == 2));
}

#[test]
fn test_only_common_slot_is_used() {
    let book = AvailabilityBook::new()
        .with_player("A", avail(&[("mon-09:00", 1)]))
        .with_player("B", avail(&[("mon-09:00", 1), ("tue-10:00", 1)]));
    let matches = vec![Match::new("m1", "A", "B", 1)];

    let result = SlotAssigner::new().assign(&matches, &book, &[]).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].slot, slot("mon-09:00"));
    assert_eq!(result[0].time(), "09:00");
}

#[test]
fn test_occupied_common_slot_drops_match() {
    let book = AvailabilityBook::new()
        .with_player("A", avail(&[("mon-09:00", 1)]))
        .with_player("B", avail(&[("mon-09:00", 1), ("tue-10:00", 1)]));
    let matches = vec![Match::new("m1", "A", "B", 1)];
    let committed = vec![CommittedSlot::new(slot("mon-09:00"), "X", "Y")];

    let assigner = SlotAssigner::new();
    assert!(assigner.assign(&matches, &book, &committed).unwrap().is_empty());

    let schedule = assigner.schedule_week(&matches, &book, &committed).unwrap();
    assert_eq!(
        schedule.unplaced_for(&"m1".into()).map(|u| u.reason),
        Some(UnplacedReason::AllCandidatesTaken)
    );
}

#[test]
fn test_shared_player_matches_are_spread() {
    let common = [("mon-09:00", 1), ("tue-12:00", 1), ("thu-12:00", 1)];
    let book = AvailabilityBook::new()
        .with_player("A", avail(&common))
        .with_player("B", avail(&common))
        .with_player("C", avail(&common));
    let matches = vec![Match::new("m1", "A", "B", 1), Match::new("m2", "B", "C", 1)];

    let schedule = SlotAssigner::new().schedule_week(&matches, &book, &[]).unwrap();
    assert!(schedule.is_complete());
    let first = schedule.slot_for(&"m1".into()).unwrap();
    let second = schedule.slot_for(&"m2".into()).unwrap();
    assert_ne!(first, second);
    assert!(first.distance_minutes(&second) >= 1440);

    let kpi = WeekKpi::calculate(&schedule, &matches, &book);
    assert_eq!(kpi.placement_rate, 1.0);
    assert!(kpi.meets_thresholds(1.0, 1440));
}

#[test]
fn test_season_lifecycle() {
    let assigner = SlotAssigner::new();
    let evenings = [("mon-19:00", 2), ("tue-19:00", 1), ("wed-19:00", 1), ("thu-19:00", 2)];
    let mut book = AvailabilityBook::new();
    for p in ["A", "B", "C", "D", "E"] {
        book.insert(p, avail(&evenings));
    }

    let mut season = Season::new(5).unwrap();
    for p in ["A", "B", "C", "D"] {
        assert!(season.register(p.into(), &book, &assigner).unwrap().is_none());
    }

    let week1 = season.start(&book, &assigner).unwrap();
    assert!(week1.is_complete());
    assert_eq!(season.matches().len(), 6);

    let first_match = season.matches_in_week(1).next().unwrap().id().clone();
    season.report_result(&first_match, 3, 2).unwrap();
    assert_eq!(
        season.get_match(&first_match).unwrap().status,
        MatchStatus::Completed
    );

    // Move the other week-1 match to a slot both players offered.
    let other = season.matches_in_week(1).nth(1).unwrap().id().clone();
    let options = season.valid_reschedule_slots(&other, &book).unwrap();
    let target = slot("tue-19:00");
    assert!(options.contains(&target));
    season.reschedule(&other, target).unwrap();
    assert_eq!(season.get_match(&other).unwrap().slot, Some(target));

    season.advance_week(&book, &assigner).unwrap();
    let joined = season.register("E".into(), &book, &assigner).unwrap();
    assert!(joined.is_some());
    assert_eq!(season.matches().len(), 10);

    while season.current_week() < season.total_weeks() {
        season.advance_week(&book, &assigner).unwrap();
    }
    assert!(matches!(
        season.advance_week(&book, &assigner),
        Err(ScheduleError::AtLastWeek { .. })
    ));

    // No week ever double-books the table.
    for week in 1..=season.total_weeks() {
        let slots: Vec<_> = season.matches_in_week(week).filter_map(|m| m.slot).collect();
        let unique: BTreeSet<_> = slots.iter().collect();
        assert_eq!(slots.len(), unique.len());
    }

    let standings = season.standings();
    assert_eq!(standings.len(), 5);
    assert_eq!(standings[0].wins, 1);
    assert_eq!(standings.iter().map(|s| s.losses).sum::<u32>(), 1);

    season.complete().unwrap();
    assert_eq!(season.status(), SeasonStatus::Completed);
}

#[test]
fn test_availability_loaded_from_json() {
    let json = r#"{
        "A": { "mon-09:00": 2, "tue-10:00": 0 },
        "B": { "mon-09:00": 1 }
    }"#;
    let book: AvailabilityBook = serde_json::from_str(json).unwrap();
    let matches = vec![Match::new("m1", "A", "B", 3)];

    let result = SlotAssigner::new().assign(&matches, &book, &[]).unwrap();
    assert_eq!(result[0].slot.label(), "Mon 9:00 AM");

    let bad = r#"{ "A": { "mon-23:00": 1 } }"#;
    assert!(serde_json::from_str::<AvailabilityBook>(bad).is_err());
}

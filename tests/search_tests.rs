//! Search debounce tests for fstation
//!
//! The coordinator is driven with simulated time: inputs and ticks carry explicit instants, so
//! these tests never sleep.

use fstation::app::{SEARCH_DEBOUNCE, SearchCoordinator, SortFilterEngine};
use fstation::core::{DateInfo, Entry, SizeInfo};
use std::time::{Duration, Instant};

const STEP: Duration = Duration::from_millis(5);

fn engine() -> SortFilterEngine {
    let mut engine = SortFilterEngine::new();
    engine.load(vec![
        Entry::parent(DateInfo::new("", 0)),
        Entry::file("abc.txt", "abc.txt", SizeInfo::new("1", 1), DateInfo::new("", 1)),
        Entry::file("abd.txt", "abd.txt", SizeInfo::new("2", 2), DateInfo::new("", 2)),
        Entry::file("xyz.txt", "xyz.txt", SizeInfo::new("3", 3), DateInfo::new("", 3)),
    ]);
    engine
}

/// Ticks every [STEP] from `from` to `until` and records when a projection came out.
fn run_ticks(
    search: &mut SearchCoordinator,
    engine: &mut SortFilterEngine,
    from: Instant,
    until: Instant,
) -> Vec<(Instant, usize)> {
    let mut fired = Vec::new();
    let mut now = from;
    while now <= until {
        if let Some(rows) = search.tick(now, engine) {
            fired.push((now, rows.len()));
        }
        now += STEP;
    }
    fired
}

#[test]
fn test_burst_applies_once_after_last_input() {
    let mut engine = engine();
    let mut search = SearchCoordinator::new();
    let t0 = Instant::now();
    let mut fired = Vec::new();
    let mut now = t0;

    // "a", "ab", "abc" typed 50 ms apart, ticking in between
    for (i, text) in ["a", "ab", "abc"].iter().enumerate() {
        let at = t0 + Duration::from_millis(50) * i as u32;
        fired.extend(run_ticks(&mut search, &mut engine, now, at));
        assert!(search.input(text, at, &mut engine).is_none());
        now = at + STEP;
    }
    let last = t0 + Duration::from_millis(100);
    fired.extend(run_ticks(
        &mut search,
        &mut engine,
        now,
        last + Duration::from_millis(400),
    ));

    assert_eq!(fired.len(), 1, "expected exactly one projection, got {fired:?}");
    let (when, rows) = fired[0];
    assert_eq!(when, last + SEARCH_DEBOUNCE);
    assert_eq!(rows, 1);
    assert_eq!(engine.query(), "abc");
}

#[test]
fn test_clear_is_immediate() {
    let mut engine = engine();
    let mut search = SearchCoordinator::new();
    let t0 = Instant::now();

    search.input("xyz", t0, &mut engine);
    assert!(search.tick(t0 + SEARCH_DEBOUNCE, &mut engine).is_some());
    assert_eq!(engine.query(), "xyz");

    search.input("ab", t0 + Duration::from_millis(200), &mut engine);
    let rows = search
        .input("   ", t0 + Duration::from_millis(210), &mut engine)
        .unwrap_or_default();
    assert_eq!(rows.len(), 4);
    assert!(!search.is_pending());
    assert_eq!(engine.query(), "");

    // the cancelled "ab" never lands
    let fired = run_ticks(
        &mut search,
        &mut engine,
        t0 + Duration::from_millis(210),
        t0 + Duration::from_millis(600),
    );
    assert!(fired.is_empty());
}

#[test]
fn test_settling_on_current_query_does_not_reproject() {
    let mut engine = engine();
    let mut search = SearchCoordinator::new();
    let t0 = Instant::now();

    search.input("ab", t0, &mut engine);
    assert!(search.tick(t0 + SEARCH_DEBOUNCE, &mut engine).is_some());

    search.input(" AB", t0 + Duration::from_millis(300), &mut engine);
    assert!(search.is_pending());
    assert!(
        search
            .tick(t0 + Duration::from_millis(300) + SEARCH_DEBOUNCE, &mut engine)
            .is_none()
    );
    assert!(!search.is_pending());
}

#[test]
fn test_tick_before_deadline_waits() {
    let mut engine = engine();
    let mut search = SearchCoordinator::new();
    let t0 = Instant::now();

    search.input("abd", t0, &mut engine);
    assert_eq!(search.deadline(), Some(t0 + SEARCH_DEBOUNCE));
    assert!(search.tick(t0 + SEARCH_DEBOUNCE - STEP, &mut engine).is_none());
    assert!(search.is_pending());
    let rows = search.tick(t0 + SEARCH_DEBOUNCE, &mut engine).unwrap_or_default();
    assert_eq!(rows.len(), 1);
}

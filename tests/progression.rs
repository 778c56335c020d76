// tests/progression.rs
use tavern_ledger::progression::*;

#[test]
fn test_level_for_floor_and_every_threshold() {
    assert_eq!(level_for(0), 1);
    for (index, &threshold) in XP_TABLE.iter().enumerate() {
        assert_eq!(level_for(threshold), index as u8 + 1, "threshold {threshold}");
    }
}

#[test]
fn test_level_for_is_monotonic() {
    let mut previous = level_for(0);
    for exp in (0..400_000).step_by(97) {
        let level = level_for(exp);
        assert!(level >= previous, "level dropped at {exp}");
        previous = level;
    }
    assert_eq!(level_for(u64::MAX), MAX_LEVEL);
}

#[test]
fn test_level_boundary_is_inclusive() {
    assert_eq!(level_for(299), 1);
    assert_eq!(level_for(300), 2);
    assert_eq!(level_for(354_999), 19);
    assert_eq!(level_for(355_000), 20);
}

#[test]
fn test_next_threshold_caps_at_level_twenty() {
    assert_eq!(next_threshold(1), 300);
    assert_eq!(next_threshold(19), 355_000);
    assert_eq!(next_threshold(20), XP_TABLE[19]);
    assert_eq!(next_threshold(u8::MAX), XP_TABLE[19]);
    // Level 0 never appears in valid data but must not index out of bounds.
    assert_eq!(next_threshold(0), 300);
}

#[test]
fn test_progress_scenario_250_exp() {
    assert_eq!(level_for(250), 1);
    assert_eq!(next_threshold(1), 300);
    let progress = progress_percent(250, 1);
    assert!((progress - 83.333).abs() < 0.01, "progress was {progress}");
}

#[test]
fn test_progress_is_full_at_max_level() {
    assert_eq!(progress_percent(355_000, 20), 100.0);
    assert_eq!(progress_percent(1_000_000, 20), 100.0);
    assert!(!progress_percent(355_000, 20).is_nan());
}

#[test]
fn test_progress_clamps_inconsistent_levels() {
    // Stored level above what the experience supports.
    assert_eq!(progress_percent(10, 5), 0.0);
    // Stored level below what the experience supports.
    assert_eq!(progress_percent(50_000, 1), 100.0);
    assert_eq!(progress_percent(0, 1), 0.0);
}

// D&D 5e experience thresholds. Index `i` is the experience needed for level `i + 1`.
pub const XP_TABLE: [u64; 20] = [
    0, 300, 900, 2700, 6500, 14000, 23000, 34000, 48000, 64000, 85000, 100000, 120000, 140000,
    165000, 190000, 225000, 265000, 305000, 355000,
];

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = XP_TABLE.len() as u8;

/// Highest level whose threshold `exp` reaches. Scans from the top so a higher
/// threshold always wins over the lower ones it also satisfies.
pub fn level_for(exp: u64) -> u8 {
    XP_TABLE
        .iter()
        .rposition(|&threshold| exp >= threshold)
        .map(|index| index as u8 + 1)
        .unwrap_or(MIN_LEVEL)
}

/// Experience required to reach `level + 1`. Capped levels return their own
/// threshold, which saturates any progress computation at 100%.
pub fn next_threshold(level: u8) -> u64 {
    let level = clamp_level(level);
    if level >= MAX_LEVEL {
        XP_TABLE[MAX_LEVEL as usize - 1]
    } else {
        XP_TABLE[level as usize]
    }
}

pub fn threshold_for(level: u8) -> u64 {
    XP_TABLE[clamp_level(level) as usize - 1]
}

// Percentage of the way from the current level's threshold to the next one, in [0, 100].
pub fn progress_percent(exp: u64, level: u8) -> f64 {
    let floor = threshold_for(level);
    let span = next_threshold(level).saturating_sub(floor);
    if span == 0 {
        return 100.0;
    }
    let gained = exp.saturating_sub(floor);
    (gained as f64 / span as f64 * 100.0).clamp(0.0, 100.0)
}

fn clamp_level(level: u8) -> u8 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

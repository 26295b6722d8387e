//! Scoring module - line-clear points, leveling and gravity speed
//!
//! One rule set, no variants:
//! - A clear of `n` lines scores `n * n * 100`.
//! - The level is `1 + cleared_lines / lines_per_level`.
//! - Gravity starts at 300ms per row and speeds up by 20ms per level, down to
//!   a 50ms floor.

use std::time::Duration;

use crate::types::{BASE_GRAVITY_MS, GRAVITY_STEP_MS, LINE_CLEAR_BASE, MIN_GRAVITY_MS};

/// Points for clearing `lines` rows at once
pub fn line_clear_score(lines: usize) -> u32 {
    let n = lines.min(u32::MAX as usize) as u32;
    n.saturating_mul(n).saturating_mul(LINE_CLEAR_BASE)
}

/// Level reached after `cleared_lines` total lines
///
/// `lines_per_level` is validated non-zero by `GameConfig`; zero is treated
/// as one.
pub fn level_for_lines(cleared_lines: u32, lines_per_level: u32) -> u32 {
    1 + cleared_lines / lines_per_level.max(1)
}

/// Time between gravity steps at `level` (levels below 1 count as 1)
pub fn gravity_interval(level: u32) -> Duration {
    let speedup = (level.max(1) - 1) as u64 * GRAVITY_STEP_MS;
    let ms = BASE_GRAVITY_MS.saturating_sub(speedup).max(MIN_GRAVITY_MS);
    Duration::from_millis(ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_score() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 400);
        assert_eq!(line_clear_score(3), 900);
        assert_eq!(line_clear_score(4), 1600);
    }

    #[test]
    fn test_level_for_lines() {
        assert_eq!(level_for_lines(0, 1), 1);
        assert_eq!(level_for_lines(3, 1), 4);
        assert_eq!(level_for_lines(9, 10), 1);
        assert_eq!(level_for_lines(10, 10), 2);
        assert_eq!(level_for_lines(5, 0), 6);
    }

    #[test]
    fn test_gravity_interval_table() {
        assert_eq!(gravity_interval(1), Duration::from_millis(300));
        assert_eq!(gravity_interval(2), Duration::from_millis(280));
        assert_eq!(gravity_interval(13), Duration::from_millis(60));
        assert_eq!(gravity_interval(14), Duration::from_millis(50));
        assert_eq!(gravity_interval(100), Duration::from_millis(50));
        assert_eq!(gravity_interval(0), Duration::from_millis(300));
    }

    #[test]
    fn test_gravity_interval_non_increasing() {
        for level in 1..40 {
            assert!(gravity_interval(level + 1) <= gravity_interval(level));
        }
    }
}

//! Scoring module - score, multiplier, level and lives
//!
//! Scoring rules:
//! - A clear is worth `lines * blocks * 10 * multiplier`.
//! - Any scoring placement bumps the multiplier by one; a placement that
//!   scores nothing resets it to 1, as does a missed deadline.
//! - The level is `score / 1000`, recomputed after every score.
//! - The turn deadline is `max(2500, 12000 - 500 * level)` milliseconds.

use crate::types::{
    BASE_DEADLINE_MS, DEADLINE_STEP_MS, MIN_DEADLINE_MS, POINTS_PER_BLOCK, POINTS_PER_LEVEL,
    STARTING_LIVES,
};

/// Points for a clear at the given multiplier
pub fn calculate_score(lines: u32, blocks: u32, multiplier: u32) -> u32 {
    lines
        .saturating_mul(blocks)
        .saturating_mul(POINTS_PER_BLOCK)
        .saturating_mul(multiplier)
}

/// Level derived from cumulative score
pub fn calculate_level(score: u32) -> u32 {
    score / POINTS_PER_LEVEL
}

/// Turn deadline for a level (in milliseconds)
pub fn deadline_ms(level: u32) -> u32 {
    BASE_DEADLINE_MS
        .saturating_sub(level.saturating_mul(DEADLINE_STEP_MS))
        .max(MIN_DEADLINE_MS)
}

/// Counters that change as the game progresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Progress {
    score: u32,
    level: u32,
    multiplier: u32,
    lives: u32,
}

impl Progress {
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            level: 0,
            multiplier: 1,
            lives,
        }
    }

    /// Apply a clear and return the points it earned
    pub fn score(&mut self, lines: u32, blocks: u32) -> u32 {
        let delta = calculate_score(lines, blocks, self.multiplier);
        self.score = self.score.saturating_add(delta);

        if delta > 0 {
            self.multiplier += 1;
        } else {
            self.multiplier = 1;
        }
        self.level = calculate_level(self.score);
        delta
    }

    pub fn reset_multiplier(&mut self) {
        self.multiplier = 1;
    }

    /// Take one life. Returns false (and changes nothing) when none are left.
    pub fn lose_life(&mut self) -> bool {
        if self.lives == 0 {
            return false;
        }
        self.lives -= 1;
        true
    }

    pub fn score_value(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Deadline at the current level
    pub fn deadline_ms(&self) -> u32 {
        deadline_ms(self.level)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(STARTING_LIVES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_arithmetic() {
        let mut p = Progress::default();
        p.multiplier = 3;

        assert_eq!(p.score(2, 9), 540);
        assert_eq!(p.score_value(), 540);
        assert_eq!(p.multiplier(), 4);

        assert_eq!(p.score(0, 0), 0);
        assert_eq!(p.score_value(), 540);
        assert_eq!(p.multiplier(), 1);
    }

    #[test]
    fn test_level_derivation() {
        assert_eq!(calculate_level(2400), 2);
        assert_eq!(calculate_level(999), 0);
        assert_eq!(calculate_level(1000), 1);
    }

    #[test]
    fn test_level_follows_score() {
        let mut p = Progress::default();
        // 2 lines x 10 blocks x 10 x 1 = 200, then x2 = 400, x3 = 600
        p.score(2, 10);
        p.score(2, 10);
        assert_eq!(p.level(), 0);
        p.score(2, 10);
        assert_eq!(p.score_value(), 1200);
        assert_eq!(p.level(), 1);
    }

    #[test]
    fn test_deadline() {
        assert_eq!(deadline_ms(0), 12_000);
        assert_eq!(deadline_ms(1), 11_500);
        assert_eq!(deadline_ms(19), 2_500);
        assert_eq!(deadline_ms(40), 2_500);
        assert_eq!(deadline_ms(u32::MAX), 2_500);
    }

    #[test]
    fn test_lose_life_stops_at_zero() {
        let mut p = Progress::new(1);
        assert!(p.lose_life());
        assert_eq!(p.lives(), 0);
        assert!(!p.lose_life());
        assert_eq!(p.lives(), 0);
    }
}

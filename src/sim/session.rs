//! Scoreboard bookkeeping: score, lives, level progression

use serde::{Deserialize, Serialize};

use super::state::TargetKind;
use crate::consts::*;

/// Score, lives and level for the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u64,
    /// Lives; the run ends at zero or below
    pub hp: i32,
    /// Current level (1-based)
    pub level: u32,
    /// Score threshold the current level was reached at
    pub last_level_score: u64,
    /// Render scale in (0, 1]
    pub current_scale: f32,
}

impl SessionState {
    pub fn new(scale: f32) -> Self {
        Self {
            score: 0,
            hp: START_HP,
            level: 1,
            last_level_score: 0,
            current_scale: scale,
        }
    }

    /// Reset for a new run (scale belongs to the viewport, not the run)
    pub fn reset(&mut self) {
        *self = Self::new(self.current_scale);
    }

    /// Apply the score/life effect of tapping a target
    pub fn apply_hit(&mut self, kind: TargetKind) {
        match kind {
            TargetKind::Shrimp => self.score += 100,
            TargetKind::GoldenShrimp => {
                self.score += 500;
                self.hp = (self.hp + 1).min(MAX_HP);
            }
            TargetKind::Bomb => self.hp -= 1,
            TargetKind::Octopus => self.score = self.score.saturating_sub(200),
        }
    }

    /// Score required to reach the next level
    pub fn next_level_score(&self) -> u64 {
        self.last_level_score + LEVEL_SCORE_STEP * self.level as u64
    }

    /// Advance at most one level; returns the new level if one was gained
    pub fn check_level_up(&mut self) -> Option<u32> {
        let threshold = self.next_level_score();
        if self.score < threshold {
            return None;
        }
        self.level += 1;
        self.last_level_score = threshold;
        log::info!("Level up! {} (next at {})", self.level, self.next_level_score());
        Some(self.level)
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hit_effects() {
        let mut s = SessionState::new(1.0);
        s.apply_hit(TargetKind::Shrimp);
        assert_eq!(s.score, 100);
        s.apply_hit(TargetKind::Octopus);
        assert_eq!(s.score, 0, "octopus clamps at zero");
        s.apply_hit(TargetKind::Bomb);
        assert_eq!(s.hp, 2);
        s.apply_hit(TargetKind::GoldenShrimp);
        assert_eq!((s.score, s.hp), (500, 3));
    }

    #[test]
    fn test_golden_at_full_hp_clamps() {
        let mut s = SessionState::new(1.0);
        s.apply_hit(TargetKind::GoldenShrimp);
        assert_eq!(s.hp, MAX_HP);
    }

    #[test]
    fn test_three_bombs_defeat() {
        let mut s = SessionState::new(1.0);
        for _ in 0..3 {
            assert!(!s.is_defeated());
            s.apply_hit(TargetKind::Bomb);
        }
        assert_eq!(s.hp, 0);
        assert!(s.is_defeated());
    }

    #[test]
    fn test_level_up_threshold() {
        let mut s = SessionState::new(1.0);
        s.score = 999;
        assert_eq!(s.check_level_up(), None);
        assert_eq!(s.level, 1);

        s.score = 1000;
        assert_eq!(s.check_level_up(), Some(2));
        assert_eq!(s.last_level_score, 1000);
        // Level 2 -> 3 needs another 2000
        s.score = 2999;
        assert_eq!(s.check_level_up(), None);
        s.score = 3000;
        assert_eq!(s.check_level_up(), Some(3));
        assert_eq!(s.last_level_score, 3000);
    }

    #[test]
    fn test_one_level_per_check() {
        let mut s = SessionState::new(1.0);
        s.score = 10_000;
        assert_eq!(s.check_level_up(), Some(2));
        assert_eq!(s.check_level_up(), Some(3));
        assert_eq!(s.check_level_up(), Some(4));
        // Thresholds: 1000, 3000, 6000, next 10000
        assert_eq!(s.check_level_up(), Some(5));
        assert_eq!(s.check_level_up(), None);
    }

    #[test]
    fn test_reset_keeps_scale() {
        let mut s = SessionState::new(0.6);
        s.score = 5000;
        s.level = 4;
        s.hp = 1;
        s.reset();
        assert_eq!(s, SessionState::new(0.6));
    }

    proptest! {
        #[test]
        fn prop_thresholds_accumulate(levels in 1u32..40) {
            let mut s = SessionState::new(1.0);
            s.score = u64::MAX / 2;
            let mut expected = 0u64;
            for level in 1..=levels {
                expected += LEVEL_SCORE_STEP * level as u64;
                prop_assert_eq!(s.check_level_up(), Some(level + 1));
                prop_assert_eq!(s.last_level_score, expected);
            }
        }

        #[test]
        fn prop_hp_never_exceeds_max(hits in proptest::collection::vec(0usize..4, 0..64)) {
            let mut s = SessionState::new(1.0);
            for i in hits {
                s.apply_hit(TargetKind::ALL[i]);
                prop_assert!(s.hp <= MAX_HP);
            }
        }
    }
}

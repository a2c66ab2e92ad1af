//! Level calculation
//!
//! Levels are fixed 100-XP buckets: level 1 covers 0-99 XP, level 2 covers
//! 100-199, and so on.

/// XP per level bucket
pub const XP_PER_LEVEL: u64 = 100;

/// Calculate the level for a cumulative XP total
pub fn level_for(xp: u64) -> u32 {
    (xp / XP_PER_LEVEL) as u32 + 1
}

/// XP earned within the current level (0..XP_PER_LEVEL)
pub fn xp_into_level(xp: u64) -> u64 {
    xp % XP_PER_LEVEL
}

/// Progress through the current level (0.0 - 1.0)
pub fn progress_to_next(xp: u64) -> f32 {
    xp_into_level(xp) as f32 / XP_PER_LEVEL as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(99), 1);
        assert_eq!(level_for(100), 2);
        assert_eq!(level_for(199), 2);
        assert_eq!(level_for(200), 3);
        assert_eq!(level_for(1500), 16);
    }

    #[test]
    fn test_level_monotone() {
        let mut last = 0;
        for xp in 0..2000u64 {
            let level = level_for(xp);
            assert!(level >= last, "level dropped at xp={}", xp);
            last = level;
        }
    }

    #[test]
    fn test_progress_to_next() {
        assert_eq!(progress_to_next(0), 0.0);
        assert!((progress_to_next(25) - 0.25).abs() < f32::EPSILON);
        assert!((progress_to_next(125) - 0.25).abs() < f32::EPSILON);
    }
}

//! Percentile tiers
//!
//! Maps cumulative XP to a cosmetic tier name and percentile through an
//! ordered table of contiguous ranges. The table is display-only; nothing in
//! the ledger depends on it.

/// One tier in the percentile table
#[derive(Debug, Clone)]
pub struct Tier {
    /// Inclusive lower XP bound
    pub min_xp: u64,
    /// Inclusive upper XP bound (None = unbounded)
    pub max_xp: Option<u64>,
    pub name: &'static str,
    /// Cosmetic "top N%" rank
    pub percentile: u8,
}

/// All tiers, ordered by XP range (must stay contiguous)
pub static TIERS: &[Tier] = &[
    Tier {
        min_xp: 0,
        max_xp: Some(49),
        name: "Rising Star",
        percentile: 99,
    },
    Tier {
        min_xp: 50,
        max_xp: Some(99),
        name: "Early Riser",
        percentile: 90,
    },
    Tier {
        min_xp: 100,
        max_xp: Some(199),
        name: "Pathfinder",
        percentile: 80,
    },
    Tier {
        min_xp: 200,
        max_xp: Some(299),
        name: "Momentum Maker",
        percentile: 70,
    },
    Tier {
        min_xp: 300,
        max_xp: Some(449),
        name: "Steady Climber",
        percentile: 60,
    },
    Tier {
        min_xp: 450,
        max_xp: Some(599),
        name: "Trailblazer",
        percentile: 50,
    },
    Tier {
        min_xp: 600,
        max_xp: Some(799),
        name: "Achiever",
        percentile: 35,
    },
    Tier {
        min_xp: 800,
        max_xp: Some(999),
        name: "High Performer",
        percentile: 25,
    },
    Tier {
        min_xp: 1000,
        max_xp: Some(1249),
        name: "Elite",
        percentile: 10,
    },
    Tier {
        min_xp: 1250,
        max_xp: Some(1499),
        name: "Vanguard",
        percentile: 5,
    },
    Tier {
        min_xp: 1500,
        max_xp: None,
        name: "Apex",
        percentile: 1,
    },
];

impl Tier {
    fn contains(&self, xp: u64) -> bool {
        xp >= self.min_xp && self.max_xp.is_none_or(|max| xp <= max)
    }

    /// Find the tier for a cumulative XP total
    ///
    /// The last range is unbounded, so the scan always matches; the fallback
    /// to the first tier only covers a malformed table.
    pub fn for_xp(xp: u64) -> &'static Tier {
        TIERS.iter().find(|t| t.contains(xp)).unwrap_or(&TIERS[0])
    }
}

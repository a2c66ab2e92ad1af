//! `everwell status` - show the current ledger, level progress and tier

use anyhow::Result;
use chrono::DateTime;

use everwell::rewards::{RewardsManager, Tier, progress_to_next};

pub async fn status_command(rewards: &RewardsManager, identity: &str) -> Result<()> {
    rewards.ledger().initialize(identity).await;
    let Some(snap) = rewards.ledger().snapshot() else {
        println!("No ledger for '{identity}'");
        return Ok(());
    };

    let tier = Tier::for_xp(snap.total_xp);
    println!("Ledger for {}", snap.identity);
    println!("  XP:    {}", snap.total_xp);
    println!(
        "  Level: {} ({:.0}% to next)",
        snap.level,
        progress_to_next(snap.total_xp) * 100.0
    );
    println!("  Tier:  {} (top {}%)", tier.name, tier.percentile);

    if !snap.history.is_empty() {
        println!("  Recent activity:");
        for entry in snap.history.iter().rev().take(10) {
            let when = DateTime::from_timestamp_millis(entry.timestamp_ms)
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("    {:>+5} XP  {}", entry.delta, when);
        }
    }
    Ok(())
}

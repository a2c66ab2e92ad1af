//! `everwell daily-bonus` - grant today's all-habits bonus

use anyhow::Result;
use chrono::Local;

use everwell::ActionKind;
use everwell::rewards::RewardsManager;

pub async fn daily_bonus_command(rewards: &RewardsManager, identity: &str) -> Result<()> {
    rewards.ledger().initialize(identity).await;

    let today = Local::now().date_naive();
    if rewards.grant_daily_bonus(identity, today).await {
        rewards.ledger().flush().await;
        let snap = rewards.ledger().snapshot().expect("initialized above");
        println!(
            "Daily bonus granted: +{} XP -> {} XP",
            ActionKind::AllHabitsBonus.xp_amount(),
            snap.total_xp
        );
    } else {
        println!("Daily bonus already granted for {today}");
    }
    Ok(())
}

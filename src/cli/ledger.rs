//! `everwell award` / `revoke` / `reset` - mutate the ledger

use anyhow::Result;

use everwell::ActionKind;
use everwell::rewards::RewardsManager;

pub async fn award_command(
    rewards: &RewardsManager,
    identity: &str,
    kind: ActionKind,
) -> Result<()> {
    rewards.ledger().initialize(identity).await;
    rewards.ledger().award(kind);
    rewards.ledger().flush().await;

    let snap = rewards.ledger().snapshot().expect("initialized above");
    println!(
        "+{} XP for {} -> {} XP (level {})",
        kind.xp_amount(),
        kind.label(),
        snap.total_xp,
        snap.level
    );
    Ok(())
}

pub async fn revoke_command(
    rewards: &RewardsManager,
    identity: &str,
    kind: ActionKind,
) -> Result<()> {
    rewards.ledger().initialize(identity).await;
    let applied = rewards.ledger().revoke(kind);
    rewards.ledger().flush().await;

    let snap = rewards.ledger().snapshot().expect("initialized above");
    println!(
        "-{} XP for {} -> {} XP (level {})",
        applied,
        kind.label(),
        snap.total_xp,
        snap.level
    );
    Ok(())
}

pub async fn reset_command(rewards: &RewardsManager, identity: &str) -> Result<()> {
    rewards.ledger().initialize(identity).await;
    rewards.ledger().reset();
    rewards.ledger().flush().await;
    println!("Ledger for '{identity}' reset to zero");
    Ok(())
}

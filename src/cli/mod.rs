//! CLI command implementations

pub mod bonus;
pub mod ledger;
pub mod status;

use anyhow::{Result, bail};

use everwell::ActionKind;

/// Parse an action name given on the command line
pub fn parse_action(name: &str) -> Result<ActionKind> {
    match ActionKind::from_str(name) {
        Some(kind) => Ok(kind),
        None => {
            let valid: Vec<&str> = ActionKind::ALL.iter().map(|k| k.as_str()).collect();
            bail!("unknown action '{}' (valid: {})", name, valid.join(", "));
        }
    }
}

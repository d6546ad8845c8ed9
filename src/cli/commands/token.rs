use anyhow::Context;

use crate::auth::TokenIssuer;
use crate::config::AppConfig;

/// Print a bearer token signed with the configured secret, for use with curl.
pub fn handle(config: AppConfig) -> anyhow::Result<()> {
    let token = TokenIssuer::from_config(&config.security)
        .context("invalid token settings")?
        .issue()
        .context("failed to issue token")?;

    println!("{}", token);
    Ok(())
}

//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use factoids_config::Config;
use factoids_store::FactoidStore;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

mod chat;
mod forget;
mod init;
mod list;
mod telegram;
mod version;

pub use chat::{ChatInput, ChatStrategy};
pub use forget::{ForgetInput, ForgetStrategy};
pub use init::InitStrategy;
pub use list::{ListInput, ListStrategy};
pub use telegram::{TelegramInput, TelegramStrategy};
pub use version::VersionStrategy;

/// Open the configured factoid store once, without retrying.
async fn open_store(config: &Config) -> anyhow::Result<FactoidStore> {
    FactoidStore::new(&config.database.url, config.database.timeout()).await
}

/// Connect to the factoid store with exponential backoff retry.
///
/// # Retry Behavior
/// - First retry: 1s
/// - Second retry: 2s
/// - Third and beyond: 3s (capped)
/// - Retries indefinitely until connection succeeds
async fn connect_store_with_retry(config: &Config) -> anyhow::Result<FactoidStore> {
    const MAX_DELAY: Duration = Duration::from_secs(3);
    const INITIAL_DELAY: Duration = Duration::from_secs(1);

    let mut attempt = 0u32;
    let mut delay = INITIAL_DELAY;

    loop {
        attempt += 1;
        match open_store(config).await {
            Ok(store) => {
                info!("Factoid store connected successfully on attempt {attempt}");
                return Ok(store);
            }
            Err(e) => {
                warn!(
                    "Failed to connect to database (attempt {attempt}): {e}. Retrying in {}s...",
                    delay.as_secs()
                );
                sleep(delay).await;
                // 1s -> 2s -> 3s -> 3s -> ...
                delay = (delay * 2).min(MAX_DELAY);
            }
        }
    }
}

/// Core trait defining the contract for all command strategies.
///
/// Each strategy defines its own input type via the associated type, so
/// parameters are passed without runtime casting or boxing.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

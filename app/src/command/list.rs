use factoids_config::Config;
use factoids_core::FactoidRepo;
use futures::TryStreamExt;
use tracing::info;

use super::open_store;

/// Input for the List command.
#[derive(Debug, Clone, Copy)]
pub struct ListInput {
    /// Restrict output to one chat
    pub chat_id: Option<i64>,
}

/// Strategy for printing live factoids, one per line.
#[derive(Debug, Clone, Copy)]
pub struct ListStrategy;

impl super::CommandStrategy for ListStrategy {
    type Input = ListInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let store = open_store(&config).await?;

        let mut stream = store.list_live();
        let mut count = 0usize;
        while let Some(factoid) = stream.try_next().await? {
            if input.chat_id.is_some_and(|id| id != factoid.scope_id) {
                continue;
            }
            println!("{factoid}");
            count += 1;
        }

        info!("Listed {count} live factoids");
        Ok(())
    }
}

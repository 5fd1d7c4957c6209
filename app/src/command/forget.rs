use factoids_config::Config;
use factoids_core::FactoidRepo;

use super::open_store;

/// Input for the Forget command.
#[derive(Debug, Clone)]
pub struct ForgetInput {
    pub chat_id: i64,
    pub subject: String,
}

/// Strategy for soft-deleting a factoid by subject.
#[derive(Debug, Clone, Copy)]
pub struct ForgetStrategy;

impl super::CommandStrategy for ForgetStrategy {
    type Input = ForgetInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let store = open_store(&config).await?;

        if store.soft_delete(input.chat_id, &input.subject).await? {
            println!(
                "Forgot \"{}\" in chat {}",
                input.subject.trim(),
                input.chat_id
            );
        } else {
            println!(
                "No live factoid about \"{}\" in chat {}",
                input.subject.trim(),
                input.chat_id
            );
        }
        Ok(())
    }
}

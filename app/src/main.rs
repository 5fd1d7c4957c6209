#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    ChatInput, ChatStrategy, CommandStrategy, ForgetInput, ForgetStrategy, InitStrategy,
    ListInput, ListStrategy, TelegramInput, TelegramStrategy, VersionStrategy,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "factoids")]
#[command(about = "Chat bot that remembers \"X is Y\" facts and answers \"X?\"", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Init,
    /// Show version
    Version,
    /// Run the Telegram bot
    Telegram {
        /// Bot token (overrides config)
        #[arg(short, long)]
        token: Option<String>,

        /// Allowed chat IDs (overrides config)
        #[arg(short, long, num_args = 1..)]
        allow_from: Option<Vec<String>>,
    },
    /// Feed messages through the engine from the terminal
    Chat {
        /// Chat the messages belong to
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        chat_id: i64,

        /// Sender id recorded as author
        #[arg(short, long, default_value_t = 0)]
        user_id: i64,

        /// Sender display name recorded as author
        #[arg(short = 'n', long)]
        username: Option<String>,

        /// Single message to process (reads stdin otherwise)
        #[arg(short, long)]
        message: Option<String>,

        /// Keep factoids in memory instead of the configured database
        #[arg(long)]
        memory: bool,
    },
    /// List live factoids
    List {
        /// Only this chat
        #[arg(short, long, allow_hyphen_values = true)]
        chat_id: Option<i64>,
    },
    /// Soft-delete a factoid
    Forget {
        /// Chat the factoid belongs to
        #[arg(short, long, allow_hyphen_values = true)]
        chat_id: i64,

        /// Subject to forget (case-insensitive)
        subject: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
        Commands::Telegram { token, allow_from } => {
            TelegramStrategy
                .execute(TelegramInput { token, allow_from })
                .await
        }
        Commands::Chat {
            chat_id,
            user_id,
            username,
            message,
            memory,
        } => {
            ChatStrategy
                .execute(ChatInput {
                    chat_id,
                    user_id,
                    username,
                    message,
                    memory,
                })
                .await
        }
        Commands::List { chat_id } => ListStrategy.execute(ListInput { chat_id }).await,
        Commands::Forget { chat_id, subject } => {
            ForgetStrategy
                .execute(ForgetInput { chat_id, subject })
                .await
        }
    }
}

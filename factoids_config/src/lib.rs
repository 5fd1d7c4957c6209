mod schema;

pub use schema::{Config, DatabaseConfig, TelegramConfig};

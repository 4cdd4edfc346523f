//! Runtime configuration, read from flags with environment fallbacks.

use clap::Parser;

/// Todo HTTP API backed by a SQLite file.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite database path, or `:memory:`
    #[arg(long = "db", env = "TODO_DB", default_value = "todoApplication.db")]
    pub db_path: String,

    /// Log level or flexi_logger spec, e.g. `info` or `todo_core=debug`
    #[arg(long, env = "TODO_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn in_memory(&self) -> bool {
        self.db_path == ":memory:"
    }
}

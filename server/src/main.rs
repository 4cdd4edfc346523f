use clap::Parser;
use log::{error, info};
use tokio::net::TcpListener;
use todo_core::{open_db, open_db_in_memory};
use todo_server::{logging::init_logging, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    let _logger = init_logging(&config.log_level)?;

    let conn = if config.in_memory() {
        open_db_in_memory()
    } else {
        open_db(&config.db_path)
    }
    .inspect_err(|err| error!("event=startup module=server status=error db={} error={err}", config.db_path))?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .inspect_err(|err| error!("event=startup module=server status=error addr={addr} error={err}"))?;
    info!("event=listen module=server status=ok addr={addr} db={}", config.db_path);

    todo_server::run(listener, conn).await?;
    Ok(())
}

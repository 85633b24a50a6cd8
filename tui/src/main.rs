use std::time::Duration;

use clap::Parser;
use taskboard_core::TaskClient;

use crate::store::TaskStore;
use crate::transport::UreqTransport;

mod form;
mod store;
mod transport;
mod ui;

/// Terminal task list over the todos REST API.
#[derive(Parser)]
#[command(name = "taskboard")]
struct Args {
    /// Base URL of the backend service
    #[arg(long, env = "TASKBOARD_URL", default_value = "http://localhost:8000")]
    url: String,

    /// Request timeout in milliseconds
    #[arg(long, env = "TASKBOARD_TIMEOUT_MS", default_value_t = 10_000)]
    timeout_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let transport = UreqTransport::new(Duration::from_millis(args.timeout_ms));
    let store = TaskStore::new(TaskClient::new(&args.url), transport);

    ui::run_app(store)?;

    Ok(())
}

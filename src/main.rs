use std::sync::Arc;

use loopback_fileserver::config::Config;
use loopback_fileserver::server::{start_signal_handler, Server, SignalHandler};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;

    // One request at a time: a current-thread runtime is all the accept loop needs
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))?;
    Ok(())
}

async fn async_main(cfg: Config) -> loopback_fileserver::Result<()> {
    let server = Server::bind(&cfg)?;

    let signals = Arc::new(SignalHandler::new());
    start_signal_handler(Arc::clone(&signals));

    server.run(signals).await;
    Ok(())
}

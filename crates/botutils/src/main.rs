use std::sync::Arc;

use botutils_core::{config::Config, logging, logging::sink::SinkRegistry};

#[tokio::main]
async fn main() -> Result<(), botutils_core::Error> {
    let sinks = Arc::new(SinkRegistry::new());
    logging::init("botutils", sinks.clone())?;

    let cfg = Arc::new(Config::load()?);

    botutils_telegram::router::run_polling(cfg, sinks)
        .await
        .map_err(|e| botutils_core::Error::External(format!("bot failed: {e}")))?;

    Ok(())
}

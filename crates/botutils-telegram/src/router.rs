use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};
use tokio::sync::watch;

use botutils_core::{
    config::Config, logging::sink::SinkRegistry, messaging::port::MessagingPort,
    plugin::UtilsPlugin,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub plugin: Arc<UtilsPlugin>,
}

pub async fn run_polling(cfg: Arc<Config>, sinks: Arc<SinkRegistry>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.bot_token.clone());

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let plugin = UtilsPlugin::new(cfg.clone(), messenger, sinks);

    // The startup task waits on this before touching the platform.
    let (ready_tx, ready_rx) = watch::channel(false);
    plugin.start(ready_rx).await;

    match bot.get_me().await {
        Ok(me) => tracing::info!(username = %me.username(), "bot connected"),
        Err(e) => tracing::warn!(error = %e, "could not fetch bot identity"),
    }
    let _ = ready_tx.send(true);

    let state = Arc::new(AppState {
        cfg,
        plugin: plugin.clone(),
    });

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    plugin.unload().await;
    Ok(())
}

//! Consent Gate bot
//!
//! Long-polling Telegram bot that walks users through the consent screens.

use anyhow::Context;
use consent_gate::{
    bot::Bot,
    config::Config,
    dispatcher::Dispatcher,
    storage::ConsentLog,
    telegram::BotApi,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    consent_gate::init();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Starting consent gate (log: {})", config.db_path.display());

    let log = ConsentLog::open(&config.db_path).context("Failed to open consent log")?;
    log.init().context("Failed to initialize consent log schema")?;

    let api = BotApi::from_config(&config).context("Failed to create Bot API client")?;
    let mut bot = Bot::new(api, Dispatcher::new(log), config.poll_timeout_secs);

    bot.run(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    })
    .await;

    tracing::info!("Consent gate stopped");
    Ok(())
}

//! Main entry: validate config, init logging, build components, connect the history client, run
//! the REPL (and the daily job when configured), disconnect on exit.

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use crate::components::{build_bot_components, build_handler_chain, build_history_client, build_llm_client};
use crate::config::BotConfig;
use crate::core::init_tracing;
use crate::daily::DailyRecapJob;
use crate::telegram::run_repl;

#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        gateway = %config.history.gateway_url,
        page_size = config.history.page_size,
        max_pages = ?config.history.max_pages,
        daily_recap_time = ?config.recap.daily_recap_time,
        "Initializing recap bot"
    );

    let components = build_bot_components(
        &config,
        build_history_client(&config)?,
        build_llm_client(&config),
        None,
    );

    components
        .history_client
        .connect()
        .await
        .context("Failed to connect history client")?;

    let daily_job = config.recap.daily_recap_time.map(|at| {
        DailyRecapJob::new(components.bot.clone(), components.service.clone(), at).spawn()
    });

    let handler_chain = build_handler_chain(&components);
    info!("Bot started successfully");

    let result = run_repl(
        components.teloxide_bot.clone(),
        handler_chain,
        components.bot_username.clone(),
    )
    .await;

    if let Some(job) = daily_job {
        job.abort();
    }
    if let Err(e) = components.history_client.disconnect().await {
        warn!(error = %e, "Failed to disconnect history client");
    }
    info!("Bot stopped");
    result
}

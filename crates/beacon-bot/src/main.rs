use std::sync::Arc;

use tracing::info;

use beacon_core::config::FIRED_CHANNEL_CAPACITY;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beacon=info".into()),
        )
        .init();

    // load config: explicit path via BEACON_CONFIG, else ./beacon.toml
    let config_path = std::env::var("BEACON_CONFIG").ok();
    let config = beacon_core::BeaconConfig::load(config_path.as_deref())?;

    if config.telegram.bot_token.is_empty() {
        anyhow::bail!("telegram.bot_token is not set (file or BEACON_TELEGRAM__BOT_TOKEN)");
    }

    // The single zone the whole process operates in.
    let tz: chrono_tz::Tz = config
        .timezone
        .parse()
        .map_err(|_| beacon_core::BeaconError::UnknownTimezone(config.timezone.clone()))?;
    info!(timezone = %tz, club = %config.club.name, "starting beacon");

    ensure_parent_dir(&config.database.path);
    let conn = rusqlite::Connection::open(&config.database.path)?;
    let users = beacon_users::IdentityStore::new(conn)?;
    info!(path = %config.database.path, "member registry ready");

    let content = beacon_content::ContentStore::new(&config.content.dir);

    // Fired-job channel: engine → Telegram delivery task.
    let (fired_tx, fired_rx) = tokio::sync::mpsc::channel(FIRED_CHANNEL_CAPACITY);
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let engine = beacon_scheduler::Scheduler::new(fired_tx);
    let scheduler = engine.handle();
    let engine_task = tokio::spawn(engine.run(shutdown_rx));

    let ctx = Arc::new(beacon_telegram::BotContext {
        config,
        tz,
        scheduler,
        content,
        users,
    });
    let adapter = beacon_telegram::TelegramAdapter::new(ctx);

    tokio::select! {
        _ = adapter.run(fired_rx) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("ctrl-c received; shutting down");
        }
    }

    // Stop the engine promptly; whatever is still pending is discarded.
    let _ = shutdown_tx.send(true);
    let _ = engine_task.await;
    info!("beacon stopped");
    Ok(())
}

fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }
}

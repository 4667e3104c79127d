use crate::components::upcoming::{CardHandle, HomeAssistantClient, UpcomingCard};
use crate::components::{register_builtin_cards, CardRegistry};
use crate::config::AppConfig;
use crate::error::{other_error, Error};
use crate::shutdown;
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| other_error(&format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<AppConfig> {
    match AppConfig::load() {
        Ok(config) => {
            info!(
                "Loaded card config from {}",
                config.card_config_path.display()
            );
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Register the card and render it until a termination signal arrives
pub async fn run(config: AppConfig) -> miette::Result<()> {
    let mut registry = CardRegistry::new();
    register_builtin_cards(&mut registry);

    let client = HomeAssistantClient::new(&config.hass_url, config.hass_token.clone())?;

    if config.refresh_interval == 0 {
        let mut card = UpcomingCard::new(config.card);
        let now = Local::now();
        card.load(&client, &now).await;
        print!("{}", card.display_model(&now));
        return Ok(());
    }

    let handle = CardHandle::new(config.card, Arc::new(client));
    let mut models = handle.subscribe();

    let mut ticker = interval(Duration::from_secs(config.refresh_interval));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The actor loads on start, skip the immediate tick
    ticker.tick().await;

    let signal = shutdown::wait_for_signal();
    tokio::pin!(signal);

    loop {
        tokio::select! {
            _ = &mut signal => break,
            changed = models.changed() => {
                if changed.is_err() {
                    return Err(Error::Component("Card actor stopped".to_string()).into());
                }
                let model = models.borrow_and_update().clone();
                print!("{}", model);
            }
            _ = ticker.tick() => {
                info!("Refreshing calendar card");
                handle.refresh().await?;
            }
        }
    }

    shutdown::shutdown_card(&handle).await;
    Ok(())
}

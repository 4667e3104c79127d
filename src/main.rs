use calendar_upcoming::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting calendar-upcoming");

    // Load configuration
    let config = startup::load_config()?;

    // Render until told to stop
    startup::run(config).await
}

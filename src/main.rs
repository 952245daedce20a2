use blogpress::configuration::get_config;
use blogpress::startup::Application;
use blogpress::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("blogpress".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = get_config()?;
    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}

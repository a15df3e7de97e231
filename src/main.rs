mod telemetry;

use anyhow::Context;
use push_reminder_api::Application;
use push_reminder_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine, the environment is used as is
    dotenvy::dotenv().ok();

    let subscriber = get_subscriber("push_reminder_server".into(), "info".into());
    init_subscriber(subscriber)?;

    let context = setup_context().await?;

    let app = Application::new(context)
        .await
        .context("Unable to start the server")?;
    app.start().await?;
    Ok(())
}

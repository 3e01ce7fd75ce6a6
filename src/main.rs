use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;

use survey_intake::app;
use survey_intake::repo::FileRecordLog;
use survey_intake::settings::Settings;
use survey_intake::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::create_subscriber("info", std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let settings = Settings::load().context("Failed to load settings")?;

    let record_log =
        FileRecordLog::open(settings.store.path()).context("Failed to open the record log")?;

    let listener = TcpListener::bind(settings.app.addr())?;

    app::run(listener, Arc::new(record_log))?
        .await
        .context("Failed to run app")
}

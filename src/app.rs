use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use chrono::{Local, Utc};

use serde_json::json;

use tracing_actix_web::TracingLogger;

use crate::controller::survey;
use crate::repo::RecordLog;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/ping")]
async fn ping() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "API is alive",
        "utc_time": Utc::now().to_rfc3339(),
    }))
}

/// Server clock readout, for debugging timezone skew between derived
/// identifiers and client expectations
#[tracing::instrument(name = "Server time")]
#[get("/time")]
async fn time() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "utc_iso": Utc::now().to_rfc3339(),
        "local_iso": Local::now().to_rfc3339(),
        "server": "survey-intake",
    }))
}

/// Run the application on a specified TCP listener
pub fn run(listener: TcpListener, record_log: Arc<dyn RecordLog>) -> anyhow::Result<Server> {
    // Wrap application data
    let record_log = web::Data::from(record_log);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(record_log.clone())
            .service(ping)
            .service(time)
            .service(survey::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

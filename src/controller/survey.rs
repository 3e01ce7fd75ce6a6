use actix_web::dev::HttpServiceFactory;
use actix_web::{post, web, HttpRequest, HttpResponse, Responder};

use serde_json::json;

use crate::domain::SurveySubmission;
use crate::error::{RestError, RestResult};
use crate::model::{RequestMeta, StoredSurveyRecord};
use crate::repo::RecordLog;

/// Accept one survey submission: validate, hash PII, resolve the identifier
/// and append the resulting record to the log.
#[tracing::instrument(name = "Accept a survey submission", skip(req, body, record_log))]
#[post("")]
async fn submit(
    req: HttpRequest,
    body: web::Bytes,
    record_log: web::Data<dyn RecordLog>,
) -> RestResult<impl Responder> {
    // Decoded by hand: an unparseable body is a distinct condition from a
    // schema violation and gets its own error code.
    let payload: serde_json::Value =
        serde_json::from_slice(&body).map_err(|e| RestError::MalformedRequest(e.to_string()))?;

    let submission = SurveySubmission::parse(&payload)?;

    let record = StoredSurveyRecord::build(submission, &request_meta(&req));
    record_log.append(&record).await?;

    Ok(HttpResponse::Created().json(json!({ "status": "ok" })))
}

fn request_meta(req: &HttpRequest) -> RequestMeta {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };

    RequestMeta {
        header_user_agent: header("User-Agent"),
        forwarded_for: header("X-Forwarded-For"),
        peer_ip: req.peer_addr().map(|addr| addr.ip().to_string()),
    }
}

/// Survey API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/v1/survey").service(submit)
}

use chrono::{DateTime, Utc};

use serde::Serialize;

use crate::crypto;
use crate::domain::SurveySubmission;

use super::identity::{self, RequestMeta};

/// The privacy-safe shape appended to the record log.
///
/// Raw `email` and `age` never appear here under any field name; only their
/// digests do.
#[derive(Debug, Clone, Serialize)]
pub struct StoredSurveyRecord {
    pub name: String,
    pub consent: bool,
    pub rating: u8,
    pub comments: Option<String>,
    pub email_hash: String,
    pub age_hash: String,
    pub user_agent: Option<String>,
    pub submission_id: String,
    #[serde(serialize_with = "rfc3339_utc")]
    pub received_at: DateTime<Utc>,
    pub ip: String,
}

impl StoredSurveyRecord {
    /// Assemble the stored record, stamping the current UTC instant
    pub fn build(submission: SurveySubmission, meta: &RequestMeta) -> Self {
        Self::build_at(submission, meta, Utc::now())
    }

    /// Assemble the stored record at a caller-supplied instant.
    ///
    /// The same instant feeds both `received_at` and the derived identifier's
    /// hour bucket.
    pub fn build_at(
        submission: SurveySubmission,
        meta: &RequestMeta,
        received_at: DateTime<Utc>,
    ) -> Self {
        let email_hash = crypto::hex_digest(submission.email.as_ref());
        let age_hash = crypto::hex_digest(&submission.age.to_string());

        let submission_id = identity::resolve_submission_id(
            submission.submission_id.as_deref(),
            &submission.email,
            received_at,
        );
        let user_agent = identity::resolve_user_agent(
            meta.header_user_agent.as_deref(),
            submission.user_agent.as_deref(),
        );
        let ip = identity::resolve_ip(meta.forwarded_for.as_deref(), meta.peer_ip.as_deref());

        Self {
            name: submission.name.as_ref().to_owned(),
            consent: submission.consent,
            rating: submission.rating.as_u8(),
            comments: submission.comments.map(|c| c.as_ref().to_owned()),
            email_hash,
            age_hash,
            user_agent,
            submission_id,
            received_at,
            ip,
        }
    }
}

// Chrono's default serde emits a `Z` suffix; existing log lines carry the
// numeric `+00:00` offset, so the timestamp is written with `to_rfc3339`.
fn rfc3339_utc<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&at.to_rfc3339())
}

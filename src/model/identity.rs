use chrono::{DateTime, Utc};

use crate::crypto;
use crate::domain::EmailAddress;

/// Request metadata the HTTP layer extracts before the pipeline runs
#[derive(Debug, Default, Clone)]
pub struct RequestMeta {
    pub header_user_agent: Option<String>,
    pub forwarded_for: Option<String>,
    pub peer_ip: Option<String>,
}

/// Identifier for a stored record: the client-supplied value verbatim when
/// non-empty, otherwise a digest of the email and the UTC hour bucket.
///
/// Two submissions from the same address within the same UTC hour derive the
/// same identifier. That collision is the established dedup key for existing
/// logs and must not change.
pub fn resolve_submission_id(
    client_id: Option<&str>,
    email: &EmailAddress,
    received_at: DateTime<Utc>,
) -> String {
    match client_id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => crypto::hex_digest(&format!("{}{}", email.as_ref(), hour_bucket(received_at))),
    }
}

/// UTC hour bucket as a fixed-width `YYYYMMDDHH` string
fn hour_bucket(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d%H").to_string()
}

/// The `User-Agent` header wins over the field carried in the submission
pub fn resolve_user_agent(header: Option<&str>, submitted: Option<&str>) -> Option<String> {
    header.or(submitted).map(str::to_owned)
}

/// First hop of `X-Forwarded-For` when present, else the transport peer.
///
/// The forwarded header is trusted as-is; there is no allow-list of
/// trusted proxies.
pub fn resolve_ip(forwarded_for: Option<&str>, peer: Option<&str>) -> String {
    forwarded_for
        .and_then(|raw| raw.split(',').next())
        .map(|first| first.trim().to_string())
        .filter(|first| !first.is_empty())
        .or_else(|| peer.map(str::to_owned))
        .unwrap_or_default()
}

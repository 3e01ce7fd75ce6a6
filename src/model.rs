mod identity;
mod record;

pub use identity::RequestMeta;
pub use record::StoredSurveyRecord;

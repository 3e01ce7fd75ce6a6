mod age;
mod comments;
mod email_address;
mod person_name;
mod rating;
mod submission;

pub use age::Age;
pub use comments::Comments;
pub use email_address::EmailAddress;
pub use person_name::PersonName;
pub use rating::Rating;
pub use submission::{FieldViolation, SurveySubmission, ValidationErrors};

/// Survey submission endpoints
pub mod survey;

pub mod models;

pub use models::{AssessmentDetails, AssessmentDetailsInput};

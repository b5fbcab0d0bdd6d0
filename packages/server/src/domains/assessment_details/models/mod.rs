pub mod assessment_detail;

pub use assessment_detail::{AssessmentDetails, AssessmentDetailsInput};

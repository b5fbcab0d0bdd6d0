// Business domains
pub mod assessment_details;
pub mod assessments;
pub mod conversations;
pub mod feedback;
pub mod uploads;

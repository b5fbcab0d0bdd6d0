pub mod models;

pub use models::{FeedbackInput, QualityAssessorFeedback};

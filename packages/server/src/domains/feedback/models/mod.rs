pub mod feedback;

pub use feedback::{FeedbackInput, QualityAssessorFeedback};

pub mod activities;
pub mod models;
pub mod sampler;

// Re-export commonly used types
pub use activities::assess_contact;
pub use models::{
    ComplaintsAssessment, ComplaintsResult, StoredAssessment, VulnerabilityAssessment,
    VulnerabilityResult,
};
pub use sampler::{sample_snippet_ids, SnippetSampler, DEFAULT_SAMPLE_SIZE};

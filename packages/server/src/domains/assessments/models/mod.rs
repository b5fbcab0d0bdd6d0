pub mod complaints;
pub mod store;
pub mod vulnerability;

pub use complaints::{ComplaintsAssessment, ComplaintsResult};
pub use store::{find_stored_assessment, store_assessment_results, StoredAssessment};
pub use vulnerability::{VulnerabilityAssessment, VulnerabilityResult};

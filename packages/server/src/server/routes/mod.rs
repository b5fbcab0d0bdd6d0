// HTTP routes
pub mod assessment;
pub mod assessment_details;
pub mod feedback;
pub mod health;
pub mod snippets;
pub mod uploads;

pub use assessment::*;
pub use assessment_details::*;
pub use feedback::*;
pub use health::*;
pub use snippets::*;
pub use uploads::*;

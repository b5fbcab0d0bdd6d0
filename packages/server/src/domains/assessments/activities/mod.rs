pub mod assess;

pub use assess::{assess_complaints, assess_contact, assess_conversation, assess_vulnerability};

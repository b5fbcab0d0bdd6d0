//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod classifier;
pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use ai::OpenAiClassifier;
pub use classifier::{create_classifier, StubClassifier};
pub use deps::ServerDeps;
pub use test_dependencies::{MockClassifier, TestDependencies};
pub use traits::*;

//! Server dependencies for domain activities (using traits for testability)
//!
//! Holds the external capabilities an assessment needs besides the database
//! connection, which is acquired per request.

use std::sync::Arc;

use crate::domains::assessments::SnippetSampler;
use crate::kernel::BaseClassifier;

#[derive(Clone)]
pub struct ServerDeps {
    pub classifier: Arc<dyn BaseClassifier>,
    pub sampler: Arc<SnippetSampler>,
}

impl ServerDeps {
    pub fn new(classifier: Arc<dyn BaseClassifier>, sampler: Arc<SnippetSampler>) -> Self {
        Self {
            classifier,
            sampler,
        }
    }
}

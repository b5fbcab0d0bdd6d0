// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// What to do with a classification (sampling, persistence) lives in domain layers.
//
// Naming convention: Base* for trait names (e.g., BaseClassifier)

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// =============================================================================
// Classifier Trait (Infrastructure - text classification capability)
// =============================================================================

/// The question a classifier is asked about a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentTopic {
    Complaints,
    PhysicalDisability,
    Vulnerability,
}

impl std::fmt::Display for AssessmentTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssessmentTopic::Complaints => write!(f, "complaints"),
            AssessmentTopic::PhysicalDisability => write!(f, "physical_disability"),
            AssessmentTopic::Vulnerability => write!(f, "vulnerability"),
        }
    }
}

/// A single flag decision plus the free-text reasoning behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub flag: bool,
    pub reasoning: String,
}

impl Classification {
    pub fn new(flag: bool, reasoning: impl Into<String>) -> Self {
        Self {
            flag,
            reasoning: reasoning.into(),
        }
    }
}

#[async_trait]
pub trait BaseClassifier: Send + Sync {
    /// Classify a transcript for one topic.
    ///
    /// `transcript` is `None` when the conversation has no text; that is a
    /// valid input and must not be treated as an error.
    async fn classify(
        &self,
        topic: AssessmentTopic,
        transcript: Option<&str>,
    ) -> Result<Classification>;

    /// Short backend name for logs
    fn name(&self) -> &'static str {
        "unknown"
    }
}

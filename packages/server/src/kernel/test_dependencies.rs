// TestDependencies - mock implementations for testing
//
// Provides a canned classifier that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::classifier::not_detected_reasoning;
use super::{AssessmentTopic, BaseClassifier, Classification, ServerDeps};
use crate::domains::assessments::SnippetSampler;

// =============================================================================
// Mock Classifier
// =============================================================================

/// Classifier with per-topic canned answers.
///
/// Topics without an answer come back as "not detected". Every call is
/// recorded with the transcript it received.
pub struct MockClassifier {
    answers: Arc<Mutex<HashMap<AssessmentTopic, Classification>>>,
    failure: Option<String>,
    calls: Arc<Mutex<Vec<(AssessmentTopic, Option<String>)>>>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            answers: Arc::new(Mutex::new(HashMap::new())),
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Classifier whose every call fails with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    pub fn with_answer(self, topic: AssessmentTopic, answer: Classification) -> Self {
        self.answers.lock().unwrap().insert(topic, answer);
        self
    }

    /// Get all (topic, transcript) pairs the classifier was called with
    pub fn calls(&self) -> Vec<(AssessmentTopic, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseClassifier for MockClassifier {
    async fn classify(
        &self,
        topic: AssessmentTopic,
        transcript: Option<&str>,
    ) -> Result<Classification> {
        self.calls
            .lock()
            .unwrap()
            .push((topic, transcript.map(str::to_string)));

        if let Some(message) = &self.failure {
            anyhow::bail!("{}", message);
        }

        Ok(self
            .answers
            .lock()
            .unwrap()
            .get(&topic)
            .cloned()
            .unwrap_or_else(|| Classification::new(false, not_detected_reasoning(topic))))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Builder for ServerDeps wired with test doubles
pub struct TestDependencies {
    pub classifier: Arc<dyn BaseClassifier>,
    pub seed: u64,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            classifier: Arc::new(MockClassifier::new()),
            seed: 42,
        }
    }

    pub fn classifier(mut self, classifier: Arc<dyn BaseClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn into_server_deps(self) -> ServerDeps {
        ServerDeps::new(self.classifier, Arc::new(SnippetSampler::seeded(self.seed)))
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

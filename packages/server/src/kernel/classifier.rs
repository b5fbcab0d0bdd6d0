// Classifier backends and the factory that picks one from configuration.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::ai::OpenAiClassifier;
use super::{AssessmentTopic, BaseClassifier, Classification};
use crate::config::{ClassifierBackend, ClassifierConfig};

/// Reasoning strings used when nothing was detected.
pub fn not_detected_reasoning(topic: AssessmentTopic) -> &'static str {
    match topic {
        AssessmentTopic::Complaints => "No significant complaints detected in the conversation.",
        AssessmentTopic::PhysicalDisability => "No clear indicators of physical disability found.",
        AssessmentTopic::Vulnerability => "No clear vulnerability indicators detected.",
    }
}

/// Reasoning strings used when a flag is raised without model-provided text.
pub fn detected_reasoning(topic: AssessmentTopic) -> &'static str {
    match topic {
        AssessmentTopic::Complaints => {
            "The conversation contains mentions of complaints or issues."
        }
        AssessmentTopic::PhysicalDisability => {
            "The conversation indicates presence of physical disability."
        }
        AssessmentTopic::Vulnerability => "The conversation indicates potential vulnerability.",
    }
}

/// Classifier that never raises a flag.
///
/// Stands in for real analysis until a model-backed classifier is configured.
pub struct StubClassifier;

impl StubClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StubClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseClassifier for StubClassifier {
    async fn classify(
        &self,
        topic: AssessmentTopic,
        _transcript: Option<&str>,
    ) -> Result<Classification> {
        Ok(Classification::new(false, not_detected_reasoning(topic)))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

// =============================================================================
// Factory function
// =============================================================================

/// Create classifier based on configuration
pub fn create_classifier(config: &ClassifierConfig) -> Result<Arc<dyn BaseClassifier>> {
    match config.backend {
        ClassifierBackend::Stub => {
            tracing::info!("Using stub classifier (all flags false)");
            Ok(Arc::new(StubClassifier::new()))
        }
        ClassifierBackend::OpenAi => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY is required for openai classifier"))?;
            let mut classifier = OpenAiClassifier::new(api_key, config.openai_model.clone());
            if let Some(base_url) = &config.openai_base_url {
                classifier = classifier.with_base_url(base_url.clone());
            }
            tracing::info!(model = %config.openai_model, "Using OpenAI classifier");
            Ok(Arc::new(classifier))
        }
    }
}

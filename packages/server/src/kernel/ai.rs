// AI implementation using OpenAI
//
// This is the infrastructure implementation of BaseClassifier.
// The domain layer decides which topics to ask about and what to do with the answers.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::classifier::{detected_reasoning, not_detected_reasoning};
use super::{AssessmentTopic, BaseClassifier, Classification};

lazy_static! {
    static ref CODE_FENCE: Regex = Regex::new(r"```(?:json)?").expect("static regex");
}

const SYSTEM_PROMPT: &str = "You are reviewing a customer-service conversation between a \
support agent and a customer. Answer only with a JSON object of the form \
{\"flag\": <true|false>, \"reasoning\": <string>}.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct RawClassification {
    #[serde(default)]
    flag: bool,
    #[serde(default)]
    reasoning: String,
}

/// OpenAI chat-completion backed classifier
#[derive(Clone)]
pub struct OpenAiClassifier {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClassifier {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn user_prompt(topic: AssessmentTopic, transcript: &str) -> String {
        let question = match topic {
            AssessmentTopic::Complaints => {
                "Does the customer express a complaint or dissatisfaction with the service?"
            }
            AssessmentTopic::PhysicalDisability => {
                "Does the conversation indicate that the customer has a physical disability?"
            }
            AssessmentTopic::Vulnerability => {
                "Does the customer show signs of vulnerability, such as financial distress?"
            }
        };

        format!(
            "{}\nSet \"flag\" to the answer and explain it briefly in \"reasoning\", \
             quoting the conversation where possible.\n\nConversation:\n{}",
            question, transcript
        )
    }

    async fn complete(&self, prompt: String) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            temperature: 0.0,
            max_tokens: 300,
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send classification request to OpenAI")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, error = %error_text, "OpenAI API error");
            anyhow::bail!("OpenAI API error ({}): {}", status, error_text);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI response")?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("No response from OpenAI"))
    }
}

/// Turn a model answer into a classification.
///
/// Markdown fences are stripped first. Anything that still fails to parse
/// degrades to "not detected" rather than failing the whole assessment.
pub fn parse_classification(topic: AssessmentTopic, answer: &str) -> Classification {
    let cleaned = CODE_FENCE.replace_all(answer, "");
    let cleaned = cleaned.trim();

    match serde_json::from_str::<RawClassification>(cleaned) {
        Ok(raw) => {
            let reasoning = if raw.reasoning.trim().is_empty() {
                if raw.flag {
                    detected_reasoning(topic).to_string()
                } else {
                    not_detected_reasoning(topic).to_string()
                }
            } else {
                raw.reasoning
            };
            Classification::new(raw.flag, reasoning)
        }
        Err(e) => {
            tracing::error!(
                topic = %topic,
                error = %e,
                answer_preview = %cleaned.chars().take(200).collect::<String>(),
                "Invalid JSON from OpenAI, treating as not detected"
            );
            Classification::new(false, "Not detected")
        }
    }
}

#[async_trait]
impl BaseClassifier for OpenAiClassifier {
    async fn classify(
        &self,
        topic: AssessmentTopic,
        transcript: Option<&str>,
    ) -> Result<Classification> {
        let transcript = match transcript.map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => {
                tracing::debug!(topic = %topic, "No transcript text, skipping OpenAI call");
                return Ok(Classification::new(false, not_detected_reasoning(topic)));
            }
        };

        tracing::info!(topic = %topic, model = %self.model, "Calling OpenAI API");
        let answer = self.complete(Self::user_prompt(topic, transcript)).await?;
        tracing::debug!(topic = %topic, response_length = answer.len(), "OpenAI response received");

        Ok(parse_classification(topic, &answer))
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

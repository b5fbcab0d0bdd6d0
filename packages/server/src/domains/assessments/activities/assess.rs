//! Assessment activities.
//!
//! Classify a transcript for complaints and vulnerability, attach a random
//! sample of snippet ids to each result, and persist both rows.

use anyhow::{Context, Result};
use sqlx::PgConnection;
use tracing::{info, warn};

use crate::domains::assessments::models::{
    store_assessment_results, ComplaintsResult, StoredAssessment, VulnerabilityResult,
};
use crate::domains::assessments::sampler::DEFAULT_SAMPLE_SIZE;
use crate::domains::conversations::{Conversation, Snippet};
use crate::kernel::{AssessmentTopic, ServerDeps};

/// Complaints assessment: a complaints verdict plus a physical-disability
/// verdict, each from the classifier.
pub async fn assess_complaints(
    contact_id: &str,
    transcript: Option<&str>,
    snippets: &[Snippet],
    deps: &ServerDeps,
) -> Result<ComplaintsResult> {
    info!(contact_id = %contact_id, classifier = deps.classifier.name(), "Starting complaints assessment");

    let relevant_snippet_ids = deps.sampler.sample(snippets, DEFAULT_SAMPLE_SIZE);

    let (complaints, disability) = tokio::try_join!(
        deps.classifier
            .classify(AssessmentTopic::Complaints, transcript),
        deps.classifier
            .classify(AssessmentTopic::PhysicalDisability, transcript),
    )
    .context("Complaints classification failed")?;

    Ok(ComplaintsResult {
        complaints_flag: complaints.flag,
        complaints_reasoning: complaints.reasoning,
        physical_disability_flag: disability.flag,
        physical_disability_reasoning: disability.reasoning,
        relevant_snippet_ids,
    })
}

pub async fn assess_vulnerability(
    contact_id: &str,
    transcript: Option<&str>,
    snippets: &[Snippet],
    deps: &ServerDeps,
) -> Result<VulnerabilityResult> {
    info!(contact_id = %contact_id, classifier = deps.classifier.name(), "Starting vulnerability assessment");

    let relevant_snippet_ids = deps.sampler.sample(snippets, DEFAULT_SAMPLE_SIZE);

    let vulnerability = deps
        .classifier
        .classify(AssessmentTopic::Vulnerability, transcript)
        .await
        .context("Vulnerability classification failed")?;

    Ok(VulnerabilityResult {
        vulnerability_flag: vulnerability.flag,
        vulnerability_reasoning: vulnerability.reasoning,
        relevant_snippet_ids,
    })
}

/// Run both assessments over a fetched conversation.
pub async fn assess_conversation(
    conversation: &Conversation,
    deps: &ServerDeps,
) -> Result<(ComplaintsResult, VulnerabilityResult)> {
    let contact_id = conversation.contact_id.as_str();
    let transcript = conversation.transcript_text();

    // Malformed metadata still gets assessed, just without snippet ids
    let snippets = conversation.snippets().unwrap_or_else(|e| {
        warn!(contact_id = %contact_id, error = %e, "Unreadable snippets_metadata, sampling from nothing");
        Vec::new()
    });

    let complaints = assess_complaints(contact_id, transcript, &snippets, deps).await?;
    let vulnerability = assess_vulnerability(contact_id, transcript, &snippets, deps).await?;

    Ok((complaints, vulnerability))
}

/// Fetch the contact's conversation, assess it, and store both results.
///
/// A missing conversation fails with `ConversationNotFound` before anything is
/// classified or written. Any failure leaves both assessment tables untouched.
pub async fn assess_contact(
    contact_id: &str,
    deps: &ServerDeps,
    conn: &mut PgConnection,
) -> Result<StoredAssessment> {
    info!(contact_id = %contact_id, "Fetching conversation transcript");

    let conversation = Conversation::fetch(contact_id, conn).await?;
    info!(
        contact_id = %contact_id,
        has_transcript = conversation.transcript_text().is_some(),
        "Conversation found"
    );

    let (complaints, vulnerability) = assess_conversation(&conversation, deps).await?;

    let stored = store_assessment_results(contact_id, &complaints, &vulnerability, conn).await?;
    info!(contact_id = %contact_id, "Assessment completed successfully");

    Ok(stored)
}

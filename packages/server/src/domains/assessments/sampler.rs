//! Random sampling of "relevant" snippet ids.
//!
//! Assessments attach a handful of snippet ids to each stored result. The
//! selection is an unweighted shuffle of the conversation's snippets, so two
//! runs over the same conversation usually pick different ids. The RNG is held
//! by [`SnippetSampler`] and can be seeded for reproducible tests.

use std::collections::HashSet;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domains::conversations::Snippet;

/// Number of snippet ids attached to each assessment.
pub const DEFAULT_SAMPLE_SIZE: usize = 3;

/// Pick up to `max_count` distinct snippet ids at random.
///
/// Snippets without an id are ignored and repeated ids count once, so the
/// result holds `min(max_count, distinct ids)` entries.
pub fn sample_snippet_ids<R: Rng + ?Sized>(
    snippets: &[Snippet],
    max_count: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut candidates: Vec<&str> = snippets
        .iter()
        .filter_map(|s| s.id.as_deref())
        .filter(|id| seen.insert(*id))
        .collect();

    if candidates.is_empty() || max_count == 0 {
        return Vec::new();
    }

    candidates.shuffle(rng);
    candidates.truncate(max_count);
    candidates.into_iter().map(str::to_string).collect()
}

/// Thread-safe sampler shared across requests.
pub struct SnippetSampler {
    rng: Mutex<StdRng>,
}

impl SnippetSampler {
    /// Sampler seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sampler for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn sample(&self, snippets: &[Snippet], max_count: usize) -> Vec<String> {
        // A poisoned lock only means another sampler call panicked; the RNG is still usable
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let ids = sample_snippet_ids(snippets, max_count, &mut *rng);

        tracing::debug!(
            available = snippets.len(),
            selected = ids.len(),
            "Sampled snippet ids"
        );
        ids
    }
}

impl Default for SnippetSampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

//! End-to-end candidate ranking: semantic search, conflict filtering,
//! response weighting.

use tracing::debug;

use refmatch_conflicts::{check_conflicts, ConflictContext, Matchers};
use refmatch_core::config::RankWeights;
use refmatch_core::constants::CANDIDATE_OVERSAMPLE;
use refmatch_core::errors::RefMatchResult;
use refmatch_core::models::{
    ConflictInput, Manuscript, ManuscriptQuery, Recommendation, Referee, ReferenceProfile,
    WebProfile,
};
use refmatch_index::ExpertiseIndex;
use refmatch_predict::features::candidate_features;
use refmatch_predict::ResponsePredictor;

/// The recommendation stage, composed over an already built (or loaded)
/// expertise index. The response predictor is optional; without one every
/// candidate gets the neutral response score.
pub struct RecommendPipeline<'a> {
    index: &'a ExpertiseIndex<'a>,
    response: Option<&'a ResponsePredictor>,
    weights: RankWeights,
}

impl<'a> RecommendPipeline<'a> {
    pub fn new(
        index: &'a ExpertiseIndex<'a>,
        response: Option<&'a ResponsePredictor>,
        weights: RankWeights,
    ) -> Self {
        Self {
            index,
            response,
            weights,
        }
    }

    /// Rank conflict-free referee candidates for a manuscript.
    ///
    /// Searches with an oversampled `k` so conflict filtering still
    /// leaves enough candidates, drops every conflicted hit, scores the
    /// survivors, and returns at most `max_candidates` in descending
    /// combined-score order.
    pub fn recommend(
        &self,
        manuscript: &Manuscript,
        max_candidates: usize,
    ) -> RefMatchResult<Vec<Recommendation>> {
        let query = ManuscriptQuery::from(manuscript);
        let hits = self
            .index
            .search(&query, max_candidates * CANDIDATE_OVERSAMPLE);

        let context = ConflictContext::from(manuscript);
        let matchers = Matchers::default();

        let mut ranked: Vec<Recommendation> = Vec::with_capacity(hits.len());
        for hit in hits {
            let conflicts = check_conflicts(&ConflictInput::from(&hit.profile), &context, &matchers);
            if !conflicts.is_empty() {
                debug!(
                    candidate = %hit.profile.name,
                    manuscript = %manuscript.id,
                    reasons = ?conflicts,
                    "candidate conflicted, dropping"
                );
                continue;
            }

            let response_score = match self.response {
                Some(predictor) if predictor.is_trained() => {
                    let features =
                        candidate_features(manuscript, &synthetic_referee(&hit.profile));
                    predictor.response_score(&features)
                }
                _ => 0.5,
            };

            let score = self.weights.semantic * f64::from(hit.semantic_similarity)
                + self.weights.response * response_score;

            ranked.push(Recommendation {
                profile: hit.profile,
                semantic_similarity: hit.semantic_similarity,
                response_score,
                score,
            });
        }

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(max_candidates);
        Ok(ranked)
    }
}

/// Re-express an indexed profile as a snapshot-shaped referee so the
/// feature extractor sees the same layout it was trained on.
fn synthetic_referee(profile: &ReferenceProfile) -> Referee {
    Referee {
        name: profile.name.clone(),
        email: profile.email.clone(),
        institution: profile.institution.clone(),
        status: String::new(),
        relevant_papers: Vec::new(),
        web_profile: Some(WebProfile {
            topics: profile.topics.clone(),
            h_index: profile.h_index,
            top_papers: profile.top_papers.clone(),
            department: profile.department.clone(),
            country: profile.country.clone(),
        }),
    }
}

//! Feature extraction shared by training and pipeline scoring.

use refmatch_core::models::{Manuscript, Referee};

/// Width of one feature row.
pub const FEATURE_DIM: usize = 7;

/// Fixed-width numeric features for one (manuscript, referee) candidate.
///
/// Order: referee h-index, topic/keyword overlap count, enrichment
/// presence flag, manuscript keyword count, title word count, abstract
/// word count, author count.
pub fn candidate_features(manuscript: &Manuscript, referee: &Referee) -> [f64; FEATURE_DIM] {
    let enrichment = referee.web_profile.as_ref();

    let h_index = enrichment.map(|wp| wp.h_index).unwrap_or(0) as f64;

    let overlap = enrichment
        .map(|wp| {
            wp.topics
                .iter()
                .filter(|topic| {
                    manuscript
                        .keywords
                        .iter()
                        .any(|kw| kw.trim().eq_ignore_ascii_case(topic.trim()))
                })
                .count()
        })
        .unwrap_or(0) as f64;

    [
        h_index,
        overlap,
        if enrichment.is_some() { 1.0 } else { 0.0 },
        manuscript.keywords.len() as f64,
        manuscript.title.split_whitespace().count() as f64,
        manuscript.abstract_text.split_whitespace().count() as f64,
        manuscript.authors.len() as f64,
    ]
}

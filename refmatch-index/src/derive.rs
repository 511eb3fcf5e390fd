//! Profile derivation: one `ReferenceProfile` per (manuscript, referee).

use refmatch_core::constants::MAX_TOP_PAPERS_PER_PROFILE;
use refmatch_core::models::{Manuscript, Referee, ReferenceProfile, WebProfile};

/// Build a referee's expertise profile from their listing on one
/// manuscript.
///
/// The semantic text concatenates the referee's own enrichment (topics,
/// up to five top-paper titles) with the manuscript's keywords. A profile
/// whose text comes out empty carries no expertise signal and is dropped
/// by the caller before indexing.
pub fn derive_profile(journal: &str, manuscript: &Manuscript, referee: &Referee) -> ReferenceProfile {
    let enrichment = referee.web_profile.clone().unwrap_or_default();
    let WebProfile {
        topics,
        h_index,
        top_papers,
        department,
        country,
    } = enrichment;

    let top_papers: Vec<String> = top_papers
        .into_iter()
        .take(MAX_TOP_PAPERS_PER_PROFILE)
        .collect();

    let text = topics
        .iter()
        .chain(top_papers.iter())
        .chain(manuscript.keywords.iter())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    ReferenceProfile {
        name: referee.name.clone(),
        email: referee.email.clone(),
        institution: referee.institution.clone(),
        department,
        country,
        topics,
        h_index,
        top_papers,
        journal: journal.to_string(),
        text,
    }
}

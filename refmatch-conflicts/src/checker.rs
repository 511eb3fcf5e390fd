//! Conflict detection between one candidate and a manuscript's stakeholders.

use refmatch_core::models::{Author, ConflictInput, Manuscript, OpposedReferee};

use crate::matchers;

/// The manuscript-side inputs to a conflict check.
pub struct ConflictContext<'a> {
    pub authors: &'a [Author],
    pub opposed_referees: &'a [OpposedReferee],
    pub editors: &'a [String],
}

impl<'a> From<&'a Manuscript> for ConflictContext<'a> {
    fn from(m: &'a Manuscript) -> Self {
        Self {
            authors: &m.authors,
            opposed_referees: &m.opposed_referees,
            editors: &m.editors,
        }
    }
}

/// Injected fuzzy-comparison primitives.
///
/// Contract: deterministic and symmetric — the same input pair always
/// yields the same boolean, in either argument order.
pub struct Matchers<'a> {
    pub name_match: &'a dyn Fn(&str, &str) -> bool,
    pub institution_match: &'a dyn Fn(&str, &str) -> bool,
}

impl Default for Matchers<'static> {
    fn default() -> Self {
        Self {
            name_match: &matchers::name_match,
            institution_match: &matchers::institution_match,
        }
    }
}

/// Collect every disqualifying relationship between `candidate` and the
/// manuscript's stakeholders.
///
/// Categories are independent — all that match are appended, in category
/// order. Within a category the first match wins. Missing optional fields
/// (empty institution, email, paper lists) are "no signal for that
/// check", never an error.
pub fn check_conflicts(
    candidate: &ConflictInput,
    context: &ConflictContext<'_>,
    matchers: &Matchers<'_>,
) -> Vec<String> {
    let mut reasons = Vec::new();

    check_authorship(candidate, context, matchers, &mut reasons);
    check_opposed(candidate, context, matchers, &mut reasons);
    check_editors(candidate, context, matchers, &mut reasons);
    check_coauthorship(candidate, context, &mut reasons);

    reasons
}

/// Category 1: the candidate is an author, or shares an institution with
/// one. The institutional check runs only when no author name matched.
fn check_authorship(
    candidate: &ConflictInput,
    context: &ConflictContext<'_>,
    matchers: &Matchers<'_>,
    reasons: &mut Vec<String>,
) {
    for author in context.authors {
        if (matchers.name_match)(&candidate.name, &author.name) {
            reasons.push(format!("Is manuscript author: {}", author.name));
            return;
        }
    }

    if candidate.institution.trim().is_empty() {
        return;
    }
    for author in context.authors {
        if author.institution.trim().is_empty() {
            continue;
        }
        if (matchers.institution_match)(&candidate.institution, &author.institution) {
            reasons.push(format!(
                "Same institution as author {}: {} / {}",
                author.name, candidate.institution, author.institution
            ));
            return;
        }
    }
}

/// Category 2: author-opposed referees. An exact case-insensitive email
/// match takes priority; a fuzzy name match is attempted only when no
/// email matched.
fn check_opposed(
    candidate: &ConflictInput,
    context: &ConflictContext<'_>,
    matchers: &Matchers<'_>,
    reasons: &mut Vec<String>,
) {
    let candidate_email = candidate.email.trim().to_lowercase();
    if !candidate_email.is_empty() {
        for opposed in context.opposed_referees {
            if opposed.email.trim().to_lowercase() == candidate_email {
                reasons.push("Author-opposed referee (email match)".to_string());
                return;
            }
        }
    }

    for opposed in context.opposed_referees {
        if (matchers.name_match)(&candidate.name, &opposed.name) {
            reasons.push("Author-opposed referee (name match)".to_string());
            return;
        }
    }
}

/// Category 3: the candidate is a handling editor.
fn check_editors(
    candidate: &ConflictInput,
    context: &ConflictContext<'_>,
    matchers: &Matchers<'_>,
    reasons: &mut Vec<String>,
) {
    for editor in context.editors {
        if (matchers.name_match)(&candidate.name, editor) {
            reasons.push(format!("Is manuscript editor: {editor}"));
            return;
        }
    }
}

/// Category 4: co-authorship heuristic.
///
/// Two overlapping passes are run and both preserved, as a defense
/// against asymmetric data availability: (a) each author's enriched top
/// papers against the candidate's portal-declared `relevant_papers`, and
/// (b) the candidate's own enriched `top_papers` against each author's
/// enriched top papers. Each pass reports at most one shared title per
/// triggering author.
fn check_coauthorship(
    candidate: &ConflictInput,
    context: &ConflictContext<'_>,
    reasons: &mut Vec<String>,
) {
    for author in context.authors {
        let author_papers: Vec<String> = author
            .web_profile
            .as_ref()
            .map(|wp| wp.top_papers.iter().map(|t| normalize_title(t)).collect())
            .unwrap_or_default();
        if author_papers.is_empty() {
            continue;
        }

        if let Some(shared) = candidate
            .relevant_papers
            .iter()
            .find(|t| author_papers.contains(&normalize_title(t)))
        {
            reasons.push(format!(
                "Recent co-author with {}: {}",
                author.name,
                shared.trim()
            ));
        }
    }

    for author in context.authors {
        let author_papers: Vec<String> = author
            .web_profile
            .as_ref()
            .map(|wp| wp.top_papers.iter().map(|t| normalize_title(t)).collect())
            .unwrap_or_default();
        if author_papers.is_empty() {
            continue;
        }

        if let Some(shared) = candidate
            .top_papers
            .iter()
            .find(|t| author_papers.contains(&normalize_title(t)))
        {
            reasons.push(format!(
                "Shares publication with {}: {}",
                author.name,
                shared.trim()
            ));
        }
    }
}

/// Exact case-insensitive title equality key.
fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

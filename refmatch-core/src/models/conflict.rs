use serde::{Deserialize, Serialize};

use super::profile::ReferenceProfile;

/// The conflict checker's view of one candidate referee.
///
/// `relevant_papers` are portal-declared publications; `top_papers` come
/// from citation-graph enrichment. The two paper lists feed two distinct
/// co-authorship checks, which tolerate either list being empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConflictInput {
    pub name: String,
    pub email: String,
    pub institution: String,
    pub relevant_papers: Vec<String>,
    pub top_papers: Vec<String>,
}

impl From<&ReferenceProfile> for ConflictInput {
    /// Profiles carry enrichment papers only; `relevant_papers` stays
    /// empty and callers with portal data may fill it in.
    fn from(p: &ReferenceProfile) -> Self {
        Self {
            name: p.name.clone(),
            email: p.email.clone(),
            institution: p.institution.clone(),
            relevant_papers: Vec::new(),
            top_papers: p.top_papers.clone(),
        }
    }
}

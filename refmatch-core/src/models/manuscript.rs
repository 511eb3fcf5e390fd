//! Snapshot records as produced by the out-of-scope extraction subsystem.
//!
//! Every field the extractor may omit carries `#[serde(default)]` so a
//! minimal snapshot still parses; absence downstream means "no signal",
//! never an error.

use serde::{Deserialize, Serialize};

/// One extraction-snapshot file: the point-in-time state of a journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub manuscripts: Vec<Manuscript>,
}

/// A manuscript with its stakeholders as captured by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manuscript {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub referees: Vec<Referee>,
    /// Author-nominated reviewer exclusions.
    #[serde(default)]
    pub opposed_referees: Vec<OpposedReferee>,
    /// Handling editors by name.
    #[serde(default)]
    pub editors: Vec<String>,
    /// Final editorial decision, when recorded. Label source for the
    /// outcome predictor.
    #[serde(default)]
    pub decision: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub web_profile: Option<WebProfile>,
}

/// A referee as listed on one manuscript, with their recorded response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Referee {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub institution: String,
    /// Response status: accepted / declined / agreed / pending / ...
    #[serde(default)]
    pub status: String,
    /// Publications declared on the editorial portal.
    #[serde(default)]
    pub relevant_papers: Vec<String>,
    #[serde(default)]
    pub web_profile: Option<WebProfile>,
}

/// Secondary enrichment scraped from a citation-graph profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebProfile {
    pub topics: Vec<String>,
    pub h_index: u32,
    pub top_papers: Vec<String>,
    pub department: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpposedReferee {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

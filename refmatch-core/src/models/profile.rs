use serde::{Deserialize, Serialize};

/// One referee's expertise profile — one per unique person in the corpus.
///
/// Owned and rebuilt wholesale by each `ExpertiseIndex::build`; never
/// mutated in place. A profile whose derived `text` is empty is discarded
/// before indexing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceProfile {
    pub name: String,
    /// Identity key when present; may be empty.
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub h_index: u32,
    #[serde(default)]
    pub top_papers: Vec<String>,
    /// Journal code the profile was sourced from.
    #[serde(default)]
    pub journal: String,
    /// Derived semantic blob the index embeds.
    #[serde(default)]
    pub text: String,
}

impl ReferenceProfile {
    /// Deduplication key: lower-cased email, falling back to the
    /// normalized name when the email is absent.
    pub fn dedup_key(&self) -> String {
        let email = self.email.trim();
        if !email.is_empty() {
            return email.to_lowercase();
        }
        normalize_name(&self.name)
    }
}

/// Lower-case and collapse internal whitespace.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, email: &str) -> ReferenceProfile {
        ReferenceProfile {
            name: name.to_string(),
            email: email.to_string(),
            institution: String::new(),
            department: String::new(),
            country: String::new(),
            topics: vec![],
            h_index: 0,
            top_papers: vec![],
            journal: String::new(),
            text: String::new(),
        }
    }

    #[test]
    fn email_key_is_lowercased() {
        let p = profile("Jane Doe", "Jane.Doe@Uni.EDU");
        assert_eq!(p.dedup_key(), "jane.doe@uni.edu");
    }

    #[test]
    fn name_fallback_collapses_whitespace() {
        let p = profile("  Jane   DOE ", "");
        assert_eq!(p.dedup_key(), "jane doe");
    }

    #[test]
    fn whitespace_email_falls_back_to_name() {
        let p = profile("Jane Doe", "   ");
        assert_eq!(p.dedup_key(), "jane doe");
    }
}

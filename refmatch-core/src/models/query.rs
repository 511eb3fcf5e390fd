use serde::{Deserialize, Serialize};

use super::manuscript::Manuscript;

/// A manuscript as seen at query time: just the content fields that
/// drive expertise matching. Ephemeral — constructed per search call,
/// never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManuscriptQuery {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ManuscriptQuery {
    /// The query string fed to the embedding engine.
    pub fn search_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(2 + self.keywords.len());
        if !self.title.trim().is_empty() {
            parts.push(self.title.trim());
        }
        if !self.abstract_text.trim().is_empty() {
            parts.push(self.abstract_text.trim());
        }
        for kw in &self.keywords {
            if !kw.trim().is_empty() {
                parts.push(kw.trim());
            }
        }
        parts.join(" ")
    }
}

impl From<&Manuscript> for ManuscriptQuery {
    fn from(m: &Manuscript) -> Self {
        Self {
            title: m.title.clone(),
            abstract_text: m.abstract_text.clone(),
            keywords: m.keywords.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_text_joins_all_parts() {
        let q = ManuscriptQuery {
            title: "A control paper".to_string(),
            abstract_text: "We study martingales.".to_string(),
            keywords: vec!["stochastic control".to_string(), "".to_string()],
        };
        assert_eq!(
            q.search_text(),
            "A control paper We study martingales. stochastic control"
        );
    }

    #[test]
    fn empty_query_yields_empty_text() {
        assert_eq!(ManuscriptQuery::default().search_text(), "");
    }
}

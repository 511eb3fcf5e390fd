//! Deduplication policy for referee profiles.
//!
//! Identity is the lower-cased email, falling back to the normalized name
//! when the email is absent. Among duplicates the strictly greater
//! `h_index` survives; ties keep the first record encountered. The result
//! is deterministic for a given input order, not across reorderings.

use std::collections::HashMap;

use refmatch_core::models::ReferenceProfile;

/// Collapse duplicate identities, preserving first-encounter positions.
pub fn dedup_profiles(profiles: Vec<ReferenceProfile>) -> Vec<ReferenceProfile> {
    let mut by_key: HashMap<String, usize> = HashMap::with_capacity(profiles.len());
    let mut kept: Vec<ReferenceProfile> = Vec::with_capacity(profiles.len());

    for profile in profiles {
        let key = profile.dedup_key();
        match by_key.get(&key) {
            Some(&idx) => {
                if profile.h_index > kept[idx].h_index {
                    kept[idx] = profile;
                }
            }
            None => {
                by_key.insert(key, kept.len());
                kept.push(profile);
            }
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, email: &str, h_index: u32) -> ReferenceProfile {
        ReferenceProfile {
            name: name.to_string(),
            email: email.to_string(),
            institution: String::new(),
            department: String::new(),
            country: String::new(),
            topics: vec![],
            h_index,
            top_papers: vec![],
            journal: String::new(),
            text: format!("text for {name} h{h_index}"),
        }
    }

    #[test]
    fn higher_h_index_survives() {
        let deduped = dedup_profiles(vec![
            profile("Jane Doe", "jane@uni.edu", 5),
            profile("J. Doe", "Jane@Uni.edu", 10),
        ]);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].h_index, 10);
    }

    #[test]
    fn tie_keeps_first_encountered() {
        let deduped = dedup_profiles(vec![
            profile("Jane Doe", "jane@uni.edu", 7),
            profile("J. Doe", "jane@uni.edu", 7),
        ]);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].name, "Jane Doe");
    }

    #[test]
    fn name_fallback_when_email_absent() {
        let deduped = dedup_profiles(vec![
            profile(" Jane  Doe ", "", 3),
            profile("jane doe", "", 9),
            profile("John Smith", "", 1),
        ]);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].h_index, 9);
    }

    #[test]
    fn distinct_identities_all_kept_in_order() {
        let deduped = dedup_profiles(vec![
            profile("A", "a@x.org", 1),
            profile("B", "b@x.org", 2),
            profile("C", "c@x.org", 3),
        ]);
        let names: Vec<&str> = deduped.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}

//! Default fuzzy-comparison primitives.
//!
//! Both functions are deterministic and symmetric: the same input pair
//! always yields the same boolean, in either argument order. Callers with
//! better matchers (transliteration tables, institution registries)
//! inject their own through `Matchers`.

/// Case-insensitive name comparison tolerant of initials and reordering.
///
/// Two names match when their normalized token sets agree, where a
/// single-letter token (an initial) matches any full token with the same
/// first letter. "J. Doe" matches "Jane Doe"; "Doe, Jane" matches
/// "Jane Doe".
pub fn name_match(a: &str, b: &str) -> bool {
    let ta = name_tokens(a);
    let tb = name_tokens(b);
    if ta.is_empty() || tb.is_empty() {
        return false;
    }
    if ta == tb {
        return true;
    }
    if ta.len() != tb.len() {
        return false;
    }
    ta.iter().zip(&tb).all(|(x, y)| token_match(x, y))
}

/// Case-insensitive institution comparison on significant tokens.
///
/// Matches when either normalized string contains the other, or when the
/// significant-token overlap covers the shorter institution. "MIT" does
/// not match "Politecnico di Milano"; "University of Oxford" matches
/// "Oxford University".
pub fn institution_match(a: &str, b: &str) -> bool {
    let na = a.trim().to_lowercase();
    let nb = b.trim().to_lowercase();
    if na.is_empty() || nb.is_empty() {
        return false;
    }
    if na == nb || na.contains(&nb) || nb.contains(&na) {
        return true;
    }

    let ta = significant_tokens(&na);
    let tb = significant_tokens(&nb);
    if ta.is_empty() || tb.is_empty() {
        return false;
    }
    let shorter = ta.len().min(tb.len());
    let overlap = ta.iter().filter(|t| tb.contains(*t)).count();
    overlap == shorter
}

/// Sorted lowercase name tokens, punctuation stripped.
fn name_tokens(name: &str) -> Vec<String> {
    let mut tokens: Vec<String> = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect();
    tokens.sort();
    tokens
}

fn token_match(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    // An initial matches any token starting with the same letter.
    (a.len() == 1 || b.len() == 1) && a.chars().next() == b.chars().next()
}

/// Institution tokens minus connective filler.
fn significant_tokens(normalized: &str) -> Vec<&str> {
    const FILLER: &[&str] = &["of", "the", "de", "di", "at", "for", "and"];
    normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| s.len() > 1 && !FILLER.contains(s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_names_match_case_insensitively() {
        assert!(name_match("Jane Doe", "jane doe"));
        assert!(name_match("JANE DOE", "Jane Doe"));
    }

    #[test]
    fn reordered_names_match() {
        assert!(name_match("Doe, Jane", "Jane Doe"));
    }

    #[test]
    fn initials_match_full_names() {
        assert!(name_match("J. Doe", "Jane Doe"));
        assert!(name_match("Jane Doe", "J Doe"));
    }

    #[test]
    fn different_names_do_not_match() {
        assert!(!name_match("Jane Doe", "John Smith"));
        assert!(!name_match("Jane Doe", "Jane Doering"));
        assert!(!name_match("", "Jane Doe"));
    }

    #[test]
    fn name_match_is_symmetric() {
        for (a, b) in [("J. Doe", "Jane Doe"), ("Jane Doe", "John Smith")] {
            assert_eq!(name_match(a, b), name_match(b, a));
        }
    }

    #[test]
    fn institutions_match_on_token_overlap() {
        assert!(institution_match("University of Oxford", "Oxford University"));
        assert!(institution_match("MIT", "mit"));
    }

    #[test]
    fn containment_matches() {
        assert!(institution_match(
            "Columbia University",
            "Columbia University, IEOR Department"
        ));
    }

    #[test]
    fn unrelated_institutions_do_not_match() {
        assert!(!institution_match("MIT", "Politecnico di Milano"));
        assert!(!institution_match("", "MIT"));
    }

    #[test]
    fn institution_match_is_symmetric() {
        for (a, b) in [
            ("University of Oxford", "Oxford University"),
            ("MIT", "Politecnico di Milano"),
        ] {
            assert_eq!(institution_match(a, b), institution_match(b, a));
        }
    }
}

//! Label normalization for the two predictors.
//!
//! Unmappable values yield `None` and the sample is skipped as
//! unlabeled, never invented.

/// Normalize a referee response status into one of
/// {accepted, declined, agreed}.
pub fn response_label(status: &str) -> Option<&'static str> {
    match status.trim().to_lowercase().as_str() {
        "accepted" => Some("accepted"),
        "declined" => Some("declined"),
        "agreed" => Some("agreed"),
        _ => None,
    }
}

/// Normalize an editorial decision into one of {accept, reject, revise}.
///
/// Revision wording is checked first so "accept with major revision"
/// maps to `revise`, not `accept`.
pub fn outcome_label(decision: &str) -> Option<&'static str> {
    let normalized = decision.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    if normalized.contains("revis") {
        Some("revise")
    } else if normalized.contains("accept") {
        Some("accept")
    } else if normalized.contains("reject") || normalized.contains("decline") {
        Some("reject")
    } else {
        None
    }
}

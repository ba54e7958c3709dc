//! Category scoping rule

/// Checks whether a discovered category path belongs to the crawl's root
///
/// The path is split on `/` and its third segment (the first category
/// segment after the locale, e.g. `Business` in `/en/Business/Accounting`)
/// must equal `root_name` exactly. Deeper segments are not compared.
///
/// Paths with fewer than three segments are rejected rather than treated
/// as an error.
///
/// # Examples
///
/// ```
/// use canopy_crawler::category::is_descendant;
///
/// assert!(is_descendant("/en/Business/Accounting", "Business"));
/// assert!(!is_descendant("/en/Shopping/Clothing", "Business"));
/// assert!(!is_descendant("/en", "Business"));
/// ```
pub fn is_descendant(candidate: &str, root_name: &str) -> bool {
    let accepted = candidate
        .split('/')
        .nth(2)
        .is_some_and(|segment| segment == root_name);

    if !accepted && candidate.split('/').count() < 3 {
        tracing::debug!("Rejecting malformed category path: {:?}", candidate);
    }

    accepted
}

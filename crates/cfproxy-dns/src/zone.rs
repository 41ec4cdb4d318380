//! Zone candidate resolution
//!
//! CFProxy does not expose a zone listing, so the zone that owns a domain has
//! to be guessed. Candidates are produced by stripping labels from the left,
//! most specific first.

/// Produce the base domain guesses for a domain, most specific first
///
/// `challenge.example.co.uk` yields `challenge.example.co.uk`,
/// `example.co.uk`, `co.uk` and `uk`. A single trailing root dot is ignored.
pub fn base_domain_guesses(domain: &str) -> Vec<String> {
    let domain = domain.strip_suffix('.').unwrap_or(domain);

    let mut guesses = vec![domain.to_string()];
    let mut current = domain;
    while let Some(pos) = current.find('.') {
        current = &current[pos + 1..];
        guesses.push(current.to_string());
    }
    guesses
}

/// Strip a leading wildcard label
///
/// `*.example.com` becomes `example.com`; other names are returned as-is.
pub fn normalize_domain(domain: &str) -> &str {
    domain.strip_prefix("*.").unwrap_or(domain)
}

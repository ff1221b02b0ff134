use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{PacError, Result};
use crate::types::ParsedDomain;

/// Why a candidate domain was kept out of the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No labels survived normalization
    Empty,
    /// The domain itself is in the exclusion set
    Excluded,
    /// An ancestor of the domain is in the exclusion set
    ExcludedAncestor,
    /// Every label is purely decimal digits (IP-literal false positive)
    Numeric,
}

/// Domains already known to be dead or handled elsewhere.
///
/// A domain in the set excludes itself and everything underneath it.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    domains: HashSet<ParsedDomain>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from newline-separated raw domains. Blank lines and entries
    /// that normalize to nothing are skipped.
    pub fn from_lines(text: &str) -> Self {
        let mut set = Self::new();
        for line in text.lines() {
            set.insert(ParsedDomain::parse(line.trim()));
        }
        set
    }

    /// Build from a file of newline-separated raw domains.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            PacError::ParseError(format!(
                "Failed to read exclusion file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::from_lines(&text))
    }

    /// Add a domain. Empty domains are ignored.
    pub fn insert(&mut self, domain: ParsedDomain) {
        if !domain.is_empty() {
            self.domains.insert(domain);
        }
    }

    /// Exact membership.
    pub fn contains(&self, domain: &ParsedDomain) -> bool {
        self.domains.contains(domain)
    }

    /// Exact or ancestor membership: true when the set would exclude
    /// `domain` or any domain underneath it.
    pub fn covers(&self, domain: &ParsedDomain) -> bool {
        self.contains(domain) || domain.ancestors().any(|a| self.contains(&a))
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Screen a candidate against the working-set rules.
///
/// Returns `None` when the domain is accepted, otherwise the reason it was
/// rejected. Rejection is never an error; callers record a diagnostic and
/// move on.
pub fn screen(domain: &ParsedDomain, exclusions: &ExclusionSet) -> Option<RejectReason> {
    if domain.is_empty() {
        return Some(RejectReason::Empty);
    }
    if exclusions.contains(domain) {
        return Some(RejectReason::Excluded);
    }
    if domain.ancestors().any(|a| exclusions.contains(&a)) {
        return Some(RejectReason::ExcludedAncestor);
    }
    if domain.is_numeric() {
        return Some(RejectReason::Numeric);
    }
    None
}

use std::collections::{BTreeMap, BTreeSet};

use crate::types::ParsedDomain;

/// One node of the compressed decision tree.
///
/// The consuming runtime asks "is this domain, or any subdomain of it, in a
/// list", so a terminal absorbs every domain underneath its suffix, and a
/// group dispatches on the next label down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainNode {
    /// This suffix, and everything under it, matches. Carries the full
    /// matched suffix: after chain collapsing a terminal may sit under a
    /// group key several labels shorter than the suffix itself.
    Terminal(ParsedDomain),
    /// Dispatch over one-label-longer prefixes. Ordered so regenerated
    /// output is stable for identical input.
    Group(BTreeMap<ParsedDomain, DomainNode>),
}

impl DomainNode {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DomainNode::Terminal(_))
    }

    /// All terminal suffixes reachable from this node, in tree order.
    pub fn flatten(&self) -> BTreeSet<ParsedDomain> {
        let mut out = BTreeSet::new();
        self.collect_terminals(&mut out);
        out
    }

    fn collect_terminals(&self, out: &mut BTreeSet<ParsedDomain>) {
        match self {
            DomainNode::Terminal(suffix) => {
                out.insert(suffix.clone());
            }
            DomainNode::Group(children) => {
                for child in children.values() {
                    child.collect_terminals(out);
                }
            }
        }
    }

    /// Would the generated PAC logic route `domain` through this node?
    ///
    /// Mirrors the rendered dispatch exactly: a group guard checks the
    /// child key, then the child decides.
    pub fn covers(&self, domain: &ParsedDomain) -> bool {
        match self {
            DomainNode::Terminal(suffix) => domain.starts_with(suffix),
            DomainNode::Group(children) => children
                .iter()
                .any(|(key, child)| domain.starts_with(key) && child.covers(domain)),
        }
    }
}

/// Build the minimal decision tree for a deduplicated domain set.
///
/// Every domain in the input is reachable as (or under) a terminal, no
/// group has a single entry, and a domain equal to a shared prefix absorbs
/// everything below it.
pub fn compress(domains: &BTreeSet<ParsedDomain>) -> DomainNode {
    let sorted: Vec<&ParsedDomain> = domains.iter().collect();
    build_level(0, &sorted)
}

/// Recursive grouping over one level of the tree.
///
/// `run` is sorted and every member shares its first `prefix_len` labels.
/// Splits the run into contiguous sub-runs sharing a one-label-longer
/// prefix and recurses into each.
fn build_level(prefix_len: usize, run: &[&ParsedDomain]) -> DomainNode {
    debug_assert!(run.windows(2).all(|w| w[0] <= w[1]), "input must be sorted");

    // A member equal to the parent prefix absorbs the whole run; sort
    // order guarantees it comes first.
    if let Some(first) = run.first() {
        if first.len() == prefix_len {
            return DomainNode::Terminal((*first).clone());
        }
    }

    let mut children = BTreeMap::new();
    let mut start = 0;
    while start < run.len() {
        let key = run[start].prefix(prefix_len + 1);
        let mut end = start + 1;
        while end < run.len() && run[end].starts_with(&key) {
            end += 1;
        }
        children.insert(key, build_level(prefix_len + 1, &run[start..end]));
        start = end;
    }

    // A level with a single entry adds no decision; collapse the chain by
    // returning the entry itself.
    if children.len() == 1 {
        return children.into_values().next().unwrap();
    }

    DomainNode::Group(children)
}

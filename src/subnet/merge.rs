use std::collections::BTreeSet;

use ipnet::{IpNet, Ipv4Net, Ipv6Net};

/// Merged, per-version network groups at maximal compression.
///
/// Entries are sorted by (base address, prefix length), pairwise
/// non-overlapping, and no two adjacent entries are sibling halves of a
/// common supernet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupernetGroup {
    v4: Vec<Ipv4Net>,
    v6: Vec<Ipv6Net>,
}

impl SupernetGroup {
    /// Merge a deduplicated network set, per IP version.
    ///
    /// Repeatedly collapses sibling networks into their parent supernet
    /// wherever they exactly tile it, and drops networks already contained
    /// in an earlier entry. Empty input yields an empty group.
    pub fn merge(networks: &BTreeSet<IpNet>) -> Self {
        let mut v4 = Vec::new();
        let mut v6 = Vec::new();
        for net in networks {
            match net {
                IpNet::V4(_) => v4.push(*net),
                IpNet::V6(_) => v6.push(*net),
            }
        }

        // BTreeSet iteration is already (address, prefix-length) sorted
        // within each version.
        Self {
            v4: merge_sorted(v4)
                .into_iter()
                .filter_map(|net| match net {
                    IpNet::V4(net) => Some(net),
                    IpNet::V6(_) => None,
                })
                .collect(),
            v6: merge_sorted(v6)
                .into_iter()
                .filter_map(|net| match net {
                    IpNet::V6(net) => Some(net),
                    IpNet::V4(_) => None,
                })
                .collect(),
        }
    }

    /// Merged IPv4 networks in ascending order.
    pub fn v4(&self) -> &[Ipv4Net] {
        &self.v4
    }

    /// Merged IPv6 networks in ascending order.
    pub fn v6(&self) -> &[Ipv6Net] {
        &self.v6
    }

    pub fn len(&self) -> usize {
        self.v4.len() + self.v6.len()
    }

    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }
}

/// Greedy single-pass merge over sorted networks of one IP version.
///
/// After each step the accumulator is sorted and pairwise non-mergeable;
/// cascading upward keeps that invariant when a merge creates a new
/// sibling pair at the shorter prefix.
fn merge_sorted(networks: Vec<IpNet>) -> Vec<IpNet> {
    debug_assert!(
        networks.windows(2).all(|w| w[0] <= w[1]),
        "input must be sorted"
    );

    let mut merged: Vec<IpNet> = Vec::with_capacity(networks.len());

    for mut net in networks {
        // Already covered by the last entry (sort order puts supernets
        // ahead of their subnets).
        if let Some(last) = merged.last() {
            if last.contains(&net) {
                continue;
            }
        }

        // Cascade: while the last entry is the lower sibling of `net`,
        // replace both with their common supernet.
        while let Some(&last) = merged.last() {
            match sibling_supernet(last, net) {
                Some(supernet) => {
                    merged.pop();
                    net = supernet;
                }
                None => break,
            }
        }

        merged.push(net);
    }

    merged
}

/// The common parent when `low` and `high` are exactly its two halves.
/// Overlapping-but-not-tiling networks never qualify.
fn sibling_supernet(low: IpNet, high: IpNet) -> Option<IpNet> {
    if low == high || low.prefix_len() != high.prefix_len() {
        return None;
    }

    let supernet = high.supernet()?;
    if low.supernet()? == supernet {
        Some(supernet)
    } else {
        None
    }
}

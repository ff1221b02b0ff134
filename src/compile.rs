use std::collections::BTreeSet;

use ipnet::IpNet;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{compress, screen, DomainNode, ExclusionSet, RejectReason};
use crate::source::{hostname_from_url, SourceTable};
use crate::subnet::{classify, parse_network, SupernetGroup};
use crate::types::ParsedDomain;

/// Counters from one compile run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompileStats {
    /// Unique domains that entered the compressor
    pub domains: usize,
    /// Domain tokens dropped by the working-set rules
    pub domains_rejected: usize,
    /// URL tokens with no extractable hostname
    pub urls_rejected: usize,
    /// Unique networks that entered the merger
    pub networks: usize,
    /// Network tokens dropped as malformed or special-purpose
    pub networks_rejected: usize,
}

/// A fully compressed policy, ready for rendering.
#[derive(Debug, Clone)]
pub struct CompiledPolicy {
    /// Root of the domain decision tree
    pub domains: DomainNode,
    /// Merged network prefixes per IP version
    pub networks: SupernetGroup,
    /// Run counters
    pub stats: CompileStats,
}

/// Compile a record table into a policy.
///
/// Both pipelines materialize their full working set first (compression
/// and merging need global sort order and duplicate knowledge), then run
/// to completion. Per-record problems surface as diagnostics, never as
/// errors.
pub fn compile(table: &SourceTable, exclusions: &ExclusionSet) -> CompiledPolicy {
    let mut stats = CompileStats::default();
    let mut domains: BTreeSet<ParsedDomain> = BTreeSet::new();
    let mut networks: BTreeSet<IpNet> = BTreeSet::new();

    for record in table.records() {
        for raw in &record.domains {
            add_domain(raw, record.line, exclusions, &mut domains, &mut stats);
        }

        for raw in &record.urls {
            match hostname_from_url(raw) {
                Some(host) => {
                    add_domain(&host, record.line, exclusions, &mut domains, &mut stats)
                }
                None => {
                    warn!(line = record.line, url = %raw, "no hostname in URL");
                    stats.urls_rejected += 1;
                }
            }
        }

        for raw in &record.ips {
            add_network(raw, record.line, &mut networks, &mut stats);
        }
    }

    stats.domains = domains.len();
    stats.networks = networks.len();
    info!(
        domains = stats.domains,
        networks = stats.networks,
        "collected working set"
    );

    CompiledPolicy {
        domains: compress(&domains),
        networks: SupernetGroup::merge(&networks),
        stats,
    }
}

fn add_domain(
    raw: &str,
    line: usize,
    exclusions: &ExclusionSet,
    domains: &mut BTreeSet<ParsedDomain>,
    stats: &mut CompileStats,
) {
    let parsed = ParsedDomain::parse(raw);
    match screen(&parsed, exclusions) {
        None => {
            domains.insert(parsed);
        }
        Some(RejectReason::Empty) => {
            warn!(line, domain = %raw, "empty domain name");
            stats.domains_rejected += 1;
        }
        Some(reason) => {
            debug!(line, domain = %raw, ?reason, "domain filtered out");
            stats.domains_rejected += 1;
        }
    }
}

fn add_network(
    raw: &str,
    line: usize,
    networks: &mut BTreeSet<IpNet>,
    stats: &mut CompileStats,
) {
    let net = match parse_network(raw) {
        Ok(net) => net,
        Err(e) => {
            warn!(line, %e, "skipping malformed network");
            stats.networks_rejected += 1;
            return;
        }
    };

    if let Some(class) = classify(&net) {
        debug!(line, network = %net, ?class, "network filtered out");
        stats.networks_rejected += 1;
        return;
    }

    networks.insert(net);
}

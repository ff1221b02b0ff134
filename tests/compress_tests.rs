//! Integration tests for domain compression over a realistic blocklist slice.

use std::collections::BTreeSet;

use pac_engine_r::domain::{compress, DomainNode, ExclusionSet};
use pac_engine_r::types::ParsedDomain;
use pac_engine_r::{compile, render_pac, RenderOptions, SourceTable};

/// Blocklist slice: betting/casino mirrors and tracker hosts, with the
/// suffix clustering real dumps show.
fn blocklist_domains() -> Vec<&'static str> {
    vec![
        "azino777.net",
        "azino777.org",
        "bestcasino.bet",
        "betwinner.mobi",
        "casino-x.com",
        "m.casino-x.com",
        "cdn.trackpixel.net",
        "js.trackpixel.net",
        "pixel.trackpixel.net",
        "fonbet.ru",
        "line.fonbet.ru",
        "live.fonbet.ru",
        "joycasino.com",
        "www.joycasino.com",
        "kinozal.tv",
        "mirror1.nnmclub.to",
        "mirror2.nnmclub.to",
        "rutracker.org",
        "static.rutracker.org",
        "*.slotclub.top",
        "vulkan-casino.com",
        "mirror.vulkan-club.net",
        "vulkan-club.net",
    ]
}

fn blocklist_set() -> BTreeSet<ParsedDomain> {
    blocklist_domains()
        .iter()
        .map(|raw| ParsedDomain::parse(raw))
        .collect()
}

/// No group anywhere in the tree has fewer than two entries.
fn assert_minimal(node: &DomainNode) {
    if let DomainNode::Group(children) = node {
        assert_ne!(children.len(), 1, "single-entry group survived collapsing");
        for child in children.values() {
            assert_minimal(child);
        }
    }
}

#[test]
fn test_blocklist_compression_covers_every_domain() {
    let tree = compress(&blocklist_set());

    for raw in blocklist_domains() {
        let domain = ParsedDomain::parse(raw);
        assert!(tree.covers(&domain), "{} not covered", raw);

        let sub = ParsedDomain::parse(&format!("m1.{}", domain));
        assert!(tree.covers(&sub), "subdomain of {} not covered", raw);
    }
}

#[test]
fn test_blocklist_compression_has_no_false_positives() {
    let tree = compress(&blocklist_set());

    for raw in [
        "example.com",
        "casino-y.com",
        "trackpixel.net",
        "fakerutracker.org",
        "ru",
        "net",
        "club.to",
    ] {
        assert!(
            !tree.covers(&ParsedDomain::parse(raw)),
            "{} covered but never listed",
            raw
        );
    }
}

#[test]
fn test_blocklist_compression_is_minimal() {
    assert_minimal(&compress(&blocklist_set()));
}

#[test]
fn test_listed_parent_absorbs_its_mirrors() {
    let tree = compress(&blocklist_set());
    let terminals = tree.flatten();

    // rutracker.org is listed, so its static host never becomes a
    // separate terminal; same for the vulkan-club mirror
    assert!(terminals.contains(&ParsedDomain::parse("rutracker.org")));
    assert!(!terminals.contains(&ParsedDomain::parse("static.rutracker.org")));
    assert!(!terminals.contains(&ParsedDomain::parse("mirror.vulkan-club.net")));

    // The trackpixel hosts have no listed parent and all survive
    assert!(terminals.contains(&ParsedDomain::parse("cdn.trackpixel.net")));
    assert!(terminals.contains(&ParsedDomain::parse("js.trackpixel.net")));
    assert!(terminals.contains(&ParsedDomain::parse("pixel.trackpixel.net")));
}

#[test]
fn test_recompression_is_idempotent() {
    let tree = compress(&blocklist_set());
    let reparsed = compress(&tree.flatten());
    assert_eq!(tree, reparsed);
}

#[test]
fn test_compression_is_deterministic() {
    let forward = compress(&blocklist_set());

    let mut reversed_input: Vec<&str> = blocklist_domains();
    reversed_input.reverse();
    let backward = compress(
        &reversed_input
            .iter()
            .map(|raw| ParsedDomain::parse(raw))
            .collect(),
    );

    assert_eq!(forward, backward);
}

#[test]
fn test_exclusions_remove_whole_clusters() {
    let dump = format!(
        "Updated on 2024-06-01\n;{};\n",
        blocklist_domains().join(" | ")
    );
    let exclusions = ExclusionSet::from_lines("fonbet.ru\ntrackpixel.net\n");

    let policy = compile(&SourceTable::parse(&dump), &exclusions);

    assert!(!policy.domains.covers(&ParsedDomain::parse("fonbet.ru")));
    assert!(!policy.domains.covers(&ParsedDomain::parse("live.fonbet.ru")));
    assert!(!policy
        .domains
        .covers(&ParsedDomain::parse("cdn.trackpixel.net")));
    assert!(policy.domains.covers(&ParsedDomain::parse("kinozal.tv")));
    // fonbet.ru + 2 subdomains + 3 trackpixel hosts
    assert_eq!(policy.stats.domains_rejected, 6);
}

#[test]
fn test_rendered_pac_lists_every_terminal() {
    let dump = format!(
        "Updated on 2024-06-01\n;{};\n",
        blocklist_domains().join(" | ")
    );
    let policy = compile(&SourceTable::parse(&dump), &ExclusionSet::new());
    let pac = render_pac(&policy, &RenderOptions::new("PROXY 10.8.0.1:3128")).unwrap();

    for terminal in policy.domains.flatten() {
        let literal = format!("\"{}\"", terminal.to_match_pattern());
        assert!(
            pac.contains(&literal),
            "terminal {} missing from PAC output",
            terminal
        );
    }

    assert!(pac.contains("function FindProxyForURL(url, host)"));
    assert!(pac.contains("return \"PROXY 10.8.0.1:3128\";"));
}

#[test]
fn test_wildcard_entry_matches_like_suffix() {
    // "*.slotclub.top" normalizes to slotclub.top and covers the domain
    // itself plus everything under it
    let tree = compress(&blocklist_set());
    assert!(tree.covers(&ParsedDomain::parse("slotclub.top")));
    assert!(tree.covers(&ParsedDomain::parse("promo.slotclub.top")));
}

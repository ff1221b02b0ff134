//! PAC Engine - a PAC (Proxy Auto-Config) generation engine for Rust
//!
//! This library turns a flat dump of blocked network identifiers (domain
//! names, URLs, IP subnets) into a compact PAC script:
//! - Domain suffix compression into a minimal nested decision tree
//! - CIDR merging into the smallest equivalent covering set
//! - Exclusion lists (a listed domain removes itself and everything below)
//! - Screening of numeric pseudo-domains and special-purpose networks
//! - Deterministic output for identical input
//!
//! # Example
//!
//! ```rust
//! use pac_engine_r::{compile, render_pac, ExclusionSet, RenderOptions, SourceTable};
//!
//! let dump = "Updated on 2024-06-01 12:00:00\n\
//!     ;example.com | cdn.example.com;http://media.example.net/stream\n\
//!     64.233.160.0/25 | 64.233.160.128/25;tracker.example.org;";
//!
//! // Parse the dump (three ';'-separated columns: IPs, domains, URLs)
//! let table = SourceTable::parse(dump);
//!
//! // Compile: normalize, screen, dedupe, compress, merge
//! let policy = compile(&table, &ExclusionSet::new());
//! assert_eq!(policy.networks.v4()[0].to_string(), "64.233.160.0/24");
//!
//! // Render the PAC script
//! let pac = render_pac(&policy, &RenderOptions::new("PROXY 127.0.0.1:3128")).unwrap();
//! assert!(pac.contains("function FindProxyForURL(url, host)"));
//! ```
//!
//! # Input format
//!
//! | Column | Content | Example |
//! |--------|---------|---------|
//! | 1 | IP addresses / CIDR networks | `203.0.113.0/24 \| 198.51.100.7` |
//! | 2 | Domain names | `example.com \| *.example.net` |
//! | 3 | URLs (hostname is extracted) | `http://media.example.org/x` |
//!
//! The first line of a dump is an update banner and is skipped. Columns
//! hold zero or more values separated by `" | "`. Malformed tokens are
//! reported through `tracing` and skipped; no single bad record aborts a
//! run.

pub mod compile;
pub mod domain;
pub mod error;
pub mod render;
pub mod source;
pub mod subnet;
pub mod types;

// Re-export commonly used items
pub use compile::{compile, CompileStats, CompiledPolicy};
pub use domain::{compress, DomainNode, ExclusionSet, RejectReason};
pub use error::{PacError, Result};
pub use render::{render_pac, RenderOptions};
pub use source::{hostname_from_url, SourceRecord, SourceTable};
pub use subnet::{classify, parse_network, NetworkClass, SupernetGroup};
pub use types::ParsedDomain;

/// One-shot convenience: parse a dump and an exclusion list, compile, and
/// render the PAC script.
pub fn generate(dump: &str, exclusions: &str, options: &RenderOptions) -> Result<String> {
    let table = SourceTable::parse(dump);
    let exclusions = ExclusionSet::from_lines(exclusions);
    let policy = compile(&table, &exclusions);
    render_pac(&policy, options)
}

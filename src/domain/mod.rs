//! Domain pipeline: working-set screening and suffix-tree compression.
//!
//! Raw domain strings are normalized into reverse-label form
//! ([`crate::types::ParsedDomain`]), screened against the exclusion rules,
//! and compressed into a minimal nested decision tree.
//!
//! ## Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use pac_engine_r::domain::compress;
//! use pac_engine_r::types::ParsedDomain;
//!
//! let domains: BTreeSet<_> = ["a.b.c", "x.b.c"]
//!     .iter()
//!     .map(|raw| ParsedDomain::parse(raw))
//!     .collect();
//!
//! let tree = compress(&domains);
//! assert!(tree.covers(&ParsedDomain::parse("deep.a.b.c")));
//! assert!(!tree.covers(&ParsedDomain::parse("b.c")));
//! ```

mod compress;
mod filter;

pub use compress::{compress, DomainNode};
pub use filter::{screen, ExclusionSet, RejectReason};

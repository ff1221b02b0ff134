//! Subnet pipeline: parsing, special-purpose screening, and supernet
//! merging.
//!
//! Raw address tokens become canonical [`ipnet::IpNet`] values, networks in
//! special-purpose ranges are screened out, and the survivors are merged
//! into the smallest equivalent covering set per IP version.
//!
//! ## Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use pac_engine_r::subnet::{parse_network, SupernetGroup};
//!
//! let networks: BTreeSet<_> = ["64.233.160.0/25", "64.233.160.128/25"]
//!     .iter()
//!     .map(|raw| parse_network(raw).unwrap())
//!     .collect();
//!
//! let merged = SupernetGroup::merge(&networks);
//! assert_eq!(merged.v4().len(), 1);
//! assert_eq!(merged.v4()[0].to_string(), "64.233.160.0/24");
//! ```

mod filter;
mod merge;

pub use filter::{classify, parse_network, NetworkClass};
pub use merge::SupernetGroup;

use std::net::IpAddr;

use ipnet::IpNet;
use once_cell::sync::Lazy;

use crate::error::{PacError, Result};

/// Address class that keeps a network out of the merged set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkClass {
    Multicast,
    Private,
    Loopback,
    LinkLocal,
    Unspecified,
    Reserved,
}

/// Special-purpose IPv4 ranges, checked in order (first match wins).
static SPECIAL_V4: Lazy<Vec<(IpNet, NetworkClass)>> = Lazy::new(|| {
    [
        ("0.0.0.0/32", NetworkClass::Unspecified),
        ("0.0.0.0/8", NetworkClass::Reserved),
        ("10.0.0.0/8", NetworkClass::Private),
        ("100.64.0.0/10", NetworkClass::Reserved),
        ("127.0.0.0/8", NetworkClass::Loopback),
        ("169.254.0.0/16", NetworkClass::LinkLocal),
        ("172.16.0.0/12", NetworkClass::Private),
        ("192.0.2.0/24", NetworkClass::Reserved),
        ("192.168.0.0/16", NetworkClass::Private),
        ("198.18.0.0/15", NetworkClass::Reserved),
        ("198.51.100.0/24", NetworkClass::Reserved),
        ("203.0.113.0/24", NetworkClass::Reserved),
        ("224.0.0.0/4", NetworkClass::Multicast),
        ("240.0.0.0/4", NetworkClass::Reserved),
    ]
    .iter()
    .map(|(prefix, class)| {
        (
            prefix
                .parse()
                .expect("SPECIAL_V4: hardcoded prefix is invalid"),
            *class,
        )
    })
    .collect()
});

/// Special-purpose IPv6 ranges, checked in order (first match wins).
static SPECIAL_V6: Lazy<Vec<(IpNet, NetworkClass)>> = Lazy::new(|| {
    [
        ("::/128", NetworkClass::Unspecified),
        ("::1/128", NetworkClass::Loopback),
        ("::ffff:0:0/96", NetworkClass::Reserved),
        ("100::/64", NetworkClass::Reserved),
        ("2001:db8::/32", NetworkClass::Reserved),
        ("fc00::/7", NetworkClass::Private),
        ("fe80::/10", NetworkClass::LinkLocal),
        ("ff00::/8", NetworkClass::Multicast),
    ]
    .iter()
    .map(|(prefix, class)| {
        (
            prefix
                .parse()
                .expect("SPECIAL_V6: hardcoded prefix is invalid"),
            *class,
        )
    })
    .collect()
});

/// Parse a raw token as a host address or CIDR network.
///
/// Bare addresses become host networks (`/32`, `/128`). CIDR input is
/// canonicalized so the stored base address is the masked network address.
pub fn parse_network(raw: &str) -> Result<IpNet> {
    let raw = raw.trim();

    if let Ok(ip) = raw.parse::<IpAddr>() {
        return Ok(IpNet::from(ip));
    }

    raw.parse::<IpNet>()
        .map(|net| net.trunc())
        .map_err(|_| PacError::InvalidNetwork(raw.to_string()))
}

/// Classify a network by the special-purpose range its base address falls
/// in. `None` means the network is globally routable and may enter the
/// merger.
pub fn classify(net: &IpNet) -> Option<NetworkClass> {
    let table = match net {
        IpNet::V4(_) => &*SPECIAL_V4,
        IpNet::V6(_) => &*SPECIAL_V6,
    };

    let addr = net.network();
    table
        .iter()
        .find(|(range, _)| range.contains(&addr))
        .map(|(_, class)| *class)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(raw: &str) -> IpNet {
        parse_network(raw).unwrap()
    }

    #[test]
    fn test_special_tables_initialize() {
        // Force Lazy evaluation; a bad hardcoded prefix panics here with
        // the expect message rather than in the middle of a run.
        assert!(!SPECIAL_V4.is_empty());
        assert!(!SPECIAL_V6.is_empty());
    }

    #[test]
    fn test_parse_bare_ip_as_host_network() {
        assert_eq!(net("8.8.8.8").to_string(), "8.8.8.8/32");
        assert_eq!(net("2606:4700::1").to_string(), "2606:4700::1/128");
    }

    #[test]
    fn test_parse_cidr() {
        assert_eq!(net("203.0.113.0/24").to_string(), "203.0.113.0/24");
    }

    #[test]
    fn test_parse_canonicalizes_host_bits() {
        assert_eq!(net("198.51.100.77/24").to_string(), "198.51.100.0/24");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_network("300.0.0.0/8").is_err());
        assert!(parse_network("10.0.0.0/33").is_err());
        assert!(parse_network("not-an-address").is_err());
        assert!(parse_network("").is_err());
    }

    #[test]
    fn test_classify_v4() {
        assert_eq!(classify(&net("224.0.0.0/4")), Some(NetworkClass::Multicast));
        assert_eq!(classify(&net("239.1.2.0/24")), Some(NetworkClass::Multicast));
        assert_eq!(classify(&net("10.1.0.0/16")), Some(NetworkClass::Private));
        assert_eq!(classify(&net("192.168.1.0/24")), Some(NetworkClass::Private));
        assert_eq!(classify(&net("172.20.0.0/14")), Some(NetworkClass::Private));
        assert_eq!(classify(&net("127.0.0.1")), Some(NetworkClass::Loopback));
        assert_eq!(classify(&net("169.254.10.0/24")), Some(NetworkClass::LinkLocal));
        assert_eq!(classify(&net("0.0.0.0/32")), Some(NetworkClass::Unspecified));
        assert_eq!(classify(&net("0.1.0.0/16")), Some(NetworkClass::Reserved));
        assert_eq!(classify(&net("240.0.0.0/4")), Some(NetworkClass::Reserved));
        assert_eq!(classify(&net("198.18.0.0/15")), Some(NetworkClass::Reserved));
    }

    #[test]
    fn test_classify_v6() {
        assert_eq!(classify(&net("ff02::/16")), Some(NetworkClass::Multicast));
        assert_eq!(classify(&net("fd00::/8")), Some(NetworkClass::Private));
        assert_eq!(classify(&net("fe80::/64")), Some(NetworkClass::LinkLocal));
        assert_eq!(classify(&net("::1")), Some(NetworkClass::Loopback));
        assert_eq!(classify(&net("::/128")), Some(NetworkClass::Unspecified));
        assert_eq!(classify(&net("2001:db8::/48")), Some(NetworkClass::Reserved));
    }

    #[test]
    fn test_classify_global_is_none() {
        assert_eq!(classify(&net("8.8.8.0/24")), None);
        assert_eq!(classify(&net("203.0.112.0/24")), None);
        assert_eq!(classify(&net("2606:4700::/32")), None);
    }
}

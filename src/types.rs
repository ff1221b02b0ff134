use std::fmt;

/// A domain name decomposed into labels ordered top-level-first.
///
/// `"mail.example.com"` parses to `["com", "example", "mail"]`. Reversing
/// the labels turns shared suffixes into shared prefixes, so a sorted set
/// of `ParsedDomain` values keeps every domain under a common suffix
/// contiguous, which is the property the compressor's grouping pass
/// depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParsedDomain {
    labels: Vec<String>,
}

impl ParsedDomain {
    /// Parse a raw domain string into reverse-label form.
    ///
    /// Strips one leading `*.` wildcard marker, then one leading dot,
    /// lowercases, and drops empty labels. A string with no labels left
    /// yields an empty `ParsedDomain`; callers must treat that as invalid
    /// input and discard it.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix("*.").unwrap_or(raw);
        let raw = raw.strip_prefix('.').unwrap_or(raw);

        let labels = raw
            .rsplit('.')
            .filter(|part| !part.is_empty())
            .map(|part| part.to_lowercase())
            .collect();

        Self { labels }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Labels in top-level-first order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The first `n` labels as a new domain prefix.
    pub fn prefix(&self, n: usize) -> ParsedDomain {
        Self {
            labels: self.labels[..n].to_vec(),
        }
    }

    /// True when `prefix` is a (not necessarily strict) prefix of this
    /// domain, i.e. this domain equals `prefix` or sits underneath it.
    pub fn starts_with(&self, prefix: &ParsedDomain) -> bool {
        self.labels.starts_with(&prefix.labels)
    }

    /// Strict ancestor prefixes, shortest first: `a.b.c` yields `c`, `b.c`.
    pub fn ancestors(&self) -> impl Iterator<Item = ParsedDomain> + '_ {
        (1..self.labels.len()).map(|n| self.prefix(n))
    }

    /// True when every label is purely decimal digits. Guards against IP
    /// literals showing up in a domain field.
    pub fn is_numeric(&self) -> bool {
        !self.labels.is_empty()
            && self
                .labels
                .iter()
                .all(|label| label.bytes().all(|b| b.is_ascii_digit()))
    }

    /// PAC match-pattern form: a single label gets a leading dot (`.com`)
    /// so `dnsDomainIs` cannot match it mid-label, deeper suffixes render
    /// in conventional dotted order (`b.c`).
    pub fn to_match_pattern(&self) -> String {
        if self.labels.len() == 1 {
            format!(".{}", self.labels[0])
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for ParsedDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dotted = self
            .labels
            .iter()
            .rev()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", dotted)
    }
}

//! PAC script rendering.
//!
//! Walks a compiled policy and emits JavaScript source: a shared list
//! helper, one match function per domain-tree node, an optional network
//! section, and the `FindProxyForURL` entry point.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::compile::CompiledPolicy;
use crate::domain::DomainNode;
use crate::error::{PacError, Result};
use crate::subnet::SupernetGroup;

const INDENT: &str = "\t";

/// Shared helper emitted at the top of every generated script.
const HEADER: &str = "
function DnsDomainInList(domain, domainList) {
\tfor (var i = 0; i < domainList.length; i++) {
\t\tif (dnsDomainIs(domain, domainList[i])) return true;
\t}
\treturn false;
}
";

/// Rendering options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Proxy directive returned on a match, e.g. `"PROXY 127.0.0.1:3128"`.
    pub proxy: String,
    /// Directive returned when nothing matches.
    pub fallback: String,
}

impl RenderOptions {
    pub fn new(proxy: impl Into<String>) -> Self {
        Self {
            proxy: proxy.into(),
            fallback: "DIRECT".to_string(),
        }
    }

    /// Override the no-match directive.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }
}

/// Render a compiled policy as PAC JavaScript.
pub fn render_pac(policy: &CompiledPolicy, options: &RenderOptions) -> Result<String> {
    if options.proxy.trim().is_empty() {
        return Err(PacError::ConfigError(
            "empty proxy directive".to_string(),
        ));
    }

    let mut emitter = Emitter::default();
    emitter.push(HEADER);

    let domain_func = emitter.emit_node(&policy.domains);
    let network_func = if policy.networks.is_empty() {
        None
    } else {
        Some(emitter.emit_networks(&policy.networks))
    };

    emitter.entry_point(&domain_func, network_func.as_deref(), options);
    Ok(emitter.out)
}

/// Tree-walk emitter. Function identity is an explicit counter carried by
/// the emitter; generated text goes to an append-only buffer, children
/// before parents.
#[derive(Default)]
struct Emitter {
    out: String,
    counter: usize,
}

impl Emitter {
    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn next_name(&mut self) -> String {
        let name = format!("Match{}", self.counter);
        self.counter += 1;
        name
    }

    /// Emit the match function for one node; returns its name.
    ///
    /// Terminal children render into a flat `SIMPLE_YES` list; group
    /// children render as a guarded dispatch into their own function.
    /// Terminals contribute their own full suffix, never the group key
    /// they happen to sit under.
    fn emit_node(&mut self, node: &DomainNode) -> String {
        let name = self.next_name();

        let mut simple_yes: Vec<String> = Vec::new();
        let mut call_other: Vec<(String, String)> = Vec::new();

        match node {
            DomainNode::Terminal(suffix) => simple_yes.push(suffix.to_match_pattern()),
            DomainNode::Group(children) => {
                for (key, child) in children {
                    match child {
                        DomainNode::Terminal(suffix) => {
                            simple_yes.push(suffix.to_match_pattern())
                        }
                        DomainNode::Group(_) => {
                            let child_func = self.emit_node(child);
                            call_other.push((key.to_match_pattern(), child_func));
                        }
                    }
                }
            }
        }

        let _ = writeln!(self.out, "function {}(domain) {{", name);

        if !simple_yes.is_empty() {
            let _ = writeln!(self.out, "{}const SIMPLE_YES = [", INDENT);
            for (i, pattern) in simple_yes.iter().enumerate() {
                let comma = if i + 1 < simple_yes.len() { "," } else { "" };
                let _ = writeln!(self.out, "{0}{0}{1}{2}", INDENT, js_string(pattern), comma);
            }
            let _ = writeln!(self.out, "{}];", INDENT);
            let _ = writeln!(
                self.out,
                "{}if (DnsDomainInList(domain, SIMPLE_YES)) return true;",
                INDENT
            );
        }

        for (pattern, func) in &call_other {
            let _ = writeln!(
                self.out,
                "{}if (dnsDomainIs(domain, {})) return {}(domain);",
                INDENT,
                js_string(pattern),
                func
            );
        }

        let _ = writeln!(self.out, "{}return false;", INDENT);
        let _ = writeln!(self.out, "}}");
        let _ = writeln!(self.out);

        name
    }

    /// Emit the network match function over the merged supernets.
    fn emit_networks(&mut self, networks: &SupernetGroup) -> String {
        let name = "MatchNetworks".to_string();

        let _ = writeln!(self.out, "function {}(ip) {{", name);
        for net in networks.v4() {
            let _ = writeln!(
                self.out,
                "{}if (isInNet(ip, {}, {})) return true;",
                INDENT,
                js_string(&net.network().to_string()),
                js_string(&net.netmask().to_string())
            );
        }
        for net in networks.v6() {
            let _ = writeln!(
                self.out,
                "{}if (isInNetEx(ip, {})) return true;",
                INDENT,
                js_string(&net.to_string())
            );
        }
        let _ = writeln!(self.out, "{}return false;", INDENT);
        let _ = writeln!(self.out, "}}");
        let _ = writeln!(self.out);

        name
    }

    /// Emit `FindProxyForURL`. The resolve step only appears when there
    /// are networks to match; domain-only policies never pay for DNS.
    fn entry_point(&mut self, domain_func: &str, network_func: Option<&str>, options: &RenderOptions) {
        let proxy = js_string(&options.proxy);
        let fallback = js_string(&options.fallback);

        let _ = writeln!(self.out, "function FindProxyForURL(url, host) {{");
        let _ = writeln!(
            self.out,
            "{}if ({}(host)) return {};",
            INDENT, domain_func, proxy
        );
        if let Some(network_func) = network_func {
            let _ = writeln!(self.out, "{}var resolved = dnsResolve(host);", INDENT);
            let _ = writeln!(
                self.out,
                "{}if (resolved && {}(resolved)) return {};",
                INDENT, network_func, proxy
            );
        }
        let _ = writeln!(self.out, "{}return {};", INDENT, fallback);
        let _ = writeln!(self.out, "}}");
    }
}

/// A JS string literal. Generated text is embedded verbatim, so every
/// dynamic value goes through here.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("\"\""))
}

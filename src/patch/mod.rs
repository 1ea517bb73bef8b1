use crate::settings::PeerIps;

mod kv;
pub use kv::{apply_updates, KvUpdates, KvValue};

/// Rewrites the hardcoded legacy peer endpoints in config content to the
/// endpoints of the actual deployment.
///
/// The legacy `ip:port` pairs identify the consortium node slots by port:
/// 30006 is node 2, 30007 is node 4, 30008 is node 3 and 30005 is node 1.
/// All nodes now listen on a single unified p2p port.
#[derive(Debug, Clone)]
pub struct PeerRewrite {
    /// `legacy -> new` endpoint pairs, in replacement order.
    mappings: [(&'static str, String); 4],
}

impl PeerRewrite {
    /// Builds the rewrite table for the given peer IPs and unified p2p port.
    pub fn new(ips: &PeerIps, p2p_port: &str) -> Self {
        let mappings = [
            ("139.224.187.155:30006", format!("{}:{}", ips.node2, p2p_port)),
            ("47.116.165.80:30007", format!("{}:{}", ips.node4, p2p_port)),
            ("47.116.165.80:30008", format!("{}:{}", ips.node3, p2p_port)),
            ("139.224.187.155:30005", format!("{}:{}", ips.node1, p2p_port)),
        ];

        Self { mappings }
    }

    /// Replaces every occurrence of each legacy endpoint in `content`.
    /// No other substring is touched.
    pub fn apply(&self, content: &str) -> String {
        let mut out = content.to_owned();
        for (legacy, replacement) in &self.mappings {
            out = out.replace(legacy, replacement);
        }

        out
    }

    /// The `legacy -> new` endpoint pairs, in replacement order.
    pub fn mappings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.mappings.iter().map(|(legacy, new)| (*legacy, new.as_str()))
    }
}

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClusterConfig {
    pub enabled: bool,
    pub bind_address: String,
    /// Well-known discovery port peers try first.
    pub preferred_port: u16,
    /// How many consecutive ports, starting at `preferred_port`, the
    /// acceptor may fall back to when binding.
    pub port_range: u16,
    pub auto_scan: bool,
    /// Seconds before the first reconciliation run.
    pub initial_delay: u64,
    /// Seconds between reconciliation runs.
    pub scan_interval: u64,
    pub seeds: Vec<String>
}

use serde::{Deserialize, Serialize};
use crate::config::structs::cluster_config::ClusterConfig;
use crate::config::structs::network_config::NetworkConfig;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Configuration {
    pub log_level: String,
    pub network: NetworkConfig,
    pub cluster: ClusterConfig
}

//! Environment-driven node configuration.
//!
//! No config file, no layered sources — just three environment variables,
//! each with a default named here as a `const` rather than scattered across
//! call sites.

const DEFAULT_NODE_ID: &str = "fog-node-1";
const DEFAULT_LOCATION: &str = "edge-site-1";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub node_id: String,
    pub location: String,
    pub port: u16,
}

impl NodeConfig {
    pub fn from_env() -> Self {
        Self {
            node_id: std::env::var("NODE_ID").unwrap_or_else(|_| DEFAULT_NODE_ID.to_string()),
            location: std::env::var("LOCATION").unwrap_or_else(|_| DEFAULT_LOCATION.to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}

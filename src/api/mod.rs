pub mod mcp;

use crate::core::mcp::ServerInfo;
use crate::infra::config::Config;
use crate::tools::registry::ToolRegistry;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub registry: ToolRegistry,
    pub server: ServerInfo,
}

impl AppState {
    pub fn new(registry: ToolRegistry, cfg: &Config) -> Self {
        Self {
            registry,
            server: ServerInfo {
                name: cfg.server_name.clone(),
                version: cfg.server_version.clone(),
            },
        }
    }
}

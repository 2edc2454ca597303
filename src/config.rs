use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};

/// Router/pool definitions driving config-file conversion runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub routers: Vec<RouterConfig>,
}

/// Settings shared by every router.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Fallback routes inherited by every pool that does not opt out.
    #[serde(default)]
    pub append_routes: Vec<RouteEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    pub name: String,
    /// Opt all of this router's pools out of the global append routes.
    #[serde(default)]
    pub disable_append_routes: bool,
    #[serde(default)]
    pub pools: Vec<PoolConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    pub name: String,
    #[serde(default)]
    pub default_gateway: Option<String>,
    /// Routes scoped to this pool.
    #[serde(default)]
    pub common_routes: Vec<RouteEntry>,
    /// Opt this pool out of inherited routes.
    #[serde(default)]
    pub disable_append_routes: bool,
}

/// One candidate route as supplied by configuration: a pair of strings.
/// Validation happens in the merge and encode paths, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub network: String,
    pub gateway: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let mut router_names = HashSet::new();
        for router in &self.routers {
            if router.name.is_empty() {
                return Err(Error::InvalidConfig(
                    "router name must not be empty".to_string(),
                ));
            }
            if !router_names.insert(&router.name) {
                return Err(Error::InvalidConfig(format!(
                    "duplicate router name: {}",
                    router.name
                )));
            }

            let mut pool_names = HashSet::new();
            for pool in &router.pools {
                if pool.name.is_empty() {
                    return Err(Error::InvalidConfig(format!(
                        "pool name must not be empty in router {}",
                        router.name
                    )));
                }
                if !pool_names.insert(&pool.name) {
                    return Err(Error::InvalidConfig(format!(
                        "duplicate pool name {} in router {}",
                        pool.name, router.name
                    )));
                }
            }
        }
        Ok(())
    }
}

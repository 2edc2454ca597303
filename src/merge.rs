//! Route-priority merge for a single address pool.
//!
//! Candidate routes arrive in up to three tiers: an explicit default
//! gateway, the pool's own routes, and inherited append routes. The merge
//! walks the tiers in that precedence order with insert-if-absent semantics
//! keyed by the network, so the first tier to claim a network wins and the
//! wire order is simply construction order.

use tracing::warn;

use crate::config::RouteEntry;
use crate::route;

/// Merged routes for one pool, ordered and de-duplicated, as parallel
/// lists ready for [`codec::encode`](crate::codec::encode).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolRoutes {
    pub networks: Vec<String>,
    pub gateways: Vec<String>,
}

impl PoolRoutes {
    /// True if nothing survived the merge. Callers skip such pools
    /// entirely; an empty merge is intended behavior, not an error.
    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    fn insert_if_absent(&mut self, network: &str, gateway: &str) {
        if self.networks.iter().any(|existing| existing == network) {
            return;
        }
        self.networks.push(network.to_string());
        self.gateways.push(gateway.to_string());
    }
}

/// Merges one pool's candidate route tiers into a single ordered list.
///
/// Tier precedence is `default_gateway` > `common_routes` > `append_routes`.
/// The pool's own suppression flag drops both the common and append tiers;
/// the router-level flag drops only the append tier.
///
/// A present-but-invalid default gateway is reported and skipped while the
/// remaining tiers still flow. Common/append entries are skipped when their
/// gateway fails validation, or when their network is itself the default
/// route - a default route may only arrive through `default_gateway`.
pub fn merge_pool_routes(
    default_gateway: Option<&str>,
    common_routes: &[RouteEntry],
    append_routes: &[RouteEntry],
    pool_disable_append: bool,
    router_disable_append: bool,
) -> PoolRoutes {
    let mut merged = PoolRoutes::default();

    if let Some(gateway) = default_gateway {
        match route::validate_gateway(gateway) {
            Ok(_) => merged.insert_if_absent("0.0.0.0/0", gateway),
            Err(error) => warn!(%gateway, %error, "skipping default gateway"),
        }
    }

    if !pool_disable_append {
        insert_tier(&mut merged, common_routes, "common");
    }

    if !pool_disable_append && !router_disable_append {
        insert_tier(&mut merged, append_routes, "append");
    }

    merged
}

fn insert_tier(merged: &mut PoolRoutes, entries: &[RouteEntry], tier: &str) {
    for entry in entries {
        if is_default_network(&entry.network) {
            warn!(
                network = %entry.network,
                tier,
                "default routes are only accepted via default-gateway; skipping"
            );
            continue;
        }
        if let Err(error) = route::validate_gateway(&entry.gateway) {
            warn!(network = %entry.network, gateway = %entry.gateway, %error, "skipping route");
            continue;
        }
        merged.insert_if_absent(&entry.network, &entry.gateway);
    }
}

/// Matches any spelling of the default route, e.g. `0.0.0.0/0`.
fn is_default_network(network: &str) -> bool {
    matches!(route::parse_cidr(network), Ok((_, 0)))
}

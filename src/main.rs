use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use dhcproute::{codec, format, merge, Config, Error, OutputFormat, Result, RouteEntry};

#[derive(Parser)]
#[command(name = "dhcproute")]
#[command(
    author,
    version,
    about = "Convert IPv4 static routes to DHCP options 121/249 and back",
    long_about = None
)]
struct Cli {
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode network/gateway pairs into option 121/249 output.
    #[command(visible_alias = "tdo")]
    Encode {
        /// Comma-separated pairs: network1,gateway1,network2,gateway2,...
        routes: Option<String>,

        /// Add a default route (0.0.0.0/0) via this gateway.
        #[arg(long)]
        default_gateway: Option<String>,

        /// Emit JunOS output for several pools: pool1:gw1,pool2:gw2,...
        /// Each pool gets its own default route plus the shared pairs.
        #[arg(long, conflicts_with_all = ["default_gateway", "format"])]
        multi_pool: Option<String>,

        /// Output syntax: default, isc, routeros, junos, cisco or windows.
        #[arg(long, default_value = "default")]
        format: OutputFormat,

        /// Pool name for the junos and cisco formats
        /// (defaults: lan-pool for junos, mypool for cisco).
        #[arg(long)]
        pool: Option<String>,

        /// Also emit the Microsoft-specific option 249.
        #[arg(long)]
        with_option_249: bool,

        /// Suppress the warning when no default route is present.
        #[arg(long)]
        no_default_route_warning: bool,
    },

    /// Decode a hex option payload into network/gateway routes.
    #[command(visible_alias = "fdo")]
    Decode {
        /// Hex payload, with or without a leading 0x.
        payload: String,
    },

    /// Process a router/pool configuration file (JunOS output per pool).
    Convert {
        #[arg(short, long)]
        config: PathBuf,

        /// Also emit the Microsoft-specific option 249.
        #[arg(long)]
        with_option_249: bool,

        /// Suppress the warning when no default route is present.
        #[arg(long)]
        no_default_route_warning: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Encode {
            routes,
            default_gateway,
            multi_pool,
            format,
            pool,
            with_option_249,
            no_default_route_warning,
        } => {
            let pairs = match routes {
                Some(routes) => parse_route_pairs(&routes)?,
                None => Vec::new(),
            };

            let has_default_route = if let Some(pools) = multi_pool {
                encode_multi_pool(&pools, &pairs, with_option_249)?
            } else {
                let merged =
                    merge::merge_pool_routes(default_gateway.as_deref(), &pairs, &[], false, false);
                let encoded = codec::encode(&merged.networks, &merged.gateways);
                let pool = pool.unwrap_or_else(|| default_pool_name(format).to_string());
                for line in format::render(format, &encoded.hex, with_option_249, &pool) {
                    println!("{line}");
                }
                encoded.has_default_route
            };

            if !no_default_route_warning && !has_default_route {
                warn_no_default_route();
            }
            Ok(())
        }
        Commands::Decode { payload } => {
            let decoded = codec::decode(&payload)?;
            for route in &decoded.routes {
                println!("{route}");
            }
            Ok(())
        }
        Commands::Convert {
            config,
            with_option_249,
            no_default_route_warning,
        } => {
            let config = Config::load(&config)?;
            let mut has_default_route = false;

            for router in &config.routers {
                for pool in &router.pools {
                    let merged = merge::merge_pool_routes(
                        pool.default_gateway.as_deref(),
                        &pool.common_routes,
                        &config.global.append_routes,
                        pool.disable_append_routes,
                        router.disable_append_routes,
                    );
                    if merged.is_empty() {
                        continue;
                    }

                    let encoded = codec::encode(&merged.networks, &merged.gateways);
                    has_default_route |= encoded.has_default_route;
                    for line in
                        format::render(OutputFormat::Junos, &encoded.hex, with_option_249, &pool.name)
                    {
                        println!("{line}");
                    }
                }
            }

            if !no_default_route_warning && !has_default_route {
                warn_no_default_route();
            }
            Ok(())
        }
    }
}

/// Splits `network1,gateway1,network2,gateway2,...` into route entries.
fn parse_route_pairs(input: &str) -> Result<Vec<RouteEntry>> {
    let items: Vec<&str> = input.split(',').collect();
    if items.len() % 2 != 0 {
        return Err(Error::InvalidInput(
            "network and gateway pairs must be complete".to_string(),
        ));
    }
    Ok(items
        .chunks_exact(2)
        .map(|pair| RouteEntry {
            network: pair[0].to_string(),
            gateway: pair[1].to_string(),
        })
        .collect())
}

/// Encodes one JunOS option set per `pool:gateway` spec, sharing `pairs`
/// as common routes. Returns whether any pool carried a default route.
fn encode_multi_pool(pools: &str, pairs: &[RouteEntry], with_option_249: bool) -> Result<bool> {
    let mut has_default_route = false;

    for spec in pools.split(',') {
        let (pool_name, gateway) = spec.split_once(':').ok_or_else(|| {
            Error::InvalidInput(format!("invalid pool spec: {spec} (expected pool:gateway)"))
        })?;
        if pool_name.is_empty() {
            return Err(Error::InvalidInput(format!("empty pool name in spec: {spec}")));
        }

        let merged = merge::merge_pool_routes(Some(gateway), pairs, &[], false, false);
        let encoded = codec::encode(&merged.networks, &merged.gateways);
        has_default_route |= encoded.has_default_route;
        for line in format::render(OutputFormat::Junos, &encoded.hex, with_option_249, pool_name) {
            println!("{line}");
        }
    }

    Ok(has_default_route)
}

fn default_pool_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Cisco => "mypool",
        _ => "lan-pool",
    }
}

fn warn_no_default_route() {
    warn!(
        "No default route (0.0.0.0/0) specified in option 121. Clients like MikroTik \
         may ignore option 3 (Router) per RFC 3442, causing loss of Internet access."
    );
}

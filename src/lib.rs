//! # dhcproute
//!
//! Converts between human-readable IPv4 static routes and the binary
//! payload of DHCP option 121 (RFC 3442, Classless Static Routes) and
//! option 249 (the byte-identical Microsoft variant), and renders the
//! payload as configuration for several DHCP server products.
//!
//! ## Features
//!
//! - Bit-exact RFC 3442 payload encoding and decoding
//! - Three-tier route merge (default gateway > pool routes > append routes)
//!   with first-writer-wins de-duplication per network
//! - Output for generic hex, isc-dhcp-server, MikroTik RouterOS, Juniper
//!   JunOS, Cisco IOS and Windows DHCP (PowerShell)
//! - Router/pool configuration files for batch conversion
//!
//! ## Quick Start
//!
//! ```
//! use dhcproute::{codec, format, OutputFormat};
//!
//! let encoded = codec::encode(
//!     &["192.168.1.0/24".to_string()],
//!     &["10.0.0.1".to_string()],
//! );
//! assert_eq!(encoded.hex, "18c0a8010a000001");
//!
//! let lines = format::render(OutputFormat::Junos, &encoded.hex, false, "lan-pool");
//! assert_eq!(lines.len(), 1);
//! ```
//!
//! ## Architecture
//!
//! - [`codec`] - RFC 3442 payload encode/decode
//! - [`merge`] - route-priority merge for one address pool
//! - [`format`] - vendor configuration rendering
//! - [`route`] - route values and shared validation
//! - [`Config`] - router/pool configuration files

pub mod codec;
pub mod config;
pub mod error;
pub mod format;
pub mod merge;
pub mod route;

pub use codec::{Decoded, Encoded};
pub use config::{Config, GlobalConfig, PoolConfig, RouteEntry, RouterConfig};
pub use error::{Error, Result};
pub use format::OutputFormat;
pub use merge::PoolRoutes;
pub use route::{significant_octets, Route};

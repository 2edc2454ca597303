//! Error types for the route converter.
//!
//! All fallible operations in this crate return [`Result<T>`], which uses
//! the [`Error`] enum for error variants.

/// Errors that can occur while converting routes and DHCP options.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File system I/O error (config file loading).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error (config file).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A route that cannot be encoded.
    ///
    /// Covers malformed CIDR syntax, a prefix length outside `0..=32`,
    /// non-numeric or out-of-range octets, and gateways that are not
    /// usable next hops (`0.0.0.0`, `255.255.255.255`).
    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    /// An option payload that is not a hex string.
    ///
    /// Returned by [`decode`](crate::codec::decode) when the input is empty
    /// or contains non-hex characters. A payload that is valid hex but ends
    /// mid-record is *not* an error; decoding stops at the last complete
    /// record instead.
    #[error("Invalid hex option payload: {0}")]
    InvalidHex(String),

    /// Invalid router/pool configuration.
    ///
    /// Returned by [`Config::validate`](crate::Config::validate) when the
    /// configuration contains invalid values (e.g., duplicate pool names).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid command-line input.
    ///
    /// Covers incomplete network/gateway pair lists, malformed
    /// `pool:gateway` specs and unknown output format names.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A specialized Result type for route conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

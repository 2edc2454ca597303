//! Rendering of an encoded payload into DHCP server configuration syntax.
//!
//! Each target product gets one arm of a closed enum; rendering is a pure
//! function from `(payload, include 249, pool name)` to text lines. Option
//! 249 reuses the option 121 payload byte for byte, so every variant just
//! emits a second line (or field) under the Microsoft option number.

use std::fmt;
use std::str::FromStr;

use tracing::error;

use crate::codec;
use crate::error::Error;
use crate::route::significant_octets;

/// Target configuration syntax for rendered options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Bare `aggregate_opt_121 : 0x<hex>` lines.
    Default,
    /// isc-dhcp-server option declarations and decimal field lists.
    Isc,
    /// MikroTik RouterOS `/ip dhcp-server option add` commands.
    RouterOs,
    /// Juniper JunOS `set access address-assignment` commands.
    Junos,
    /// Cisco IOS `ip dhcp pool` block.
    Cisco,
    /// Windows DHCP server PowerShell commands.
    Windows,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "isc" => Ok(Self::Isc),
            "routeros" => Ok(Self::RouterOs),
            "junos" => Ok(Self::Junos),
            "cisco" => Ok(Self::Cisco),
            "windows" => Ok(Self::Windows),
            other => Err(Error::InvalidInput(format!("unknown output format: {other}"))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Default => "default",
            Self::Isc => "isc",
            Self::RouterOs => "routeros",
            Self::Junos => "junos",
            Self::Cisco => "cisco",
            Self::Windows => "windows",
        };
        write!(f, "{name}")
    }
}

/// Renders an encoded payload as configuration lines for one format.
///
/// Returns no lines for an empty payload - callers skip pools that encoded
/// to nothing. `pool_name` is consumed by the JunOS and Cisco variants and
/// ignored by the rest.
pub fn render(
    format: OutputFormat,
    payload: &str,
    with_option_249: bool,
    pool_name: &str,
) -> Vec<String> {
    if payload.is_empty() {
        return Vec::new();
    }

    match format {
        OutputFormat::Default => {
            let mut lines = vec![format!("aggregate_opt_121 : 0x{payload}")];
            if with_option_249 {
                lines.push(format!("aggregate_opt_249 : 0x{payload}"));
            }
            lines
        }
        OutputFormat::Isc => render_isc(payload, with_option_249),
        OutputFormat::RouterOs => {
            let mut lines = vec![format!(
                "/ip dhcp-server option add code=121 name=aggregate_opt_121 value=0x{payload}"
            )];
            if with_option_249 {
                lines.push(format!(
                    "/ip dhcp-server option add code=249 name=aggregate_opt_249 value=0x{payload}"
                ));
            }
            lines
        }
        OutputFormat::Junos => {
            let mut lines = vec![format!(
                "set access address-assignment pool {pool_name} family inet dhcp-attributes option 121 hex-string {payload}"
            )];
            if with_option_249 {
                lines.push(format!(
                    "set access address-assignment pool {pool_name} family inet dhcp-attributes option 249 hex-string {payload}"
                ));
            }
            lines
        }
        OutputFormat::Cisco => {
            let mut lines = vec![
                format!("ip dhcp pool {pool_name}"),
                format!(" option 121 hex {payload}"),
            ];
            if with_option_249 {
                lines.push(format!(" option 249 hex {payload}"));
            }
            lines
        }
        OutputFormat::Windows => {
            let mut lines = vec![format!(
                "Set-DhcpServerv4OptionValue -OptionId 121 -Value 0x{payload}"
            )];
            if with_option_249 {
                lines.push(format!(
                    "Set-DhcpServerv4OptionValue -OptionId 249 -Value 0x{payload}"
                ));
            }
            lines
        }
    }
}

/// isc-dhcp-server wants the RFC 3442 fields spelled out as decimal bytes.
///
/// The field list is re-derived by decoding the payload with the codec, so
/// octet counts come from [`significant_octets`] and nowhere else.
fn render_isc(payload: &str, with_option_249: bool) -> Vec<String> {
    let decoded = match codec::decode(payload) {
        Ok(decoded) => decoded,
        Err(err) => {
            error!(%payload, %err, "cannot render ISC options");
            return Vec::new();
        }
    };

    let fields: Vec<String> = decoded
        .routes
        .iter()
        .map(|route| {
            let mut parts = vec![route.prefix_len.to_string()];
            let octets = route.network.octets();
            parts.extend(
                octets[..significant_octets(route.prefix_len)]
                    .iter()
                    .map(u8::to_string),
            );
            parts.extend(route.gateway.octets().iter().map(|octet| octet.to_string()));
            parts.join(",")
        })
        .collect();
    let value = fields.join(", ");

    let mut lines =
        vec!["option rfc3442-classless-static-routes code 121 = array of unsigned integer 8;".to_string()];
    if with_option_249 {
        lines.push("option ms-classless-static-routes code 249 = array of unsigned integer 8;".to_string());
    }
    lines.push(format!("option rfc3442-classless-static-routes {value};"));
    if with_option_249 {
        lines.push(format!("option ms-classless-static-routes {value};"));
    }
    lines
}

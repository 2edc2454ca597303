//! Encoding and decoding of the option 121/249 route payload per RFC 3442.
//!
//! The payload is a concatenation of variable-length records, one per route,
//! hex-encoded lower-case with no separators or length prefixes:
//!
//! ```text
//! +---------------+-------------------------------+---------------+
//! | prefix length |   destination (0..=4 octets)  |  gateway (4)  |
//! +---------------+-------------------------------+---------------+
//! ```
//!
//! The number of destination octets is determined solely by
//! [`significant_octets`]; the gateway is always carried in full. Records
//! appear in the order the routes were supplied - the codec imposes no
//! sorting, and option 249 (the Microsoft variant) carries a byte-identical
//! payload under a different option number.
//!
//! Both directions are pure functions. Whether a default route (`/0`) was
//! seen is part of the returned value, so one outcome never leaks into an
//! unrelated call and concurrent use needs no shared state.
//!
//! # References
//!
//! - RFC 3442: The Classless Static Route Option for DHCPv4

use std::net::Ipv4Addr;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::route::{significant_octets, Route};

/// Outcome of encoding a route list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// Concatenated lower-case hex records for every route that validated.
    ///
    /// Empty if the input was empty or no route passed validation; that is
    /// a valid outcome, not an error.
    pub hex: String,

    /// True if any encoded route was the default route (`0.0.0.0/0`).
    pub has_default_route: bool,
}

/// Outcome of decoding an option payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Routes recovered from the payload, in wire order.
    ///
    /// Destination octets beyond the significant count are zero, so the
    /// network always renders as a full dotted quad.
    pub routes: Vec<Route>,

    /// True if any decoded route was the default route (`0.0.0.0/0`).
    pub has_default_route: bool,
}

/// Encodes parallel network/gateway lists into one option payload.
///
/// Each pair is validated independently; a pair that fails validation is
/// reported on the diagnostic channel and skipped, and encoding continues
/// with the remaining pairs. Pairs beyond the shorter list are not
/// processed - matching lengths are the caller's contract, and a mismatch
/// gets a single diagnostic.
pub fn encode(networks: &[String], gateways: &[String]) -> Encoded {
    if networks.len() != gateways.len() {
        warn!(
            networks = networks.len(),
            gateways = gateways.len(),
            "network and gateway counts differ; extra entries are ignored"
        );
    }

    let mut hex = String::new();
    let mut has_default_route = false;

    for (network, gateway) in networks.iter().zip(gateways.iter()) {
        let route = match Route::parse(network, gateway) {
            Ok(route) => route,
            Err(error) => {
                warn!(%network, %gateway, %error, "skipping route");
                continue;
            }
        };

        let record = encode_route(&route);
        debug!(%route, record = %record, "encoded route");

        if route.is_default() {
            has_default_route = true;
        }
        hex.push_str(&record);
    }

    Encoded {
        hex,
        has_default_route,
    }
}

/// Encodes a single validated route into its hex record.
pub fn encode_route(route: &Route) -> String {
    let mut record = format!("{:02x}", route.prefix_len);
    let octets = route.network.octets();
    for octet in &octets[..significant_octets(route.prefix_len)] {
        record.push_str(&format!("{octet:02x}"));
    }
    for octet in route.gateway.octets() {
        record.push_str(&format!("{octet:02x}"));
    }
    record
}

/// Decodes an option payload back into routes.
///
/// Accepts an optional case-insensitive `0x` prefix and upper-case hex
/// digits. A payload that ends mid-record is treated as end-of-stream:
/// decoding stops and the complete prefix records are returned. A prefix
/// length byte above 32 also stops decoding, with a diagnostic, since
/// everything after it cannot be framed.
///
/// # Errors
///
/// Returns [`Error::InvalidHex`] if the payload is empty or contains
/// non-hex characters.
pub fn decode(payload: &str) -> Result<Decoded> {
    let hex = payload
        .strip_prefix("0x")
        .or_else(|| payload.strip_prefix("0X"))
        .unwrap_or(payload);

    if hex.is_empty() || !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(Error::InvalidHex(payload.to_string()));
    }

    // A trailing lone hex digit cannot start a record; drop it as
    // end-of-stream along with any other truncated tail below.
    let bytes: Vec<u8> = hex
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| (hex_value(pair[0]) << 4) | hex_value(pair[1]))
        .collect();

    let mut routes = Vec::new();
    let mut has_default_route = false;
    let mut cursor = 0;

    while cursor < bytes.len() {
        let prefix_len = bytes[cursor];
        if prefix_len > 32 {
            warn!(prefix_len, "prefix length out of range in payload; stopping");
            break;
        }

        let octets = significant_octets(prefix_len);
        if cursor + 1 + octets + 4 > bytes.len() {
            debug!(cursor, "truncated record at end of payload");
            break;
        }
        cursor += 1;

        let mut destination = [0u8; 4];
        destination[..octets].copy_from_slice(&bytes[cursor..cursor + octets]);
        cursor += octets;

        let gateway = Ipv4Addr::new(
            bytes[cursor],
            bytes[cursor + 1],
            bytes[cursor + 2],
            bytes[cursor + 3],
        );
        cursor += 4;

        if prefix_len == 0 {
            has_default_route = true;
        }
        routes.push(Route {
            network: Ipv4Addr::from(destination),
            prefix_len,
            gateway,
        });
    }

    Ok(Decoded {
        routes,
        has_default_route,
    })
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        // Input is validated as ASCII hex before conversion.
        _ => digit.to_ascii_lowercase() - b'a' + 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn test_encode_single_route() {
        let encoded = encode(&strings(&["192.168.1.0/24"]), &strings(&["10.0.0.1"]));
        assert_eq!(encoded.hex, "18c0a8010a000001");
        assert!(!encoded.has_default_route);
    }

    #[test]
    fn test_encode_multiple_routes_preserves_order() {
        let encoded = encode(
            &strings(&["10.0.0.0/8", "172.16.0.0/12"]),
            &strings(&["127.0.0.10", "127.0.0.172"]),
        );
        assert_eq!(encoded.hex, "080a7f00000a0cac107f0000ac");
    }

    #[test]
    fn test_encode_default_route_sets_flag() {
        let encoded = encode(
            &strings(&["192.168.1.0/24", "0.0.0.0/0"]),
            &strings(&["10.0.0.1", "10.0.0.2"]),
        );
        assert_eq!(encoded.hex, "18c0a8010a000001000a000002");
        assert!(encoded.has_default_route);
    }

    #[test]
    fn test_encode_skips_invalid_routes() {
        let encoded = encode(
            &strings(&["192.168.1.0", "192.168.1.0/33", "10.0.0.0/8"]),
            &strings(&["10.0.0.1", "10.0.0.1", "127.0.0.10"]),
        );
        assert_eq!(encoded.hex, "080a7f00000a");
    }

    #[test]
    fn test_encode_rejects_unusable_gateways() {
        let encoded = encode(
            &strings(&["192.168.1.0/24", "192.168.2.0/24"]),
            &strings(&["0.0.0.0", "255.255.255.255"]),
        );
        assert_eq!(encoded.hex, "");
        assert!(!encoded.has_default_route);
    }

    #[test]
    fn test_encode_empty_input() {
        let encoded = encode(&[], &[]);
        assert_eq!(encoded.hex, "");
        assert!(!encoded.has_default_route);
    }

    #[test]
    fn test_encode_length_mismatch_stops_at_shorter_list() {
        let encoded = encode(
            &strings(&["192.168.1.0/24", "10.0.0.0/8"]),
            &strings(&["10.0.0.1"]),
        );
        assert_eq!(encoded.hex, "18c0a8010a000001");
    }

    #[test]
    fn test_decode_single_route() {
        let decoded = decode("18c0a8010a000001").unwrap();
        assert_eq!(decoded.routes.len(), 1);
        assert_eq!(decoded.routes[0].to_string(), "192.168.1.0/24 via 10.0.0.1");
        assert!(!decoded.has_default_route);
    }

    #[test]
    fn test_decode_accepts_0x_prefix_and_upper_case() {
        for payload in ["0x10c0a87f0000c0", "0X10C0A87F0000C0", "10C0A87F0000C0"] {
            let decoded = decode(payload).unwrap();
            assert_eq!(decoded.routes.len(), 1);
            assert_eq!(
                decoded.routes[0].to_string(),
                "192.168.0.0/16 via 127.0.0.192"
            );
        }
    }

    #[test]
    fn test_decode_multiple_routes() {
        let decoded = decode("10c0a87f0000c00cac107f0000ac080a7f00000a").unwrap();
        let rendered: Vec<String> = decoded
            .routes
            .iter()
            .map(|route| route.to_string())
            .collect();
        assert_eq!(
            rendered,
            vec![
                "192.168.0.0/16 via 127.0.0.192",
                "172.16.0.0/12 via 127.0.0.172",
                "10.0.0.0/8 via 127.0.0.10",
            ]
        );
    }

    #[test]
    fn test_decode_default_route_renders_full_quad() {
        let decoded = decode("000a000002").unwrap();
        assert_eq!(decoded.routes[0].to_string(), "0.0.0.0/0 via 10.0.0.2");
        assert!(decoded.has_default_route);
    }

    #[test]
    fn test_decode_rejects_non_hex() {
        assert!(decode("invalidhex").is_err());
        assert!(decode("18c0a801-a000001").is_err());
    }

    #[test]
    fn test_decode_rejects_empty() {
        assert!(decode("").is_err());
        assert!(decode("0x").is_err());
    }

    #[test]
    fn test_decode_truncated_record_returns_complete_prefix() {
        // One byte short of a complete gateway: nothing decodable.
        let decoded = decode("18c0a8010a0000").unwrap();
        assert!(decoded.routes.is_empty());

        // First record complete, second truncated.
        let decoded = decode("18c0a8010a000001080a7f").unwrap();
        assert_eq!(decoded.routes.len(), 1);
        assert_eq!(decoded.routes[0].to_string(), "192.168.1.0/24 via 10.0.0.1");
    }

    #[test]
    fn test_decode_odd_trailing_digit_is_end_of_stream() {
        let decoded = decode("18c0a8010a000001f").unwrap();
        assert_eq!(decoded.routes.len(), 1);
    }

    #[test]
    fn test_decode_out_of_range_prefix_stops_with_partial_result() {
        // 0x21 = 33: invalid prefix length after one good record.
        let decoded = decode("18c0a8010a00000121c0a8010a000001").unwrap();
        assert_eq!(decoded.routes.len(), 1);
    }

    #[test]
    fn test_roundtrip_preserves_routes() {
        let networks = strings(&["0.0.0.0/0", "192.168.2.0/24", "10.1.0.0/16"]);
        let gateways = strings(&["10.0.0.1", "10.0.0.2", "192.168.1.1"]);
        let encoded = encode(&networks, &gateways);
        assert_eq!(encoded.hex, "000a00000118c0a8020a000002100a01c0a80101");

        let decoded = decode(&encoded.hex).unwrap();
        let rendered: Vec<String> = decoded
            .routes
            .iter()
            .map(|route| route.to_string())
            .collect();
        assert_eq!(
            rendered,
            vec![
                "0.0.0.0/0 via 10.0.0.1",
                "192.168.2.0/24 via 10.0.0.2",
                "10.1.0.0/16 via 192.168.1.1",
            ]
        );
        assert_eq!(decoded.has_default_route, encoded.has_default_route);
    }
}

//! End-to-end merge -> encode -> render runs over the public API.

use dhcproute::{codec, format, merge, Config, OutputFormat};

#[test]
fn config_pool_produces_junos_options() {
    let config: Config = serde_json::from_str(
        r#"{
            "global": {
                "append_routes": [
                    { "network": "10.1.0.0/16", "gateway": "192.168.1.1" }
                ]
            },
            "routers": [
                {
                    "name": "router1",
                    "pools": [
                        {
                            "name": "pool1",
                            "default_gateway": "10.0.0.1",
                            "common_routes": [
                                { "network": "192.168.2.0/24", "gateway": "10.0.0.2" }
                            ]
                        }
                    ]
                }
            ]
        }"#,
    )
    .unwrap();
    config.validate().unwrap();

    let router = &config.routers[0];
    let pool = &router.pools[0];
    let merged = merge::merge_pool_routes(
        pool.default_gateway.as_deref(),
        &pool.common_routes,
        &config.global.append_routes,
        pool.disable_append_routes,
        router.disable_append_routes,
    );

    let encoded = codec::encode(&merged.networks, &merged.gateways);
    assert_eq!(encoded.hex, "000a00000118c0a8020a000002100a01c0a80101");
    assert!(encoded.has_default_route);

    let lines = format::render(OutputFormat::Junos, &encoded.hex, false, &pool.name);
    assert_eq!(
        lines,
        vec![
            "set access address-assignment pool pool1 family inet dhcp-attributes \
             option 121 hex-string 000a00000118c0a8020a000002100a01c0a80101"
        ]
    );
}

#[test]
fn append_route_loses_to_pool_route_for_same_network() {
    let merged = merge::merge_pool_routes(
        Some("10.0.0.1"),
        &[dhcproute::RouteEntry {
            network: "192.168.2.0/24".to_string(),
            gateway: "10.0.0.2".to_string(),
        }],
        &[dhcproute::RouteEntry {
            network: "192.168.2.0/24".to_string(),
            gateway: "172.16.0.1".to_string(),
        }],
        false,
        false,
    );

    let encoded = codec::encode(&merged.networks, &merged.gateways);
    let decoded = codec::decode(&encoded.hex).unwrap();
    let rendered: Vec<String> = decoded
        .routes
        .iter()
        .map(|route| route.to_string())
        .collect();
    assert_eq!(
        rendered,
        vec!["0.0.0.0/0 via 10.0.0.1", "192.168.2.0/24 via 10.0.0.2"]
    );
}

#[test]
fn fully_suppressed_pool_renders_nothing() {
    let merged = merge::merge_pool_routes(
        None,
        &[dhcproute::RouteEntry {
            network: "192.168.2.0/24".to_string(),
            gateway: "10.0.0.2".to_string(),
        }],
        &[],
        true,
        true,
    );
    assert!(merged.is_empty());

    let encoded = codec::encode(&merged.networks, &merged.gateways);
    assert!(format::render(OutputFormat::Junos, &encoded.hex, true, "pool1").is_empty());
}

//! Integration tests for NetBox client
//!
//! These tests require a running NetBox instance.
//! Set NETBOX_URL and NETBOX_TOKEN environment variables to run.

use netbox_client::NetBoxClient;

fn live_client() -> NetBoxClient {
    let url = std::env::var("NETBOX_URL")
        .unwrap_or_else(|_| "http://localhost:8001".to_string());
    let token = std::env::var("NETBOX_TOKEN")
        .expect("NETBOX_TOKEN environment variable must be set");

    NetBoxClient::new(url, token).expect("Failed to create client")
}

#[tokio::test]
#[ignore] // Requires running NetBox instance
async fn test_validate_token() {
    let client = live_client();
    client.validate_token().await.expect("Token validation failed");
}

#[tokio::test]
#[ignore]
async fn test_query_tags() {
    let client = live_client();
    let tags = client.query_tags(&[], false).await
        .expect("Failed to query tags");

    println!("Found {} tags", tags.len());
}

#[tokio::test]
#[ignore]
async fn test_query_vlans() {
    let client = live_client();
    let vlans = client.query_vlans(&[], true).await
        .expect("Failed to query VLANs");

    println!("Found {} VLANs", vlans.len());
}

#[tokio::test]
#[ignore]
async fn test_query_ip_addresses() {
    let client = live_client();
    let ips = client.query_ip_addresses(&[], false).await
        .expect("Failed to query IP addresses");

    println!("Found {} IP addresses", ips.len());
}

use super::*;

fn test_client(base_url: &str) -> BsaleClient {
    BsaleClient::with_base_url(base_url, 5, "bsale-test/0.1", 0, 0)
        .expect("client construction should not fail")
}

#[test]
fn products_url_carries_limit_and_offset() {
    let client = test_client("https://bsale-proxy.vercel.app");
    let url = client
        .endpoint_url(
            "api/bsale/products.json",
            &[("limit", "25".to_owned()), ("offset", "50".to_owned())],
        )
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://bsale-proxy.vercel.app/api/bsale/products.json?limit=25&offset=50"
    );
}

#[test]
fn base_url_trailing_slash_is_normalised() {
    let client = test_client("https://bsale-proxy.vercel.app///");
    let url = client
        .endpoint_url("api/bsale/products/12.json", &[])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://bsale-proxy.vercel.app/api/bsale/products/12.json"
    );
}

#[test]
fn base_path_prefix_is_preserved() {
    let client = test_client("http://localhost:3000/proxy");
    let url = client
        .endpoint_url("api/bsale/stocks.json", &[("variantid", "7".to_owned())])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:3000/proxy/api/bsale/stocks.json?variantid=7"
    );
}

#[test]
fn with_base_url_rejects_garbage() {
    let result = BsaleClient::with_base_url("not a url", 5, "ua", 0, 0);
    assert!(
        matches!(result, Err(ClientError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}

#[test]
fn from_config_uses_configured_base() {
    let config = AppConfig {
        proxy_base_url: "http://127.0.0.1:9".to_owned(),
        ..AppConfig::default()
    };
    let client = BsaleClient::from_config(&config).unwrap();
    assert_eq!(client.base_url.as_str(), "http://127.0.0.1:9/");
    assert_eq!(client.retry.max_retries, 2);
    assert_eq!(client.retry.backoff_base_ms, 250);
}

//! End-to-end tests for the gateway's route table over a real listener.

use envgate::config::GatewayConfig;
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn exact_pages_render_the_welcome_view() {
    let gateway = common::spawn_gateway(GatewayConfig::default()).await;
    let client = common::client();

    for path in ["/dev", "/dev/welcome", "/stg", "/stg/welcome"] {
        let res = client.get(gateway.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "path {path}");
        assert!(res
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        let body = res.text().await.unwrap();
        assert!(body.contains("Welcome"), "path {path}");
    }
}

#[tokio::test]
async fn namespace_paths_redirect_with_prefix_stripped() {
    let gateway = common::spawn_gateway(GatewayConfig::default()).await;
    let client = common::client();

    let cases = [
        ("/dev/foo/bar", "/foo/bar"),
        ("/stg/assets/app.css", "/assets/app.css"),
        ("/dev/login", "/login"),
    ];
    for (path, location) in cases {
        let res = client.get(gateway.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::FOUND, "path {path}");
        assert_eq!(
            res.headers().get("location").unwrap(),
            location,
            "path {path}"
        );
    }
}

#[tokio::test]
async fn trailing_slash_redirects_to_root() {
    let gateway = common::spawn_gateway(GatewayConfig::default()).await;
    let client = common::client();

    for path in ["/dev/", "/stg/"] {
        let res = client.get(gateway.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::FOUND, "path {path}");
        assert_eq!(res.headers().get("location").unwrap(), "/", "path {path}");
    }
}

#[tokio::test]
async fn exact_rules_take_precedence_over_wildcards() {
    let gateway = common::spawn_gateway(GatewayConfig::default()).await;
    let client = common::client();

    // `/dev/welcome` must render, not redirect to `/welcome`.
    let res = client.get(gateway.url("/dev/welcome")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("location").is_none());
}

#[tokio::test]
async fn captured_remainder_is_opaque_passthrough() {
    let gateway = common::spawn_gateway(GatewayConfig::default()).await;
    let client = common::client();

    let res = client.get(gateway.url("/dev/a%2Fb")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers().get("location").unwrap(), "/a%2Fb");
}

#[tokio::test]
async fn redirect_targets_do_not_redirect_again() {
    let gateway = common::spawn_gateway(GatewayConfig::default()).await;
    let client = common::client();

    // `/dev/foo/bar` redirects to `/foo/bar`, which no rule claims.
    let res = client.get(gateway.url("/foo/bar")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Unless the target itself is inside a namespace: `/dev/stg/x` strips
    // one prefix per request.
    let res = client.get(gateway.url("/dev/stg/x")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers().get("location").unwrap(), "/stg/x");
}

#[tokio::test]
async fn health_probe_returns_ok_regardless_of_query() {
    let gateway = common::spawn_gateway(GatewayConfig::default()).await;
    let client = common::client();

    for path in ["/health", "/health?probe=alb&attempt=2"] {
        let res = client.get(gateway.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "path {path}");
        assert_eq!(res.text().await.unwrap(), "OK", "path {path}");
    }
}

#[tokio::test]
async fn unmatched_paths_fall_through_to_404() {
    let gateway = common::spawn_gateway(GatewayConfig::default()).await;
    let client = common::client();

    for path in ["/", "/other", "/development"] {
        let res = client.get(gateway.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "path {path}");
    }
}

#[tokio::test]
async fn non_get_methods_are_rejected_on_matched_paths() {
    let gateway = common::spawn_gateway(GatewayConfig::default()).await;
    let client = common::client();

    let res = client.post(gateway.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    // Unmatched stays a plain 404 whatever the method.
    let res = client.post(gateway.url("/other")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn head_is_served_like_get() {
    let gateway = common::spawn_gateway(GatewayConfig::default()).await;
    let client = common::client();

    let res = client.head(gateway.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn client_supplied_request_id_is_accepted() {
    let gateway = common::spawn_gateway(GatewayConfig::default()).await;
    let client = common::client();

    let res = client
        .get(gateway.url("/health"))
        .header("x-request-id", "test-id-1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

use common::TestServer;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let server = TestServer::spawn().await?;

    let body: Value = server.client.get(server.url("/")).send().await?.json().await?;
    let endpoints = body["endpoints"].as_array().expect("endpoints array");
    assert!(endpoints
        .iter()
        .any(|e| e["path"] == "/products/{id}" && e["method"] == "DELETE" && e["auth"] == true));
    Ok(())
}

#[tokio::test]
async fn docs_describe_product_schema() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.client.get(server.url("/docs")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let doc: Value = res.json().await?;
    assert_eq!(doc["openapi"], "3.0.3");
    assert_eq!(
        doc["components"]["schemas"]["ProductInput"]["required"],
        serde_json::json!(["title", "description", "price"])
    );
    assert!(doc["paths"]["/products"]["post"]["requestBody"].is_object());
    Ok(())
}

mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn listing_projects_returns_the_count_envelope() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/projects", server.base_url)).send().await?;

    // 200 with a (possibly empty) list, or a server error when the database
    // is unreachable
    assert!(
        res.status() == StatusCode::OK || res.status().is_server_error(),
        "Expected OK or a server error, got {}",
        res.status()
    );

    let body = res.json::<serde_json::Value>().await?;
    if body["success"] == true {
        let data = body["data"].as_array().expect("data should be an array");
        assert_eq!(body["count"].as_u64().unwrap() as usize, data.len());
        assert!(body["message"].is_string());
    }

    Ok(())
}

#[tokio::test]
async fn non_positive_ids_fail_validation_before_the_store() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for id in ["0", "-5"] {
        let res = client.get(format!("{}/projects/{}", server.base_url, id)).send().await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "id {} should be rejected", id);

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["success"], false);
    }

    Ok(())
}

#[tokio::test]
async fn non_numeric_ids_are_a_client_error() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/projects/abc", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn create_requires_a_bearer_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.post(format!("{}/projects", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);

    Ok(())
}

#[tokio::test]
async fn garbage_tokens_are_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/projects", server.base_url))
        .header("Authorization", "Bearer not.a.token")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(format!("{}/projects", server.base_url))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn update_requires_a_bearer_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.patch(format!("{}/projects/1", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn delete_is_gated_before_any_store_access() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.delete(format!("{}/projects/1", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());

    Ok(())
}

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::ADMIN_TOKEN;

fn skills_payload() -> Value {
    json!([{ "id": "s1", "name": "Go", "level": 80 }])
}

#[tokio::test]
async fn mutation_without_token_is_401_and_state_unchanged() -> Result<()> {
    let server = common::spawn().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/admin/skills", server.base_url))
        .json(&skills_payload())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({ "error": "Missing admin token" }));

    // Store still holds the seed default, not the rejected payload
    let stored = client
        .get(format!("{}/api/admin/skills", server.base_url))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_ne!(stored, skills_payload());
    Ok(())
}

#[tokio::test]
async fn wrong_token_is_401() -> Result<()> {
    let server = common::spawn().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/admin/skills", server.base_url))
        .bearer_auth("wrong-token")
        .json(&skills_payload())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({ "error": "Invalid admin token" }));
    Ok(())
}

#[tokio::test]
async fn bearer_and_custom_header_both_authenticate() -> Result<()> {
    let server = common::spawn().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/admin/skills", server.base_url))
        .bearer_auth(ADMIN_TOKEN)
        .json(&skills_payload())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/api/admin/skills", server.base_url))
        .header("x-admin-token", ADMIN_TOKEN)
        .json(&skills_payload())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn origin_mismatch_is_400_regardless_of_token() -> Result<()> {
    let server = common::spawn().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/admin/skills", server.base_url))
        .bearer_auth(ADMIN_TOKEN)
        .header("origin", "https://evil.example.net")
        .json(&skills_payload())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({ "error": "Cross-origin request rejected" }));
    Ok(())
}

#[tokio::test]
async fn same_origin_passes() -> Result<()> {
    let server = common::spawn().await?;
    let client = reqwest::Client::new();

    // Origin contains the Host value (loose substring check)
    let res = client
        .post(format!("{}/api/admin/skills", server.base_url))
        .bearer_auth(ADMIN_TOKEN)
        .header("origin", server.base_url.clone())
        .json(&skills_payload())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn admin_reads_do_not_require_the_token() -> Result<()> {
    let server = common::spawn().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/admin/skills", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn guard_is_a_noop_when_no_token_configured() -> Result<()> {
    let server = common::spawn_with(|config| config.admin_api_token = None).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/admin/skills", server.base_url))
        .json(&skills_payload())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

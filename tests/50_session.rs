mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn login_rejects_bad_credentials() -> Result<()> {
    let server = common::spawn().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&json!({ "email": "admin@example.com", "password": "wrong" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "error": "Invalid credentials" })
    );
    Ok(())
}

#[tokio::test]
async fn login_issues_session_cookie_accepted_by_whoami() -> Result<()> {
    let server = common::spawn_with(|config| {
        config.admin_email = "owner@example.com".to_string();
        config.admin_password = "hunter2".to_string();
    })
    .await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&json!({ "email": "owner@example.com", "password": "hunter2" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let set_cookie = res
        .headers()
        .get("set-cookie")
        .expect("set-cookie header")
        .to_str()?
        .to_string();
    assert!(set_cookie.starts_with("folio_session="));
    assert!(set_cookie.contains("HttpOnly"));

    let cookie = set_cookie.split(';').next().unwrap().to_string();
    let res = client
        .get(format!("{}/api/auth/whoami", server.base_url))
        .header("cookie", cookie)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["email"], "owner@example.com");
    Ok(())
}

#[tokio::test]
async fn whoami_without_session_is_401() -> Result<()> {
    let server = common::spawn().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/auth/whoami", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn whoami_rejects_a_forged_cookie() -> Result<()> {
    let server = common::spawn().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/auth/whoami", server.base_url))
        .header("cookie", "folio_session=forged.token.value")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn logout_clears_the_cookie() -> Result<()> {
    let server = common::spawn().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/logout", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let set_cookie = res
        .headers()
        .get("set-cookie")
        .expect("set-cookie header")
        .to_str()?;
    assert!(set_cookie.contains("Max-Age=0"));
    Ok(())
}

use serde_json::Value;

use crate::helpers::{CLIENT_ID, TestApp};

#[tokio::test]
async fn consent_page_echoes_requested_scope() {
    let app = TestApp::new().await;

    let response = app
        .get_authorize(&[("client_id", CLIENT_ID), ("scope", "openid email")])
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("Starkeeper"));
    assert!(html.contains("openid email"));
    assert!(html.contains(r#"name="client_id" value="service-worker""#));
}

#[tokio::test]
async fn accept_without_subject_returns_401() {
    let app = TestApp::new().await;

    let response = app
        .post_authorize(None, &[("client_id", CLIENT_ID), ("scope", "openid")])
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn accept_for_unknown_client_returns_invalid_client() {
    let app = TestApp::new().await;
    let (subject, _) = app.register_user().await;

    let response = app
        .post_authorize(Some(&subject), &[("client_id", "nobody"), ("scope", "openid")])
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "invalid_client");
}

#[tokio::test]
async fn accept_for_unknown_subject_returns_502() {
    let app = TestApp::new().await;

    let response = app
        .post_authorize(
            Some(&uuid::Uuid::new_v4().to_string()),
            &[("client_id", CLIENT_ID), ("scope", "openid")],
        )
        .await;

    assert_eq!(response.status().as_u16(), 502);
}

#[tokio::test]
async fn accept_grants_only_supported_scopes_and_routes_claims() {
    let app = TestApp::new().await;
    let (subject, email) = app.register_user().await;

    let response = app
        .post_authorize(
            Some(&subject),
            &[("client_id", CLIENT_ID), ("scope", "email admin openid")],
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let directive: Value = response.json().await.unwrap();

    let principal = &directive["principal"];
    assert_eq!(principal["scopes"], serde_json::json!(["openid", "email"]));

    let claims = principal["claims"].as_array().unwrap();
    let claim = |claim_type: &str| {
        claims
            .iter()
            .find(|c| c["type"] == claim_type)
            .unwrap_or_else(|| panic!("missing {claim_type} claim"))
    };
    assert_eq!(claim("sub")["value"], subject.as_str());
    assert_eq!(claim("email")["value"], email.as_str());
    assert_eq!(
        claim("email")["destinations"],
        serde_json::json!(["access_token", "identity_token"])
    );
    assert_eq!(
        claim("preferred_username")["destinations"],
        serde_json::json!(["access_token"])
    );
    assert!(directive["authorization_id"].is_string());
}

#[tokio::test]
async fn repeated_accept_reuses_permanent_authorization() {
    let app = TestApp::new().await;
    let (subject, _) = app.register_user().await;
    let form = [("client_id", CLIENT_ID), ("scope", "openid email")];

    let first: Value = app
        .post_authorize(Some(&subject), &form)
        .await
        .json()
        .await
        .unwrap();
    let second: Value = app
        .post_authorize(Some(&subject), &form)
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(first["authorization_id"], second["authorization_id"]);
    assert_eq!(app.authorizations.count(&subject, &app.application_id), 1);
}

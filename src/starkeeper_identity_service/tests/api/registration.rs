use serde_json::{Value, json};

use crate::helpers::{STRONG_PASSWORD, TestApp};

#[tokio::test]
async fn registration_form_is_served() {
    let app = TestApp::new().await;

    let response = app.get_registration().await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("minlength=\"16\""));
}

#[tokio::test]
async fn valid_registration_returns_201_with_id() {
    let app = TestApp::new().await;

    let response = app
        .post_registration(&json!({
            "email": "ada@example.com",
            "password": STRONG_PASSWORD,
        }))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    let id = body["id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn invalid_input_returns_400_with_distinct_messages() {
    let app = TestApp::new().await;

    let test_cases = [
        (
            json!({ "email": "not-an-email", "password": STRONG_PASSWORD }),
            vec!["Invalid email address"],
        ),
        (
            json!({ "email": "", "password": STRONG_PASSWORD }),
            vec!["Invalid email address"],
        ),
        (
            json!({ "email": "grace@example.com", "password": "short1" }),
            vec!["Weak password"],
        ),
        (
            json!({ "email": "grace@example.com", "password": "no digits in this long one" }),
            vec!["Weak password"],
        ),
        (
            json!({ "email": "", "password": "" }),
            vec!["Invalid email address", "Weak password"],
        ),
    ];

    for (body, expected) in test_cases {
        let response = app.post_registration(&body).await;

        assert_eq!(response.status().as_u16(), 400, "Failed for input: {body}");
        let errors: Value = response.json().await.unwrap();
        assert_eq!(errors["errors"], json!(expected), "Failed for input: {body}");
    }
}

#[tokio::test]
async fn duplicate_email_is_rejected_regardless_of_case() {
    let app = TestApp::new().await;
    let (_, email) = app.register_user().await;

    let response = app
        .post_registration(&json!({
            "email": email.to_uppercase(),
            "password": STRONG_PASSWORD,
        }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let errors: Value = response.json().await.unwrap();
    assert_eq!(errors["errors"], json!(["Invalid email address"]));
}

#[tokio::test]
async fn store_password_policy_descriptions_are_returned() {
    let app = TestApp::new().await;

    // Passes registration rules but has no uppercase or symbol.
    let response = app
        .post_registration(&json!({
            "email": "linus@example.com",
            "password": "lowercase only 1234",
        }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();
    assert!(!errors.is_empty());
    assert!(
        errors
            .iter()
            .all(|e| e != "Invalid email address" && e != "Weak password")
    );
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = TestApp::new().await;

    let response = app.post_registration(&json!({ "email": "x@y.z" })).await;

    assert_eq!(response.status().as_u16(), 422);
}

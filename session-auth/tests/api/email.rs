use session_auth::domain::{EmailKind, MessageResponse};

use crate::helpers::{get_random_email, random_username, TestApp, VALID_PASSWORD};

#[tokio::test]
async fn confirmation_is_idempotent() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.signup(&random_username(), &email, VALID_PASSWORD).await;
    let token = app.mailed_token(&email, EmailKind::Confirm);

    let first: MessageResponse = app.confirm_email(&token).await.json().await.unwrap();
    assert_eq!(first.message, "Your email has been confirmed");

    let response = app.confirm_email(&token).await;
    assert_eq!(response.status().as_u16(), 200);
    let second: MessageResponse = response.json().await.unwrap();
    assert_eq!(second.message, "Your email is already confirmed");
}

#[tokio::test]
async fn confirm_rejects_bad_and_session_tokens() {
    let app = TestApp::new().await;
    assert_eq!(app.confirm_email("garbage").await.status().as_u16(), 400);

    let email = app.confirmed_user().await;
    let tokens = app.login_tokens(&email).await;
    assert_eq!(
        app.confirm_email(&tokens.access_token).await.status().as_u16(),
        400
    );
}

#[tokio::test]
async fn request_email_resends_only_for_unconfirmed_accounts() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.signup(&random_username(), &email, VALID_PASSWORD).await;
    assert_eq!(app.mailer.sent().len(), 1);

    assert_eq!(app.request_email(&email).await.status().as_u16(), 200);
    assert_eq!(app.mailer.sent().len(), 2);

    let token = app.mailed_token(&email, EmailKind::Confirm);
    app.confirm_email(&token).await;
    assert_eq!(app.request_email(&email).await.status().as_u16(), 200);
    assert_eq!(app.request_email(&get_random_email()).await.status().as_u16(), 200);
    assert_eq!(app.mailer.sent().len(), 2);
}

#[tokio::test]
async fn password_reset_flow() {
    let app = TestApp::new().await;
    let email = app.confirmed_user().await;
    let new_password = "N3w-Passw0rd";

    assert_eq!(app.forgot_password(&email).await.status().as_u16(), 200);
    let token = app.mailed_token(&email, EmailKind::ResetPassword);

    let response = app.reset_password(&token, new_password, "different").await;
    assert_eq!(response.status().as_u16(), 422);

    let response = app.reset_password(&token, "weak", "weak").await;
    assert_eq!(response.status().as_u16(), 422);

    let response = app.reset_password(&token, new_password, new_password).await;
    assert_eq!(response.status().as_u16(), 200);

    assert_eq!(app.login(&email, VALID_PASSWORD).await.status().as_u16(), 401);
    assert_eq!(app.login(&email, new_password).await.status().as_u16(), 200);

    // a reset link works once
    let response = app.reset_password(&token, "An0ther-Pass", "An0ther-Pass").await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn forgot_password_is_silent_for_unknown_accounts() {
    let app = TestApp::new().await;
    let response = app.forgot_password(&get_random_email()).await;
    assert_eq!(response.status().as_u16(), 200);
    assert!(app.mailer.sent().is_empty());
}

use crate::helpers::{get_random_email, random_username, TestApp, VALID_PASSWORD};

#[tokio::test]
async fn should_return_422_if_malformed_email() {
    let app = TestApp::new().await;
    let response = app.login("", VALID_PASSWORD).await;
    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn should_return_401_if_user_not_found() {
    let app = TestApp::new().await;
    let response = app.login(&get_random_email(), VALID_PASSWORD).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_401_until_email_is_confirmed() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.signup(&random_username(), &email, VALID_PASSWORD).await;

    let response = app.login(&email, VALID_PASSWORD).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_401_if_wrong_password() {
    let app = TestApp::new().await;
    let email = app.confirmed_user().await;
    let response = app.login(&email, "Wrong-Passw0rd").await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_bearer_tokens_for_valid_credentials() {
    let app = TestApp::new().await;
    let email = app.confirmed_user().await;

    let tokens = app.login_tokens(&email).await;
    assert_eq!(tokens.token_type, "bearer");
    assert_ne!(tokens.access_token, tokens.refresh_token);

    let response = app.me(&tokens.access_token).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_429_past_the_session_cap() {
    let app = TestApp::with_config(|config| config.with_max_active_sessions(2)).await;
    let email = app.confirmed_user().await;

    app.login_tokens(&email).await;
    app.login_tokens(&email).await;
    let response = app.login(&email, VALID_PASSWORD).await;
    assert_eq!(response.status().as_u16(), 429);
}

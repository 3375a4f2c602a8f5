use session_auth::domain::IssuedTokens;

use crate::helpers::TestApp;

#[tokio::test]
async fn should_rotate_tokens_once() {
    let app = TestApp::new().await;
    let email = app.confirmed_user().await;
    let tokens = app.login_tokens(&email).await;

    let response = app.refresh(&tokens.refresh_token).await;
    assert_eq!(response.status().as_u16(), 200);
    let rotated: IssuedTokens = response.json().await.unwrap();
    assert_eq!(app.me(&rotated.access_token).await.status().as_u16(), 200);

    let response = app.refresh(&tokens.refresh_token).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_401_for_access_token_or_garbage() {
    let app = TestApp::new().await;
    let email = app.confirmed_user().await;
    let tokens = app.login_tokens(&email).await;

    assert_eq!(app.refresh(&tokens.access_token).await.status().as_u16(), 401);
    assert_eq!(app.refresh("garbage").await.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_401_without_bearer_header() {
    let app = TestApp::new().await;
    let response = app
        .http_client
        .post(&format!("{}/refresh-token", &app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

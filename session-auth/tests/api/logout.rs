use crate::helpers::TestApp;

#[tokio::test]
async fn should_return_401_if_no_token() {
    let app = TestApp::new().await;
    let response = app
        .http_client
        .post(&format!("{}/logout", &app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_401_if_invalid_token() {
    let app = TestApp::new().await;
    let response = app.logout("invalid").await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_200_and_revoke_the_session() {
    let app = TestApp::new().await;
    let email = app.confirmed_user().await;
    let tokens = app.login_tokens(&email).await;

    let response = app.logout(&tokens.access_token).await;
    assert_eq!(response.status().as_u16(), 200);

    assert_eq!(app.me(&tokens.access_token).await.status().as_u16(), 401);
    assert_eq!(app.refresh(&tokens.refresh_token).await.status().as_u16(), 401);
    assert_eq!(app.logout(&tokens.access_token).await.status().as_u16(), 401);
}

#[tokio::test]
async fn should_only_end_the_current_session() {
    let app = TestApp::new().await;
    let email = app.confirmed_user().await;
    let laptop = app.login_tokens(&email).await;
    let phone = app.login_tokens(&email).await;

    assert_eq!(app.logout(&laptop.access_token).await.status().as_u16(), 200);
    assert_eq!(app.me(&phone.access_token).await.status().as_u16(), 200);
    assert_eq!(app.refresh(&phone.refresh_token).await.status().as_u16(), 200);
}

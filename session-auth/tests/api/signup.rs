use session_auth::domain::{EmailKind, UserResponse};

use crate::helpers::{get_random_email, random_username, TestApp, VALID_PASSWORD};

#[tokio::test]
async fn should_return_201_and_mail_a_confirmation_link() {
    let app = TestApp::new().await;
    let email = get_random_email();

    let response = app.signup(&random_username(), &email, VALID_PASSWORD).await;
    assert_eq!(response.status().as_u16(), 201);

    let body: UserResponse = response.json().await.unwrap();
    assert_eq!(body.email, email);
    assert!(!body.is_confirmed);

    let link = app.mailer.last_link(&email, EmailKind::Confirm).unwrap();
    assert!(link.starts_with(&format!("{}/confirmed-email/", app.address)));
}

#[tokio::test]
async fn should_return_422_if_malformed_input() {
    let app = TestApp::new().await;

    let cases = [
        (random_username(), "not-an-email".to_owned(), VALID_PASSWORD),
        ("ab".to_owned(), get_random_email(), VALID_PASSWORD),
        (random_username(), get_random_email(), "short"),
        (random_username(), get_random_email(), "alllowercase1!"),
        (random_username(), get_random_email(), "Password123!"),
    ];
    for (username, email, password) in cases {
        let response = app.signup(&username, &email, password).await;
        assert_eq!(
            response.status().as_u16(),
            422,
            "username={username} email={email} password={password}"
        );
    }
}

#[tokio::test]
async fn should_return_409_for_duplicate_email_or_username() {
    let app = TestApp::new().await;
    let email = get_random_email();
    let username = random_username();
    assert_eq!(
        app.signup(&username, &email, VALID_PASSWORD).await.status().as_u16(),
        201
    );

    let response = app.signup(&random_username(), &email, VALID_PASSWORD).await;
    assert_eq!(response.status().as_u16(), 409);

    let response = app
        .signup(&username, &get_random_email(), VALID_PASSWORD)
        .await;
    assert_eq!(response.status().as_u16(), 409);
}

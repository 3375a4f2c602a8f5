use std::sync::Arc;

use reqwest::{Client, Response};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::spawn;
use uuid::Uuid;

use session_auth::domain::{EmailKind, IssuedTokens, LoginRequestBody, SignupRequestBody};
use session_auth::services::{
    Argon2Verifier, HashmapIdentityCache, HashmapSessionLedger, HashmapUserStore,
    MockEmailClient,
};
use session_auth::utils::Config;
use session_auth::{app_router, build_app_state};

pub const VALID_PASSWORD: &str = "Lads123!x";

#[derive(Serialize)]
pub struct EmailBody {
    pub email: String,
}

#[derive(Serialize)]
pub struct ResetPasswordBody {
    pub password: String,
    pub password2: String,
}

pub struct TestApp {
    pub address: String,
    pub http_client: Client,
    pub mailer: Arc<MockEmailClient>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|config| config).await
    }

    pub async fn with_config(customise: impl FnOnce(Config) -> Config) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed binding to an ephemeral port");

        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let config = customise(Config::new("api-test-secret").with_app_base_url(&address));
        let mailer = Arc::new(MockEmailClient::new());
        let cache = Arc::new(HashmapIdentityCache::new());
        let app_state = build_app_state(
            Arc::new(config),
            Arc::new(HashmapSessionLedger::new()),
            cache,
            Arc::new(HashmapUserStore::new()),
            Arc::new(Argon2Verifier::new()),
            mailer.clone(),
        );

        let server = axum::serve(listener, app_router(app_state));

        spawn(async move {
            if let Err(e) = server.await {
                eprintln!("Test server error: {}", e);
            }
        });

        TestApp {
            address,
            http_client: Client::new(),
            mailer,
        }
    }

    pub async fn signup(&self, username: &str, email: &str, password: &str) -> Response {
        let body = SignupRequestBody {
            username: username.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        };

        self.http_client
            .post(&format!("{}/signup", &self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute signup request.")
    }

    pub async fn login(&self, email: &str, password: &str) -> Response {
        let body = LoginRequestBody {
            email: email.to_owned(),
            password: password.to_owned(),
        };

        self.http_client
            .post(&format!("{}/login", &self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute login request.")
    }

    pub async fn refresh(&self, refresh_token: &str) -> Response {
        self.http_client
            .post(&format!("{}/refresh-token", &self.address))
            .bearer_auth(refresh_token)
            .send()
            .await
            .expect("Failed to execute refresh request.")
    }

    pub async fn logout(&self, access_token: &str) -> Response {
        self.http_client
            .post(&format!("{}/logout", &self.address))
            .bearer_auth(access_token)
            .send()
            .await
            .expect("Failed to execute logout request.")
    }

    pub async fn me(&self, access_token: &str) -> Response {
        self.http_client
            .get(&format!("{}/me", &self.address))
            .bearer_auth(access_token)
            .send()
            .await
            .expect("Failed to execute me request.")
    }

    pub async fn confirm_email(&self, token: &str) -> Response {
        self.http_client
            .get(&format!("{}/confirmed-email/{}", &self.address, token))
            .send()
            .await
            .expect("Failed to execute confirm request.")
    }

    pub async fn request_email(&self, email: &str) -> Response {
        self.post_email("request-email", email).await
    }

    pub async fn forgot_password(&self, email: &str) -> Response {
        self.post_email("forgot-password", email).await
    }

    pub async fn reset_password(&self, token: &str, password: &str, password2: &str) -> Response {
        let body = ResetPasswordBody {
            password: password.to_owned(),
            password2: password2.to_owned(),
        };

        self.http_client
            .post(&format!("{}/reset-password/{}", &self.address, token))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute reset password request.")
    }

    async fn post_email(&self, path: &str, email: &str) -> Response {
        self.http_client
            .post(&format!("{}/{}", &self.address, path))
            .json(&EmailBody {
                email: email.to_owned(),
            })
            .send()
            .await
            .expect("Failed to execute email request.")
    }

    /// Token at the end of the last mailed link of `kind`.
    pub fn mailed_token(&self, email: &str, kind: EmailKind) -> String {
        let link = self
            .mailer
            .last_link(email, kind)
            .expect("no mail was sent");
        link.rsplit('/').next().unwrap().to_owned()
    }

    /// Sign up, confirm and return a random email ready to log in with
    /// `VALID_PASSWORD`.
    pub async fn confirmed_user(&self) -> String {
        let email = get_random_email();
        let response = self.signup(&random_username(), &email, VALID_PASSWORD).await;
        assert_eq!(response.status().as_u16(), 201);

        let token = self.mailed_token(&email, EmailKind::Confirm);
        assert_eq!(self.confirm_email(&token).await.status().as_u16(), 200);
        email
    }

    pub async fn login_tokens(&self, email: &str) -> IssuedTokens {
        let response = self.login(email, VALID_PASSWORD).await;
        assert_eq!(response.status().as_u16(), 200);
        response.json().await.expect("login body")
    }
}

pub fn get_random_email() -> String {
    format!("{}@example.com", Uuid::new_v4())
}

pub fn random_username() -> String {
    format!("user-{}", Uuid::new_v4().simple())
}

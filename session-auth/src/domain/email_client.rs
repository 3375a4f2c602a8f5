use thiserror::Error;

use crate::domain::Email;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailKind {
    Confirm,
    ResetPassword,
}

impl EmailKind {
    pub fn subject(&self) -> &'static str {
        match self {
            EmailKind::Confirm => "Confirm your email",
            EmailKind::ResetPassword => "Reset your password",
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum EmailError {
    #[error("email delivery failed: {0}")]
    Delivery(String),
}

#[async_trait::async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        kind: EmailKind,
        recipient: &Email,
        username: &str,
        link: &str,
    ) -> Result<(), EmailError>;
}

use std::sync::{Mutex, PoisonError};

use log::info;

use crate::domain::{Email, EmailClient, EmailError, EmailKind};

#[derive(Clone, Debug, PartialEq)]
pub struct SentEmail {
    pub kind: EmailKind,
    pub recipient: Email,
    pub username: String,
    pub link: String,
}

/// Mail client that logs and records instead of delivering.
#[derive(Default)]
pub struct MockEmailClient {
    sent: Mutex<Vec<SentEmail>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent link of `kind` sent to `recipient`.
    pub fn last_link(&self, recipient: &str, kind: EmailKind) -> Option<String> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|mail| mail.kind == kind && mail.recipient.as_ref() == recipient)
            .map(|mail| mail.link.clone())
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        kind: EmailKind,
        recipient: &Email,
        username: &str,
        link: &str,
    ) -> Result<(), EmailError> {
        info!("sending \"{}\" mail to {}", kind.subject(), recipient);
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SentEmail {
                kind,
                recipient: recipient.clone(),
                username: username.to_owned(),
                link: link.to_owned(),
            });
        Ok(())
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::TransportError;
use crate::types::Outcome;

pub const SUBJECT_BREACH: &str = "Password Check Result: Weak Password Found!";
pub const SUBJECT_STRENGTH: &str = "Password Strength Report";

const STRENGTH_BODY: &str = "PASSWORD STRENGTH REPORT

Congratulations! Your password wasn't found in known breach databases.

Security recommendations:
1. Use passwords with 12+ characters
2. Combine letters, numbers & symbols
3. Never reuse passwords across sites
4. Enable two-factor authentication

Stay protected!
";

/// One outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivery backend for outbound messages.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, message: &Message) -> Result<(), TransportError>;
}

/// Writes messages to the log instead of delivering them.
#[derive(Debug, Default, Clone)]
pub struct LogTransport;

#[async_trait]
impl Transport for LogTransport {
    async fn send(&self, message: &Message) -> Result<(), TransportError> {
        info!(
            from = %message.from,
            to = %message.to,
            subject = %message.subject,
            "email notification:\n{}",
            message.body
        );
        Ok(())
    }
}

pub fn breach_body(found: &str, suggestions: &[String]) -> String {
    format!(
        "SECURITY ALERT

Your password was found in our breach database!
Never use: {found}

Try one of these {count} strong passwords instead:
{list}

Password security tips:
- Use a password manager
- Enable 2FA everywhere
- Never reuse passwords
- Minimum 12 characters with mixed characters

Stay secure!
",
        count = suggestions.len(),
        list = suggestions.join("\n"),
    )
}

pub fn strength_body() -> &'static str {
    STRENGTH_BODY
}

/// Renders outcome emails and hands them to a [`Transport`].
#[derive(Clone)]
pub struct Notifier {
    transport: Arc<dyn Transport>,
    sender: String,
    operator: Option<String>,
}

impl Notifier {
    pub fn new(
        transport: Arc<dyn Transport>,
        sender: impl Into<String>,
        operator: Option<String>,
    ) -> Self {
        Self {
            transport,
            sender: sender.into(),
            operator: operator.filter(|o| !o.trim().is_empty()),
        }
    }

    /// Send the outcome email to `recipient`.
    ///
    /// For a breach the operator address (if any) also gets a short alert
    /// with the matched value. Only a failure of the user email is returned.
    pub async fn notify(
        &self,
        recipient: &str,
        outcome: &Outcome,
        suggestions: &[String],
    ) -> Result<(), TransportError> {
        match outcome {
            Outcome::Found { value, .. } => {
                let message = Message {
                    from: self.sender.clone(),
                    to: recipient.to_owned(),
                    subject: SUBJECT_BREACH.into(),
                    body: breach_body(value, suggestions),
                };
                self.transport.send(&message).await?;
                info!(%recipient, "breach alert sent");

                if let Some(operator) = &self.operator {
                    let alert = Message {
                        from: self.sender.clone(),
                        to: operator.clone(),
                        subject: format!("ALERT: Password found for {recipient}"),
                        body: format!("Password found for {recipient}\nPassword: {value}\n"),
                    };
                    if let Err(e) = self.transport.send(&alert).await {
                        warn!(%operator, error = %e, "operator alert failed");
                    }
                }
            }
            Outcome::NotFound => {
                let message = Message {
                    from: self.sender.clone(),
                    to: recipient.to_owned(),
                    subject: SUBJECT_STRENGTH.into(),
                    body: STRENGTH_BODY.into(),
                };
                self.transport.send(&message).await?;
                info!(%recipient, "strength report sent");
            }
        }
        Ok(())
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fmt};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 587;

/// Relay address and the administrator account every message is sent from.
///
/// Implicit TLS is never used: the connection starts in plain text and is
/// upgraded with STARTTLS when the relay offers it.
#[derive(Clone, Deserialize)]
pub struct SmtpConfig {
  pub host: String,
  pub port: u16,
  pub admin_email: String,
  pub admin_password: String,
}

impl SmtpConfig {
  pub fn from_env() -> Result<Self> {
    let host = env::var("MAIL_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = match env::var("MAIL_PORT") {
      Ok(value) => value
        .parse()
        .with_context(|| format!("MAIL_PORT is not a valid port: {}", value))?,
      Err(_) => DEFAULT_PORT,
    };
    let admin_email = env::var("MAIL_ADMIN_EMAIL").context("MAIL_ADMIN_EMAIL not set")?;
    let admin_password = env::var("MAIL_ADMIN_PASSWORD").context("MAIL_ADMIN_PASSWORD not set")?;

    Ok(SmtpConfig {
      host,
      port,
      admin_email,
      admin_password,
    })
  }
}

impl Default for SmtpConfig {
  fn default() -> Self {
    SmtpConfig {
      host: DEFAULT_HOST.to_string(),
      port: DEFAULT_PORT,
      admin_email: "".to_string(),
      admin_password: "".to_string(),
    }
  }
}

impl fmt::Debug for SmtpConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SmtpConfig")
      .field("host", &self.host)
      .field("port", &self.port)
      .field("admin_email", &self.admin_email)
      .field("admin_password", &"<redacted>")
      .finish()
  }
}

/// A single outgoing message. Only [`MailSender`](super::MailSender) builds
/// these, so `from` is always the configured administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
  from: String,
  to: String,
  subject: String,
  html_body: String,
}

impl MailMessage {
  pub(crate) fn new(from: String, to: String, subject: String, html_body: String) -> Self {
    MailMessage {
      from,
      to,
      subject,
      html_body,
    }
  }

  pub fn from(&self) -> &str {
    &self.from
  }

  pub fn to(&self) -> &str {
    &self.to
  }

  pub fn subject(&self) -> &str {
    &self.subject
  }

  pub fn html_body(&self) -> &str {
    &self.html_body
  }
}

/// The relay's acceptance reply. This is not proof of inbox delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
  pub code: u16,
  pub message: Vec<String>,
}

impl DeliveryReceipt {
  pub fn new(code: u16, message: Vec<String>) -> Self {
    DeliveryReceipt { code, message }
  }
}

impl From<lettre::transport::smtp::response::Response> for DeliveryReceipt {
  fn from(response: lettre::transport::smtp::response::Response) -> Self {
    DeliveryReceipt {
      code: response.code().into(),
      message: response.message().map(str::to_string).collect(),
    }
  }
}

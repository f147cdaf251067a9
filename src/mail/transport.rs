use async_trait::async_trait;
use lettre::{
  message::{header::ContentType, Mailbox},
  transport::smtp::{
    authentication::Credentials,
    client::{Tls, TlsParameters},
  },
  AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use super::{DeliveryReceipt, MailError, MailMessage, SmtpConfig};

/// Submits a composed message to a mail relay.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
  async fn send(&self, message: &MailMessage) -> Result<DeliveryReceipt, MailError>;
}

/// SMTP transport that opens a new connection for every message.
#[derive(Debug, Clone)]
pub struct SmtpTransport {
  smtp_config: SmtpConfig,
}

impl SmtpTransport {
  pub fn new(smtp_config: SmtpConfig) -> Self {
    SmtpTransport { smtp_config }
  }

  fn build_message(message: &MailMessage) -> Result<Message, MailError> {
    let from: Mailbox = message.from().parse()?;
    let to: Mailbox = message.to().parse()?;

    let email = Message::builder()
      .from(from)
      .to(to)
      .subject(message.subject())
      .header(ContentType::TEXT_HTML)
      .body(message.html_body().to_string())?;

    Ok(email)
  }

  fn connect(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
    let creds = Credentials::new(
      self.smtp_config.admin_email.clone(),
      self.smtp_config.admin_password.clone(),
    );
    let tls = TlsParameters::new(self.smtp_config.host.clone())?;

    let transporter = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.smtp_config.host)
      .credentials(creds)
      .port(self.smtp_config.port)
      .tls(Tls::Opportunistic(tls))
      .build();

    Ok(transporter)
  }
}

#[async_trait]
impl MailTransport for SmtpTransport {
  async fn send(&self, message: &MailMessage) -> Result<DeliveryReceipt, MailError> {
    let email = Self::build_message(message)?;
    let transporter = self.connect()?;

    let response = transporter.send(email).await?;
    Ok(DeliveryReceipt::from(response))
  }
}

use super::{DeliveryReceipt, MailError, MailMessage, MailTransport, SmtpConfig, SmtpTransport};

/// Sends HTML mail from the configured administrator account.
///
/// The sender address is always [`SmtpConfig::admin_email`]; callers only
/// choose the recipient, subject and body.
pub struct MailSender<T = SmtpTransport> {
  smtp_config: SmtpConfig,
  transport: T,
}

impl MailSender<SmtpTransport> {
  pub fn from_config(smtp_config: SmtpConfig) -> Self {
    let transport = SmtpTransport::new(smtp_config.clone());
    MailSender::new(smtp_config, transport)
  }

  /// Loads `.env` if present, then reads the `MAIL_*` variables.
  pub fn from_env() -> anyhow::Result<Self> {
    dotenvy::dotenv().ok();

    let smtp_config = SmtpConfig::from_env()?;
    Ok(MailSender::from_config(smtp_config))
  }
}

impl<T> MailSender<T>
where
  T: MailTransport,
{
  pub fn new(smtp_config: SmtpConfig, transport: T) -> Self {
    MailSender { smtp_config, transport }
  }

  pub fn smtp_config(&self) -> &SmtpConfig {
    &self.smtp_config
  }

  pub async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<DeliveryReceipt, MailError> {
    let message = MailMessage::new(
      self.smtp_config.admin_email.clone(),
      to.to_string(),
      subject.to_string(),
      html_body.to_string(),
    );

    tracing::debug!(to = %message.to(), subject = %message.subject(), "submitting mail");

    match self.transport.send(&message).await {
      Ok(receipt) => {
        tracing::info!(to = %message.to(), code = receipt.code, "mail accepted for relay");
        Ok(receipt)
      }
      Err(err) => {
        tracing::error!(to = %message.to(), "failed to send mail: {}", err);
        Err(err)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::mail::MockMailTransport;
  use mockall::predicate;

  fn smtp_config() -> SmtpConfig {
    SmtpConfig {
      host: "localhost".to_string(),
      port: 1025,
      admin_email: "admin@example.com".to_string(),
      admin_password: "test_password".to_string(),
    }
  }

  #[tokio::test]
  async fn test_send_success() {
    let mut mock_transport = MockMailTransport::new();
    mock_transport
      .expect_send()
      .with(predicate::eq(MailMessage::new(
        "admin@example.com".to_string(),
        "a@example.com".to_string(),
        "Hi".to_string(),
        "<b>hi</b>".to_string(),
      )))
      .times(1)
      .returning(|_| Ok(DeliveryReceipt::new(250, vec!["2.0.0 Ok: queued".to_string()])));

    let sender = MailSender::new(smtp_config(), mock_transport);

    let receipt = sender.send("a@example.com", "Hi", "<b>hi</b>").await.unwrap();
    assert_eq!(receipt.code, 250);
    assert_eq!(receipt.message, vec!["2.0.0 Ok: queued".to_string()]);
  }

  #[tokio::test]
  async fn test_send_always_uses_admin_sender() {
    let mut mock_transport = MockMailTransport::new();
    mock_transport
      .expect_send()
      .withf(|message: &MailMessage| message.from() == "admin@example.com")
      .times(3)
      .returning(|_| Ok(DeliveryReceipt::new(250, vec![])));

    let sender = MailSender::new(smtp_config(), mock_transport);

    for to in ["admin@example.com", "someone@else.org", "Spoof <spoof@evil.test>"] {
      assert!(sender.send(to, "", "").await.is_ok());
    }
  }

  #[tokio::test]
  async fn test_send_allows_empty_subject() {
    let mut mock_transport = MockMailTransport::new();
    mock_transport
      .expect_send()
      .withf(|message: &MailMessage| message.subject().is_empty())
      .times(1)
      .returning(|_| Ok(DeliveryReceipt::new(250, vec![])));

    let sender = MailSender::new(smtp_config(), mock_transport);
    assert!(sender.send("a@example.com", "", "<p></p>").await.is_ok());
  }

  #[tokio::test]
  async fn test_send_authentication_failure() {
    let mut mock_transport = MockMailTransport::new();
    mock_transport
      .expect_send()
      .times(1)
      .returning(|_| Err(MailError::from_reply(535, "5.7.8 Authentication credentials invalid")));

    let sender = MailSender::new(smtp_config(), mock_transport);

    let err = sender.send("a@example.com", "Hi", "<b>hi</b>").await.unwrap_err();
    assert!(err.is_authentication());
    assert_eq!(err.code(), Some(535));
  }

  #[tokio::test]
  async fn test_send_propagates_error_unchanged() {
    let mut mock_transport = MockMailTransport::new();
    mock_transport
      .expect_send()
      .times(1)
      .returning(|_| Err(MailError::Connection("network error: connection refused".to_string())));

    let sender = MailSender::new(smtp_config(), mock_transport);

    let err = sender.send("a@example.com", "Hi", "<b>hi</b>").await.unwrap_err();
    assert_eq!(err, MailError::Connection("network error: connection refused".to_string()));
  }

  #[test]
  fn test_from_config_keeps_config() {
    let sender = MailSender::from_config(smtp_config());
    assert_eq!(sender.smtp_config().host, "localhost");
    assert_eq!(sender.smtp_config().port, 1025);
    assert_eq!(sender.smtp_config().admin_email, "admin@example.com");
  }

  #[tokio::test]
  #[ignore]
  async fn test_send_live() -> anyhow::Result<()> {
    let sender = MailSender::from_env()?;
    let to = std::env::var("MAIL_TEST_RECIPIENT").expect("MAIL_TEST_RECIPIENT environment variable must be set.");

    let receipt = sender.send(&to, "Test Subject", "<p>Test Body</p>").await?;
    assert!(receipt.code >= 200 && receipt.code < 300);

    Ok(())
  }
}

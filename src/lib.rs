pub mod mail;

pub use mail::{DeliveryReceipt, MailError, MailMessage, MailSender, MailTransport, SmtpConfig, SmtpTransport};

//! Administrator mail sending
//!
//! Sends one HTML message per call from the configured administrator account
//! through an SMTP relay, using lettre for the protocol work.

mod error;
mod service;
mod transport;
mod types;

pub use error::MailError;
pub use service::MailSender;
pub use transport::{MailTransport, SmtpTransport};
pub use types::{DeliveryReceipt, MailMessage, SmtpConfig};

#[cfg(test)]
pub use transport::MockMailTransport;

use std::error::Error;

use lettre::{address::AddressError, transport::smtp};

/// SMTP reply codes a relay uses to refuse the supplied credentials.
const AUTH_FAILURE_CODES: [u16; 4] = [530, 534, 535, 538];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailError {
  InvalidAddress(String),
  InvalidMessage(String),
  Connection(String),
  Authentication { code: u16, message: String },
  Rejected { code: u16, message: String },
}

impl MailError {
  /// Classifies a negative SMTP reply.
  pub fn from_reply(code: u16, message: impl Into<String>) -> Self {
    let message = message.into();
    if AUTH_FAILURE_CODES.contains(&code) {
      MailError::Authentication { code, message }
    } else {
      MailError::Rejected { code, message }
    }
  }

  pub fn is_authentication(&self) -> bool {
    matches!(self, MailError::Authentication { .. })
  }

  /// The SMTP reply code, when the relay answered at all.
  pub fn code(&self) -> Option<u16> {
    match self {
      MailError::Authentication { code, .. } | MailError::Rejected { code, .. } => Some(*code),
      _ => None,
    }
  }
}

impl Error for MailError {}

impl std::fmt::Display for MailError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      MailError::InvalidAddress(msg) => write!(f, "Invalid Address: {}", msg),
      MailError::InvalidMessage(msg) => write!(f, "Invalid Message: {}", msg),
      MailError::Connection(msg) => write!(f, "Connection Error: {}", msg),
      MailError::Authentication { code, message } => write!(f, "Authentication Failed ({}): {}", code, message),
      MailError::Rejected { code, message } => write!(f, "Message Rejected ({}): {}", code, message),
    }
  }
}

impl From<AddressError> for MailError {
  fn from(err: AddressError) -> Self {
    MailError::InvalidAddress(err.to_string())
  }
}

impl From<lettre::error::Error> for MailError {
  fn from(err: lettre::error::Error) -> Self {
    MailError::InvalidMessage(err.to_string())
  }
}

impl From<smtp::Error> for MailError {
  fn from(err: smtp::Error) -> Self {
    match err.status() {
      Some(code) => MailError::from_reply(code.into(), err.to_string()),
      None => MailError::Connection(err.to_string()),
    }
  }
}

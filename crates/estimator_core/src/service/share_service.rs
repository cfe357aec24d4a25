//! Proposal sharing by email.
//!
//! # Responsibility
//! - Assemble the proposal email from a snapshot.
//! - Hand delivery to an `EmailSender` implementation.
//!
//! # Invariants
//! - A blank recipient is rejected before the sender is called.
//! - A blank subject falls back to `DEFAULT_SUBJECT`.

use crate::export::{build_workbook, burn_plan_html, cost_summary_html};
use crate::model::project::ProjectSnapshot;
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_SUBJECT: &str = "Project Proposal Plan";

/// Message handed to the delivery transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposalEmail {
    #[serde(rename = "email")]
    pub recipient: String,
    pub subject: String,
    pub notes: String,
    pub burn_plan_html: String,
    pub cost_summary_html: String,
}

/// Transport failure reported by an `EmailSender`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryError {
    pub message: String,
}

impl DeliveryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for DeliveryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "email delivery failed: {}", self.message)
    }
}

impl Error for DeliveryError {}

/// Delivery transport for proposal emails.
pub trait EmailSender {
    fn send_proposal(&self, email: &ProposalEmail) -> Result<(), DeliveryError>;
    /// Sends a short message proving the transport reaches `recipient`.
    fn send_test(&self, recipient: &str) -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    MissingRecipient,
    Delivery(DeliveryError),
}

impl Display for ShareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRecipient => write!(f, "please enter an email address"),
            Self::Delivery(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ShareError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingRecipient => None,
            Self::Delivery(err) => Some(err),
        }
    }
}

impl From<DeliveryError> for ShareError {
    fn from(value: DeliveryError) -> Self {
        Self::Delivery(value)
    }
}

/// Builds a proposal email from `snapshot` without sending it.
pub fn compose_email(
    recipient: &str,
    subject: &str,
    notes: &str,
    snapshot: &ProjectSnapshot,
) -> Result<ProposalEmail, ShareError> {
    let recipient = recipient.trim();
    if recipient.is_empty() {
        return Err(ShareError::MissingRecipient);
    }
    let subject = match subject.trim() {
        "" => DEFAULT_SUBJECT,
        given => given,
    };
    let workbook = build_workbook(snapshot);

    Ok(ProposalEmail {
        recipient: recipient.to_string(),
        subject: subject.to_string(),
        notes: notes.to_string(),
        burn_plan_html: burn_plan_html(&workbook),
        cost_summary_html: cost_summary_html(&workbook),
    })
}

pub struct ShareService<S: EmailSender> {
    sender: S,
}

impl<S: EmailSender> ShareService<S> {
    pub fn new(sender: S) -> Self {
        Self { sender }
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Composes and sends the proposal; returns the message that was sent.
    pub fn send_proposal(
        &self,
        recipient: &str,
        subject: &str,
        notes: &str,
        snapshot: &ProjectSnapshot,
    ) -> Result<ProposalEmail, ShareError> {
        let email = compose_email(recipient, subject, notes, snapshot)?;
        if let Err(err) = self.sender.send_proposal(&email) {
            warn!("event=share_send module=service status=error error={err}");
            return Err(err.into());
        }
        info!("event=share_send module=service status=ok");
        Ok(email)
    }

    pub fn send_test_email(&self, recipient: &str) -> Result<(), ShareError> {
        let recipient = recipient.trim();
        if recipient.is_empty() {
            return Err(ShareError::MissingRecipient);
        }
        self.sender.send_test(recipient)?;
        info!("event=share_test module=service status=ok");
        Ok(())
    }
}

//! Contact form submissions: parsing, validation and delivery.
//!
//! # Design
//! - Validation collects every field error at once so the form can be
//!   re-rendered with all problems marked.
//! - Error codes double as catalog key suffixes under `contact.errors`.
//! - Delivery goes through the `ContactSink` seam; the default sink only logs.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use orthosite_i18n::LocaleCode;
use regex::Regex;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::error::ContentResult;
use crate::services::find_service;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 254;
const MESSAGE_MIN: usize = 10;
const MESSAGE_MAX: usize = 2_000;
const PHONE_MIN_DIGITS: usize = 7;

static EMAIL_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").ok());
static PHONE_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ().\-]{5,24}$").ok());

/// Raw form payload as posted by the contact page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    /// Full name.
    pub name: String,
    /// Reply address.
    pub email: String,
    /// Optional phone number.
    pub phone: String,
    /// Optional service slug.
    pub service: String,
    /// Free-text message.
    pub message: String,
    /// Checkbox value; browsers send `on` when ticked and omit it otherwise.
    pub consent: Option<String>,
}

/// Form field identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    /// `name`
    Name,
    /// `email`
    Email,
    /// `phone`
    Phone,
    /// `service`
    Service,
    /// `message`
    Message,
    /// `consent`
    Consent,
}

impl ContactField {
    /// Form input name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Service => "service",
            Self::Message => "message",
            Self::Consent => "consent",
        }
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The field is mandatory and was empty.
    Required,
    /// Shorter than the minimum length.
    TooShort {
        /// Minimum number of characters.
        min: usize,
    },
    /// Longer than the maximum length.
    TooLong {
        /// Maximum number of characters.
        max: usize,
    },
    /// Not a plausible email address.
    InvalidEmail,
    /// Not a plausible phone number.
    InvalidPhone,
    /// Not one of the offered services.
    InvalidChoice,
    /// Consent box left unticked.
    ConsentRequired,
}

impl ErrorCode {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidPhone => "invalid_phone",
            Self::InvalidChoice => "invalid_choice",
            Self::ConsentRequired => "consent_required",
        }
    }

    /// Catalog key of the localized error message.
    #[must_use]
    pub fn message_key(self) -> String {
        format!("contact.errors.{}", self.as_str())
    }

    /// Interpolation values for the localized message.
    #[must_use]
    pub fn params(self) -> Vec<(&'static str, String)> {
        match self {
            Self::TooShort { min } => vec![("min", min.to_string())],
            Self::TooLong { max } => vec![("max", max.to_string())],
            _ => Vec::new(),
        }
    }
}

/// A single validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Offending field.
    pub field: ContactField,
    /// Failure reason.
    pub code: ErrorCode,
}

impl ContactSubmission {
    /// Copy with surrounding whitespace stripped from every text field.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            service: self.service.trim().to_string(),
            message: self.message.trim().to_string(),
            consent: self.consent.clone(),
        }
    }

    /// Whether the consent checkbox was ticked.
    #[must_use]
    pub fn has_consent(&self) -> bool {
        self.consent
            .as_deref()
            .is_some_and(|value| matches!(value, "on" | "true" | "yes" | "1"))
    }

    /// Validate every field, returning all failures in form order.
    ///
    /// Values are checked after trimming; an empty result means the
    /// submission can be delivered.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let form = self.normalized();
        let mut errors = Vec::new();
        let mut reject = |field, code| errors.push(FieldError { field, code });

        if let Some(code) = check_length(&form.name, true, NAME_MIN, NAME_MAX) {
            reject(ContactField::Name, code);
        }

        if let Some(code) = check_length(&form.email, true, 0, EMAIL_MAX) {
            reject(ContactField::Email, code);
        } else if !matches_pattern(&EMAIL_PATTERN, &form.email) {
            reject(ContactField::Email, ErrorCode::InvalidEmail);
        }

        if !form.phone.is_empty() {
            let digits = form.phone.chars().filter(char::is_ascii_digit).count();
            if digits < PHONE_MIN_DIGITS || !matches_pattern(&PHONE_PATTERN, &form.phone) {
                reject(ContactField::Phone, ErrorCode::InvalidPhone);
            }
        }

        if !form.service.is_empty() && find_service(&form.service).is_none() {
            reject(ContactField::Service, ErrorCode::InvalidChoice);
        }

        if let Some(code) = check_length(&form.message, true, MESSAGE_MIN, MESSAGE_MAX) {
            reject(ContactField::Message, code);
        }

        if !form.has_consent() {
            reject(ContactField::Consent, ErrorCode::ConsentRequired);
        }

        errors
    }
}

fn check_length(value: &str, required: bool, min: usize, max: usize) -> Option<ErrorCode> {
    let length = value.chars().count();
    if length == 0 {
        return required.then_some(ErrorCode::Required);
    }
    if length < min {
        return Some(ErrorCode::TooShort { min });
    }
    if length > max {
        return Some(ErrorCode::TooLong { max });
    }
    None
}

fn matches_pattern(pattern: &'static Lazy<Option<Regex>>, value: &str) -> bool {
    Lazy::force(pattern)
        .as_ref()
        .is_some_and(|regex| regex.is_match(value))
}

/// Acknowledgement for an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactReceipt {
    /// Unique identifier of the submission.
    pub id: Uuid,
}

impl ContactReceipt {
    /// Fresh receipt with a random identifier.
    #[must_use]
    pub fn issue() -> Self {
        Self { id: Uuid::new_v4() }
    }

    /// Short reference shown to the visitor.
    #[must_use]
    pub fn reference(&self) -> String {
        self.id.simple().to_string()[..8].to_ascii_uppercase()
    }
}

/// Destination for accepted contact submissions.
#[async_trait]
pub trait ContactSink: Send + Sync {
    /// Deliver a validated submission.
    ///
    /// # Errors
    ///
    /// Returns an error when the submission cannot be handed off.
    async fn deliver(
        &self,
        locale: LocaleCode,
        submission: &ContactSubmission,
    ) -> ContentResult<ContactReceipt>;
}

/// Sink that records submissions in the structured log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogContactSink;

#[async_trait]
impl ContactSink for LogContactSink {
    async fn deliver(
        &self,
        locale: LocaleCode,
        submission: &ContactSubmission,
    ) -> ContentResult<ContactReceipt> {
        let receipt = ContactReceipt::issue();
        let email_domain = submission
            .email
            .rsplit_once('@')
            .map_or("", |(_, domain)| domain);
        info!(
            reference = %receipt.reference(),
            id = %receipt.id,
            locale = %locale,
            service = %submission.service,
            email_domain,
            message_chars = submission.message.chars().count(),
            "contact submission accepted"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContactSubmission {
        ContactSubmission {
            name: "Ana Torres".to_string(),
            email: "ana@example.org".to_string(),
            phone: "+1 (503) 555-0100".to_string(),
            service: "orthotics".to_string(),
            message: "I would like to book a brace fitting.".to_string(),
            consent: Some("on".to_string()),
        }
    }

    fn codes(errors: &[FieldError]) -> Vec<(&'static str, &'static str)> {
        errors
            .iter()
            .map(|error| (error.field.as_str(), error.code.as_str()))
            .collect()
    }

    #[test]
    fn valid_submission_passes() {
        assert!(valid().validate().is_empty());
    }

    #[test]
    fn optional_fields_may_be_blank() {
        let submission = ContactSubmission {
            phone: "  ".to_string(),
            service: String::new(),
            ..valid()
        };
        assert!(submission.validate().is_empty());
    }

    #[test]
    fn empty_submission_reports_every_required_field() {
        let errors = ContactSubmission::default().validate();
        assert_eq!(
            codes(&errors),
            vec![
                ("name", "required"),
                ("email", "required"),
                ("message", "required"),
                ("consent", "consent_required"),
            ]
        );
    }

    #[test]
    fn length_limits_carry_parameters() {
        let submission = ContactSubmission {
            name: "A".to_string(),
            message: "x".repeat(MESSAGE_MAX + 1),
            ..valid()
        };
        let errors = submission.validate();
        assert_eq!(
            errors,
            vec![
                FieldError {
                    field: ContactField::Name,
                    code: ErrorCode::TooShort { min: NAME_MIN },
                },
                FieldError {
                    field: ContactField::Message,
                    code: ErrorCode::TooLong { max: MESSAGE_MAX },
                },
            ]
        );
        assert_eq!(errors[0].code.params(), vec![("min", "2".to_string())]);
        assert_eq!(errors[1].code.message_key(), "contact.errors.too_long");
    }

    #[test]
    fn malformed_contact_details_are_rejected() {
        let submission = ContactSubmission {
            email: "ana@localhost".to_string(),
            phone: "call me".to_string(),
            service: "massage".to_string(),
            consent: Some("off".to_string()),
            ..valid()
        };
        assert_eq!(
            codes(&submission.validate()),
            vec![
                ("email", "invalid_email"),
                ("phone", "invalid_phone"),
                ("service", "invalid_choice"),
                ("consent", "consent_required"),
            ]
        );
    }

    #[test]
    fn short_phone_numbers_are_rejected() {
        let submission = ContactSubmission {
            phone: "555-01".to_string(),
            ..valid()
        };
        assert_eq!(codes(&submission.validate()), vec![("phone", "invalid_phone")]);
    }

    #[test]
    fn whitespace_is_trimmed_before_checks() {
        let submission = ContactSubmission {
            name: "   ".to_string(),
            ..valid()
        };
        assert_eq!(codes(&submission.validate()), vec![("name", "required")]);
    }

    #[test]
    fn receipt_reference_is_short_uppercase_hex() {
        let receipt = ContactReceipt::issue();
        let reference = receipt.reference();
        assert_eq!(reference.len(), 8);
        assert!(
            reference
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[tokio::test]
    async fn log_sink_issues_receipts() -> ContentResult<()> {
        let first = LogContactSink.deliver(LocaleCode::Es, &valid()).await?;
        let second = LogContactSink.deliver(LocaleCode::En, &valid()).await?;
        assert_ne!(first.id, second.id);
        Ok(())
    }
}

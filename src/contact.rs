//! Contact form state and the outbound form relay.
//!
//! The relay is a plain HTTP POST of a JSON payload; its reply carries a
//! boolean `success`. Every failure ends up as an error banner that expires
//! on its own, and the form keeps what the visitor typed.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::SiteConfig;

pub const SENT_TEXT: &str = "Thanks! Your message has been sent.";
pub const FAILED_TEXT: &str = "Something went wrong. Please try again.";
pub const INCOMPLETE_TEXT: &str = "Please fill in your name, email and message.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Every field filled in and the email at least shaped like one.
    pub fn is_complete(&self) -> bool {
        let filled = |value: &str| !value.trim().is_empty();
        let email = self.email.trim();
        filled(&self.name)
            && filled(&self.message)
            && email
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn payload(&self, access_key: &str, subject: &str) -> RelayPayload {
        RelayPayload {
            access_key: access_key.to_string(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
            subject: subject.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RelayPayload {
    pub access_key: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub subject: String,
}

#[derive(Deserialize)]
struct RelayReply {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("relay request failed: {0}")]
    Transport(String),
    #[error("relay rejected the submission: {0}")]
    Rejected(String),
    #[error("relay reply was not understood: {0}")]
    Malformed(String),
    #[error("no relay access key is configured")]
    Unconfigured,
}

/// Where submissions go and how they are labelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelaySettings {
    pub endpoint: String,
    pub access_key: Option<String>,
    pub subject: String,
}

impl From<&SiteConfig> for RelaySettings {
    fn from(config: &SiteConfig) -> Self {
        Self {
            endpoint: config.relay_endpoint.clone(),
            access_key: config.relay_key.clone(),
            subject: config.relay_subject.clone(),
        }
    }
}

/// Transport for the relay POST. Implementations return the raw reply body
/// whatever the status code, since the relay reports refusals in the body.
#[allow(async_fn_in_trait)]
pub trait FormRelay {
    async fn post(&self, endpoint: &str, payload: &RelayPayload) -> Result<String, RelayError>;
}

pub fn parse_reply(body: &str) -> Result<(), RelayError> {
    let reply: RelayReply =
        serde_json::from_str(body).map_err(|error| RelayError::Malformed(error.to_string()))?;

    if reply.success {
        Ok(())
    } else {
        Err(RelayError::Rejected(
            reply.message.unwrap_or_else(|| "no reason given".to_string()),
        ))
    }
}

pub async fn deliver(
    relay: &impl FormRelay,
    endpoint: &str,
    payload: &RelayPayload,
) -> Result<(), RelayError> {
    let body = relay.post(endpoint, payload).await?;
    parse_reply(&body)
}

/// Sends a completed form. No retry; the caller decides what to show.
pub async fn send(
    relay: &impl FormRelay,
    settings: &RelaySettings,
    form: &ContactForm,
) -> Result<(), RelayError> {
    let access_key = settings
        .access_key
        .as_deref()
        .ok_or(RelayError::Unconfigured)?;
    let payload = form.payload(access_key, &settings.subject);
    deliver(relay, &settings.endpoint, &payload).await
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: &'static str,
    /// Page clock time, in seconds, after which the banner is gone.
    pub expires_at: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContactState {
    pub form: ContactForm,
    banner: Option<Banner>,
    sending: bool,
    banner_timeout: Duration,
}

impl ContactState {
    pub fn new(banner_timeout: Duration) -> Self {
        Self {
            form: ContactForm::default(),
            banner: None,
            sending: false,
            banner_timeout,
        }
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Starts a submission and returns the snapshot to send. An incomplete
    /// form shows the error banner instead; a second submit while one is in
    /// flight is ignored.
    pub fn begin(&mut self, now: f64) -> Option<ContactForm> {
        if self.sending {
            return None;
        }
        if !self.form.is_complete() {
            self.show(BannerKind::Error, INCOMPLETE_TEXT, now);
            return None;
        }
        self.sending = true;
        self.banner = None;
        Some(self.form.clone())
    }

    pub fn finish(&mut self, outcome: Result<(), RelayError>, now: f64) {
        self.sending = false;
        match outcome {
            Ok(()) => {
                info!("contact_sent");
                self.form.clear();
                self.show(BannerKind::Success, SENT_TEXT, now);
            }
            Err(error) => {
                warn!(%error, "contact_failed");
                self.show(BannerKind::Error, FAILED_TEXT, now);
            }
        }
    }

    /// Drops the banner once its time is up. Returns whether it changed.
    pub fn expire(&mut self, now: f64) -> bool {
        let expired = self
            .banner
            .as_ref()
            .is_some_and(|banner| now >= banner.expires_at);
        if expired {
            self.banner = None;
        }
        expired
    }

    fn show(&mut self, kind: BannerKind, text: &'static str, now: f64) {
        self.banner = Some(Banner {
            kind,
            text,
            expires_at: now + self.banner_timeout.as_secs_f64(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeRelay {
        reply: Result<String, RelayError>,
        seen: RefCell<Vec<(String, RelayPayload)>>,
    }

    impl FakeRelay {
        fn replying(body: &str) -> Self {
            Self {
                reply: Ok(body.to_string()),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(RelayError::Transport("connection reset".to_string())),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.seen.borrow().len()
        }
    }

    impl FormRelay for FakeRelay {
        async fn post(&self, endpoint: &str, payload: &RelayPayload) -> Result<String, RelayError> {
            self.seen
                .borrow_mut()
                .push((endpoint.to_string(), payload.clone()));
            self.reply.clone()
        }
    }

    fn settings() -> RelaySettings {
        RelaySettings {
            endpoint: "https://relay.example/submit".to_string(),
            access_key: Some("key-123".to_string()),
            subject: "Portfolio".to_string(),
        }
    }

    fn filled_state() -> ContactState {
        let mut state = ContactState::new(Duration::from_secs(5));
        state.form = ContactForm::new("A", "a@example.com", "hi");
        state
    }

    async fn submit(state: &mut ContactState, relay: &FakeRelay, now: f64) {
        if let Some(form) = state.begin(now) {
            let outcome = send(relay, &settings(), &form).await;
            state.finish(outcome, now);
        }
    }

    #[tokio::test]
    async fn successful_submission_clears_the_form() {
        let relay = FakeRelay::replying(r#"{"success": true, "message": "Email sent"}"#);
        let mut state = filled_state();

        submit(&mut state, &relay, 10.0).await;

        let banner = state.banner().expect("banner shown");
        assert_eq!(banner.kind, BannerKind::Success);
        assert_eq!(banner.expires_at, 15.0);
        assert_eq!(state.form, ContactForm::default());
        assert!(!state.is_sending());

        let seen = relay.seen.borrow();
        assert_eq!(seen[0].0, "https://relay.example/submit");
        assert_eq!(
            seen[0].1,
            RelayPayload {
                access_key: "key-123".to_string(),
                name: "A".to_string(),
                email: "a@example.com".to_string(),
                message: "hi".to_string(),
                subject: "Portfolio".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn rejected_submission_keeps_the_fields() {
        let relay = FakeRelay::replying(r#"{"success": false}"#);
        let mut state = filled_state();

        submit(&mut state, &relay, 0.0).await;

        assert_eq!(state.banner().map(|banner| banner.kind), Some(BannerKind::Error));
        assert_eq!(state.form, ContactForm::new("A", "a@example.com", "hi"));
    }

    #[tokio::test]
    async fn transport_failure_keeps_the_fields() {
        let relay = FakeRelay::failing();
        let mut state = filled_state();

        submit(&mut state, &relay, 0.0).await;

        assert_eq!(state.banner().map(|banner| banner.text), Some(FAILED_TEXT));
        assert_eq!(state.form.message, "hi");
        assert_eq!(relay.calls(), 1);
    }

    #[tokio::test]
    async fn reply_without_success_is_malformed() {
        let relay = FakeRelay::replying(r#"{"message": "ok"}"#);
        let payload = ContactForm::new("A", "a@example.com", "hi").payload("k", "s");

        let outcome = deliver(&relay, "https://relay.example/submit", &payload).await;
        assert!(matches!(outcome, Err(RelayError::Malformed(_))));

        let outcome = parse_reply("<html>502</html>");
        assert!(matches!(outcome, Err(RelayError::Malformed(_))));
    }

    #[tokio::test]
    async fn missing_access_key_never_reaches_the_relay() {
        let relay = FakeRelay::replying(r#"{"success": true}"#);
        let unconfigured = RelaySettings {
            access_key: None,
            ..settings()
        };
        let form = ContactForm::new("A", "a@example.com", "hi");

        let outcome = send(&relay, &unconfigured, &form).await;

        assert_eq!(outcome, Err(RelayError::Unconfigured));
        assert_eq!(relay.calls(), 0);
    }

    #[tokio::test]
    async fn incomplete_form_shows_an_error_without_sending() {
        let relay = FakeRelay::replying(r#"{"success": true}"#);
        let mut state = ContactState::new(Duration::from_secs(5));
        state.form.set(Field::Name, "A");
        state.form.set(Field::Email, "not-an-email");
        state.form.set(Field::Message, "hi");

        submit(&mut state, &relay, 1.0).await;

        assert_eq!(relay.calls(), 0);
        assert_eq!(state.banner().map(|banner| banner.text), Some(INCOMPLETE_TEXT));
        assert_eq!(state.form.get(Field::Email), "not-an-email");
    }

    #[test]
    fn banner_expires_after_its_timeout() {
        let mut state = filled_state();
        state.finish(Err(RelayError::Rejected("spam".to_string())), 2.0);

        assert!(!state.expire(6.9));
        assert!(state.banner().is_some());
        assert!(state.expire(7.0));
        assert!(state.banner().is_none());
        assert!(!state.expire(8.0));
    }

    #[test]
    fn second_submit_while_sending_is_ignored() {
        let mut state = filled_state();

        assert!(state.begin(0.0).is_some());
        assert!(state.begin(0.1).is_none());
        assert!(state.is_sending());
        assert!(state.banner().is_none());
    }

    #[test]
    fn payload_serializes_with_relay_field_names() {
        let payload = ContactForm::new(" A ", "a@example.com", "hi\n").payload("k", "s");
        let json = serde_json::to_value(&payload).expect("serializable");

        assert_eq!(
            json,
            serde_json::json!({
                "access_key": "k",
                "name": "A",
                "email": "a@example.com",
                "message": "hi",
                "subject": "s",
            })
        );
    }
}

//! Mail transports for result summaries.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use loan_calc_core::notify::{EmailMessage, MailTransport};
use loan_calc_core::{LoanCalcError, LoanCalcResult};

use crate::settings::{MailTransportKind, Settings};

/// Writes each message as a JSON file for a separate delivery agent to pick up.
pub struct OutboxTransport {
    dir: PathBuf,
}

impl OutboxTransport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl MailTransport for OutboxTransport {
    fn send(&self, message: &EmailMessage) -> LoanCalcResult<()> {
        fs::create_dir_all(&self.dir)?;
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.6f");
        let mailbox: String = message
            .to
            .as_str()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let path = self.dir.join(format!("{stamp}-{mailbox}.json"));
        fs::write(&path, serde_json::to_string_pretty(message)?)?;
        tracing::debug!(path = %path.display(), "message written to outbox");
        Ok(())
    }
}

/// POSTs each message as JSON to an HTTP mail relay.
pub struct HttpRelayTransport {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpRelayTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl MailTransport for HttpRelayTransport {
    fn send(&self, message: &EmailMessage) -> LoanCalcResult<()> {
        let response = self
            .client
            .post(&self.url)
            .json(message)
            .send()
            .map_err(|e| LoanCalcError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoanCalcError::Transport(format!(
                "relay {} answered {}",
                self.url, status
            )));
        }
        Ok(())
    }
}

/// The transport named by `mail.transport`.
pub fn build_transport(settings: &Settings) -> Result<Box<dyn MailTransport>, Box<dyn std::error::Error>> {
    match settings.mail.transport {
        MailTransportKind::Outbox => Ok(Box::new(OutboxTransport::new(settings.outbox_dir()))),
        MailTransportKind::Http => {
            let url = settings
                .mail
                .relay_url
                .as_deref()
                .ok_or("mail.relay_url must be set when mail.transport = \"http\"")?;
            Ok(Box::new(HttpRelayTransport::new(url)))
        }
    }
}

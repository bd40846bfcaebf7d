use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::Config;

pub const SMS_QUEUE_CAPACITY: usize = 256;

/// One queued text message.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundSms {
    pub to: String,
    pub body: String,
}

/// Producer half of the SMS queue. Handlers push and move on, delivery
/// happens on the worker task and never feeds back into a response.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::Sender<OutboundSms>,
}

impl Notifier {
    pub fn channel(capacity: usize) -> (Notifier, mpsc::Receiver<OutboundSms>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Notifier { tx }, rx)
    }

    /// Queues a message without waiting for delivery. A full or closed
    /// queue drops the message with a log line.
    pub fn queue(&self, to: &str, body: &str) {
        let sms = OutboundSms {
            to: to.to_string(),
            body: body.to_string(),
        };

        if let Err(e) = self.tx.try_send(sms) {
            warn!(error = %e, "SMS queue rejected message");
        }
    }
}

#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: String,
}

/// Thin client for the Twilio Messages REST endpoint.
#[derive(Clone)]
pub struct TwilioClient {
    http: Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl TwilioClient {
    pub fn new(config: &Config) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            account_sid: config.twilio_account_sid.clone(),
            auth_token: config.twilio_auth_token.clone(),
            from_number: config.twilio_from_number.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.account_sid.is_empty() && !self.auth_token.is_empty() && !self.from_number.is_empty()
    }

    pub async fn send(&self, sms: &OutboundSms) -> anyhow::Result<()> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        );

        let params = [
            ("To", sms.to.as_str()),
            ("From", self.from_number.as_str()),
            ("Body", sms.body.as_str()),
        ];

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Twilio rejected message ({}): {}", status, body.trim());
        }

        let message: TwilioMessageResponse = response.json().await?;
        info!(sid = %message.sid, to = %sms.to, "SMS sent");

        Ok(())
    }
}

/// Drains the queue and hands each message to Twilio. Failures are logged
/// and never surface to the request that queued the message.
pub async fn run_sms_worker(mut rx: mpsc::Receiver<OutboundSms>, client: TwilioClient) {
    while let Some(sms) = rx.recv().await {
        if !client.is_configured() {
            warn!(to = %sms.to, "Twilio credentials missing, dropping SMS");
            continue;
        }

        if let Err(e) = client.send(&sms).await {
            error!(error = %e, to = %sms.to, "Failed to send SMS");
        }
    }
}

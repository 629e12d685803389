//! Background delivery loop and error sink for the Lanxin bot

use crate::payload::{LanxinMessage, LanxinResponse};
use crate::signature::{LanxinSigner, current_timestamp};
use crate::{BotError, Result};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Webhook replies are a small `{code, msg}` object; anything past this is dropped.
const MAX_RESPONSE_BYTES: usize = 64 * 1024;

/// A formatted message in transit to the worker.
///
/// `accepted` fires when the worker dequeues the message.
#[derive(Debug)]
pub(crate) struct Handoff {
    pub content: String,
    pub accepted: oneshot::Sender<()>,
}

/// A failed delivery, as published to failure subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryFailure {
    /// Name of the bot that failed
    pub bot: String,

    /// Remote status code, when the webhook rejected the message
    pub code: Option<i64>,

    /// Rendered error, including the remote message when there is one
    pub message: String,
}

impl DeliveryFailure {
    pub fn new(bot: impl Into<String>, error: &BotError) -> Self {
        Self {
            bot: bot.into(),
            code: error.remote_code(),
            message: error.to_string(),
        }
    }
}

/// Signs, encodes and POSTs messages to one webhook.
#[derive(Debug, Clone)]
pub(crate) struct DeliveryWorker {
    pub webhook: String,
    pub signer: LanxinSigner,
    pub http: reqwest::Client,
}

impl DeliveryWorker {
    /// Consume messages in order until cancelled.
    pub async fn run(
        self,
        mut messages: mpsc::Receiver<Handoff>,
        errors: mpsc::Sender<BotError>,
        shutdown: CancellationToken,
    ) {
        loop {
            let handoff = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                next = messages.recv() => match next {
                    Some(handoff) => handoff,
                    None => break,
                },
            };

            // A caller that stopped waiting saw a failure, so its message is dropped.
            if handoff.accepted.send(()).is_err() {
                debug!(webhook = %self.webhook, "Caller abandoned message, skipping delivery");
                continue;
            }

            if let Err(e) = self.deliver(&handoff.content).await {
                tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => break,
                    sent = errors.send(e) => if sent.is_err() { break },
                }
            }
        }

        debug!(webhook = %self.webhook, "Delivery worker stopped");
    }

    /// Deliver one message. No retries.
    pub async fn deliver(&self, content: &str) -> Result<()> {
        let timestamp = current_timestamp();
        let sign = self.signer.sign(timestamp)?;
        let body = LanxinMessage::text(sign, timestamp, content).to_bytes()?;

        debug!(
            webhook = %self.webhook,
            timestamp,
            bytes = body.len(),
            "Posting message to webhook"
        );

        let response = self
            .http
            .post(&self.webhook)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = read_body(response).await?;
        check_response(status, &body)
    }
}

/// Read at most [`MAX_RESPONSE_BYTES`] of a response body.
async fn read_body(mut response: reqwest::Response) -> Result<Vec<u8>> {
    let mut body = Vec::new();

    while let Some(chunk) = response.chunk().await? {
        let room = MAX_RESPONSE_BYTES - body.len();
        body.extend_from_slice(&chunk[..chunk.len().min(room)]);
        if body.len() >= MAX_RESPONSE_BYTES {
            break;
        }
    }

    Ok(body)
}

/// Decide whether the webhook accepted a message.
///
/// A decodable body with a non-zero code wins over the HTTP status.
pub(crate) fn check_response(status: StatusCode, body: &[u8]) -> Result<()> {
    if let Ok(response) = serde_json::from_slice::<LanxinResponse>(body) {
        response.into_result()?;
    }

    if !status.is_success() {
        return Err(BotError::HttpStatus {
            status: status.as_u16(),
        });
    }

    Ok(())
}

/// Log every delivery error until cancelled.
pub(crate) async fn run_error_sink(
    bot: &'static str,
    mut errors: mpsc::Receiver<BotError>,
    failures: broadcast::Sender<DeliveryFailure>,
    shutdown: CancellationToken,
) {
    loop {
        let err = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            next = errors.recv() => match next {
                Some(err) => err,
                None => break,
            },
        };

        error!(bot, error = %err, code = ?err.remote_code(), "Message delivery failed");

        // No subscribers is fine.
        let _ = failures.send(DeliveryFailure::new(bot, &err));
    }

    debug!(bot, "Error sink stopped");
}
